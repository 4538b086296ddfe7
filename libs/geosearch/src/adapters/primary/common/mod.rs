pub mod extract;
pub mod request;
