pub mod error;
pub mod filter;
pub mod parameters;
pub mod query;
