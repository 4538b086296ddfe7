pub mod common;
pub mod honeybee;
