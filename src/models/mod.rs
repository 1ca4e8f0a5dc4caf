pub mod common;
pub mod fixture;
