//! CLI command implementations

pub mod generate;
pub mod generate_all;
pub mod inspect;
pub mod json_output;
pub mod validate;
pub mod verify;

mod reporting;
