pub mod constants;
pub mod pages;
pub mod test_helpers;
pub mod types;
pub mod validation;
