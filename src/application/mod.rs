pub mod app_error;
pub mod debounce;
pub mod outcome;
pub mod ports;
pub mod use_cases;
pub mod validators;
