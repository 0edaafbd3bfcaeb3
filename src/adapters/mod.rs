pub mod app_context;
pub mod browser;
pub mod cli;
pub mod clipboard;
pub mod console;
pub mod http;
pub mod storage;
