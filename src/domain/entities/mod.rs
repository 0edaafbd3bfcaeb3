pub mod availability;
pub mod credential;
pub mod notice;
pub mod route;
pub mod session;
