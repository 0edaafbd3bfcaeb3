pub mod account;
pub mod auth;
pub mod dashboard;
pub mod landing;
pub mod session;
