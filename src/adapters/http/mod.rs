pub mod api_client;
pub mod error_mapping;
