pub mod api_client;
pub mod response;
pub mod session;
