pub mod api_manager;
pub mod route;
