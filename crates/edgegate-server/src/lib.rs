pub mod app_state;
pub mod args;
pub mod backend;
pub mod handlers;
pub mod router;
