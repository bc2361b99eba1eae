pub mod adapters;
pub mod app_state;
pub mod auth;
pub mod config;
pub mod domain;
pub mod factory;
pub mod router;
mod routes;

pub use app_state::AppState;
