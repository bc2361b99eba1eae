pub mod models;
pub mod ports;
pub mod services;

mod error;
mod promotion_worker;

pub use error::*;
pub use promotion_worker::run_promotion_worker;
