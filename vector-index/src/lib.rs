mod client;
mod point;

pub use client::*;
pub use point::*;
