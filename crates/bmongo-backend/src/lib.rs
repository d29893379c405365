pub mod api;
pub mod client;
pub mod error;
pub mod wire;

pub use api::*;
pub use client::*;
pub use error::*;
pub use wire::*;
