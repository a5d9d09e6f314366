//! Plexamp client module for controlling the local player

pub mod api;
pub mod models;
pub mod remote;
pub mod timeline;

pub use api::*;
pub use models::*;
pub use remote::*;
