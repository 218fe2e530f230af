//! Domain rules for the city-guide backend.
//!
//! Nothing in this crate performs I/O against the database or the network;
//! it is shared by the repository layer and the HTTP layer.

pub mod catalog;
pub mod error;
pub mod moderation;
pub mod pagination;
pub mod photo;
pub mod search;
pub mod settings;
pub mod types;
