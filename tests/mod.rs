pub mod common;

pub mod config;
pub mod exception;
pub mod handler;

#[cfg(feature = "serde")]
pub mod serialization;
