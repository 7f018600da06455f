// src/core/mod.rs
pub mod config;
pub mod tls;

pub use config::{Config, RequestLimits};
