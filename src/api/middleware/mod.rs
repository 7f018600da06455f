// src/api/middleware/mod.rs
pub mod access_log;

pub use access_log::AccessLog;
