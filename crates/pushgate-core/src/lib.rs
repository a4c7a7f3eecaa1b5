//! # pushgate-core
//!
//! Core crate for PushGate. Contains the configuration schemas, the
//! layered configuration loader, and the unified error system.
//!
//! This crate has **no** internal dependencies on other PushGate crates.

pub mod config;
pub mod error;
pub mod result;

pub use error::AppError;
pub use result::AppResult;
