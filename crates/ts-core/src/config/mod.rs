//! # Pure Data Module - Data Transfer Objects Only
//!
//! Configuration structures and the TOML → DTO mapping. No validation, no
//! policy: empty strings and zeros are valid facts here, and deciding what
//! they mean is the bootstrap layer's job.

pub mod app_config;

pub use app_config::{AppConfig, StorageBackend};
