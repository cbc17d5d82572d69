//! Platform adapters for TempSync.
//!
//! A browser shares state between tabs through a broadcast channel. Outside a
//! browser the same capability is provided in-process, or switched off.

pub mod bus;

pub use bus::{InProcessMessageBus, NoopMessageBus};
