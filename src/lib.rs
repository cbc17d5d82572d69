//! TempSync
//!
//! Bootstrap and demo wiring for the onboarding store: two client contexts
//! sharing one in-process bus, persisting through one server.

pub mod bootstrap;
pub mod demo;
