pub mod config;
pub mod tracing;
pub mod wiring;

pub use config::{load_config, load_config_or_default, resolve_config_path};
pub use self::tracing::init_tracing_subscriber;
pub use wiring::{create_onboarding_store, wire_dependencies, AppDeps, WiringError};
