mod in_process;
mod noop;

pub use in_process::{InProcessMessageBus, DEFAULT_TOPIC_CAPACITY};
pub use noop::NoopMessageBus;
