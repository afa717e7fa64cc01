mod log;

pub use tracing_subscriber::util::TryInitError;

pub use self::log::{LogConfig, LogFormatter};
