mod config;
mod live_session;

pub use config::{APP_NAME, AppConfigExt, ConfigError};
pub use live_session::{EventHandler, LiveSession};
pub use pedtrack_types::{AppConfig, TailerSettings};
