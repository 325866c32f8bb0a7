pub mod classifier;
pub mod context;
pub mod loadout;
pub mod log;
pub mod session;
pub mod stats;
pub mod storage;
pub mod tailer;

// Re-exports for convenience
pub use classifier::{classify, cascade_order};
pub use context::{AppConfig, AppConfigExt, EventHandler, LiveSession};
pub use loadout::{Loadout, LoadoutCostModel, StandardCostModel};
pub use log::*;
pub use session::{LoadoutSnapshot, Session, SessionEvent};
pub use stats::{SessionStats, compute_stats};
pub use storage::{FileSessionStore, SessionStore, StorageError};
pub use tailer::{TailerError, TailerState};
