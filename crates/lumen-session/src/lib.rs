pub mod config;
pub mod error;
pub mod events;
pub mod scheduler;
pub mod session;
pub mod stats;

pub use config::{SessionConfig, TriggerPolicy};
pub use error::{Result, SessionError};
pub use events::SessionEvent;
pub use session::{EditorSession, RunOutcome};
pub use stats::RunStats;
