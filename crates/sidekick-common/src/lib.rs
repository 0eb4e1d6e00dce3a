pub mod errors;
pub mod state;
pub mod types;

pub use errors::{ConfigError, SidekickError, StateError};
pub use state::{MemoryState, WorkspaceState};
pub use types::{Message, Role};

pub type Result<T> = std::result::Result<T, SidekickError>;
