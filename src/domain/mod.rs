//! Domain logic - pure rules independent of git and the terminal

pub mod change;
pub mod message;
pub mod selection;
pub mod version;

pub use change::{ChangeEntry, ChangeStatus};
pub use message::CommitMessage;
pub use selection::Exclusions;
pub use version::{Component, IncrementRequest, Version};
