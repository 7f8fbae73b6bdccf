//! Line-oriented command interpreter.
//!
//! The shell is a thin caller of the partition API. [`Session`] is the only
//! state: it owns the configuration and the current partition, and every
//! command runs against it.

pub mod command;
pub mod session;

pub use command::{Command, CommandError};
pub use session::{Reply, Session, HELP};
