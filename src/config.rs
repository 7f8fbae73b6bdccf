//! Shell configuration.
//!
//! ## Environment
//!
//! - `INFECTION_GRAPH`: edge-list file loaded by `setup` (default: `graph.conf`)
//! - `INFECTION_COMMENTS`: `terminate` or `skip` (default: terminate)
//! - `INFECTION_COMMENT_MARKER`: single comment character (default: `#`)
//!
//! Command line flags in the binaries override the environment.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::parser::{CommentPolicy, ParseOptions};

/// Default edge-list file.
pub const DEFAULT_GRAPH_PATH: &str = "graph.conf";

/// Default prompt.
pub const DEFAULT_PROMPT: &str = "$> ";

/// Configuration for an interactive session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShellConfig {
    /// File read by a bare `setup`.
    pub graph_path: PathBuf,
    /// Edge-list parse options.
    pub parse: ParseOptions,
    /// Prompt printed before each command.
    pub prompt: String,
}

impl Default for ShellConfig {
    fn default() -> Self {
        Self {
            graph_path: PathBuf::from(DEFAULT_GRAPH_PATH),
            parse: ParseOptions::default(),
            prompt: DEFAULT_PROMPT.to_string(),
        }
    }
}

impl ShellConfig {
    /// Defaults overridden by `INFECTION_*` environment variables.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();

        if let Some(path) = lookup("INFECTION_GRAPH").filter(|p| !p.is_empty()) {
            config.graph_path = PathBuf::from(path);
        }

        if let Some(policy) = lookup("INFECTION_COMMENTS") {
            match CommentPolicy::from_str(&policy) {
                Some(policy) => config.parse.on_comment = policy,
                None => warn!(value = %policy, "unknown INFECTION_COMMENTS, keeping default"),
            }
        }

        if let Some(marker) = lookup("INFECTION_COMMENT_MARKER") {
            let mut chars = marker.chars();
            match (chars.next(), chars.next()) {
                (Some(c), None) => config.parse.comment_marker = c,
                _ => warn!(value = %marker, "INFECTION_COMMENT_MARKER must be one character"),
            }
        }

        config
    }
}
