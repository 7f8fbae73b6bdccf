//! Shell command parsing.

use std::path::PathBuf;

/// A parsed shell command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Load a graph from the given file, or the configured default.
    Setup(Option<PathBuf>),
    /// Print a user's version.
    Version(u32),
    /// Infect a user's group.
    Infect(u32),
    /// Predict how many users an infection would reach.
    Predict(u32),
    /// List all groups.
    Groups,
    /// Approximate limited infection.
    LimitApprox(usize),
    /// Exact limited infection (not implemented).
    LimitExact(usize),
    /// Print the partition snapshot as JSON.
    Snapshot,
    /// Print the help text.
    Help,
    /// Clear the screen.
    Clear,
    /// Leave the shell.
    Quit,
}

/// Error type for command parsing.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CommandError {
    /// Unrecognised command word.
    #[error("unknown command: {0:?}")]
    Unknown(String),
    /// Known command, wrong arguments.
    #[error("invalid command, it should be: {usage}, or enter help")]
    Usage {
        /// Expected usage.
        usage: &'static str,
    },
}

impl Command {
    /// Parse one input line. The command word is case-insensitive.
    pub fn parse(line: &str) -> Result<Self, CommandError> {
        let mut words = line.split_whitespace();
        let word = words.next().unwrap_or_default().to_lowercase();
        let args: Vec<&str> = words.collect();

        match word.as_str() {
            "setup" => match args.as_slice() {
                [] => Ok(Self::Setup(None)),
                [path] => Ok(Self::Setup(Some(PathBuf::from(path)))),
                _ => Err(CommandError::Usage { usage: "setup [file]" }),
            },
            "version" => number(&args, "version <number>").map(Self::Version),
            "infect" => number(&args, "infect <number>").map(Self::Infect),
            "predict" => number(&args, "predict <number>").map(Self::Predict),
            "limit~" => number(&args, "limit~ <number>").map(Self::LimitApprox),
            "limit=" => number(&args, "limit= <number>").map(Self::LimitExact),
            "groups" => no_args(&args, "groups", Self::Groups),
            "snapshot" => no_args(&args, "snapshot", Self::Snapshot),
            "help" | "h" => Ok(Self::Help),
            "cls" => Ok(Self::Clear),
            "quit" | "exit" => Ok(Self::Quit),
            _ => Err(CommandError::Unknown(word)),
        }
    }
}

fn number<T: std::str::FromStr>(args: &[&str], usage: &'static str) -> Result<T, CommandError> {
    match args {
        [n] => n.parse().map_err(|_| CommandError::Usage { usage }),
        _ => Err(CommandError::Usage { usage }),
    }
}

fn no_args(args: &[&str], usage: &'static str, command: Command) -> Result<Command, CommandError> {
    if args.is_empty() {
        Ok(command)
    } else {
        Err(CommandError::Usage { usage })
    }
}
