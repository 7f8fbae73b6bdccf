//! Interactive session state and command execution.

use std::path::PathBuf;

use tracing::{info, warn};

use super::command::{Command, CommandError};
use crate::builder::PartitionBuilder;
use crate::config::ShellConfig;
use crate::partition::Partition;
use crate::selector::Selection;
use crate::snapshot::PartitionSnapshot;

/// What the caller should do after a command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reply {
    /// Print this text.
    Text(String),
    /// Clear the screen.
    Clear,
    /// End the session.
    Quit,
}

impl Reply {
    fn text(s: impl Into<String>) -> Self {
        Self::Text(s.into())
    }
}

const NO_GRAPH: &str = "No graph loaded. Run setup first.";

/// Help listing for every command.
pub const HELP: &str = "\
cls:      Clears the screen.
groups:   Prints some details of current connected components. A group's id is denoted by the
          user-id of the user that is its identifier.
help:     Prints this message.
infect:   Accepts the starting user id and that user + all users connected to that user are
          infected. Each infected user's current version is incremented by 1.
limit~:   Accepts a number that denotes the maximum number of users that could be affected.
          The command then comes up with one possible selection of groups that infects
          approximately that many users. Printed groups give the 'approximate limited infection'.
limit=:   Exact limited infection. Not implemented.
predict:  Accepts the starting user id and predicts the number of infected users should the
          starting user id be infected by the infect command.
quit:     Quits the program.
setup:    Sets up the testbed from a file (graph.conf unless a path is given).
snapshot: Prints the current groups and versions as JSON, with a fingerprint.
version:  Accepts a user-id and returns the version that user is on. Versions start at 1 and
          increment by 1 on infection.";

/// One interactive session: configuration plus the current partition.
#[derive(Debug, Clone)]
pub struct Session {
    config: ShellConfig,
    partition: Option<Partition>,
}

impl Session {
    /// Start a session with no graph loaded.
    pub fn new(config: ShellConfig) -> Self {
        Self {
            config,
            partition: None,
        }
    }

    /// Start a session over an existing partition.
    pub fn with_partition(config: ShellConfig, partition: Partition) -> Self {
        Self {
            config,
            partition: Some(partition),
        }
    }

    /// Session configuration.
    pub fn config(&self) -> &ShellConfig {
        &self.config
    }

    /// The loaded partition, if any.
    pub fn partition(&self) -> Option<&Partition> {
        self.partition.as_ref()
    }

    /// Parse and execute one line of input.
    pub fn handle_line(&mut self, line: &str) -> Reply {
        match Command::parse(line) {
            Ok(command) => self.execute(command),
            Err(CommandError::Unknown(_)) => Reply::text(format!(
                "I did not get that, here's some help for you to help me :-)\n{HELP}"
            )),
            Err(e) => Reply::text(e.to_string()),
        }
    }

    /// Execute a parsed command.
    pub fn execute(&mut self, command: Command) -> Reply {
        match command {
            Command::Setup(path) => Reply::text(self.setup(path)),
            Command::Help => Reply::text(HELP),
            Command::Clear => Reply::Clear,
            Command::Quit => Reply::Quit,
            Command::LimitExact(_) => {
                Reply::text("limit= (exact limited infection) is not implemented")
            }
            query => match self.partition.as_mut() {
                Some(partition) => Reply::text(run_query(partition, query)),
                None => Reply::text(NO_GRAPH),
            },
        }
    }

    fn setup(&mut self, path: Option<PathBuf>) -> String {
        let path = path.unwrap_or_else(|| self.config.graph_path.clone());
        match PartitionBuilder::with_options(self.config.parse).build_path(&path) {
            Ok(partition) => {
                let summary = partition.summary().to_string();
                info!(path = %path.display(), "graph loaded");
                self.partition = Some(partition);
                summary
            }
            Err(e) => {
                warn!(path = %path.display(), error = %e, "setup failed");
                format!("Could not set up from {}: {e}", path.display())
            }
        }
    }
}

fn run_query(partition: &mut Partition, query: Command) -> String {
    let result = match query {
        Command::Version(uid) => partition.version(uid).map(|v| v.to_string()),
        Command::Predict(uid) => partition.predict(uid).map(|n| {
            format!("If you infect user: {uid}, {n} users will get infected in all")
        }),
        Command::Infect(uid) => partition.infect(uid).map(|infection| {
            format!(
                "As a result of infecting user: {uid}, {} users are infected\n\
                 These users' new version is: {}",
                infection.infected, infection.version
            )
        }),
        Command::Groups => Ok(partition.groups_report()),
        Command::LimitApprox(limit) => Ok(limit_report(&partition.select_by_limit(limit))),
        Command::Snapshot => PartitionSnapshot::capture(partition).map(|snapshot| {
            snapshot
                .to_json_pretty()
                .unwrap_or_else(|e| format!("snapshot serialization failed: {e}"))
        }),
        other => Ok(format!("{other:?} is not a query")),
    };
    result.unwrap_or_else(|e| e.to_string())
}

fn limit_report(selection: &Selection) -> String {
    if selection.is_empty() {
        return format!(
            "Given limit: {} is too low. No component is infected. Try with higher limit.",
            selection.limit
        );
    }
    let mut report = format!(
        "Given limit: {} infects the following groups:\n",
        selection.limit
    );
    for group in &selection.groups {
        report.push_str(&format!(
            "Component with identifier: {:>10}, size: {:>6}\n",
            group.identifier, group.size
        ));
    }
    report.push_str(&format!("------ Total: {}", selection.total()));
    report
}

#[cfg(test)]
mod tests {
    use super::*;

    fn loaded(input: &str) -> Session {
        let partition = PartitionBuilder::new().build_str(input).unwrap();
        Session::with_partition(ShellConfig::default(), partition)
    }

    fn text(reply: Reply) -> String {
        match reply {
            Reply::Text(s) => s,
            other => panic!("expected text, got {other:?}"),
        }
    }

    #[test]
    fn test_queries_need_a_graph() {
        let mut session = Session::new(ShellConfig::default());
        assert_eq!(text(session.handle_line("version 1")), NO_GRAPH);
        assert_eq!(text(session.handle_line("groups")), NO_GRAPH);
        assert_eq!(session.handle_line("quit"), Reply::Quit);
    }

    #[test]
    fn test_predict_and_infect_messages() {
        let mut session = loaded("4\n1 2\n2 3\n4\n");
        assert_eq!(
            text(session.handle_line("predict 1")),
            "If you infect user: 1, 3 users will get infected in all"
        );
        assert_eq!(
            text(session.handle_line("infect 2")),
            "As a result of infecting user: 2, 3 users are infected\n\
             These users' new version is: 2"
        );
        assert_eq!(text(session.handle_line("version 3")), "2");
        assert_eq!(text(session.handle_line("version 4")), "1");
    }

    #[test]
    fn test_invalid_user_message() {
        let mut session = loaded("4\n1 2\n");
        assert_eq!(
            text(session.handle_line("version 5")),
            "invalid user id: 5, user ids 1 to 4 are available"
        );
    }

    #[test]
    fn test_unread_user_message() {
        let mut session = loaded("4\n1 2\n");
        assert_eq!(
            text(session.handle_line("predict 3")),
            "user id 3 does not appear in the loaded graph"
        );
    }

    #[test]
    fn test_limit_reports() {
        let mut session = loaded("4\n1 2\n2 3\n4\n");
        assert_eq!(
            text(session.handle_line("limit~ 0")),
            "Given limit: 0 is too low. No component is infected. Try with higher limit."
        );
        let report = text(session.handle_line("limit~ 3"));
        assert!(report.starts_with("Given limit: 3 infects the following groups:\n"));
        assert!(report.contains("Component with identifier:          1, size:      3"));
        assert!(report.ends_with("------ Total: 3"));
        assert_eq!(
            text(session.handle_line("limit= 3")),
            "limit= (exact limited infection) is not implemented"
        );
    }

    #[test]
    fn test_unknown_command_prints_help() {
        let mut session = Session::new(ShellConfig::default());
        let reply = text(session.handle_line("dance"));
        assert!(reply.starts_with("I did not get that"));
        assert!(reply.contains("predict:"));
    }

    #[test]
    fn test_snapshot_is_json() {
        let mut session = loaded("3\n1 2\n3\n");
        let json = text(session.handle_line("snapshot"));
        let snapshot: PartitionSnapshot = serde_json::from_str(&json).unwrap();
        assert_eq!(snapshot.group_count, 2);
    }
}
