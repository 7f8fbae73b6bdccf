//! Shell session tests over real edge-list files.

use std::io::Write;

use infection_kernel::{CommentPolicy, PartitionSnapshot, Reply, Session, ShellConfig};
use tempfile::NamedTempFile;

fn graph_file(contents: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(contents.as_bytes()).unwrap();
    file.flush().unwrap();
    file
}

fn text(reply: Reply) -> String {
    match reply {
        Reply::Text(s) => s,
        other => panic!("expected text, got {other:?}"),
    }
}

#[test]
fn test_setup_then_query_flow() {
    let file = graph_file("4\n1 2\n2 3\n4\n");
    let mut session = Session::new(ShellConfig::default());

    let setup = text(session.handle_line(&format!("setup {}", file.path().display())));
    assert_eq!(setup, "Done! Processed: 4 vertices, formed: 2 component(s)");

    assert_eq!(
        text(session.handle_line("predict 1")),
        "If you infect user: 1, 3 users will get infected in all"
    );
    text(session.handle_line("infect 1"));
    assert_eq!(text(session.handle_line("version 2")), "2");
    assert_eq!(text(session.handle_line("version 4")), "1");

    let report = text(session.handle_line("groups"));
    assert!(report.starts_with("There are 2 components or groups. Details:\n"));
    assert!(report.contains("Identifier user id: 1, number of connected users: 3: [1, 2, 3]"));
}

#[test]
fn test_bare_setup_uses_configured_path() {
    let file = graph_file("3\n1 2\n");
    let config = ShellConfig {
        graph_path: file.path().to_path_buf(),
        ..ShellConfig::default()
    };
    let mut session = Session::new(config);

    assert_eq!(
        text(session.handle_line("setup")),
        "Done! Processed: 3 vertices, formed: 1 component(s)"
    );
    assert_eq!(session.partition().unwrap().group_count(), 1);
}

#[test]
fn test_failed_setup_keeps_previous_graph() {
    let good = graph_file("4\n1 2\n2 3\n4\n");
    let bad = graph_file("4\n1 9\n");
    let mut session = Session::new(ShellConfig::default());

    text(session.handle_line(&format!("setup {}", good.path().display())));
    text(session.handle_line("infect 4"));

    let reply = text(session.handle_line(&format!("setup {}", bad.path().display())));
    assert!(reply.starts_with("Could not set up from"));
    assert!(reply.contains("outside 1..=4"));

    // Still the first graph, infection intact.
    assert_eq!(text(session.handle_line("version 4")), "2");
    assert_eq!(session.partition().unwrap().group_count(), 2);
}

#[test]
fn test_missing_file_is_reported() {
    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("nope.conf");
    let mut session = Session::new(ShellConfig::default());

    let reply = text(session.handle_line(&format!("setup {}", missing.display())));
    assert!(reply.starts_with("Could not set up from"));
    assert!(session.partition().is_none());
}

#[test]
fn test_comment_policy_from_config() {
    let file = graph_file("4\n1 2\n# stop here\n3 4\n");

    let mut terminate = Session::new(ShellConfig::default());
    text(terminate.handle_line(&format!("setup {}", file.path().display())));
    assert_eq!(
        text(terminate.handle_line("predict 3")),
        "user id 3 does not appear in the loaded graph"
    );

    let mut config = ShellConfig::default();
    config.parse.on_comment = CommentPolicy::Skip;
    let mut skip = Session::new(config);
    text(skip.handle_line(&format!("setup {}", file.path().display())));
    assert_eq!(
        text(skip.handle_line("predict 3")),
        "If you infect user: 3, 2 users will get infected in all"
    );
}

#[test]
fn test_snapshot_survives_reparse() {
    let file = graph_file("5\n1 2\n3 4,5\n");
    let mut session = Session::new(ShellConfig::default());
    text(session.handle_line(&format!("setup {}", file.path().display())));
    text(session.handle_line("infect 5"));

    let snapshot: PartitionSnapshot = serde_json::from_str(&text(session.handle_line("snapshot"))).unwrap();
    assert!(snapshot.verify(session.partition().unwrap()));
    assert_eq!(snapshot.vertex_count, 5);
    assert_eq!(snapshot.groups.iter().map(|g| g.version).max(), Some(2));
}

#[test]
fn test_control_replies() {
    let mut session = Session::new(ShellConfig::default());
    assert_eq!(session.handle_line("cls"), Reply::Clear);
    assert!(text(session.handle_line("help")).contains("limit~:"));
    assert_eq!(session.handle_line("exit"), Reply::Quit);
}
