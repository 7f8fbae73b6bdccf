//! Golden tests for the infection kernel.
//!
//! These tests pin the worked examples and check determinism across builds.

use infection_kernel::{
    generate, GraphSpec, Partition, PartitionBuilder, PartitionSnapshot, VertexError, VertexId,
};
use rand::rngs::StdRng;
use rand::SeedableRng;

const EXAMPLE: &str = "4\n1 2\n2 3\n4\n";

// ─────────────────────────────────────────────────────────────────────────────
// Test Helpers
// ─────────────────────────────────────────────────────────────────────────────

fn build(input: &str) -> Partition {
    PartitionBuilder::new().build_str(input).unwrap()
}

fn members(p: &Partition, uid: u32) -> Vec<u32> {
    p.group(uid).unwrap().members().map(|m| m.get()).collect()
}

fn selected_members(p: &Partition, limit: usize) -> Vec<Vec<u32>> {
    p.select_by_limit(limit)
        .identifiers()
        .map(|id| members(p, id.get()))
        .collect()
}

// ─────────────────────────────────────────────────────────────────────────────
// WORKED EXAMPLES
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn test_example_build() {
    let p = build(EXAMPLE);

    assert_eq!(p.vertex_count(), 4);
    assert_eq!(p.group_count(), 2);
    assert_eq!(members(&p, 1), vec![1, 2, 3]);
    assert_eq!(members(&p, 4), vec![4]);
    assert_eq!(p.version(1).unwrap(), 1);
    assert_eq!(
        p.summary().to_string(),
        "Done! Processed: 4 vertices, formed: 2 component(s)"
    );
}

#[test]
fn test_example_predict_then_infect() {
    let mut p = build(EXAMPLE);

    assert_eq!(p.predict(1).unwrap(), 3);
    p.infect(1).unwrap();

    assert_eq!(p.version(1).unwrap(), 2);
    assert_eq!(p.version(2).unwrap(), 2);
    assert_eq!(p.version(3).unwrap(), 2);
    assert_eq!(p.version(4).unwrap(), 1);
}

#[test]
fn test_example_limit_three_picks_the_big_group() {
    let mut p = build(EXAMPLE);
    p.infect(1).unwrap();

    let selection = p.select_by_limit(3);
    assert_eq!(selection.total(), 3);
    assert_eq!(selected_members(&p, 3), vec![vec![1, 2, 3]]);
}

#[test]
fn test_example_limit_zero_is_empty() {
    let p = build(EXAMPLE);
    assert!(p.select_by_limit(0).is_empty());
}

#[test]
fn test_out_of_range_carries_range() {
    let p = build(EXAMPLE);
    assert_eq!(
        p.version(5).unwrap_err(),
        VertexError::NoSuchVertex { id: 5, max: 4 }
    );
}

// ─────────────────────────────────────────────────────────────────────────────
// DETERMINISM TESTS
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn test_same_graph_same_fingerprint_20_runs() {
    let spec = GraphSpec::new(300, 260, 3);
    let input = generate(&spec, &mut StdRng::seed_from_u64(11))
        .unwrap()
        .to_edge_list();

    let ids: Vec<String> = (0..20)
        .map(|_| {
            PartitionSnapshot::capture(&build(&input))
                .unwrap()
                .snapshot_id
        })
        .collect();

    for (i, id) in ids.iter().enumerate() {
        assert_eq!(&ids[0], id, "fingerprint of run {i} differs from run 0");
    }
}

#[test]
fn test_line_order_changes_identifiers_not_groups() {
    let forward = build("6\n1 2\n3 4\n2 3\n5 6\n");
    let backward = build("6\n5 6\n2 3\n3 4\n2 1\n");

    let shape = |p: &Partition| {
        let mut groups: Vec<Vec<u32>> = p
            .groups()
            .map(|g| g.members().map(|m| m.get()).collect())
            .collect();
        groups.sort();
        groups
    };
    assert_eq!(shape(&forward), shape(&backward));
    assert_eq!(forward.group(4).unwrap().identifier(), VertexId::new(1));
    assert_eq!(backward.group(4).unwrap().identifier(), VertexId::new(2));
}

#[test]
fn test_registry_order_breaks_ties_by_identifier() {
    let p = build("8\n7 8\n5 6\n3 4\n1\n2\n");
    let order: Vec<(usize, u32)> = p
        .groups()
        .map(|g| (g.size(), g.identifier().get()))
        .collect();
    assert_eq!(order, vec![(1, 1), (1, 2), (2, 3), (2, 5), (2, 7)]);
}

#[test]
fn test_groups_report_golden() {
    let p = build("5\n2 1\n3 4,5\n");
    assert_eq!(
        p.groups_report(),
        "There are 2 components or groups. Details:\n\
         1) Identifier user id: 2, number of connected users: 2: [1, 2]\n\
         2) Identifier user id: 3, number of connected users: 3: [3, 4, 5]\n"
    );
}

#[test]
fn test_failed_build_keeps_previous_partition() {
    let builder = PartitionBuilder::new();
    let mut current = builder.build_str(EXAMPLE).unwrap();
    current.infect(4).unwrap();

    assert!(builder.build_str("4\n1 x\n").is_err());
    // The held partition is a separate value and keeps its state.
    assert_eq!(current.version(4).unwrap(), 2);
}
