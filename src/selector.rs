//! Approximate limited selection.
//!
//! Chooses whole groups whose combined size is as large as possible without
//! exceeding a limit. This is a 0/1 knapsack where every group's weight and
//! value are both its size, solved with the textbook subset-sum table and a
//! single back-trace. Groups are never split: a limit that sits between two
//! group sizes is simply under-filled.
//!
//! ## Algorithm
//!
//! 1. Candidates are the prefix of the size-ascending registry with
//!    `size <= limit`; everything after the first oversized group is too big.
//! 2. `best[j][i]` is the largest reachable total `<= i` using the first `j`
//!    candidates. Capacity is capped at the candidates' combined size, since
//!    no larger capacity can change the answer.
//! 3. Walking `j` from `k` down to `1` at the full capacity, candidate `j` was
//!    taken iff `best[j][i] > best[j-1][i]`; taking it shrinks `i` by its size.
//!
//! Time and space are `O(capacity * k)`.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::types::{Group, GroupId, VertexId};

/// One group picked by the selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectedGroup {
    /// Arena id of the group.
    pub group: GroupId,
    /// The group's identifier.
    pub identifier: VertexId,
    /// Group size at selection time.
    pub size: usize,
}

/// Result of a limited selection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Selection {
    /// Requested limit.
    pub limit: usize,
    /// Best total the table found; equals the sum of `groups` sizes.
    pub optimum: usize,
    /// Picked groups, smallest first.
    pub groups: Vec<SelectedGroup>,
}

impl Selection {
    fn empty(limit: usize) -> Self {
        Self {
            limit,
            optimum: 0,
            groups: Vec::new(),
        }
    }

    /// Sum of the picked groups' sizes.
    pub fn total(&self) -> usize {
        self.groups.iter().map(|g| g.size).sum()
    }

    /// Whether nothing fits.
    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// Whether `group` was picked.
    pub fn contains(&self, group: GroupId) -> bool {
        self.groups.iter().any(|g| g.group == group)
    }

    /// Identifiers of the picked groups.
    pub fn identifiers(&self) -> impl Iterator<Item = VertexId> + '_ {
        self.groups.iter().map(|g| g.identifier)
    }
}

/// Subset-sum selector over whole groups.
pub struct GroupSelector;

impl GroupSelector {
    /// Select groups for `limit`.
    ///
    /// `groups` must arrive in registry order (size ascending); the candidate
    /// scan stops at the first group larger than `limit`.
    pub fn select<'a>(groups: impl IntoIterator<Item = &'a Group>, limit: usize) -> Selection {
        let candidates: Vec<SelectedGroup> = groups
            .into_iter()
            .take_while(|g| g.size() <= limit)
            .map(|g| SelectedGroup {
                group: g.id(),
                identifier: g.identifier(),
                size: g.size(),
            })
            .collect();
        debug_assert!(candidates.windows(2).all(|w| w[0].size <= w[1].size));

        if limit == 0 || candidates.is_empty() {
            return Selection::empty(limit);
        }

        let sizes: Vec<usize> = candidates.iter().map(|c| c.size).collect();
        let capacity = limit.min(sizes.iter().sum());
        let best = Table::fill(&sizes, capacity);

        let mut picked = Vec::new();
        let mut i = capacity;
        for j in (1..=sizes.len()).rev() {
            if best.get(j, i) > best.get(j - 1, i) {
                picked.push(candidates[j - 1]);
                i -= sizes[j - 1];
            }
        }
        picked.reverse();

        let optimum = best.get(sizes.len(), capacity);
        debug!(
            limit,
            candidates = sizes.len(),
            capacity,
            optimum,
            picked = picked.len(),
            "limited selection"
        );

        Selection {
            limit,
            optimum,
            groups: picked,
        }
    }
}

/// Row-major `(k + 1) x (capacity + 1)` subset-sum table.
struct Table {
    width: usize,
    cells: Vec<usize>,
}

impl Table {
    fn fill(sizes: &[usize], capacity: usize) -> Self {
        let width = capacity + 1;
        let mut table = Self {
            width,
            cells: vec![0; (sizes.len() + 1) * width],
        };
        for (j, &size) in sizes.iter().enumerate().map(|(j, s)| (j + 1, s)) {
            for i in 1..=capacity {
                let skip = table.get(j - 1, i);
                let value = if size > i {
                    skip
                } else {
                    skip.max(table.get(j - 1, i - size) + size)
                };
                table.cells[j * width + i] = value;
            }
        }
        table
    }

    fn get(&self, j: usize, i: usize) -> usize {
        self.cells[j * self.width + i]
    }
}
