//! Coaching records: one coach and the students they coach.

use serde::{Deserialize, Serialize};

/// A parsed edge-list line: `coach s1,s2,...`.
///
/// Ids are raw and unvalidated; the partition checks them against the declared
/// range when the record is applied.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CoachingRecord {
    /// The coaching user.
    pub coach: u32,
    /// Users coached by `coach`, in input order.
    pub students: Vec<u32>,
}

impl CoachingRecord {
    /// Create a new record.
    pub fn new(coach: u32, students: Vec<u32>) -> Self {
        Self { coach, students }
    }

    /// A coach with no students.
    pub fn isolated(coach: u32) -> Self {
        Self::new(coach, Vec::new())
    }

    /// All ids mentioned, coach first.
    pub fn ids(&self) -> impl Iterator<Item = u32> + '_ {
        std::iter::once(self.coach).chain(self.students.iter().copied())
    }
}
