//! Vertex types for the infection kernel.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::group::GroupId;

/// Version every vertex starts on.
pub const INITIAL_VERSION: u32 = 1;

/// Identifier of a user (vertex) in the coaching graph.
///
/// Ids are dense and 1-based: a graph declaring `N` users accepts `1..=N`.
/// Implements `Ord` so members iterate deterministically.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct VertexId(u32);

impl VertexId {
    /// Create a new VertexId.
    pub fn new(id: u32) -> Self {
        Self(id)
    }

    /// Get the raw id.
    pub fn get(&self) -> u32 {
        self.0
    }

    /// Index into a 1-based dense table.
    pub(crate) fn index(&self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for VertexId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl From<u32> for VertexId {
    fn from(id: u32) -> Self {
        Self(id)
    }
}

/// Per-user state: identity, current version and owning group.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Vertex {
    id: VertexId,
    version: u32,
    group: Option<GroupId>,
}

impl Vertex {
    /// Create a vertex on the initial version with no owning group.
    pub fn new(id: VertexId) -> Self {
        Self {
            id,
            version: INITIAL_VERSION,
            group: None,
        }
    }

    /// The vertex id.
    pub fn id(&self) -> VertexId {
        self.id
    }

    /// Current version.
    pub fn version(&self) -> u32 {
        self.version
    }

    /// The group currently owning this vertex, if any.
    pub fn group(&self) -> Option<GroupId> {
        self.group
    }

    pub(crate) fn set_version(&mut self, version: u32) {
        self.version = version;
    }

    pub(crate) fn set_group(&mut self, group: GroupId) {
        self.group = Some(group);
    }
}
