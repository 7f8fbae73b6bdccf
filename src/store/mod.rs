//! Vertex storage.
//!
//! The [`VertexStore`] owns every [`Vertex`] for the lifetime of a partition.
//! Storage is a dense table indexed by id; slot `0` is never used so that the
//! index equals the user id.

use crate::types::{GroupId, Vertex, VertexId};

/// Error type for vertex lookups.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum VertexError {
    /// Id outside the declared range `1..=max`.
    #[error("invalid user id: {id}, user ids 1 to {max} are available")]
    NoSuchVertex {
        /// The offending id.
        id: u32,
        /// Highest valid id (the declared vertex count).
        max: u32,
    },
    /// Id in range, but no record mentioned it.
    #[error("user id {id} does not appear in the loaded graph")]
    Unassigned {
        /// The offending id.
        id: u32,
    },
    /// A group id that no longer names a live group.
    #[error("group {group} is no longer live")]
    StaleGroup {
        /// The dead group.
        group: GroupId,
    },
}

/// Dense, lazily populated collection of vertices.
#[derive(Debug, Clone, Default)]
pub struct VertexStore {
    slots: Vec<Option<Vertex>>,
    created: usize,
}

impl VertexStore {
    /// Create a store accepting ids `1..=declared`.
    pub fn new(declared: u32) -> Self {
        Self {
            slots: vec![None; declared as usize + 1],
            created: 0,
        }
    }

    /// Declared vertex count (the highest valid id).
    pub fn declared(&self) -> u32 {
        (self.slots.len().saturating_sub(1)) as u32
    }

    /// Number of vertices created so far.
    pub fn len(&self) -> usize {
        self.created
    }

    /// Whether no vertex has been created yet.
    pub fn is_empty(&self) -> bool {
        self.created == 0
    }

    /// Validate `id` against the declared range.
    ///
    /// The valid range is `1..=declared`, inclusive on both ends; `0` is never
    /// a user id.
    pub fn check(&self, id: u32) -> Result<VertexId, VertexError> {
        let max = self.declared();
        if id == 0 || id > max {
            return Err(VertexError::NoSuchVertex { id, max });
        }
        Ok(VertexId::new(id))
    }

    /// Whether a vertex exists for `id`.
    pub fn contains(&self, id: VertexId) -> bool {
        matches!(self.slots.get(id.index()), Some(Some(_)))
    }

    /// Return the vertex for `id`, creating it on the initial version if unseen.
    pub fn get_or_create(&mut self, id: u32) -> Result<&mut Vertex, VertexError> {
        let id = self.check(id)?;
        let created = &mut self.created;
        Ok(self.slots[id.index()].get_or_insert_with(|| {
            *created += 1;
            Vertex::new(id)
        }))
    }

    /// Look up an existing vertex.
    pub fn lookup(&self, id: u32) -> Result<&Vertex, VertexError> {
        let id = self.check(id)?;
        self.slots[id.index()]
            .as_ref()
            .ok_or(VertexError::Unassigned { id: id.get() })
    }

    pub(crate) fn lookup_mut(&mut self, id: VertexId) -> Result<&mut Vertex, VertexError> {
        let max = self.declared();
        match self.slots.get_mut(id.index()) {
            Some(Some(vertex)) => Ok(vertex),
            Some(None) => Err(VertexError::Unassigned { id: id.get() }),
            None => Err(VertexError::NoSuchVertex { id: id.get(), max }),
        }
    }

    /// All created vertices in ascending id order.
    pub fn iter(&self) -> impl Iterator<Item = &Vertex> {
        self.slots.iter().filter_map(|slot| slot.as_ref())
    }
}
