//! Groups: the disjoint-set nodes of a partition.
//!
//! A [`Group`] is a maximal set of users transitively connected by coaching
//! edges. Every member's owner index points back at the group, so resolving a
//! user's group is a single table lookup; merges pay for that by rewriting the
//! owner index of every absorbed member.

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::collections::BTreeSet;
use std::fmt;

use super::vertex::VertexId;
use crate::store::{VertexError, VertexStore};

/// Stable arena index of a group.
///
/// Two groups are the same group iff their `GroupId`s are equal; groups are
/// never compared by content.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GroupId(usize);

impl GroupId {
    pub(crate) fn new(index: usize) -> Self {
        Self(index)
    }

    pub(crate) fn index(&self) -> usize {
        self.0
    }
}

impl fmt::Display for GroupId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "g{}", self.0)
    }
}

/// A connected set of users with one distinguished representative.
#[derive(Debug, Clone)]
pub struct Group {
    id: GroupId,
    identifier: VertexId,
    members: BTreeSet<VertexId>,
}

impl Group {
    /// Create a singleton group around `identifier` and claim it in `vertices`.
    pub(crate) fn create(
        id: GroupId,
        identifier: VertexId,
        vertices: &mut VertexStore,
    ) -> Result<Self, VertexError> {
        let mut group = Self {
            id,
            identifier,
            members: BTreeSet::new(),
        };
        group.add_member(identifier, vertices)?;
        Ok(group)
    }

    /// Arena id of this group.
    pub fn id(&self) -> GroupId {
        self.id
    }

    /// The representative user. Survives merges on the absorbing side.
    pub fn identifier(&self) -> VertexId {
        self.identifier
    }

    /// Number of members.
    pub fn size(&self) -> usize {
        self.members.len()
    }

    /// Members in ascending id order.
    pub fn members(&self) -> impl Iterator<Item = VertexId> + '_ {
        self.members.iter().copied()
    }

    /// Whether `id` is a member.
    pub fn contains(&self, id: VertexId) -> bool {
        self.members.contains(&id)
    }

    /// Current version of the identifier.
    pub fn version(&self, vertices: &VertexStore) -> Result<u32, VertexError> {
        Ok(vertices.lookup(self.identifier.get())?.version())
    }

    /// Add a user with no prior group.
    pub(crate) fn add_member(
        &mut self,
        member: VertexId,
        vertices: &mut VertexStore,
    ) -> Result<(), VertexError> {
        vertices.lookup_mut(member)?.set_group(self.id);
        self.members.insert(member);
        Ok(())
    }

    /// Absorb every member of `other`, repointing each to this group.
    ///
    /// `other` must be a different live group; it is consumed and the caller
    /// drops it from the registry. Costs `O(other.size())`.
    pub(crate) fn absorb(
        &mut self,
        other: Group,
        vertices: &mut VertexStore,
    ) -> Result<(), VertexError> {
        debug_assert_ne!(self.id, other.id);
        for member in other.members {
            self.add_member(member, vertices)?;
        }
        Ok(())
    }

    /// Move every member to the identifier's version plus one.
    ///
    /// Returns the new version.
    pub(crate) fn infect(&self, vertices: &mut VertexStore) -> Result<u32, VertexError> {
        let version = self.version(vertices)? + 1;
        for &member in &self.members {
            vertices.lookup_mut(member)?.set_version(version);
        }
        Ok(version)
    }
}

impl fmt::Display for Group {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Identifier user id: {}, number of connected users: {}: [",
            self.identifier,
            self.size()
        )?;
        for (i, member) in self.members.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{member}")?;
        }
        write!(f, "]")
    }
}

/// Registry ordering: size ascending, then identifier id ascending.
///
/// Identifiers are unique across live groups, so this is a total order.
pub fn registry_order(a: (usize, VertexId), b: (usize, VertexId)) -> Ordering {
    a.0.cmp(&b.0).then_with(|| a.1.cmp(&b.1))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store_with(ids: &[u32]) -> VertexStore {
        let mut store = VertexStore::new(10);
        for &id in ids {
            store.get_or_create(id).unwrap();
        }
        store
    }

    #[test]
    fn test_create_claims_identifier() {
        let mut store = store_with(&[3]);
        let group = Group::create(GroupId::new(0), VertexId::new(3), &mut store).unwrap();

        assert_eq!(group.size(), 1);
        assert!(group.contains(VertexId::new(3)));
        assert_eq!(store.lookup(3).unwrap().group(), Some(GroupId::new(0)));
    }

    #[test]
    fn test_absorb_keeps_identifier_and_repoints() {
        let mut store = store_with(&[1, 2, 5, 6]);
        let mut a = Group::create(GroupId::new(0), VertexId::new(5), &mut store).unwrap();
        a.add_member(VertexId::new(6), &mut store).unwrap();
        let mut b = Group::create(GroupId::new(1), VertexId::new(1), &mut store).unwrap();
        b.add_member(VertexId::new(2), &mut store).unwrap();

        a.absorb(b, &mut store).unwrap();

        assert_eq!(a.identifier(), VertexId::new(5));
        assert_eq!(a.size(), 4);
        for id in [1, 2, 5, 6] {
            assert_eq!(store.lookup(id).unwrap().group(), Some(GroupId::new(0)));
        }
        let members: Vec<u32> = a.members().map(|m| m.get()).collect();
        assert_eq!(members, vec![1, 2, 5, 6]);
    }

    #[test]
    fn test_infect_syncs_to_identifier_plus_one() {
        let mut store = store_with(&[1, 2, 3]);
        let mut g = Group::create(GroupId::new(0), VertexId::new(1), &mut store).unwrap();
        g.add_member(VertexId::new(2), &mut store).unwrap();
        g.add_member(VertexId::new(3), &mut store).unwrap();
        store.lookup_mut(VertexId::new(1)).unwrap().set_version(4);
        store.lookup_mut(VertexId::new(3)).unwrap().set_version(9);

        let version = g.infect(&mut store).unwrap();

        assert_eq!(version, 5);
        for id in [1, 2, 3] {
            assert_eq!(store.lookup(id).unwrap().version(), 5);
        }
    }

    #[test]
    fn test_display() {
        let mut store = store_with(&[1, 2]);
        let mut g = Group::create(GroupId::new(0), VertexId::new(2), &mut store).unwrap();
        g.add_member(VertexId::new(1), &mut store).unwrap();

        assert_eq!(
            g.to_string(),
            "Identifier user id: 2, number of connected users: 2: [1, 2]"
        );
    }

    #[test]
    fn test_registry_order() {
        let small = (1, VertexId::new(9));
        let big = (3, VertexId::new(1));
        let tie = (1, VertexId::new(2));
        assert_eq!(registry_order(small, big), Ordering::Less);
        assert_eq!(registry_order(small, tie), Ordering::Greater);
        assert_eq!(registry_order(tie, tie), Ordering::Equal);
    }
}
