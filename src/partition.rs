//! The partition: live groups, vertex ownership and the size-ordered registry.
//!
//! Construction is driven record by record through [`Partition::add_record`]
//! (usually via [`crate::PartitionBuilder`]). Users exist only once a record
//! mentions them; an in-range id that was never read has no group and every
//! query on it fails with [`VertexError::Unassigned`].
//!
//! ## Registry
//!
//! Live groups are indexed by a `BTreeSet` of [`RegistryKey`]s ordered by
//! [`registry_order`] (size, then identifier). A key embeds the group's size,
//! so any size change goes through remove → mutate → reinsert; keys are never
//! edited in place.

use std::cmp::Ordering;
use std::collections::BTreeSet;
use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::selector::{GroupSelector, Selection};
use crate::store::{VertexError, VertexStore};
use crate::types::{registry_order, CoachingRecord, Group, GroupId, VertexId};

/// Registry entry for one live group.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct RegistryKey {
    size: usize,
    identifier: VertexId,
    group: GroupId,
}

impl RegistryKey {
    fn of(group: &Group) -> Self {
        Self {
            size: group.size(),
            identifier: group.identifier(),
            group: group.id(),
        }
    }
}

impl PartialOrd for RegistryKey {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for RegistryKey {
    fn cmp(&self, other: &Self) -> Ordering {
        registry_order((self.size, self.identifier), (other.size, other.identifier))
            .then_with(|| self.group.cmp(&other.group))
    }
}

/// Outcome of infecting a user's group.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Infection {
    /// Identifier of the infected group.
    pub identifier: VertexId,
    /// Number of users whose version changed.
    pub infected: usize,
    /// Version every member is now on.
    pub version: u32,
}

/// Counts reported once a partition is built.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BuildSummary {
    /// Declared vertex count.
    pub vertices: u32,
    /// Live groups.
    pub groups: usize,
}

impl fmt::Display for BuildSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Done! Processed: {} vertices, formed: {} component(s)",
            self.vertices, self.groups
        )
    }
}

/// Disjoint-set partition of users into coaching groups.
#[derive(Debug, Clone)]
pub struct Partition {
    vertices: VertexStore,
    groups: Vec<Option<Group>>,
    registry: BTreeSet<RegistryKey>,
}

impl Partition {
    /// Create an empty partition accepting user ids `1..=declared`.
    pub fn new(declared: u32) -> Self {
        Self {
            vertices: VertexStore::new(declared),
            groups: Vec::new(),
            registry: BTreeSet::new(),
        }
    }

    /// Build a partition from already parsed records.
    pub fn from_records<'a>(
        declared: u32,
        records: impl IntoIterator<Item = &'a CoachingRecord>,
    ) -> Result<Self, VertexError> {
        let mut partition = Self::new(declared);
        for record in records {
            partition.add_record(record)?;
        }
        info!(
            vertices = partition.vertices.len(),
            groups = partition.group_count(),
            "partition built from records"
        );
        Ok(partition)
    }

    /// Apply one coaching record.
    ///
    /// Every id is validated before anything is mutated, so a rejected record
    /// leaves the partition untouched.
    pub fn add_record(&mut self, record: &CoachingRecord) -> Result<(), VertexError> {
        for id in record.ids() {
            self.vertices.check(id)?;
        }

        let coach = self.vertices.get_or_create(record.coach)?;
        let (coach_id, coach_group) = (coach.id(), coach.group());
        let group = match coach_group {
            Some(group) => group,
            None => self.create_group(coach_id)?,
        };

        for &sid in &record.students {
            let student = VertexId::new(sid);
            if !self.vertices.contains(student) {
                self.vertices.get_or_create(sid)?;
                self.add_to_group(group, student)?;
                continue;
            }
            match self.vertices.lookup(sid)?.group() {
                Some(other) if other == group => {}
                Some(other) => self.merge(group, other)?,
                None => self.add_to_group(group, student)?,
            }
        }
        Ok(())
    }

    /// Declared vertex count (the highest valid id).
    pub fn vertex_count(&self) -> u32 {
        self.vertices.declared()
    }

    /// Number of live groups.
    pub fn group_count(&self) -> usize {
        self.registry.len()
    }

    /// The underlying vertex store.
    pub fn vertices(&self) -> &VertexStore {
        &self.vertices
    }

    /// Build summary line.
    pub fn summary(&self) -> BuildSummary {
        BuildSummary {
            vertices: self.vertex_count(),
            groups: self.group_count(),
        }
    }

    /// Current version of `uid`.
    pub fn version(&self, uid: u32) -> Result<u32, VertexError> {
        Ok(self.vertices.lookup(uid)?.version())
    }

    /// Number of users that infecting `uid` would infect.
    pub fn predict(&self, uid: u32) -> Result<usize, VertexError> {
        Ok(self.group(uid)?.size())
    }

    /// Infect `uid`'s whole group.
    pub fn infect(&mut self, uid: u32) -> Result<Infection, VertexError> {
        let gid = self.owner(uid)?;
        let group = self.groups[gid.index()]
            .as_ref()
            .ok_or(VertexError::StaleGroup { group: gid })?;
        let version = group.infect(&mut self.vertices)?;
        let infection = Infection {
            identifier: group.identifier(),
            infected: group.size(),
            version,
        };
        info!(
            user = uid,
            identifier = %infection.identifier,
            infected = infection.infected,
            version,
            "group infected"
        );
        Ok(infection)
    }

    /// The group owning `uid`.
    pub fn group(&self, uid: u32) -> Result<&Group, VertexError> {
        let gid = self.owner(uid)?;
        self.groups[gid.index()]
            .as_ref()
            .ok_or(VertexError::StaleGroup { group: gid })
    }

    /// Live groups in registry order (size ascending, then identifier).
    pub fn groups(&self) -> impl Iterator<Item = &Group> + '_ {
        self.registry
            .iter()
            .filter_map(|key| self.groups[key.group.index()].as_ref())
    }

    /// Numbered listing of every live group.
    pub fn groups_report(&self) -> String {
        let mut report = format!(
            "There are {} components or groups. Details:\n",
            self.group_count()
        );
        for (i, group) in self.groups().enumerate() {
            report.push_str(&format!("{}) {}\n", i + 1, group));
        }
        report
    }

    /// Pick whole groups whose total size best fits `limit`.
    pub fn select_by_limit(&self, limit: usize) -> Selection {
        GroupSelector::select(self.groups(), limit)
    }

    fn owner(&self, uid: u32) -> Result<GroupId, VertexError> {
        self.vertices
            .lookup(uid)?
            .group()
            .ok_or(VertexError::Unassigned { id: uid })
    }

    fn create_group(&mut self, identifier: VertexId) -> Result<GroupId, VertexError> {
        let gid = GroupId::new(self.groups.len());
        let group = Group::create(gid, identifier, &mut self.vertices)?;
        self.registry.insert(RegistryKey::of(&group));
        self.groups.push(Some(group));
        Ok(gid)
    }

    fn add_to_group(&mut self, gid: GroupId, member: VertexId) -> Result<(), VertexError> {
        let group = self.groups[gid.index()]
            .as_mut()
            .ok_or(VertexError::StaleGroup { group: gid })?;
        self.registry.remove(&RegistryKey::of(group));
        group.add_member(member, &mut self.vertices)?;
        self.registry.insert(RegistryKey::of(group));
        Ok(())
    }

    /// Fold `absorbed` into `survivor`. Both leave the registry before the
    /// merge; only the survivor returns, at its new size. On error nothing
    /// has changed.
    fn merge(&mut self, survivor: GroupId, absorbed: GroupId) -> Result<(), VertexError> {
        let other = self.groups[absorbed.index()]
            .take()
            .ok_or(VertexError::StaleGroup { group: absorbed })?;
        let group = match self.groups[survivor.index()].as_mut() {
            Some(group) => group,
            None => {
                self.groups[absorbed.index()] = Some(other);
                return Err(VertexError::StaleGroup { group: survivor });
            }
        };

        self.registry.remove(&RegistryKey::of(&other));
        self.registry.remove(&RegistryKey::of(group));
        debug!(
            survivor = %group.identifier(),
            absorbed = %other.identifier(),
            absorbed_size = other.size(),
            "merging groups"
        );
        group.absorb(other, &mut self.vertices)?;
        self.registry.insert(RegistryKey::of(group));
        Ok(())
    }
}
