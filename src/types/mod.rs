//! Core types for the infection kernel.

pub mod vertex;
pub mod group;
pub mod record;

pub use vertex::{Vertex, VertexId, INITIAL_VERSION};
pub use group::{Group, GroupId, registry_order};
pub use record::CoachingRecord;
