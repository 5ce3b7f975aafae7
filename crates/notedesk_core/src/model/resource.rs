//! Shared resource contract.

use super::validation::ValidationError;
use std::fmt::{Debug, Display, Formatter};

/// Numeric identity assigned by the storage engine on first insert.
pub type ResourceId = i64;

/// Human-facing naming for one resource type.
///
/// Used for not-found messages, log fields and summary wording.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResourceKind {
    pub singular: &'static str,
    pub plural: &'static str,
}

impl ResourceKind {
    pub const NOTE: Self = Self {
        singular: "note",
        plural: "notes",
    };
    pub const USER: Self = Self {
        singular: "user",
        plural: "users",
    };
}

impl Display for ResourceKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.singular)
    }
}

/// A persisted entity managed by one repository/service pair.
///
/// Implementors carry an optional identity plus mutable content fields.
/// `Content` is the caller-supplied part of the record: everything except
/// the identity.
pub trait Resource: Clone + Debug {
    /// Mutable fields accepted on create and update.
    type Content: Clone + Debug;

    const KIND: ResourceKind;

    /// Storage-assigned identity, `None` before first persistence.
    fn id(&self) -> Option<ResourceId>;

    /// Returns a copy carrying `id`. Only repositories call this.
    fn with_id(self, id: ResourceId) -> Self;

    /// Field used by substring search and the uppercase projection.
    fn name(&self) -> &str;

    /// Builds an unpersisted instance from caller content.
    fn from_content(content: Self::Content) -> Self;

    /// Overwrites all content fields, leaving the identity untouched.
    fn apply_content(&mut self, content: Self::Content);

    /// Checks structural constraints on the content fields.
    fn validate(&self) -> Result<(), ValidationError>;
}
