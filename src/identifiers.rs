//! Identifier types for wizard sessions and requests

use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Request ID - identifies one service request across its whole lifecycle
///
/// The URL/navigation collaborator hands this to the session controller;
/// the persistence layer keys records by it. Each request identifier owns
/// an independent machine instance and an independent record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RequestId(Uuid);

impl RequestId {
    /// Allocate a new random request ID
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Create from a UUID
    pub fn from_uuid(id: Uuid) -> Self {
        Self(id)
    }

    /// Get the underlying UUID
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for RequestId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for RequestId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<RequestId> for Uuid {
    fn from(id: RequestId) -> Self {
        id.0
    }
}

impl From<&RequestId> for Uuid {
    fn from(id: &RequestId) -> Self {
        id.0
    }
}
