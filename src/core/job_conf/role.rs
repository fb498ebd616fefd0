//! Participating parties by role

use crate::core::{document::Document, job_conf::RoleKind};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

/// Party ids for each role, in the order they were added
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Role {
    #[serde(default)]
    pub guest: Vec<u64>,
    #[serde(default)]
    pub host: Vec<u64>,
    #[serde(default)]
    pub arbiter: Vec<u64>,
}

impl Role {
    /// Party ids of one role
    pub fn parties(&self, role: RoleKind) -> &[u64] {
        match role {
            RoleKind::Guest => &self.guest,
            RoleKind::Host => &self.host,
            RoleKind::Arbiter => &self.arbiter,
        }
    }
}

impl Document for Role {
    fn to_dict(&self) -> Value {
        json!({
            "guest": self.guest,
            "host": self.host,
            "arbiter": self.arbiter,
        })
    }
}

/// Builder for [`Role`]; ids are appended without deduplication
#[derive(Debug, Default)]
pub struct RoleBuilder {
    role: Role,
}

impl RoleBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append guest party ids
    pub fn with_guest(&mut self, party_ids: impl IntoIterator<Item = u64>) -> &mut Self {
        self.role.guest.extend(party_ids);
        self
    }

    /// Append host party ids
    pub fn with_host(&mut self, party_ids: impl IntoIterator<Item = u64>) -> &mut Self {
        self.role.host.extend(party_ids);
        self
    }

    /// Append arbiter party ids
    pub fn with_arbiter(&mut self, party_ids: impl IntoIterator<Item = u64>) -> &mut Self {
        self.role.arbiter.extend(party_ids);
        self
    }

    /// Take the accumulated roles, leaving the builder empty
    pub fn build(&mut self) -> Role {
        std::mem::take(&mut self.role)
    }
}
