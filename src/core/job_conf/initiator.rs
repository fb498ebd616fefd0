//! Job initiator

use crate::core::document::Document;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::fmt;

/// A class of job participant
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RoleKind {
    #[default]
    Guest,
    Host,
    Arbiter,
}

impl RoleKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            RoleKind::Guest => "guest",
            RoleKind::Host => "host",
            RoleKind::Arbiter => "arbiter",
        }
    }
}

impl fmt::Display for RoleKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The party that submits the job
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Initiator {
    pub role: RoleKind,
    pub party_id: u64,
}

impl Document for Initiator {
    fn to_dict(&self) -> Value {
        json!({ "role": self.role.as_str(), "party_id": self.party_id })
    }
}

/// Builder for [`Initiator`]
///
/// Unset fields keep their defaults: role `guest` and party id `0`. A job file
/// initiator must additionally be listed under its role (see
/// [`JobFile::validate`](crate::core::config::JobFile::validate)).
#[derive(Debug, Default)]
pub struct InitiatorBuilder {
    initiator: Initiator,
}

impl InitiatorBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Role the initiator submits under (default `guest`)
    pub fn with_role(&mut self, role: RoleKind) -> &mut Self {
        self.initiator.role = role;
        self
    }

    /// Party id of the initiator (default `0`)
    pub fn with_party_id(&mut self, party_id: u64) -> &mut Self {
        self.initiator.party_id = party_id;
        self
    }

    /// Take the accumulated initiator, leaving the builder empty
    pub fn build(&mut self) -> Initiator {
        std::mem::take(&mut self.initiator)
    }
}
