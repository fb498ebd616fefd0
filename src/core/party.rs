//! Party domain model

use crate::core::document::Document;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

/// Id every exchange is registered under
pub const EXCHANGE_ID: &str = "default";

/// Kind of participant reachable through the route table
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PartyType {
    /// An addressable organisation
    #[default]
    Normal,
    /// The singleton relay bridging networks
    Exchange,
}

/// A federated-learning participant and where to reach it
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Party {
    id: String,
    ip: String,
    port: u16,
    party_type: PartyType,
}

impl Party {
    /// Create a party in one call; exchanges are renamed to `"default"`
    pub fn new(id: impl Into<String>, ip: impl Into<String>, port: u16, party_type: PartyType) -> Self {
        PartyBuilder::new()
            .with_id(id)
            .with_ip(ip)
            .with_port(port)
            .with_type(party_type)
            .build()
    }

    /// Start building a party
    pub fn builder() -> PartyBuilder {
        PartyBuilder::new()
    }

    /// Party id; `"default"` for the exchange
    pub fn get_id(&self) -> &str {
        &self.id
    }

    /// Address the party is reachable at
    pub fn ip(&self) -> &str {
        &self.ip
    }

    /// Port the party is reachable at
    pub fn port(&self) -> u16 {
        self.port
    }

    /// Whether this is a normal party or the exchange
    pub fn party_type(&self) -> PartyType {
        self.party_type
    }

    /// Route table entry for this party: `{"default": [{"ip", "port"}]}`
    pub fn to_entry_point(&self) -> Value {
        json!({
            "default": [
                { "ip": self.ip, "port": self.port }
            ]
        })
    }
}

impl Document for Party {
    fn to_dict(&self) -> Value {
        self.to_entry_point()
    }
}

/// Builder for [`Party`]
#[derive(Debug, Default)]
pub struct PartyBuilder {
    party: Party,
}

impl PartyBuilder {
    /// Create an empty builder
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the party id (ignored for an exchange)
    pub fn with_id(&mut self, id: impl Into<String>) -> &mut Self {
        self.party.id = id.into();
        self
    }

    /// Set the address
    pub fn with_ip(&mut self, ip: impl Into<String>) -> &mut Self {
        self.party.ip = ip.into();
        self
    }

    pub fn with_port(&mut self, port: u16) -> &mut Self {
        self.party.port = port;
        self
    }

    /// Set the party type; `Exchange` forces the id to `"default"` on build
    pub fn with_type(&mut self, party_type: PartyType) -> &mut Self {
        self.party.party_type = party_type;
        self
    }

    /// Take the accumulated party, leaving the builder empty
    pub fn build(&mut self) -> Party {
        let mut party = std::mem::take(&mut self.party);

        if party.party_type == PartyType::Exchange {
            party.id = EXCHANGE_ID.to_string();
        }

        party
    }
}
