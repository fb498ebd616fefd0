//! Route table: party id to network entry point

use crate::core::{
    document::Document,
    error::ModelError,
    merge::tree_merge,
    party::Party,
};
use serde_json::{Map, Value};
use tracing::debug;

/// Key holding the party routes inside the resource
pub const ROUTE_TABLE_KEY: &str = "route_table";

/// An owned copy of a cluster's route table.
///
/// Loading copies the external structure in, and `to_dict` hands a copy back
/// out, so changes only reach the store through an explicit write.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RouteTable {
    /// party id -> entry point
    routes: Map<String, Value>,

    /// Other top-level keys of the resource (e.g. `permission`), kept verbatim
    extra: Map<String, Value>,
}

impl RouteTable {
    /// Create an empty route table
    pub fn new() -> Self {
        Self::default()
    }

    /// Copy a loaded resource into an owned table.
    ///
    /// A resource without `route_table` yields an empty table.
    pub fn from_dict(resource: &Value) -> Result<Self, ModelError> {
        let Value::Object(top) = resource else {
            return Err(ModelError::MalformedRouteTable(
                "resource is not a mapping".to_string(),
            ));
        };

        let mut extra = top.clone();
        let routes = match extra.remove(ROUTE_TABLE_KEY) {
            None | Some(Value::Null) => Map::new(),
            Some(Value::Object(routes)) => routes,
            Some(other) => {
                return Err(ModelError::MalformedRouteTable(format!(
                    "'{}' must be a mapping, found {}",
                    ROUTE_TABLE_KEY, other
                )))
            }
        };

        Ok(Self { routes, extra })
    }

    /// Upsert one or more parties
    pub fn add_party<'a, I>(&mut self, parties: I) -> &mut Self
    where
        I: IntoIterator<Item = &'a Party>,
    {
        for party in parties {
            if self.routes.contains_key(party.get_id()) {
                debug!("Replacing entry point of party {}", party.get_id());
            }
            self.routes
                .insert(party.get_id().to_string(), party.to_entry_point());
        }
        self
    }

    /// Same as [`RouteTable::add_party`]
    pub fn update_party<'a, I>(&mut self, parties: I) -> &mut Self
    where
        I: IntoIterator<Item = &'a Party>,
    {
        self.add_party(parties)
    }

    /// Remove parties by id; unknown ids are ignored
    pub fn remove_party<I, S>(&mut self, party_ids: I) -> &mut Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        for party_id in party_ids {
            if self.routes.shift_remove(party_id.as_ref()).is_none() {
                debug!("Party {} not in route table, nothing to remove", party_id.as_ref());
            }
        }
        self
    }

    /// The live party routes
    pub fn get_party(&self) -> &Map<String, Value> {
        &self.routes
    }

    /// Mutable access to the live party routes
    pub fn get_party_mut(&mut self) -> &mut Map<String, Value> {
        &mut self.routes
    }

    pub fn contains(&self, party_id: &str) -> bool {
        self.routes.contains_key(party_id)
    }

    pub fn len(&self) -> usize {
        self.routes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }

    /// Merge a route table fragment (`{"route_table": {...}}`) into this table
    pub fn merge_from(&mut self, fragment: &Value) -> Result<&mut Self, ModelError> {
        let incoming = Self::from_dict(fragment)?;
        let routes = tree_merge(&self.routes, &incoming.routes)?;
        let extra = tree_merge(&self.extra, &incoming.extra)?;
        self.routes = routes;
        self.extra = extra;
        Ok(self)
    }
}

impl Document for RouteTable {
    /// Snapshot for the persistence collaborator
    fn to_dict(&self) -> Value {
        let mut top = Map::new();
        top.insert(ROUTE_TABLE_KEY.to_string(), Value::Object(self.routes.clone()));
        for (key, value) in &self.extra {
            top.insert(key.clone(), value.clone());
        }
        Value::Object(top)
    }
}
