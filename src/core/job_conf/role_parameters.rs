//! Per-role parameter overrides and data bindings

use crate::core::{
    component::DataKind,
    document::Document,
    error::{ensure_same_len, ModelError},
    job_conf::RoleKind,
};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::debug;

/// Reference to an uploaded table
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableRef {
    pub namespace: String,
    pub name: String,
}

/// One data binding added through the builder
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DataBlock {
    pub kind: DataKind,
    pub tables: Vec<TableRef>,
}

/// Everything configured for one role
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RoleSection {
    data_blocks: Vec<DataBlock>,
    modules: Map<String, Value>,
}

impl RoleSection {
    pub fn is_empty(&self) -> bool {
        self.data_blocks.is_empty() && self.modules.is_empty()
    }

    /// Data bindings, at most one per kind
    pub fn data_blocks(&self) -> &[DataBlock] {
        &self.data_blocks
    }

    /// Override recorded for a module, if any
    pub fn module_config(&self, module: &str) -> Option<&Value> {
        self.modules.get(module)
    }

    /// `{"args": {"data": ...}?, <module>: {...}, ...}`
    pub fn to_dict(&self) -> Value {
        let mut dict = Map::new();

        if !self.data_blocks.is_empty() {
            let mut data = Map::new();
            for block in &self.data_blocks {
                let tables = block
                    .tables
                    .iter()
                    .map(|table| {
                        let mut entry = Map::new();
                        entry.insert("namespace".to_string(), Value::from(table.namespace.clone()));
                        entry.insert("name".to_string(), Value::from(table.name.clone()));
                        Value::Object(entry)
                    })
                    .collect();
                data.insert(block.kind.as_str().to_string(), Value::Array(tables));
            }

            let mut args = Map::new();
            args.insert("data".to_string(), Value::Object(data));
            dict.insert("args".to_string(), Value::Object(args));
        }

        for (module, config) in &self.modules {
            dict.insert(module.clone(), config.clone());
        }

        Value::Object(dict)
    }
}

/// Parameters that differ from party to party, keyed by role
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RoleParameters {
    guest: RoleSection,
    host: RoleSection,
    arbiter: RoleSection,
}

impl RoleParameters {
    /// Everything configured for one role
    pub fn section(&self, role: RoleKind) -> &RoleSection {
        match role {
            RoleKind::Guest => &self.guest,
            RoleKind::Host => &self.host,
            RoleKind::Arbiter => &self.arbiter,
        }
    }

    fn section_mut(&mut self, role: RoleKind) -> &mut RoleSection {
        match role {
            RoleKind::Guest => &mut self.guest,
            RoleKind::Host => &mut self.host,
            RoleKind::Arbiter => &mut self.arbiter,
        }
    }
}

impl Document for RoleParameters {
    fn to_dict(&self) -> Value {
        let mut dict = Map::new();
        for role in [RoleKind::Guest, RoleKind::Host, RoleKind::Arbiter] {
            let section = self.section(role);
            if !section.is_empty() {
                dict.insert(role.as_str().to_string(), section.to_dict());
            }
        }
        Value::Object(dict)
    }
}

/// Builder for [`RoleParameters`]
///
/// Paired list arguments must have equal lengths; a mismatch fails before
/// anything is recorded for that call.
#[derive(Debug, Default)]
pub struct RoleParametersBuilder {
    parameters: RoleParameters,
}

impl RoleParametersBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind tables of one data kind for a role.
    ///
    /// A later block of the same kind replaces the earlier one, keeping its position.
    pub fn with_data<N, M, S, T>(
        &mut self,
        role: RoleKind,
        kind: DataKind,
        namespaces: N,
        names: M,
    ) -> Result<&mut Self, ModelError>
    where
        N: IntoIterator<Item = S>,
        M: IntoIterator<Item = T>,
        S: Into<String>,
        T: Into<String>,
    {
        let namespaces: Vec<String> = namespaces.into_iter().map(Into::into).collect();
        let names: Vec<String> = names.into_iter().map(Into::into).collect();
        ensure_same_len("namespaces", &namespaces, "names", &names)?;

        let tables = namespaces
            .into_iter()
            .zip(names)
            .map(|(namespace, name)| TableRef { namespace, name })
            .collect();

        let blocks = &mut self.parameters.section_mut(role).data_blocks;
        match blocks.iter_mut().find(|block| block.kind == kind) {
            Some(block) => {
                debug!("{} {} replaced", role, kind.as_str());
                block.tables = tables;
            }
            None => blocks.push(DataBlock { kind, tables }),
        }
        Ok(self)
    }

    /// Add module parameter overrides for a role.
    ///
    /// A later override of the same module replaces the earlier one.
    pub fn with_module_config<M, S, C>(
        &mut self,
        role: RoleKind,
        modules: M,
        configs: C,
    ) -> Result<&mut Self, ModelError>
    where
        M: IntoIterator<Item = S>,
        S: Into<String>,
        C: IntoIterator<Item = Value>,
    {
        let modules: Vec<String> = modules.into_iter().map(Into::into).collect();
        let configs: Vec<Value> = configs.into_iter().collect();
        ensure_same_len("modules", &modules, "configs", &configs)?;

        let section = self.parameters.section_mut(role);
        for (module, config) in modules.into_iter().zip(configs) {
            if section.modules.insert(module.clone(), config).is_some() {
                debug!("Override for {} of {} replaced", module, role);
            }
        }
        Ok(self)
    }

    /// Bind guest training tables, one per guest party
    pub fn with_guest_train_data<N, M, S, T>(&mut self, namespaces: N, names: M) -> Result<&mut Self, ModelError>
    where
        N: IntoIterator<Item = S>,
        M: IntoIterator<Item = T>,
        S: Into<String>,
        T: Into<String>,
    {
        self.with_data(RoleKind::Guest, DataKind::TrainData, namespaces, names)
    }

    /// Bind guest evaluation tables, one per guest party
    pub fn with_guest_eval_data<N, M, S, T>(&mut self, namespaces: N, names: M) -> Result<&mut Self, ModelError>
    where
        N: IntoIterator<Item = S>,
        M: IntoIterator<Item = T>,
        S: Into<String>,
        T: Into<String>,
    {
        self.with_data(RoleKind::Guest, DataKind::EvalData, namespaces, names)
    }

    /// Bind host training tables, one per host party
    pub fn with_host_train_data<N, M, S, T>(&mut self, namespaces: N, names: M) -> Result<&mut Self, ModelError>
    where
        N: IntoIterator<Item = S>,
        M: IntoIterator<Item = T>,
        S: Into<String>,
        T: Into<String>,
    {
        self.with_data(RoleKind::Host, DataKind::TrainData, namespaces, names)
    }

    /// Bind host evaluation tables, one per host party
    pub fn with_host_eval_data<N, M, S, T>(&mut self, namespaces: N, names: M) -> Result<&mut Self, ModelError>
    where
        N: IntoIterator<Item = S>,
        M: IntoIterator<Item = T>,
        S: Into<String>,
        T: Into<String>,
    {
        self.with_data(RoleKind::Host, DataKind::EvalData, namespaces, names)
    }

    /// Per-party module overrides for the guest
    pub fn with_guest_module_config<M, S, C>(&mut self, modules: M, configs: C) -> Result<&mut Self, ModelError>
    where
        M: IntoIterator<Item = S>,
        S: Into<String>,
        C: IntoIterator<Item = Value>,
    {
        self.with_module_config(RoleKind::Guest, modules, configs)
    }

    /// Per-party module overrides for the host
    pub fn with_host_module_config<M, S, C>(&mut self, modules: M, configs: C) -> Result<&mut Self, ModelError>
    where
        M: IntoIterator<Item = S>,
        S: Into<String>,
        C: IntoIterator<Item = Value>,
    {
        self.with_module_config(RoleKind::Host, modules, configs)
    }

    /// Current accumulated state
    pub fn peek(&self) -> &RoleParameters {
        &self.parameters
    }

    /// Take the accumulated parameters, leaving the builder empty
    pub fn build(&mut self) -> RoleParameters {
        std::mem::take(&mut self.parameters)
    }
}
