//! Job configuration (runtime conf) model
//!
//! A [`Config`] is assembled from independently built sections. Only the
//! sections that were set appear in the document, always in the order
//! `initiator, job_parameters, role, role_parameters, algorithm_parameters`.

pub mod algorithm_parameters;
pub mod initiator;
pub mod job_parameters;
pub mod role;
pub mod role_parameters;

pub use algorithm_parameters::{AlgorithmParameters, AlgorithmParametersBuilder};
pub use initiator::{Initiator, InitiatorBuilder, RoleKind};
pub use job_parameters::{JobParameters, JobParametersBuilder, DEFAULT_WORK_MODE};
pub use role::{Role, RoleBuilder};
pub use role_parameters::{DataBlock, RoleParameters, RoleParametersBuilder, RoleSection, TableRef};

use crate::core::document::Document;
use serde_json::{Map, Value};
use tracing::warn;

/// A complete job configuration
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Config {
    pub initiator: Option<Initiator>,
    pub job_parameters: Option<JobParameters>,
    pub role: Option<Role>,
    pub role_parameters: Option<RoleParameters>,
    pub algorithm_parameters: Option<AlgorithmParameters>,
}

impl Config {
    /// Start building a config
    pub fn builder() -> ConfigBuilder {
        ConfigBuilder::new()
    }

    /// Report roles whose data bindings don't line up with their party count.
    ///
    /// By convention every per-party list of a role has one entry per party
    /// of that role. Nothing enforces this; the returned messages are advisory.
    pub fn check_party_counts(&self) -> Vec<String> {
        let (Some(role), Some(role_parameters)) = (&self.role, &self.role_parameters) else {
            return Vec::new();
        };

        let mut warnings = Vec::new();
        for kind in [RoleKind::Guest, RoleKind::Host, RoleKind::Arbiter] {
            let party_count = role.parties(kind).len();
            for block in role_parameters.section(kind).data_blocks() {
                if block.tables.len() != party_count {
                    warnings.push(format!(
                        "{} {} lists {} table(s) for {} {} part{}",
                        kind,
                        block.kind.as_str(),
                        block.tables.len(),
                        party_count,
                        kind,
                        if party_count == 1 { "y" } else { "ies" }
                    ));
                }
            }
        }
        warnings
    }
}

impl Document for Config {
    fn to_dict(&self) -> Value {
        let mut dict = Map::new();

        if let Some(initiator) = &self.initiator {
            dict.insert("initiator".to_string(), initiator.to_dict());
        }
        if let Some(job_parameters) = &self.job_parameters {
            dict.insert("job_parameters".to_string(), job_parameters.to_dict());
        }
        if let Some(role) = &self.role {
            dict.insert("role".to_string(), role.to_dict());
        }
        if let Some(role_parameters) = &self.role_parameters {
            dict.insert("role_parameters".to_string(), role_parameters.to_dict());
        }
        if let Some(algorithm_parameters) = &self.algorithm_parameters {
            dict.insert("algorithm_parameters".to_string(), algorithm_parameters.to_dict());
        }

        Value::Object(dict)
    }
}

/// Builder for [`Config`]
#[derive(Debug, Default)]
pub struct ConfigBuilder {
    config: Config,
}

impl ConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the `initiator` section
    pub fn with_initiator(&mut self, initiator: Initiator) -> &mut Self {
        self.config.initiator = Some(initiator);
        self
    }

    /// Set the `job_parameters` section
    pub fn with_job_parameters(&mut self, job_parameters: JobParameters) -> &mut Self {
        self.config.job_parameters = Some(job_parameters);
        self
    }

    /// Set the `role` section
    pub fn with_role(&mut self, role: Role) -> &mut Self {
        self.config.role = Some(role);
        self
    }

    /// Set the `role_parameters` section
    pub fn with_role_parameters(&mut self, role_parameters: RoleParameters) -> &mut Self {
        self.config.role_parameters = Some(role_parameters);
        self
    }

    /// Set the `algorithm_parameters` section
    pub fn with_algorithm_parameters(&mut self, algorithm_parameters: AlgorithmParameters) -> &mut Self {
        self.config.algorithm_parameters = Some(algorithm_parameters);
        self
    }

    /// Take the accumulated config, leaving the builder empty
    pub fn build(&mut self) -> Config {
        let config = std::mem::take(&mut self.config);
        for warning in config.check_party_counts() {
            warn!("{}", warning);
        }
        config
    }
}
