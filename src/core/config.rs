//! Job description loaded from YAML
//!
//! A job file describes the components of a pipeline and the sections of the
//! job configuration in one place. Rendering drives the builders to produce
//! both documents, then merges any raw override trees on top.

use crate::core::{
    component::{ComponentBuilder, DataKind},
    document::Document,
    job_conf::{
        AlgorithmParametersBuilder, Config, ConfigBuilder, Initiator, InitiatorBuilder,
        JobParameters, JobParametersBuilder, Role, RoleBuilder, RoleKind, RoleParametersBuilder,
        TableRef,
    },
    merge::tree_merge_values,
    pipeline::{Pipeline, PipelineBuilder},
};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::HashSet;
use std::path::Path;

/// Prefix of references to job-level inputs rather than component outputs
const ARGS_PREFIX: &str = "args";

/// Top-level job description
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JobFile {
    /// Job name (informational)
    #[serde(default)]
    pub name: Option<String>,

    /// Pipeline components, in document order
    #[serde(default)]
    pub components: Vec<ComponentConfig>,

    #[serde(default)]
    pub initiator: Option<Initiator>,

    #[serde(default)]
    pub job_parameters: Option<JobParameters>,

    #[serde(default)]
    pub role: Option<Role>,

    #[serde(default)]
    pub role_parameters: Option<RoleParametersConfig>,

    /// module name -> parameters shared by all parties
    #[serde(default)]
    pub algorithm_parameters: Option<Map<String, Value>>,

    /// Raw trees merged over the rendered documents
    #[serde(default)]
    pub overrides: OverridesConfig,
}

/// Component as written in the job file
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComponentConfig {
    pub name: String,
    pub module: String,

    #[serde(default)]
    pub need_deploy: bool,

    #[serde(default)]
    pub input: InputConfig,

    #[serde(default)]
    pub output: OutputConfig,
}

/// Component inputs; when several kinds are given only the highest-precedence one is emitted
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct InputConfig {
    #[serde(default)]
    pub data: Vec<String>,
    #[serde(default)]
    pub train_data: Vec<String>,
    #[serde(default)]
    pub eval_data: Vec<String>,
    #[serde(default)]
    pub model: Vec<String>,
    #[serde(default)]
    pub isometric_model: Vec<String>,
}

impl InputConfig {
    fn all_refs(&self) -> impl Iterator<Item = &String> {
        self.data
            .iter()
            .chain(&self.train_data)
            .chain(&self.eval_data)
            .chain(&self.model)
            .chain(&self.isometric_model)
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OutputConfig {
    #[serde(default)]
    pub data: Vec<String>,
    #[serde(default)]
    pub model: Vec<String>,
}

/// Role parameters as written in the job file
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RoleParametersConfig {
    #[serde(default)]
    pub guest: Option<RoleSectionConfig>,
    #[serde(default)]
    pub host: Option<RoleSectionConfig>,
    #[serde(default)]
    pub arbiter: Option<RoleSectionConfig>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RoleSectionConfig {
    #[serde(default)]
    pub train_data: Option<Vec<TableRef>>,
    #[serde(default)]
    pub eval_data: Option<Vec<TableRef>>,

    /// module name -> per-party parameter lists
    #[serde(default)]
    pub modules: Map<String, Value>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OverridesConfig {
    #[serde(default)]
    pub dsl: Option<Value>,
    #[serde(default)]
    pub conf: Option<Value>,
}

/// Output of [`JobFile::render`]
#[derive(Debug, Clone)]
pub struct RenderedJob {
    pub pipeline: Pipeline,
    pub config: Config,

    /// Pipeline document with overrides applied
    pub dsl: Value,

    /// Job configuration document with overrides applied
    pub conf: Value,
}

impl JobFile {
    /// Load a job description from a YAML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read job file {}", path.display()))?;
        Self::from_yaml(&content)
    }

    /// Parse and validate a job description from a YAML string
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        let job: JobFile = serde_yaml::from_str(yaml)?;
        job.validate()?;
        Ok(job)
    }

    /// Validate the job description
    pub fn validate(&self) -> Result<()> {
        // Component names are unique and modules named
        let mut seen = HashSet::new();
        for component in &self.components {
            if !seen.insert(component.name.as_str()) {
                anyhow::bail!("Duplicate component name: {}", component.name);
            }
            if component.module.trim().is_empty() {
                anyhow::bail!("Component '{}' has no module", component.name);
            }
        }

        // Inputs reference job args or an existing component
        for component in &self.components {
            for reference in component.input.all_refs() {
                let Some((source, _)) = reference.split_once('.') else {
                    anyhow::bail!(
                        "Component '{}' input '{}' is not of the form <source>.<name>",
                        component.name,
                        reference
                    );
                };
                if source != ARGS_PREFIX && !seen.contains(source) {
                    anyhow::bail!(
                        "Component '{}' input '{}' references non-existent component '{}'",
                        component.name,
                        reference,
                        source
                    );
                }
            }
        }

        // The initiator takes part in the job under its role
        if let (Some(initiator), Some(role)) = (&self.initiator, &self.role) {
            if !role.parties(initiator.role).contains(&initiator.party_id) {
                anyhow::bail!(
                    "Initiator party {} is not listed under role '{}'",
                    initiator.party_id,
                    initiator.role
                );
            }
        }

        for (label, tree) in [("dsl", &self.overrides.dsl), ("conf", &self.overrides.conf)] {
            if let Some(tree) = tree {
                if !tree.is_object() {
                    anyhow::bail!("Override '{}' must be a mapping", label);
                }
            }
        }

        Ok(())
    }

    /// Build the pipeline through the component builders
    pub fn to_pipeline(&self) -> Pipeline {
        let mut component_builder = ComponentBuilder::new();
        let components: Vec<_> = self
            .components
            .iter()
            .map(|c| {
                component_builder
                    .with_name(c.name.clone())
                    .with_module(c.module.clone())
                    .with_need_deploy(c.need_deploy)
                    .with_input(DataKind::Data, c.input.data.clone())
                    .with_input(DataKind::TrainData, c.input.train_data.clone())
                    .with_input(DataKind::EvalData, c.input.eval_data.clone())
                    .with_input_model(c.input.model.iter().cloned())
                    .with_input_isometric_model(c.input.isometric_model.iter().cloned())
                    .with_output_data(c.output.data.iter().cloned())
                    .with_output_model(c.output.model.iter().cloned())
                    .build()
            })
            .collect();

        PipelineBuilder::new().with_components(&components).build()
    }

    /// Build the job configuration through the section builders
    pub fn to_config(&self) -> Result<Config> {
        let mut builder = ConfigBuilder::new();

        if let Some(initiator) = &self.initiator {
            builder.with_initiator(
                InitiatorBuilder::new()
                    .with_role(initiator.role)
                    .with_party_id(initiator.party_id)
                    .build(),
            );
        }

        if let Some(parameters) = &self.job_parameters {
            let mut job_builder = JobParametersBuilder::new();
            if let Some(work_mode) = parameters.work_mode {
                job_builder.with_work_mode(work_mode);
            }
            if let Some(job_type) = &parameters.job_type {
                job_builder.with_job_type(job_type.clone());
            }
            if let Some(model_id) = &parameters.model_id {
                job_builder.with_model_id(model_id.clone());
            }
            if let Some(model_version) = &parameters.model_version {
                job_builder.with_model_version(model_version.clone());
            }
            builder.with_job_parameters(job_builder.build());
        }

        if let Some(role) = &self.role {
            builder.with_role(
                RoleBuilder::new()
                    .with_guest(role.guest.iter().copied())
                    .with_host(role.host.iter().copied())
                    .with_arbiter(role.arbiter.iter().copied())
                    .build(),
            );
        }

        if let Some(role_parameters) = &self.role_parameters {
            let mut role_builder = RoleParametersBuilder::new();
            let sections = [
                (RoleKind::Guest, &role_parameters.guest),
                (RoleKind::Host, &role_parameters.host),
                (RoleKind::Arbiter, &role_parameters.arbiter),
            ];
            for (role, section) in sections {
                let Some(section) = section else { continue };
                for (kind, tables) in [
                    (DataKind::TrainData, &section.train_data),
                    (DataKind::EvalData, &section.eval_data),
                ] {
                    if let Some(tables) = tables {
                        role_builder.with_data(
                            role,
                            kind,
                            tables.iter().map(|t| t.namespace.clone()),
                            tables.iter().map(|t| t.name.clone()),
                        )?;
                    }
                }
                role_builder.with_module_config(
                    role,
                    section.modules.keys().cloned(),
                    section.modules.values().cloned(),
                )?;
            }
            builder.with_role_parameters(role_builder.build());
        }

        if let Some(algorithm_parameters) = &self.algorithm_parameters {
            let parameters = AlgorithmParametersBuilder::new()
                .with_module_config(
                    algorithm_parameters.keys().cloned(),
                    algorithm_parameters.values().cloned(),
                )?
                .build();
            builder.with_algorithm_parameters(parameters);
        }

        Ok(builder.build())
    }

    /// Produce both documents with overrides merged in
    pub fn render(&self) -> Result<RenderedJob> {
        let pipeline = self.to_pipeline();
        let config = self.to_config()?;

        let mut dsl = pipeline.to_dict();
        if let Some(overrides) = &self.overrides.dsl {
            dsl = tree_merge_values(&dsl, overrides).context("Failed to merge dsl overrides")?;
        }

        let mut conf = config.to_dict();
        if let Some(overrides) = &self.overrides.conf {
            conf = tree_merge_values(&conf, overrides).context("Failed to merge conf overrides")?;
        }

        Ok(RenderedJob {
            pipeline,
            config,
            dsl,
            conf,
        })
    }
}
