//! Job-wide parameters

use crate::core::document::Document;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Work mode used when none is set
pub const DEFAULT_WORK_MODE: u32 = 1;

/// Parameters applying to the whole job
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobParameters {
    #[serde(default)]
    pub work_mode: Option<u32>,
    #[serde(default)]
    pub job_type: Option<String>,
    #[serde(default)]
    pub model_id: Option<String>,
    #[serde(default)]
    pub model_version: Option<String>,
}

impl JobParameters {
    /// Effective work mode
    pub fn work_mode(&self) -> u32 {
        self.work_mode.unwrap_or(DEFAULT_WORK_MODE)
    }
}

impl Document for JobParameters {
    fn to_dict(&self) -> Value {
        let mut dict = Map::new();
        dict.insert("work_mode".to_string(), Value::from(self.work_mode()));

        let optional = [
            ("job_type", &self.job_type),
            ("model_id", &self.model_id),
            ("model_version", &self.model_version),
        ];
        for (key, value) in optional {
            if let Some(value) = value {
                dict.insert(key.to_string(), Value::from(value.clone()));
            }
        }

        Value::Object(dict)
    }
}

/// Builder for [`JobParameters`]
#[derive(Debug, Default)]
pub struct JobParametersBuilder {
    parameters: JobParameters,
}

impl JobParametersBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the work mode (`0` standalone, `1` cluster)
    pub fn with_work_mode(&mut self, work_mode: u32) -> &mut Self {
        self.parameters.work_mode = Some(work_mode);
        self
    }

    /// Set the job type, e.g. `predict`
    pub fn with_job_type(&mut self, job_type: impl Into<String>) -> &mut Self {
        self.parameters.job_type = Some(job_type.into());
        self
    }

    /// Model id to load for a predict job
    pub fn with_model_id(&mut self, model_id: impl Into<String>) -> &mut Self {
        self.parameters.model_id = Some(model_id.into());
        self
    }

    /// Model version to load for a predict job
    pub fn with_model_version(&mut self, model_version: impl Into<String>) -> &mut Self {
        self.parameters.model_version = Some(model_version.into());
        self
    }

    /// Take the accumulated parameters, leaving the builder empty
    pub fn build(&mut self) -> JobParameters {
        std::mem::take(&mut self.parameters)
    }
}
