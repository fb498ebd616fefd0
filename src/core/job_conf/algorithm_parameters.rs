//! Parameters shared by every party

use crate::core::{
    document::Document,
    error::{ensure_same_len, ModelError},
};
use serde_json::{Map, Value};
use tracing::debug;

/// module name -> parameter object, copied to every party
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AlgorithmParameters {
    modules: Map<String, Value>,
}

impl AlgorithmParameters {
    /// Parameters shared by every party for a module
    pub fn module_config(&self, module: &str) -> Option<&Value> {
        self.modules.get(module)
    }

    pub fn is_empty(&self) -> bool {
        self.modules.is_empty()
    }
}

impl Document for AlgorithmParameters {
    fn to_dict(&self) -> Value {
        Value::Object(self.modules.clone())
    }
}

/// Builder for [`AlgorithmParameters`]
#[derive(Debug, Default)]
pub struct AlgorithmParametersBuilder {
    parameters: AlgorithmParameters,
}

impl AlgorithmParametersBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add module parameters; modules and configs pair up by position
    pub fn with_module_config<M, S, C>(&mut self, modules: M, configs: C) -> Result<&mut Self, ModelError>
    where
        M: IntoIterator<Item = S>,
        S: Into<String>,
        C: IntoIterator<Item = Value>,
    {
        let modules: Vec<String> = modules.into_iter().map(Into::into).collect();
        let configs: Vec<Value> = configs.into_iter().collect();
        ensure_same_len("modules", &modules, "configs", &configs)?;

        for (module, config) in modules.into_iter().zip(configs) {
            if self.parameters.modules.insert(module.clone(), config).is_some() {
                debug!("Algorithm parameters for {} replaced", module);
            }
        }
        Ok(self)
    }

    /// Take the accumulated parameters, leaving the builder empty
    pub fn build(&mut self) -> AlgorithmParameters {
        std::mem::take(&mut self.parameters)
    }
}
