//! Pipeline domain model

use crate::core::{component::Component, document::Document};
use serde_json::{Map, Value};
use tracing::debug;

/// Top-level key of the pipeline document
pub const COMPONENTS_KEY: &str = "components";

/// A named graph of components
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Pipeline {
    /// component name -> component body
    components: Map<String, Value>,
}

impl Pipeline {
    /// Start building a pipeline
    pub fn builder() -> PipelineBuilder {
        PipelineBuilder::new()
    }

    /// Get a component body by name
    pub fn component(&self, name: &str) -> Option<&Value> {
        self.components.get(name)
    }

    /// Component names in document order
    pub fn component_names(&self) -> impl Iterator<Item = &str> {
        self.components.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.components.len()
    }

    pub fn is_empty(&self) -> bool {
        self.components.is_empty()
    }
}

impl Document for Pipeline {
    fn to_dict(&self) -> Value {
        let mut top = Map::new();
        top.insert(COMPONENTS_KEY.to_string(), Value::Object(self.components.clone()));
        Value::Object(top)
    }
}

/// Builder for [`Pipeline`]
#[derive(Debug, Default)]
pub struct PipelineBuilder {
    pipeline: Pipeline,
}

impl PipelineBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add components; a repeated name replaces the earlier component
    pub fn with_components<'a, I>(&mut self, components: I) -> &mut Self
    where
        I: IntoIterator<Item = &'a Component>,
    {
        for component in components {
            let previous = self
                .pipeline
                .components
                .insert(component.name().to_string(), component.body());
            if previous.is_some() {
                debug!("Component {} replaced in pipeline", component.name());
            }
        }
        self
    }

    /// Take the accumulated pipeline, leaving the builder empty
    pub fn build(&mut self) -> Pipeline {
        std::mem::take(&mut self.pipeline)
    }
}
