//! Component domain model

use crate::core::document::Document;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::debug;

/// Input data kinds, in the order they take precedence
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DataKind {
    Data,
    TrainData,
    EvalData,
}

impl DataKind {
    pub const PRECEDENCE: [DataKind; 3] = [DataKind::Data, DataKind::TrainData, DataKind::EvalData];

    pub fn as_str(&self) -> &'static str {
        match self {
            DataKind::Data => "data",
            DataKind::TrainData => "train_data",
            DataKind::EvalData => "eval_data",
        }
    }
}

/// Input model kinds, in the order they take precedence
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ModelKind {
    Model,
    IsometricModel,
}

impl ModelKind {
    pub const PRECEDENCE: [ModelKind; 2] = [ModelKind::Model, ModelKind::IsometricModel];

    pub fn as_str(&self) -> &'static str {
        match self {
            ModelKind::Model => "model",
            ModelKind::IsometricModel => "isometric_model",
        }
    }
}

/// A single computation step of a pipeline
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Component {
    name: String,
    module: String,
    need_deploy: bool,

    input_data: Vec<String>,
    input_train_data: Vec<String>,
    input_eval_data: Vec<String>,

    input_model: Vec<String>,
    input_isometric_model: Vec<String>,

    output_data: Vec<String>,
    output_model: Vec<String>,
}

impl Component {
    /// Start building a component
    pub fn builder() -> ComponentBuilder {
        ComponentBuilder::new()
    }

    /// Component name, the key under `components`
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Module type run by this component
    pub fn module(&self) -> &str {
        &self.module
    }

    /// Whether the component is deployed with the model
    pub fn need_deploy(&self) -> bool {
        self.need_deploy
    }

    fn data_refs(&self, kind: DataKind) -> &[String] {
        match kind {
            DataKind::Data => &self.input_data,
            DataKind::TrainData => &self.input_train_data,
            DataKind::EvalData => &self.input_eval_data,
        }
    }

    fn model_refs(&self, kind: ModelKind) -> &[String] {
        match kind {
            ModelKind::Model => &self.input_model,
            ModelKind::IsometricModel => &self.input_isometric_model,
        }
    }

    /// The data kind that will be emitted, if any
    pub fn active_data_kind(&self) -> Option<DataKind> {
        DataKind::PRECEDENCE
            .into_iter()
            .find(|kind| !self.data_refs(*kind).is_empty())
    }

    /// The model kind that will be emitted, if any
    pub fn active_model_kind(&self) -> Option<ModelKind> {
        ModelKind::PRECEDENCE
            .into_iter()
            .find(|kind| !self.model_refs(*kind).is_empty())
    }

    /// Body of the component, without the name wrapper
    pub fn body(&self) -> Value {
        let mut body = Map::new();
        body.insert("module".to_string(), Value::from(self.module.clone()));

        let mut input = Map::new();
        if let Some(kind) = self.active_data_kind() {
            self.log_shadowed_data(kind);
            let mut data = Map::new();
            data.insert(kind.as_str().to_string(), string_list(self.data_refs(kind)));
            input.insert("data".to_string(), Value::Object(data));
        }
        if let Some(kind) = self.active_model_kind() {
            if kind == ModelKind::Model && !self.input_isometric_model.is_empty() {
                debug!("Component {}: isometric_model shadowed by model", self.name);
            }
            input.insert(kind.as_str().to_string(), string_list(self.model_refs(kind)));
        }
        if !input.is_empty() {
            body.insert("input".to_string(), Value::Object(input));
        }

        let mut output = Map::new();
        if !self.output_data.is_empty() {
            output.insert("data".to_string(), string_list(&self.output_data));
        }
        if !self.output_model.is_empty() {
            output.insert("model".to_string(), string_list(&self.output_model));
        }
        if !output.is_empty() {
            body.insert("output".to_string(), Value::Object(output));
        }

        body.insert("need_deploy".to_string(), Value::Bool(self.need_deploy));
        Value::Object(body)
    }

    fn log_shadowed_data(&self, active: DataKind) {
        for kind in DataKind::PRECEDENCE {
            if kind != active && !self.data_refs(kind).is_empty() {
                debug!(
                    "Component {}: {} shadowed by {}",
                    self.name,
                    kind.as_str(),
                    active.as_str()
                );
            }
        }
    }
}

impl Document for Component {
    fn to_dict(&self) -> Value {
        let mut wrapper = Map::new();
        wrapper.insert(self.name.clone(), self.body());
        Value::Object(wrapper)
    }
}

fn string_list(items: &[String]) -> Value {
    Value::Array(items.iter().cloned().map(Value::String).collect())
}

fn collect_strings<I, S>(items: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    items.into_iter().map(Into::into).collect()
}

/// Builder for [`Component`]
///
/// Every list setter replaces the previous value of that list.
#[derive(Debug, Default)]
pub struct ComponentBuilder {
    component: Component,
}

impl ComponentBuilder {
    /// Create an empty builder
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the component name (the key in the pipeline)
    pub fn with_name(&mut self, name: impl Into<String>) -> &mut Self {
        self.component.name = name.into();
        self
    }

    /// Set the module type, e.g. `DataIO`
    pub fn with_module(&mut self, module: impl Into<String>) -> &mut Self {
        self.component.module = module.into();
        self
    }

    /// Mark the component for deployment with the model
    pub fn with_need_deploy(&mut self, need_deploy: bool) -> &mut Self {
        self.component.need_deploy = need_deploy;
        self
    }

    /// Set `input.data.data`, the highest-precedence data kind
    pub fn with_input_data<I, S>(&mut self, refs: I) -> &mut Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.component.input_data = collect_strings(refs);
        self
    }

    /// Set `input.data.train_data`, used when no `data` refs are set
    pub fn with_input_train_data<I, S>(&mut self, refs: I) -> &mut Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.component.input_train_data = collect_strings(refs);
        self
    }

    /// Set `input.data.eval_data`, used when neither `data` nor `train_data` is set
    pub fn with_input_eval_data<I, S>(&mut self, refs: I) -> &mut Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.component.input_eval_data = collect_strings(refs);
        self
    }

    /// Set the input refs of one data kind
    pub fn with_input(&mut self, kind: DataKind, refs: Vec<String>) -> &mut Self {
        match kind {
            DataKind::Data => self.component.input_data = refs,
            DataKind::TrainData => self.component.input_train_data = refs,
            DataKind::EvalData => self.component.input_eval_data = refs,
        }
        self
    }

    /// Set `input.model`; shadows any isometric model
    pub fn with_input_model<I, S>(&mut self, refs: I) -> &mut Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.component.input_model = collect_strings(refs);
        self
    }

    /// Set `input.isometric_model`
    pub fn with_input_isometric_model<I, S>(&mut self, refs: I) -> &mut Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.component.input_isometric_model = collect_strings(refs);
        self
    }

    /// Set the names of the data outputs
    pub fn with_output_data<I, S>(&mut self, names: I) -> &mut Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.component.output_data = collect_strings(names);
        self
    }

    /// Set the names of the model outputs
    pub fn with_output_model<I, S>(&mut self, names: I) -> &mut Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.component.output_model = collect_strings(names);
        self
    }

    /// Take the accumulated component, leaving the builder empty
    pub fn build(&mut self) -> Component {
        std::mem::take(&mut self.component)
    }
}
