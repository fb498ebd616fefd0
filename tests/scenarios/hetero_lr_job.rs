//! Test: Hetero LR job assembled entirely through builders

use crate::helpers::*;
use fml_manager::core::{
    AlgorithmParametersBuilder, ComponentBuilder, ConfigBuilder, Document, InitiatorBuilder,
    JobParametersBuilder, ModelError, PipelineBuilder, RoleBuilder, RoleKind,
    RoleParametersBuilder,
};
use pretty_assertions::assert_eq;
use serde_json::json;

#[test]
fn test_pipeline_document() {
    let mut components = ComponentBuilder::new();

    let data_io = components
        .with_name("dataio_0")
        .with_module("DataIO")
        .with_input_data(["args.train_data"])
        .with_output_data(["train"])
        .with_output_model(["dataio"])
        .with_need_deploy(true)
        .build();

    let hetero_feature_selection = components
        .with_name("hetero_feature_selection_0")
        .with_module("HeteroFeatureSelection")
        .with_input_data(["hetero_feature_binning_0.train"])
        .with_output_data(["eval"])
        .with_output_model(["selected"])
        .with_input_isometric_model(["hetero_feature_binning_0.hetero_feature_binning"])
        .build();

    let hetero_feature_binning = components
        .with_name("hetero_feature_binning_0")
        .with_module("HeteroFeatureBinning")
        .with_input_data(["dataio_0.train"])
        .with_output_data(["train"])
        .with_output_model(["hetero_feature_binning"])
        .build();

    let evaluation = components
        .with_name("evaluation_0")
        .with_module("Evaluation")
        .with_input_data(["hetero_feature_selection_0.eval"])
        .with_output_data(["evaluate"])
        .build();

    let pipeline = PipelineBuilder::new()
        .with_components([
            &data_io,
            &hetero_feature_selection,
            &hetero_feature_binning,
            &evaluation,
        ])
        .build();

    assert_eq!(
        pipeline.to_dict(),
        json!({
            "components": {
                "dataio_0": {
                    "module": "DataIO",
                    "input": {"data": {"data": ["args.train_data"]}},
                    "output": {"data": ["train"], "model": ["dataio"]},
                    "need_deploy": true
                },
                "hetero_feature_selection_0": {
                    "module": "HeteroFeatureSelection",
                    "input": {
                        "data": {"data": ["hetero_feature_binning_0.train"]},
                        "isometric_model": ["hetero_feature_binning_0.hetero_feature_binning"]
                    },
                    "output": {"data": ["eval"], "model": ["selected"]},
                    "need_deploy": false
                },
                "hetero_feature_binning_0": {
                    "module": "HeteroFeatureBinning",
                    "input": {"data": {"data": ["dataio_0.train"]}},
                    "output": {"data": ["train"], "model": ["hetero_feature_binning"]},
                    "need_deploy": false
                },
                "evaluation_0": {
                    "module": "Evaluation",
                    "input": {"data": {"data": ["hetero_feature_selection_0.eval"]}},
                    "output": {"data": ["evaluate"]},
                    "need_deploy": false
                }
            }
        })
    );
}

#[test]
fn test_config_document() {
    let initiator = InitiatorBuilder::new()
        .with_role(RoleKind::Guest)
        .with_party_id(10000)
        .build();

    let job_parameters = JobParametersBuilder::new()
        .with_work_mode(1)
        .with_job_type("predict")
        .with_model_id("123")
        .with_model_version("sss")
        .build();

    let role = RoleBuilder::new()
        .with_guest([10000])
        .with_host([10001, 10002])
        .with_arbiter([10001])
        .build();

    let role_parameters = RoleParametersBuilder::new()
        .with_guest_train_data(["breast_b"], ["breast_b"])
        .unwrap()
        .with_guest_module_config(["dataio_0"], [guest_data_io_config()])
        .unwrap()
        .with_host_train_data(["abc", "efg"], ["abc", "efg"])
        .unwrap()
        .with_host_module_config(["dataio_0"], [host_data_io_config()])
        .unwrap()
        .build();

    let algorithm_parameters = AlgorithmParametersBuilder::new()
        .with_module_config(["hetero_lr_0"], [hetero_lr_params()])
        .unwrap()
        .build();

    let config = ConfigBuilder::new()
        .with_initiator(initiator)
        .with_job_parameters(job_parameters)
        .with_role(role)
        .with_role_parameters(role_parameters)
        .with_algorithm_parameters(algorithm_parameters)
        .build();

    assert!(config.check_party_counts().is_empty());
    assert_eq!(
        config.to_dict(),
        json!({
            "initiator": {"role": "guest", "party_id": 10000},
            "job_parameters": {
                "work_mode": 1,
                "job_type": "predict",
                "model_id": "123",
                "model_version": "sss"
            },
            "role": {"guest": [10000], "host": [10001, 10002], "arbiter": [10001]},
            "role_parameters": {
                "guest": {
                    "args": {"data": {"train_data": [{"namespace": "breast_b", "name": "breast_b"}]}},
                    "dataio_0": guest_data_io_config()
                },
                "host": {
                    "args": {
                        "data": {
                            "train_data": [
                                {"namespace": "abc", "name": "abc"},
                                {"namespace": "efg", "name": "efg"}
                            ]
                        }
                    },
                    "dataio_0": host_data_io_config()
                }
            },
            "algorithm_parameters": {"hetero_lr_0": hetero_lr_params()}
        })
    );
}

#[test]
fn test_failed_call_keeps_earlier_bindings() {
    let mut builder = RoleParametersBuilder::new();
    builder
        .with_guest_module_config(["dataio_0"], [guest_data_io_config()])
        .unwrap();

    let err = builder
        .with_guest_train_data(["ns_a", "ns_b"], ["table_a"])
        .unwrap_err();
    assert!(matches!(err, ModelError::LengthMismatch { .. }));

    let parameters = builder.build();
    assert_eq!(
        parameters.to_dict(),
        json!({"guest": {"dataio_0": guest_data_io_config()}})
    );
}

#[test]
fn test_builders_start_fresh_after_build() {
    let mut roles = RoleBuilder::new();
    let first = roles.with_guest([10000]).build();
    let second = roles.with_host([9999]).build();

    assert_eq!(first.to_dict(), json!({"guest": [10000], "host": [], "arbiter": []}));
    assert_eq!(second.to_dict(), json!({"guest": [], "host": [9999], "arbiter": []}));
}
