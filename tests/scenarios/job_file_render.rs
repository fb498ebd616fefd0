//! Test: Rendering documents from a job file

use crate::helpers::*;
use fml_manager::core::JobFile;
use pretty_assertions::assert_eq;
use serde_json::json;

const JOB: &str = r#"
name: "hetero_lr_breast"
components:
  - name: "dataio_0"
    module: "DataIO"
    need_deploy: true
    input:
      data: ["args.train_data"]
    output:
      data: ["train"]
      model: ["dataio"]
  - name: "hetero_feature_binning_0"
    module: "HeteroFeatureBinning"
    input:
      data: ["dataio_0.train"]
    output:
      data: ["train"]
      model: ["hetero_feature_binning"]
  - name: "hetero_feature_selection_0"
    module: "HeteroFeatureSelection"
    input:
      data: ["hetero_feature_binning_0.train"]
      isometric_model: ["hetero_feature_binning_0.hetero_feature_binning"]
    output:
      data: ["eval"]
      model: ["selected"]
initiator:
  role: "guest"
  party_id: 10000
job_parameters:
  work_mode: 1
role:
  guest: [10000]
  host: [9999, 9998]
  arbiter: [9999]
role_parameters:
  guest:
    train_data:
      - {namespace: "fate_flow_test_breast", name: "breast_b"}
    modules:
      dataio_0:
        with_label: [true]
        label_name: ["y"]
        label_type: ["int"]
        output_format: ["dense"]
  host:
    train_data:
      - {namespace: "hetero_breast_host", name: "host_1"}
      - {namespace: "hetero_breast_host", name: "host_2"}
    modules:
      dataio_0:
        with_label: [false]
        output_format: ["dense"]
algorithm_parameters:
  hetero_lr_0:
    penalty: "L2"
    optimizer: "rmsprop"
    eps: 1.0e-5
    alpha: 0.01
    max_iter: 3
    converge_func: "diff"
    batch_size: 320
    learning_rate: 0.15
    init_param:
      init_method: "random_uniform"
overrides:
  conf:
    algorithm_parameters:
      hetero_lr_0:
        max_iter: 10
        init_param:
          fit_intercept: true
"#;

#[test]
fn test_render_job_file() {
    let job = JobFile::from_yaml(JOB).unwrap();
    let rendered = job.render().unwrap();

    assert_eq!(rendered.pipeline.len(), 3);
    assert_eq!(
        rendered.dsl["components"]["hetero_feature_selection_0"]["input"],
        json!({
            "data": {"data": ["hetero_feature_binning_0.train"]},
            "isometric_model": ["hetero_feature_binning_0.hetero_feature_binning"]
        })
    );

    assert_eq!(rendered.conf["role_parameters"]["guest"]["dataio_0"], guest_data_io_config());
    assert_eq!(rendered.conf["role_parameters"]["host"]["dataio_0"], host_data_io_config());

    let mut expected_lr = hetero_lr_params();
    expected_lr["max_iter"] = json!(10);
    expected_lr["init_param"]["fit_intercept"] = json!(true);
    assert_eq!(rendered.conf["algorithm_parameters"]["hetero_lr_0"], expected_lr);

    // overrides apply to the document only
    assert_eq!(
        rendered.config.algorithm_parameters.as_ref().unwrap().module_config("hetero_lr_0"),
        Some(&hetero_lr_params())
    );
}

#[test]
fn test_sections_emitted_in_canonical_order() {
    let rendered = JobFile::from_yaml(JOB).unwrap().render().unwrap();
    let keys: Vec<_> = rendered.conf.as_object().unwrap().keys().cloned().collect();

    assert_eq!(
        keys,
        vec!["initiator", "job_parameters", "role", "role_parameters", "algorithm_parameters"]
    );
}

#[test]
fn test_job_file_from_disk() {
    let dir = temp_dir("job_file");
    std::fs::create_dir_all(&dir).unwrap();
    let path = dir.join("job.yaml");
    std::fs::write(&path, JOB).unwrap();

    let job = JobFile::from_file(&path).unwrap();
    assert_eq!(job.name.as_deref(), Some("hetero_lr_breast"));

    std::fs::remove_dir_all(&dir).ok();
}

#[test]
fn test_missing_job_file_reports_path() {
    let err = JobFile::from_file("/nonexistent/fml_manager/job.yaml").unwrap_err();
    assert!(err.to_string().contains("/nonexistent/fml_manager/job.yaml"));
}
