//! Shared fixtures for fml-manager tests

#![allow(dead_code)]

use serde_json::{json, Value};

pub fn guest_data_io_config() -> Value {
    json!({
        "with_label": [true],
        "label_name": ["y"],
        "label_type": ["int"],
        "output_format": ["dense"]
    })
}

pub fn host_data_io_config() -> Value {
    json!({
        "with_label": [false],
        "output_format": ["dense"]
    })
}

pub fn hetero_lr_params() -> Value {
    json!({
        "penalty": "L2",
        "optimizer": "rmsprop",
        "eps": 1e-5,
        "alpha": 0.01,
        "max_iter": 3,
        "converge_func": "diff",
        "batch_size": 320,
        "learning_rate": 0.15,
        "init_param": {
            "init_method": "random_uniform"
        }
    })
}

/// A route table resource as found in a deployed cluster
pub fn deployed_route_table() -> Value {
    json!({
        "route_table": {
            "10000": {
                "default": [{"ip": "192.168.1.10", "port": 9370}],
                "fateflow": [{"ip": "fateflow", "port": 9360}]
            },
            "9999": {"default": [{"ip": "192.168.1.20", "port": 30010}]},
            "8888": {"default": [{"ip": "192.168.1.30", "port": 30010}]}
        },
        "permission": {"default_allow": true}
    })
}

/// Fresh directory under the system temp dir
pub fn temp_dir(label: &str) -> std::path::PathBuf {
    let dir = std::env::temp_dir().join(format!(
        "fml_manager_test_{}_{}",
        std::process::id(),
        label
    ));
    std::fs::remove_dir_all(&dir).ok();
    dir
}
