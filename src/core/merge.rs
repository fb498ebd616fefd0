//! Recursive merge of nested key-value trees

use crate::core::error::ModelError;
use serde_json::{Map, Value};

/// Deepest nesting `tree_merge` will descend into
pub const MAX_MERGE_DEPTH: usize = 64;

/// Merge `src` into a copy of `dest` and return the result.
///
/// For every key of `src`: a key missing from `dest` is copied over, two
/// mappings under the same key are merged recursively, and two leaves are
/// resolved in favour of `src`. A leaf meeting a mapping is an error; arrays
/// count as leaves.
pub fn tree_merge(
    dest: &Map<String, Value>,
    src: &Map<String, Value>,
) -> Result<Map<String, Value>, ModelError> {
    let mut merged = dest.clone();
    let mut path = Vec::new();
    merge_level(&mut merged, src, &mut path)?;
    Ok(merged)
}

/// Merge two arbitrary values; both must be mappings.
pub fn tree_merge_values(dest: &Value, src: &Value) -> Result<Value, ModelError> {
    match (dest, src) {
        (Value::Object(d), Value::Object(s)) => tree_merge(d, s).map(Value::Object),
        _ => Err(ModelError::MergeConflict {
            path: String::from("<root>"),
        }),
    }
}

fn merge_level<'a>(
    dest: &mut Map<String, Value>,
    src: &'a Map<String, Value>,
    path: &mut Vec<&'a str>,
) -> Result<(), ModelError> {
    if path.len() >= MAX_MERGE_DEPTH {
        return Err(ModelError::MergeTooDeep {
            limit: MAX_MERGE_DEPTH,
        });
    }

    for (key, src_value) in src {
        path.push(key);
        match dest.get_mut(key) {
            None => {
                dest.insert(key.clone(), src_value.clone());
            }
            Some(Value::Object(dest_map)) => match src_value {
                Value::Object(src_map) => merge_level(dest_map, src_map, path)?,
                _ => return Err(conflict(path)),
            },
            Some(dest_leaf) => {
                if src_value.is_object() {
                    return Err(conflict(path));
                }
                *dest_leaf = src_value.clone();
            }
        }
        path.pop();
    }

    Ok(())
}

fn conflict(path: &[&str]) -> ModelError {
    ModelError::MergeConflict {
        path: path.join("."),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn map(value: Value) -> Map<String, Value> {
        match value {
            Value::Object(m) => m,
            other => panic!("expected object, got {other}"),
        }
    }

    #[test]
    fn test_copies_missing_keys() {
        let dest = map(json!({"a": 1}));
        let src = map(json!({"b": {"c": 2}}));

        let merged = tree_merge(&dest, &src).unwrap();
        assert_eq!(Value::Object(merged), json!({"a": 1, "b": {"c": 2}}));
    }

    #[test]
    fn test_recurses_into_shared_mappings() {
        let dest = map(json!({"guest": {"args": {"data": {"train_data": [1]}}}}));
        let src = map(json!({"guest": {"args": {"data": {"eval_data": [2]}}, "dataio_0": {}}}));

        let merged = tree_merge(&dest, &src).unwrap();
        assert_eq!(
            Value::Object(merged),
            json!({
                "guest": {
                    "args": {"data": {"train_data": [1], "eval_data": [2]}},
                    "dataio_0": {}
                }
            })
        );
    }

    #[test]
    fn test_leaf_overwritten_by_source() {
        let dest = map(json!({"work_mode": 0, "list": [1, 2]}));
        let src = map(json!({"work_mode": 1, "list": [3]}));

        let merged = tree_merge(&dest, &src).unwrap();
        assert_eq!(Value::Object(merged), json!({"work_mode": 1, "list": [3]}));
    }

    #[test]
    fn test_leaf_vs_mapping_is_an_error() {
        let dest = map(json!({"a": {"b": 1}}));
        let src = map(json!({"a": {"b": {"c": 2}}}));

        let err = tree_merge(&dest, &src).unwrap_err();
        assert_eq!(err, ModelError::MergeConflict { path: "a.b".to_string() });

        let err = tree_merge(&src, &dest).unwrap_err();
        assert_eq!(err, ModelError::MergeConflict { path: "a.b".to_string() });
    }

    #[test]
    fn test_inputs_left_untouched() {
        let dest = map(json!({"a": {"x": 1}}));
        let src = map(json!({"a": {"y": 2}}));

        let _ = tree_merge(&dest, &src).unwrap();
        assert_eq!(Value::Object(dest), json!({"a": {"x": 1}}));
    }

    #[test]
    fn test_depth_is_bounded() {
        let mut deep = json!(1);
        for _ in 0..(MAX_MERGE_DEPTH + 2) {
            deep = json!({"k": deep});
        }
        let dest = map(deep.clone());
        let src = map(deep);

        let err = tree_merge(&dest, &src).unwrap_err();
        assert_eq!(err, ModelError::MergeTooDeep { limit: MAX_MERGE_DEPTH });
    }

    #[test]
    fn test_non_object_values_rejected() {
        let err = tree_merge_values(&json!([1]), &json!({})).unwrap_err();
        assert!(matches!(err, ModelError::MergeConflict { .. }));
    }
}
