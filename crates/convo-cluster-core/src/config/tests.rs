//! Tests for configuration loading.

use std::collections::HashMap;
use std::io::Write;

use super::*;

#[test]
fn test_default_config_is_valid() {
    let config = ClusteringConfig::default();
    assert!(config.validate().is_ok());
    assert_eq!(config.weights, FeatureWeights::default());
    assert_eq!(config.clustering, ClusteringParams::default());

    println!("[PASS] Default config validates");
}

#[test]
fn test_partial_toml_falls_back_to_defaults() {
    let config = ClusteringConfig::from_toml_str(
        r#"
        [weights]
        semantic = 1.0

        [clustering]
        num_subclusters_per_cluster = 4
        "#,
    )
    .expect("valid toml");

    assert_eq!(config.weights.semantic, 1.0);
    assert_eq!(config.weights.attributes, 0.25);
    assert_eq!(config.weights.outcome, 0.10);
    assert_eq!(config.clustering.num_high_level_clusters, 5);
    assert_eq!(config.clustering.num_subclusters_per_cluster, 4);

    println!("[PASS] Missing TOML fields take defaults");
}

#[test]
fn test_toml_roundtrip() {
    let mut config = ClusteringConfig::default();
    config.weights = FeatureWeights::new(0.5, 0.4, 0.1);
    config.clustering = ClusteringParams::new(8, 2);

    let text = config.to_toml_string().expect("serializes");
    let parsed = ClusteringConfig::from_toml_str(&text).expect("parses");
    assert_eq!(parsed, config);

    println!("[PASS] Config survives TOML roundtrip");
}

#[test]
fn test_from_file_reads_and_reports_path() {
    let mut file = tempfile::NamedTempFile::new().expect("temp file");
    writeln!(file, "[clustering]\nnum_high_level_clusters = 9").expect("write");

    let config = ClusteringConfig::from_file(file.path()).expect("loads");
    assert_eq!(config.clustering.num_high_level_clusters, 9);

    let missing = file.path().with_extension("does-not-exist");
    match ClusteringConfig::from_file(&missing) {
        Err(ConfigError::FileRead { path, .. }) => {
            assert!(path.ends_with("does-not-exist"))
        }
        other => panic!("expected FileRead, got {other:?}"),
    }

    println!("[PASS] from_file loads TOML and reports missing paths");
}

#[test]
fn test_parse_error_names_file() {
    let mut file = tempfile::NamedTempFile::new().expect("temp file");
    writeln!(file, "[weights]\nsemantic = \"high\"").expect("write");

    let err = ClusteringConfig::from_file(file.path()).expect_err("type error");
    let message = err.to_string();
    assert!(message.starts_with("Failed to parse TOML in '"), "{message}");

    println!("[PASS] Parse errors carry the file path");
}

#[test]
fn test_env_overrides_apply_and_ignore_garbage() {
    let vars: HashMap<&str, &str> = HashMap::from([
        ("CONVO_CLUSTER_WEIGHT_SEMANTIC", "0.9"),
        ("CONVO_CLUSTER_WEIGHT_OUTCOME", "not-a-number"),
        ("CONVO_CLUSTER_NUM_HIGH_LEVEL_CLUSTERS", " 3 "),
    ]);

    let config = ClusteringConfig::default()
        .with_overrides_from(|name| vars.get(name).map(|v| v.to_string()));

    assert_eq!(config.weights.semantic, 0.9);
    assert_eq!(config.weights.outcome, 0.10, "garbage keeps the old value");
    assert_eq!(config.clustering.num_high_level_clusters, 3);
    assert_eq!(config.clustering.num_subclusters_per_cluster, 3);

    println!("[PASS] Env overrides parsed, invalid values ignored");
}

#[test]
fn test_validate_names_non_finite_field() {
    let mut config = ClusteringConfig::default();
    config.weights.outcome = f64::NAN;

    match config.validate() {
        Err(ConfigError::Invalid { section, field, .. }) => {
            assert_eq!(section, "weights");
            assert_eq!(field, "outcome");
        }
        other => panic!("expected Invalid, got {other:?}"),
    }

    println!("[PASS] validate() names the offending weight");
}
