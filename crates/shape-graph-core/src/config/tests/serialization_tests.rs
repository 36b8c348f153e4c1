//! Tests for configuration (de)serialization.

use std::io::Write;

use crate::config::{Config, SourceKind};
use crate::graph_linking::{KPolicy, SearchStrategy};

#[test]
fn test_toml_roundtrip() {
    let config = Config::default_config();
    let text = toml::to_string(&config).expect("serialize");
    let back: Config = toml::from_str(&text).expect("deserialize");
    assert_eq!(back, config);
}

#[test]
fn test_partial_toml_uses_defaults() {
    let text = r#"
        [knn]
        k = 10
        k_policy = "strict"
        strategy = "kd_tree"

        [source]
        kind = "synthetic"
        synthetic_count = 256
    "#;

    let config: Config = toml::from_str(text).expect("deserialize");
    assert_eq!(config.knn.k, 10);
    assert_eq!(config.knn.k_policy, KPolicy::Strict);
    assert_eq!(config.knn.strategy, SearchStrategy::KdTree);
    assert!(!config.knn.parallel);
    assert_eq!(config.source.kind, SourceKind::Synthetic);
    assert_eq!(config.source.synthetic_count, 256);
    assert_eq!(config.render.width, 800);
}

#[test]
fn test_from_file() {
    let mut file = tempfile::NamedTempFile::new().expect("temp file");
    writeln!(file, "[knn]\nk = 3\n\n[render]\ndraw_edges = true").expect("write");

    let config = Config::from_file(file.path()).expect("load");
    assert_eq!(config.knn.k, 3);
    assert!(config.render.draw_edges);
}

#[test]
fn test_from_file_rejects_invalid_values() {
    let mut file = tempfile::NamedTempFile::new().expect("temp file");
    writeln!(file, "[knn]\nk = 0").expect("write");

    let err = Config::from_file(file.path()).unwrap_err();
    assert!(matches!(err, crate::error::CoreError::InvalidK { k: 0 }));
}

#[test]
fn test_from_file_missing() {
    let err = Config::from_file(std::path::Path::new("/nonexistent/shape-graph.toml")).unwrap_err();
    assert!(err.to_string().contains("Failed to read config file"));
}
