use std::io::Write;
use streamblocks::config::{BlockConfig, PipelineConfig};
use streamblocks::resilience::ErrorPolicy;
use streamblocks::{ConfigError, Container, Pipeline};
use tempfile::Builder;

#[test]
fn test_load_toml_file() {
    let mut file = Builder::new().suffix(".toml").tempfile().unwrap();
    writeln!(
        file,
        r#"
error_policy = "swallow"

[[blocks]]
type = "filter"
config = {{ predicate = {{ between = [0.0, 10.0] }} }}

[[blocks]]
type = "window"
config = {{ size = 3 }}

[[blocks]]
type = "median"
"#
    )
    .unwrap();

    let config = PipelineConfig::load(file.path()).unwrap();
    assert_eq!(config.error_policy, ErrorPolicy::Swallow);
    assert_eq!(config.blocks.len(), 3);
    assert_eq!(config.blocks[1], BlockConfig::new("window", serde_json::json!({"size": 3})));
}

#[test]
fn test_load_json_file() {
    let mut file = Builder::new().suffix(".json").tempfile().unwrap();
    let standard = PipelineConfig::standard();
    file.write_all(serde_json::to_string_pretty(&standard).unwrap().as_bytes())
        .unwrap();

    assert_eq!(PipelineConfig::load(file.path()).unwrap(), standard);
}

#[test]
fn test_unsupported_extension() {
    let file = Builder::new().suffix(".yaml").tempfile().unwrap();
    assert!(matches!(
        PipelineConfig::load(file.path()),
        Err(ConfigError::UnsupportedFormat(ext)) if ext == "yaml"
    ));
}

#[test]
fn test_missing_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("absent.toml");
    assert!(matches!(
        PipelineConfig::load(&path),
        Err(ConfigError::Read { .. })
    ));
}

#[tokio::test]
async fn test_pipeline_from_toml_runs() {
    let config = PipelineConfig::from_toml_str(
        r#"
[[blocks]]
type = "filter"
config = { predicate = { gt = 0.0 } }

[[blocks]]
type = "window"
config = { size = 2 }

[[blocks]]
id = "total"
type = "sum"
"#,
    )
    .unwrap();

    let mut pipeline = Pipeline::from_config(&config).await.unwrap();
    let mut outputs = Vec::new();
    for v in [4.0, -4.0, 6.0, 1.0, 1.0] {
        let report = pipeline.push(Container::scalar(v)).await.unwrap();
        outputs.extend(report.emitted().cloned());
    }

    assert_eq!(outputs, vec![Container::scalar(10.0), Container::scalar(2.0)]);
}

#[tokio::test]
async fn test_standard_config_builds_six_stages() {
    let pipeline = Pipeline::from_config(&PipelineConfig::standard()).await.unwrap();
    assert_eq!(
        pipeline.stage_ids(),
        vec!["filter_0", "window_1", "sum_2", "window_3", "median_4", "print_5"]
    );
}
