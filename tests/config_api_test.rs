//! Integration tests for config module public API.

use std::fs;
use std::path::Path;
use tempfile::TempDir;
use toolprobe::config::{
    find_project_root, load_config, load_merged_config, validate, validate_config, ProbeConfig,
    Severity, CONFIG_DIR,
};
use toolprobe::ToolprobeError;

fn write_config(root: &Path, file: &str, content: &str) {
    let dir = root.join(CONFIG_DIR);
    fs::create_dir_all(&dir).unwrap();
    fs::write(dir.join(file), content).unwrap();
}

#[test]
fn public_api_is_accessible() {
    let config = ProbeConfig::default();
    assert!(config.tools.is_empty());
    assert!(validate(&config).is_ok());
}

#[test]
fn full_config_workflow() {
    let temp = TempDir::new().unwrap();
    write_config(
        temp.path(),
        "config.yml",
        r#"
tools:
  jdk:
    executable: java
    search_root: /opt/java
    relative_path: ..
    version_cmd: [java, -version]
    version_pattern: 'version "([\d.]+)'
    version_min: "11"
    version_max: "17.99"
"#,
    );

    let config = load_merged_config(temp.path()).unwrap();
    validate(&config).unwrap();

    let request = config.tool("jdk").unwrap().to_request("jdk").unwrap();
    assert_eq!(request.executable(), "java");
    assert_eq!(request.search_root(), Path::new("/opt/java"));
    assert_eq!(
        request.version_command(),
        Some(&["java".to_string(), "-version".to_string()][..])
    );
    assert_eq!(request.version_max(), Some("17.99"));
}

#[test]
fn local_overrides_merge_over_project() {
    let temp = TempDir::new().unwrap();
    write_config(
        temp.path(),
        "config.yml",
        "tools:\n  maven:\n    executable: mvn\n    search_root: /opt/maven\n",
    );
    write_config(
        temp.path(),
        "config.local.yml",
        "tools:\n  maven:\n    search_root: /home/me/maven\n",
    );

    let config = load_merged_config(temp.path()).unwrap();
    let maven = config.tool("maven").unwrap();
    assert_eq!(maven.executable.as_deref(), Some("mvn"));
    assert_eq!(
        maven.search_root.as_deref(),
        Some(Path::new("/home/me/maven"))
    );
}

#[test]
fn override_file_skips_project_config() {
    let temp = TempDir::new().unwrap();
    write_config(temp.path(), "config.yml", "tools:\n  a:\n    executable: a\n");
    let other = temp.path().join("other.yml");
    fs::write(&other, "tools:\n  b:\n    executable: b\n").unwrap();

    let config = load_config(temp.path(), Some(&other)).unwrap();
    assert!(config.tools.contains_key("b"));
    assert!(!config.tools.contains_key("a"));
}

#[test]
fn missing_config_is_reported() {
    let temp = TempDir::new().unwrap();
    let err = load_merged_config(temp.path()).unwrap_err();
    assert!(matches!(err, ToolprobeError::ConfigNotFound { .. }));
}

#[test]
fn validation_collects_every_problem() {
    let temp = TempDir::new().unwrap();
    write_config(
        temp.path(),
        "config.yml",
        r#"
tools:
  broken:
    version_cmd: [tool, --version]
    version_pattern: '(unclosed'
  inverted:
    executable: x
    version_cmd: [x, -v]
    version_pattern: '(\d+)'
    version_min: "5"
    version_max: "4"
"#,
    );

    let config = load_merged_config(temp.path()).unwrap();
    let rules: Vec<_> = validate_config(&config)
        .into_iter()
        .filter(|d| d.severity == Severity::Error)
        .map(|d| d.rule)
        .collect();

    assert!(rules.contains(&"missing-executable".to_string()));
    assert!(rules.contains(&"invalid-pattern".to_string()));
    assert!(rules.contains(&"inverted-range".to_string()));
    assert!(matches!(
        validate(&config),
        Err(ToolprobeError::ConfigValidationError { .. })
    ));
}

#[test]
fn project_root_is_found_from_subdirectory() {
    let temp = TempDir::new().unwrap();
    write_config(temp.path(), "config.yml", "");
    let nested = temp.path().join("a/b");
    fs::create_dir_all(&nested).unwrap();

    assert_eq!(find_project_root(&nested), Some(temp.path().to_path_buf()));
}
