// tests/config_test.rs
use git_release::config::{load_config, Config, CONFIG_ENV_VAR};
use serial_test::serial;
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

#[test]
#[serial]
fn test_load_from_fixture() {
    let config = load_config(Some(Path::new("tests/fixtures/release.toml")))
        .expect("Failed to load test config");

    assert_eq!(config.tag.pattern, "release-{version}");
    assert_eq!(config.remote.name, "upstream");
    assert!(config.remote.fetch);
    assert!(!config.remote.push);
    assert_eq!(config.changelog.path, PathBuf::from("docs/CHANGES.md"));
    assert!(config.changelog.enabled);
    assert_eq!(
        config.hooks.pre_tag_create.as_deref(),
        Some("scripts/check.sh")
    );
    assert!(config
        .commits
        .breaking_change_indicators
        .contains(&"INCOMPATIBLE:".to_string()));
}

#[test]
#[serial]
fn test_load_from_file() {
    let mut temp_file = NamedTempFile::new().unwrap();
    let toml_content = r#"
[tag]
pattern = "{version}"

[changelog]
enabled = false
"#;
    temp_file.write_all(toml_content.as_bytes()).unwrap();
    temp_file.flush().unwrap();

    let config = load_config(Some(temp_file.path())).unwrap();
    assert_eq!(config.tag.pattern, "{version}");
    assert!(!config.changelog.enabled);
    assert_eq!(config.remote, Config::default().remote);
}

#[test]
#[serial]
fn test_env_var_points_at_config() {
    let mut temp_file = NamedTempFile::new().unwrap();
    temp_file
        .write_all(b"[remote]\nname = \"mirror\"\npush = true\n")
        .unwrap();
    temp_file.flush().unwrap();

    std::env::set_var(CONFIG_ENV_VAR, temp_file.path());
    let loaded = load_config(None);
    std::env::remove_var(CONFIG_ENV_VAR);

    let config = loaded.unwrap();
    assert_eq!(config.remote.name, "mirror");
    assert!(config.remote.push);
}

#[test]
#[serial]
fn test_explicit_path_wins_over_env_var() {
    std::env::set_var(CONFIG_ENV_VAR, "/nonexistent/release.toml");
    let loaded = load_config(Some(Path::new("tests/fixtures/release.toml")));
    std::env::remove_var(CONFIG_ENV_VAR);

    assert_eq!(loaded.unwrap().remote.name, "upstream");
}

#[test]
#[serial]
fn test_missing_explicit_file_is_an_error() {
    let result = load_config(Some(Path::new("tests/fixtures/does_not_exist.toml")));
    assert!(result.is_err());
}

#[test]
#[serial]
fn test_invalid_toml_is_an_error() {
    let mut temp_file = NamedTempFile::new().unwrap();
    temp_file.write_all(b"[tag\npattern = ").unwrap();
    temp_file.flush().unwrap();

    let err = load_config(Some(temp_file.path())).unwrap_err();
    assert!(err.to_string().contains("Invalid"), "got: {}", err);
}

#[test]
#[serial]
fn test_pattern_without_placeholder_is_rejected() {
    let mut temp_file = NamedTempFile::new().unwrap();
    temp_file.write_all(b"[tag]\npattern = \"latest\"\n").unwrap();
    temp_file.flush().unwrap();

    assert!(load_config(Some(temp_file.path())).is_err());
}
