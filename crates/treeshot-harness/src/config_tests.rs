use std::collections::HashMap;
use std::path::{Path, PathBuf};

use indoc::indoc;
use tempfile::TempDir;

use crate::config::{BackendConfig, ConfigError, HarnessConfig, UpdateMode};

#[test]
fn defaults() {
    let config = HarnessConfig::default();

    assert_eq!(config.marker, "fixtures");
    assert_eq!(config.snapshot_dir, "snapshots");
    assert_eq!(config.extensions, ["ts", "tsx"]);
    assert_eq!(config.update, UpdateMode::New);
    assert_eq!(config.backends, [BackendConfig::builtin("tree-sitter")]);
    assert_eq!(config.focus(), None);
}

#[test]
fn parse_full_file() {
    let content = indoc! {r#"
        root = "src"
        only = "declaration/ClassDeclaration/abstract"
        update = "none"
        extensions = ["ts"]

        [[backends]]
        kind = "builtin"
        name = "tree-sitter"

        [[backends]]
        kind = "external"
        name = "babel"
        program = "./tools/parse-babel"
        args = ["--ts"]

        [[backends]]
        kind = "external"
        name = "swc"
        program = "swc-parse"
        label = "SWC"
    "#};

    let config = HarnessConfig::from_toml(content, Path::new("/repo")).unwrap();

    assert_eq!(config.root, PathBuf::from("/repo/src"));
    assert_eq!(config.focus(), Some("declaration/ClassDeclaration/abstract"));
    assert_eq!(config.update, UpdateMode::None);
    assert_eq!(config.extensions, ["ts"]);
    assert_eq!(config.backends.len(), 3);
    assert_eq!(
        config.backends[1],
        BackendConfig::External {
            name: "babel".to_owned(),
            program: Path::new("/repo").join("./tools/parse-babel").to_string_lossy().into_owned(),
            args: vec!["--ts".to_owned()],
            label: None,
        }
    );
    let BackendConfig::External { program, .. } = &config.backends[2] else {
        panic!("expected an external backend");
    };
    assert_eq!(program, "swc-parse");
}

#[test]
fn absolute_root_is_kept() {
    let config = HarnessConfig::from_toml(r#"root = "/corpus""#, Path::new("/repo")).unwrap();
    assert_eq!(config.root, PathBuf::from("/corpus"));
}

#[test]
fn unknown_keys_are_rejected() {
    assert!(HarnessConfig::from_toml("rooot = \"src\"", Path::new("")).is_err());
}

#[test]
fn load_missing_file() {
    let dir = TempDir::new().unwrap();
    let loaded = HarnessConfig::load_from_path(dir.path().join("treeshot.toml")).unwrap();
    assert!(loaded.is_none());
}

#[test]
fn load_resolves_against_file_directory() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("treeshot.toml");
    std::fs::write(&path, "root = \"corpus\"\n").unwrap();

    let config = HarnessConfig::load_from_path(&path).unwrap().unwrap();
    assert_eq!(config.root, dir.path().join("corpus"));
}

#[test]
fn load_reports_parse_errors_with_path() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("treeshot.toml");
    std::fs::write(&path, "update = \"sometimes\"\n").unwrap();

    let err = HarnessConfig::load_from_path(&path).unwrap_err();
    assert!(matches!(err, ConfigError::Parse { path: ref p, .. } if *p == path));
}

#[test]
fn update_mode_from_str() {
    assert_eq!("new".parse::<UpdateMode>().unwrap(), UpdateMode::New);
    assert_eq!("ALL".parse::<UpdateMode>().unwrap(), UpdateMode::All);
    assert_eq!("1".parse::<UpdateMode>().unwrap(), UpdateMode::All);
    assert_eq!("true".parse::<UpdateMode>().unwrap(), UpdateMode::All);
    assert_eq!("none".parse::<UpdateMode>().unwrap(), UpdateMode::None);
    assert_eq!("ci".parse::<UpdateMode>().unwrap(), UpdateMode::None);
    assert!(matches!(
        "sometimes".parse::<UpdateMode>(),
        Err(ConfigError::InvalidUpdateMode(s)) if s == "sometimes"
    ));
}

#[test]
fn overrides_apply_over_file_values() {
    let env: HashMap<&str, &str> = [("TREESHOT_ONLY", "a/b/x"), ("TREESHOT_UPDATE", "true")].into();
    let mut config = HarnessConfig::default();

    config
        .apply_overrides(|key| env.get(key).map(|v| (*v).to_owned()))
        .unwrap();

    assert_eq!(config.focus(), Some("a/b/x"));
    assert_eq!(config.update, UpdateMode::All);
}

#[test]
fn overrides_reject_bad_update_mode() {
    let mut config = HarnessConfig::default();
    let result = config.apply_overrides(|key| (key == "TREESHOT_UPDATE").then(|| "later".to_owned()));
    assert!(result.is_err());
}

#[test]
fn blank_focus_is_no_focus() {
    let config = HarnessConfig {
        only: Some("  ".to_owned()),
        ..HarnessConfig::default()
    };
    assert_eq!(config.focus(), None);
}

#[test]
fn build_backends() {
    let backends = HarnessConfig::default().build_backends().unwrap();
    assert_eq!(backends.len(), 1);
    assert_eq!(backends[0].name(), "tree-sitter");

    let unknown = HarnessConfig {
        backends: vec![BackendConfig::builtin("esprima")],
        ..HarnessConfig::default()
    };
    assert!(matches!(
        unknown.build_backends(),
        Err(ConfigError::UnknownBackend(name)) if name == "esprima"
    ));

    let empty = HarnessConfig {
        backends: vec![],
        ..HarnessConfig::default()
    };
    assert!(matches!(empty.build_backends(), Err(ConfigError::NoBackends)));
}

#[test]
fn external_backend_label() {
    let config = BackendConfig::External {
        name: "babel-ts".to_owned(),
        program: "node".to_owned(),
        args: vec![],
        label: None,
    };
    assert_eq!(config.build().unwrap().label(), "BabelTs");
}
