//! Loading configuration files from disk.

use std::io::Write;

use rust_decimal_macros::dec;
use stirx_config::{ConfigError, FuturesConfig};
use stirx_core::Tenor;

fn write_file(dir: &tempfile::TempDir, name: &str, content: &str) -> std::path::PathBuf {
    let path = dir.path().join(name);
    let mut file = std::fs::File::create(&path).unwrap();
    file.write_all(content.as_bytes()).unwrap();
    path
}

#[test]
fn loads_toml_by_extension() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_file(&dir, "strip.toml", "tenor = \"6M\"\ncontract_size = 500000\n");

    let config = FuturesConfig::from_file(&path).unwrap();
    assert_eq!(config.tenor, Tenor::months(6).unwrap());
    assert_eq!(config.contract_size, dec!(500000));
}

#[test]
fn loads_json_by_extension() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_file(
        &dir,
        "strip.json",
        r#"{"tenor": "3M", "convexity": {"model": "explicit", "adjustment": 0.25}}"#,
    );

    let config = FuturesConfig::from_file(&path).unwrap();
    assert_eq!(
        config.convexity,
        stirx_futures::ConvexityModel::Explicit {
            adjustment: dec!(0.25)
        }
    );
}

#[test]
fn rejects_unknown_extension_and_missing_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_file(&dir, "strip.yaml", "tenor: 3M\n");
    assert!(matches!(
        FuturesConfig::from_file(&path),
        Err(ConfigError::UnsupportedFormat(ext)) if ext == "yaml"
    ));

    let missing = dir.path().join("absent.toml");
    assert!(matches!(
        FuturesConfig::from_file(missing),
        Err(ConfigError::Io { .. })
    ));
}

#[test]
fn invalid_values_fail_validation() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_file(&dir, "bad.toml", "contract_size = -1\n");
    let err = FuturesConfig::from_file(&path).unwrap_err();
    assert!(err.to_string().contains("contract_size"));
}
