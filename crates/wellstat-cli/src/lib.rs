//! # wellstat-cli — CLI Tool for the Well Statistics Engine
//!
//! Provides the `wellstat` command-line interface over JSON files.
//!
//! ## Subcommands
//!
//! - `wellstat summarize` — aggregate report for a polygon and its records.
//! - `wellstat proximity` — records ranked by calendar distance to a date.
//!
//! ```bash
//! wellstat summarize --polygon area.json --records wells.json
//! wellstat --config engine.yaml summarize --polygon area.json --records wells.json --out report.json
//! wellstat proximity --month 12 --day 31 --limit 20 --records wells.json
//! ```

pub mod proximity;
pub mod summarize;

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use wellstat_core::{EngineConfig, WellRecord};

/// Load engine configuration from a YAML file, or defaults when absent.
pub fn load_config(path: Option<&Path>) -> Result<EngineConfig> {
    let Some(path) = path else {
        return Ok(EngineConfig::default());
    };
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read config file: {}", path.display()))?;
    let config: EngineConfig = serde_yaml::from_str(&content)
        .with_context(|| format!("failed to parse config YAML: {}", path.display()))?;
    config
        .validate()
        .with_context(|| format!("invalid engine config: {}", path.display()))?;
    Ok(config)
}

/// Read and deserialize a JSON file.
pub fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read file: {}", path.display()))?;
    serde_json::from_str(&content)
        .with_context(|| format!("failed to parse JSON: {}", path.display()))
}

/// Record files hold either a bare array or an object with a `records` array.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RecordFile {
    Bare(Vec<WellRecord>),
    Wrapped { records: Vec<WellRecord> },
}

/// Read a record batch from a JSON file.
pub fn read_records(path: &Path) -> Result<Vec<WellRecord>> {
    let records = match read_json::<RecordFile>(path)? {
        RecordFile::Bare(records) | RecordFile::Wrapped { records } => records,
    };
    tracing::info!(records = records.len(), path = %path.display(), "loaded records");
    Ok(records)
}

/// Write a value as pretty JSON to `out`, or stdout when `None`.
pub fn write_output<T: Serialize>(value: &T, out: Option<&PathBuf>) -> Result<()> {
    let json = serde_json::to_string_pretty(value).context("failed to serialize output")?;
    match out {
        Some(path) => {
            std::fs::write(path, format!("{json}\n"))
                .with_context(|| format!("failed to write output: {}", path.display()))?;
            tracing::info!(path = %path.display(), "wrote output");
        }
        None => println!("{json}"),
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn temp_file(contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[test]
    fn missing_config_path_gives_defaults() {
        assert_eq!(load_config(None).unwrap(), EngineConfig::default());
    }

    #[test]
    fn partial_yaml_config_keeps_other_defaults() {
        let file = temp_file("top_companies_limit: 3\nnnd:\n  default_cap: 1800\n");
        let config = load_config(Some(file.path())).unwrap();
        assert_eq!(config.top_companies_limit, 3);
        assert_eq!(config.nnd.default_cap, 1800);
        assert_eq!(config.nnd.reduced_cap, 1200);
        assert_eq!(config.nnd.high_input_threshold, 4000);
    }

    #[test]
    fn invalid_yaml_config_is_rejected() {
        let file = temp_file("nnd:\n  reduced_cap: 2000\n  default_cap: 1000\n");
        let err = load_config(Some(file.path())).unwrap_err();
        assert!(format!("{err:#}").contains("invalid engine config"));
    }

    #[test]
    fn records_accept_bare_and_wrapped_forms() {
        let bare = temp_file(r#"[{"company": "Acme"}, {"company": "Birch"}]"#);
        assert_eq!(read_records(bare.path()).unwrap().len(), 2);

        let wrapped = temp_file(r#"{"records": [{"company": "Acme"}]}"#);
        let records = read_records(wrapped.path()).unwrap();
        assert_eq!(records[0].company_label(), "Acme");
    }

    #[test]
    fn unreadable_file_reports_path() {
        let err = read_records(Path::new("/nonexistent/wells.json")).unwrap_err();
        assert!(format!("{err:#}").contains("/nonexistent/wells.json"));
    }

    #[test]
    fn write_output_to_file() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("out.json");
        write_output(&serde_json::json!({"count": 2}), Some(&out)).unwrap();
        let written: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&out).unwrap()).unwrap();
        assert_eq!(written["count"], 2);
    }
}
