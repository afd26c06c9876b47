use std::io::Read;
use std::path::Path;

use anyhow::Context;
use serde::de::DeserializeOwned;

/// Read and decode JSON from `path`, or from stdin when `path` is `None`.
pub fn read_json<T: DeserializeOwned>(path: Option<&Path>) -> anyhow::Result<T> {
    let text = read_text(path)?;
    let source = path.map_or_else(|| "stdin".to_string(), |p| p.display().to_string());
    serde_json::from_str(&text).with_context(|| format!("failed to parse JSON from {source}"))
}

fn read_text(path: Option<&Path>) -> anyhow::Result<String> {
    match path {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display())),
        None => {
            let mut text = String::new();
            std::io::stdin()
                .read_to_string(&mut text)
                .context("failed to read stdin")?;
            Ok(text)
        }
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::read_json;

    #[test]
    fn reads_json_from_file() {
        let mut file = tempfile::NamedTempFile::new().expect("temp file");
        write!(file, r#"{{"id": 7}}"#).expect("write");

        let value: serde_json::Value = read_json(Some(file.path())).expect("json should parse");
        assert_eq!(value["id"], 7);
    }

    #[test]
    fn invalid_json_names_the_source() {
        let mut file = tempfile::NamedTempFile::new().expect("temp file");
        write!(file, "not json").expect("write");

        let err = read_json::<serde_json::Value>(Some(file.path())).unwrap_err();
        assert!(format!("{err:#}").contains("failed to parse JSON from"));
    }

    #[test]
    fn missing_file_is_an_error() {
        let dir = tempfile::tempdir().expect("temp dir");
        let missing = dir.path().join("missing.json");
        let err = read_json::<serde_json::Value>(Some(&missing)).unwrap_err();
        assert!(format!("{err:#}").contains("failed to read"));
    }
}
