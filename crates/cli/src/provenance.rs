use anyhow::{Context, Result};
use serde_json::{json, Value};
use std::ffi::OsString;
use std::fs;
use std::panic::Location;
use std::path::{Path, PathBuf};
use std::process::Command;

/// What a sidecar records besides the code revision.
pub struct Payload {
    pub params: Value,
    /// Free-form run tag from `--tag`, e.g. a dataset or sweep name.
    pub tag: Option<String>,
}

impl Payload {
    pub fn new(params: Value, tag: Option<String>) -> Self {
        Self { params, tag }
    }
}

/// Provenance document for `outputs`, without writing it anywhere.
#[track_caller]
pub fn document(payload: &Payload, outputs: &[String]) -> Value {
    let callsite = Location::caller();
    json!({
        "code_rev": current_git_rev(),
        "nac_version": nac::VERSION,
        "callsite": {
            "file": callsite.file(),
            "line": callsite.line()
        },
        "tag": payload.tag,
        "params": payload.params,
        "outputs": outputs
    })
}

/// Write `<artifact>.provenance.json` next to a result file.
#[track_caller]
pub fn write_sidecar<P: AsRef<Path>>(artifact: P, payload: Payload) -> Result<PathBuf> {
    let artifact = artifact.as_ref();
    let provenance_path = provenance_path(artifact);
    if let Some(parent) = provenance_path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)
                .with_context(|| format!("creating provenance dir {}", parent.display()))?;
        }
    }
    let doc = document(&payload, &[artifact.to_string_lossy().into_owned()]);
    fs::write(&provenance_path, serde_json::to_vec_pretty(&doc)?)
        .with_context(|| format!("writing {}", provenance_path.display()))?;
    Ok(provenance_path)
}

fn provenance_path(artifact: &Path) -> PathBuf {
    let stem = artifact
        .file_stem()
        .map(|s| s.to_os_string())
        .unwrap_or_else(|| OsString::from("artifact"));
    let mut name = stem;
    name.push(".provenance.json");
    artifact.with_file_name(name)
}

pub fn current_git_rev() -> String {
    if let Some(from_env) = option_env!("GIT_COMMIT") {
        if !from_env.is_empty() {
            return from_env.to_string();
        }
    }
    if let Ok(env_override) = std::env::var("GIT_COMMIT") {
        if !env_override.is_empty() {
            return env_override;
        }
    }
    Command::new("git")
        .args(["rev-parse", "HEAD"])
        .output()
        .ok()
        .filter(|output| output.status.success())
        .and_then(|output| String::from_utf8(output.stdout).ok())
        .map(|s| s.trim().to_string())
        .unwrap_or_else(|| "unknown".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn provenance_path_replaces_extension() {
        let base = Path::new("/tmp/runs/k33.csv");
        assert_eq!(
            provenance_path(base),
            Path::new("/tmp/runs/k33.provenance.json")
        );
    }

    #[test]
    fn sidecar_records_params_tag_and_output() {
        let dir = tempdir().unwrap();
        let artifact = dir.path().join("colorings.json");
        fs::write(&artifact, "{}").unwrap();
        let payload = Payload::new(json!({"algorithm": "cycles"}), Some("smoke".into()));
        let prov_path = write_sidecar(&artifact, payload).unwrap();
        assert!(prov_path.ends_with("colorings.provenance.json"));
        let parsed: Value = serde_json::from_slice(&fs::read(prov_path).unwrap()).unwrap();
        assert_eq!(parsed["outputs"][0], artifact.to_string_lossy().as_ref());
        assert_eq!(parsed["params"]["algorithm"], "cycles");
        assert_eq!(parsed["tag"], "smoke");
        assert_eq!(parsed["nac_version"], nac::VERSION);
    }

    #[test]
    fn document_without_outputs() {
        let doc = document(&Payload::new(json!({}), None), &[]);
        assert!(doc["tag"].is_null());
        assert_eq!(doc["outputs"].as_array().map(Vec::len), Some(0));
        assert!(doc["callsite"]["line"].as_u64().is_some());
    }
}
