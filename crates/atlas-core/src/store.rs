use std::fs;
use std::path::{Path, PathBuf};

use crate::error::StoreError;
use crate::import::import_model;
use crate::model::ArchitectureModel;

/// Overrides the data directory.
pub const HOME_ENV: &str = "ARCH_ATLAS_HOME";
const MODEL_SUFFIX: &str = ".arch.json";

/// Resolve the data directory: `$ARCH_ATLAS_HOME`, else `~/.arch-atlas`.
pub fn data_dir() -> PathBuf {
    if let Some(dir) = std::env::var_os(HOME_ENV).filter(|v| !v.is_empty()) {
        return PathBuf::from(dir);
    }
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".arch-atlas")
}

/// Atomic write (temp file + rename) so readers never see a half-written file.
fn write_atomic(dir: &Path, file_name: &str, data: &str) -> Result<(), StoreError> {
    fs::create_dir_all(dir)?;
    let tmp = dir.join(format!(".{file_name}.tmp"));
    fs::write(&tmp, data)?;
    fs::rename(&tmp, dir.join(file_name))?;
    Ok(())
}

// --- Named models ---

/// Named models stored as `<name>.arch.json` in one directory.
#[derive(Debug, Clone)]
pub struct ModelLibrary {
    root: PathBuf,
}

impl ModelLibrary {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn open_default() -> Self {
        Self::new(data_dir())
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn path(&self, name: &str) -> PathBuf {
        self.root.join(format!("{name}{MODEL_SUFFIX}"))
    }

    /// Model names, sorted.
    pub fn list(&self) -> Result<Vec<String>, StoreError> {
        if !self.root.exists() {
            return Ok(vec![]);
        }
        let mut names: Vec<String> = fs::read_dir(&self.root)?
            .filter_map(|entry| {
                let entry = entry.ok()?;
                let name = entry.file_name().to_string_lossy().to_string();
                name.strip_suffix(MODEL_SUFFIX)
                    .filter(|n| !n.starts_with('.'))
                    .map(|n| n.to_string())
            })
            .collect();
        names.sort();
        Ok(names)
    }

    pub fn read_raw(&self, name: &str) -> Result<String, StoreError> {
        let path = self.path(name);
        if !path.exists() {
            return Err(StoreError::NotFound(name.to_string()));
        }
        Ok(fs::read_to_string(path)?)
    }

    /// Read a model under the import policy.
    pub fn read(&self, name: &str) -> Result<ArchitectureModel, StoreError> {
        let raw = self.read_raw(name)?;
        Ok(import_model(&raw)?)
    }

    pub fn write(&self, name: &str, model: &ArchitectureModel) -> Result<(), StoreError> {
        let json = serde_json::to_string_pretty(model)?;
        write_atomic(&self.root, &format!("{name}{MODEL_SUFFIX}"), &json)
    }

    pub fn delete(&self, name: &str) -> Result<(), StoreError> {
        let path = self.path(name);
        if path.exists() {
            fs::remove_file(path)?;
        }
        Ok(())
    }
}

// --- Autosave ---

/// Single-slot store under a namespaced key. Failures are logged and swallowed: the
/// in-memory model stays authoritative when autosave breaks.
#[derive(Debug, Clone)]
pub struct AutosaveStore {
    dir: PathBuf,
    key: String,
}

impl AutosaveStore {
    pub fn new(dir: impl Into<PathBuf>, key: impl Into<String>) -> Self {
        Self {
            dir: dir.into(),
            key: key.into(),
        }
    }

    fn model_file(&self) -> String {
        format!("{}.json", self.key)
    }

    fn backup_file(&self) -> String {
        format!("{}.json.bak", self.key)
    }

    fn timestamp_file(&self) -> String {
        format!("{}-timestamp", self.key)
    }

    pub fn save(&self, model: &ArchitectureModel) {
        let result = serde_json::to_string_pretty(model)
            .map_err(StoreError::from)
            .and_then(|json| write_atomic(&self.dir, &self.model_file(), &json))
            .and_then(|()| {
                write_atomic(
                    &self.dir,
                    &self.timestamp_file(),
                    &chrono::Utc::now().to_rfc3339(),
                )
            });
        if let Err(e) = result {
            tracing::warn!(key = %self.key, error = %e, "failed to autosave model");
        }
    }

    /// `None` when nothing was saved or the saved file no longer parses. An unparsable
    /// file is copied to `<key>.json.bak` first, so the next save cannot destroy it.
    pub fn load(&self) -> Option<ArchitectureModel> {
        let path = self.dir.join(self.model_file());
        if !path.exists() {
            return None;
        }
        let raw = match fs::read_to_string(&path) {
            Ok(raw) => raw,
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "failed to read autosaved model");
                return None;
            }
        };
        match serde_json::from_str(&raw) {
            Ok(model) => Some(model),
            Err(e) => {
                let backup = self.dir.join(self.backup_file());
                match fs::copy(&path, &backup) {
                    Ok(_) => tracing::warn!(
                        path = %path.display(),
                        backup = %backup.display(),
                        error = %e,
                        "autosaved model does not parse; kept a copy"
                    ),
                    Err(copy_err) => tracing::warn!(
                        path = %path.display(),
                        error = %e,
                        backup_error = %copy_err,
                        "autosaved model does not parse and could not be backed up"
                    ),
                }
                None
            }
        }
    }

    /// Copy of the last autosave that failed to parse, if any.
    pub fn backup_path(&self) -> PathBuf {
        self.dir.join(self.backup_file())
    }

    pub fn clear(&self) {
        for file in [self.model_file(), self.timestamp_file()] {
            let path = self.dir.join(file);
            if path.exists() {
                if let Err(e) = fs::remove_file(&path) {
                    tracing::warn!(path = %path.display(), error = %e, "failed to clear autosave");
                }
            }
        }
    }

    /// RFC 3339 time of the last successful save.
    pub fn timestamp(&self) -> Option<String> {
        fs::read_to_string(self.dir.join(self.timestamp_file())).ok()
    }
}
