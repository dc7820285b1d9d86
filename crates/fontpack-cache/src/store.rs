use std::fs;
use std::path::{Component, Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

use anyhow::{Context, Result, bail};

/// Local storage collaborator for manifest bytes.
///
/// Paths are storage-relative (`<version-dir>/.manifest`). `read` returns
/// `Ok(None)` when the entry does not exist; `write` must commit durably and
/// atomically, so a concurrent reader sees either the old bytes or the new
/// bytes, never a torn file. Encryption at rest, if any, lives behind this
/// trait and is the host environment's concern.
pub trait ManifestStore: Send + Sync + std::fmt::Debug {
    fn read(&self, path: &str) -> Result<Option<Vec<u8>>>;
    fn write(&self, path: &str, bytes: &[u8]) -> Result<()>;
    fn remove(&self, path: &str) -> Result<()>;
}

/// Plain-file [`ManifestStore`] rooted at a single directory.
#[derive(Clone, Debug)]
pub struct FileStore {
    root: PathBuf,
}

impl FileStore {
    pub fn new(root: PathBuf) -> Self {
        Self { root }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn resolve(&self, path: &str) -> Result<PathBuf> {
        normalize_under_root(&self.root, Path::new(path))
    }

    fn tmp_path(&self) -> PathBuf {
        let now = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_nanos())
            .unwrap_or(0);
        let pid = std::process::id();
        self.root.join("tmp").join(format!("tmp_{pid}_{now}_manifest"))
    }
}

impl ManifestStore for FileStore {
    fn read(&self, path: &str) -> Result<Option<Vec<u8>>> {
        let full = self.resolve(path)?;
        match fs::read(&full) {
            Ok(bytes) => Ok(Some(bytes)),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(err) => {
                Err(err).with_context(|| format!("failed to read {}", full.display()))
            }
        }
    }

    fn write(&self, path: &str, bytes: &[u8]) -> Result<()> {
        let full = self.resolve(path)?;
        if let Some(parent) = full.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("failed to create {}", parent.display()))?;
        }
        let tmp = self.tmp_path();
        if let Some(tmp_dir) = tmp.parent() {
            fs::create_dir_all(tmp_dir)
                .with_context(|| format!("failed to create {}", tmp_dir.display()))?;
        }
        fs::write(&tmp, bytes).with_context(|| format!("failed to write {}", tmp.display()))?;
        fs::rename(&tmp, &full)
            .with_context(|| format!("failed to rename into {}", full.display()))?;
        Ok(())
    }

    fn remove(&self, path: &str) -> Result<()> {
        let full = self.resolve(path)?;
        let _ = fs::remove_file(&full);
        Ok(())
    }
}

fn normalize_under_root(root: &Path, path: &Path) -> Result<PathBuf> {
    if path.is_absolute() {
        bail!("storage path must be relative: {}", path.display());
    }
    let mut normalized = PathBuf::new();
    for component in path.components() {
        match component {
            Component::Normal(part) => normalized.push(part),
            Component::CurDir => {}
            _ => bail!("storage path escapes store root: {}", path.display()),
        }
    }
    if normalized.as_os_str().is_empty() {
        bail!("storage path is empty");
    }
    Ok(root.join(normalized))
}
