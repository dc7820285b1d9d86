use crate::digest::ManifestDigest;

/// File name of the serialized manifest inside a version's directory.
pub const MANIFEST_FILE_NAME: &str = ".manifest";

/// Opaque identifier naming a manifest revision and its storage location.
///
/// `path` is the storage-relative directory for the revision; the manifest
/// itself lives at [`FontVersion::manifest_path`]. The optional digest pins
/// the expected content of that file for fetch-time verification.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct FontVersion {
    id: u64,
    path: String,
    digest: Option<ManifestDigest>,
}

impl FontVersion {
    pub fn new(id: u64, path: impl Into<String>) -> Self {
        Self {
            id,
            path: path.into(),
            digest: None,
        }
    }

    pub fn with_digest(mut self, digest: ManifestDigest) -> Self {
        self.digest = Some(digest);
        self
    }

    pub fn id(&self) -> u64 {
        self.id
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn digest(&self) -> Option<&ManifestDigest> {
        self.digest.as_ref()
    }

    /// Storage-relative location of this revision's manifest file.
    pub fn manifest_path(&self) -> String {
        format!("{}/{}", self.path, MANIFEST_FILE_NAME)
    }
}
