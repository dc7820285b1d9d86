//! Core types for the fontpack manifest cache.
//!
//! This crate provides the building blocks shared by the cache runtime: the
//! decoded manifest model, the version identifiers that name manifest
//! revisions and their storage locations, digest parsing/verification, and
//! environment-driven source configuration. It carries no I/O of its own;
//! use `fontpack-cache`, which wraps these types with the disk-first
//! read-through cache.

pub mod digest;
pub mod env;
pub mod manifest;
pub mod version;

pub use digest::ManifestDigest;
pub use env::{SourceConfig, SourceKind, SourceLocation};
pub use manifest::{FontManifest, FontScript, FontScripts, FontVariant, ScriptTag};
pub use version::{FontVersion, MANIFEST_FILE_NAME};
