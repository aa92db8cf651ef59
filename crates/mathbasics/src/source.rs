//! Descriptor sources.
//!
//! The registry never decides on its own where a library comes from. It asks a
//! [`LibrarySource`] to resolve a name (and the resource root registered for
//! it, if any) into a [`LibraryDescriptor`]:
//!
//! - [`BuiltinSource`] knows descriptors compiled into the binary, starting
//!   with this crate's own.
//! - [`ManifestSource`] reads a `library.json` manifest from the library's
//!   resource root on disk.
//!
//! Tests can supply their own implementation to count or script resolutions.

use crate::error::LoaderError;
use crate::library::{self, LibraryDescriptor};
use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// File name of a library manifest inside its resource root.
pub const MANIFEST_FILE: &str = "library.json";

/// Resolves a library name to its descriptor.
pub trait LibrarySource: Send + Sync + std::fmt::Debug {
    /// Resolves `name`, given the resource root registered for it.
    ///
    /// # Errors
    ///
    /// [`LoaderError::UnknownLibrary`] if the source has no such library,
    /// or a source-specific error if resolution failed.
    fn resolve(
        &self,
        name: &str,
        base_path: Option<&str>,
    ) -> Result<LibraryDescriptor, LoaderError>;
}

/// In-memory source preloaded with the `mathbasics` descriptor.
#[derive(Debug, Clone)]
pub struct BuiltinSource {
    descriptors: HashMap<String, LibraryDescriptor>,
}

impl Default for BuiltinSource {
    fn default() -> Self {
        Self::new()
    }
}

impl BuiltinSource {
    pub fn new() -> Self {
        let own = library::descriptor();
        let mut descriptors = HashMap::new();
        descriptors.insert(own.name.clone(), own);
        Self { descriptors }
    }

    /// Adds another known descriptor, replacing any with the same name.
    pub fn with_descriptor(mut self, descriptor: LibraryDescriptor) -> Self {
        self.descriptors.insert(descriptor.name.clone(), descriptor);
        self
    }
}

impl LibrarySource for BuiltinSource {
    fn resolve(
        &self,
        name: &str,
        _base_path: Option<&str>,
    ) -> Result<LibraryDescriptor, LoaderError> {
        self.descriptors
            .get(name)
            .cloned()
            .ok_or_else(|| LoaderError::UnknownLibrary(name.to_string()))
    }
}

/// Reads `<root>/library.json`.
///
/// The root is the resource root registered for the library. When none was
/// registered, `<fallback_dir>/<name>` is used if a fallback is configured.
#[derive(Debug, Clone, Default)]
pub struct ManifestSource {
    fallback_dir: Option<PathBuf>,
}

impl ManifestSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_fallback_dir(dir: impl Into<PathBuf>) -> Self {
        Self {
            fallback_dir: Some(dir.into()),
        }
    }

    fn manifest_path(&self, name: &str, base_path: Option<&str>) -> Option<PathBuf> {
        match base_path {
            Some(base) => Some(Path::new(base).join(MANIFEST_FILE)),
            None => self
                .fallback_dir
                .as_ref()
                .map(|dir| dir.join(name).join(MANIFEST_FILE)),
        }
    }
}

impl LibrarySource for ManifestSource {
    fn resolve(
        &self,
        name: &str,
        base_path: Option<&str>,
    ) -> Result<LibraryDescriptor, LoaderError> {
        let path = self
            .manifest_path(name, base_path)
            .ok_or_else(|| LoaderError::UnknownLibrary(name.to_string()))?;

        let manifest_error = |reason: String| LoaderError::Manifest {
            path: path.clone(),
            reason,
        };

        let content = std::fs::read_to_string(&path).map_err(|e| manifest_error(e.to_string()))?;
        let descriptor =
            LibraryDescriptor::from_json(&content).map_err(|e| manifest_error(e.to_string()))?;

        if descriptor.name != name {
            return Err(manifest_error(format!(
                "manifest declares library '{}', expected '{}'",
                descriptor.name, name
            )));
        }

        log::debug!("Read manifest for '{}' from {:?}", name, path);
        Ok(descriptor)
    }
}
