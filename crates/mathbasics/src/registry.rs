//! Name-keyed registry of loaded libraries.
//!
//! ## Overview
//!
//! [`LibraryRegistry`] is the loader's bookkeeping: it maps a library name to
//! its descriptor and the resource root it was loaded from. It is an explicit
//! value, constructed by the application and handed to whoever needs it.
//!
//! ## Guarantees
//!
//! - **At-most-once initialization**: a library is resolved and inserted once.
//!   Later [`load`](LibraryRegistry::load) calls return
//!   [`Registration::AlreadyLoaded`] without touching the source.
//! - **Dependencies first**: a descriptor is only inserted once every library
//!   it depends on is present. `load` walks dependencies depth-first in
//!   declaration order and reports cycles.
//! - **Load-before-use**: [`require`](LibraryRegistry::require) is the gate
//!   consumers pass before calling into a library.
//!
//! All mutation happens under one `Mutex`, so concurrent loaders of the same
//! name observe a single insertion.
//!
//! ## Example
//!
//! ```
//! use mathbasics::{BuiltinSource, LibraryRegistry, Registration};
//!
//! let registry = LibraryRegistry::new();
//! let source = BuiltinSource::new();
//!
//! assert_eq!(registry.load("mathbasics", &source)?, Registration::Loaded);
//! assert_eq!(registry.load("mathbasics", &source)?, Registration::AlreadyLoaded);
//! assert_eq!(registry.len(), 1);
//! # Ok::<(), mathbasics::LoaderError>(())
//! ```

use crate::error::LoaderError;
use crate::library::LibraryDescriptor;
use crate::source::LibrarySource;
use serde::Serialize;
use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard, PoisonError};

/// Outcome of a successful registration or load.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Registration {
    /// The library was inserted by this call.
    Loaded,
    /// The library was already present; nothing changed.
    AlreadyLoaded,
}

/// A loaded library.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LibraryEntry {
    pub descriptor: LibraryDescriptor,
    /// Resource root registered for the library when it was loaded.
    pub base_path: Option<String>,
}

#[derive(Debug, Default)]
struct RegistryState {
    entries: HashMap<String, LibraryEntry>,
    /// Names in the order they finished loading.
    order: Vec<String>,
    resource_roots: HashMap<String, String>,
}

impl RegistryState {
    fn insert(&mut self, descriptor: LibraryDescriptor) -> Result<Registration, LoaderError> {
        if let Some(existing) = self.entries.get(&descriptor.name) {
            if existing.descriptor == descriptor {
                log::debug!("Library '{}' already loaded", descriptor.name);
                return Ok(Registration::AlreadyLoaded);
            }
            log::warn!(
                "Rejected second registration of '{}' ({} vs loaded {})",
                descriptor.name,
                descriptor.version,
                existing.descriptor.version
            );
            return Err(LoaderError::ConflictingDescriptor {
                name: descriptor.name.clone(),
                loaded: existing.descriptor.version.clone(),
                offered: descriptor.version,
            });
        }

        if let Some(missing) = descriptor
            .dependencies
            .iter()
            .find(|dep| !self.entries.contains_key(dep.as_str()))
        {
            return Err(LoaderError::MissingDependency {
                library: descriptor.name.clone(),
                dependency: missing.clone(),
            });
        }

        let base_path = self.resource_roots.get(&descriptor.name).cloned();
        log::info!(
            "Loaded library '{}' v{} from {}",
            descriptor.name,
            descriptor.version,
            base_path.as_deref().unwrap_or("<no resource root>")
        );

        let name = descriptor.name.clone();
        self.entries.insert(
            name.clone(),
            LibraryEntry {
                descriptor,
                base_path,
            },
        );
        self.order.push(name);
        Ok(Registration::Loaded)
    }

    fn load(
        &mut self,
        name: &str,
        source: &dyn LibrarySource,
        stack: &mut Vec<String>,
    ) -> Result<Registration, LoaderError> {
        if self.entries.contains_key(name) {
            return Ok(Registration::AlreadyLoaded);
        }

        if let Some(pos) = stack.iter().position(|n| n == name) {
            let mut chain = stack[pos..].to_vec();
            chain.push(name.to_string());
            return Err(LoaderError::DependencyCycle { chain });
        }

        let base_path = self.resource_roots.get(name).map(String::as_str);
        let descriptor = source.resolve(name, base_path)?;
        if descriptor.name != name {
            return Err(LoaderError::UnknownLibrary(name.to_string()));
        }

        stack.push(name.to_string());
        for dependency in &descriptor.dependencies {
            self.load(dependency, source, stack)?;
        }
        stack.pop();

        self.insert(descriptor)
    }
}

/// Registry of loaded libraries. See the [module docs](self).
#[derive(Debug, Default)]
pub struct LibraryRegistry {
    state: Mutex<RegistryState>,
}

impl LibraryRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    // Every mutation replaces whole entries, so a poisoned state is still consistent.
    fn state(&self) -> MutexGuard<'_, RegistryState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Records where library `name` lives.
    ///
    /// Must happen before the library is loaded for the path to be attached to
    /// its entry. Re-registering the same path is a no-op.
    ///
    /// # Errors
    ///
    /// [`LoaderError::ResourceRootConflict`] if `name` is already loaded from a
    /// different root.
    pub fn register_resource_root(
        &self,
        name: &str,
        base_path: impl Into<String>,
    ) -> Result<(), LoaderError> {
        let base_path = base_path.into();
        let mut state = self.state();

        if let Some(entry) = state.entries.get(name) {
            if entry.base_path.as_deref() != Some(base_path.as_str()) {
                return Err(LoaderError::ResourceRootConflict {
                    name: name.to_string(),
                    current: entry
                        .base_path
                        .clone()
                        .unwrap_or_else(|| "<none>".to_string()),
                    requested: base_path,
                });
            }
            return Ok(());
        }

        log::info!("Resource root for '{}' set to {}", name, base_path);
        state.resource_roots.insert(name.to_string(), base_path);
        Ok(())
    }

    /// Inserts an already resolved descriptor.
    ///
    /// # Errors
    ///
    /// - [`LoaderError::ConflictingDescriptor`] if a different descriptor is
    ///   loaded under the same name.
    /// - [`LoaderError::MissingDependency`] if a dependency is not loaded yet.
    pub fn register(&self, descriptor: LibraryDescriptor) -> Result<Registration, LoaderError> {
        self.state().insert(descriptor)
    }

    /// Resolves `name` through `source` and loads it after its dependencies.
    ///
    /// Returns [`Registration::AlreadyLoaded`] without consulting the source if
    /// the library is present.
    pub fn load(&self, name: &str, source: &dyn LibrarySource) -> Result<Registration, LoaderError> {
        let mut stack = Vec::new();
        self.state().load(name, source, &mut stack)
    }

    pub fn is_loaded(&self, name: &str) -> bool {
        self.state().entries.contains_key(name)
    }

    /// Returns the entry for `name`, or [`LoaderError::LibraryNotLoaded`].
    pub fn require(&self, name: &str) -> Result<LibraryEntry, LoaderError> {
        self.state()
            .entries
            .get(name)
            .cloned()
            .ok_or_else(|| LoaderError::LibraryNotLoaded(name.to_string()))
    }

    /// Resource root of `name`, whether or not it is loaded yet.
    pub fn base_path(&self, name: &str) -> Option<String> {
        let state = self.state();
        match state.entries.get(name) {
            Some(entry) => entry.base_path.clone(),
            None => state.resource_roots.get(name).cloned(),
        }
    }

    /// Names of loaded libraries, in load order.
    pub fn loaded(&self) -> Vec<String> {
        self.state().order.clone()
    }

    pub fn len(&self) -> usize {
        self.state().entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::library;
    use crate::source::BuiltinSource;

    fn source_with(descriptors: Vec<LibraryDescriptor>) -> BuiltinSource {
        descriptors
            .into_iter()
            .fold(BuiltinSource::new(), BuiltinSource::with_descriptor)
    }

    #[test]
    fn test_register_and_require() {
        let registry = LibraryRegistry::new();
        assert!(registry.is_empty());
        assert_eq!(registry.register(library::descriptor()), Ok(Registration::Loaded));
        assert!(registry.is_loaded("mathbasics"));
        assert_eq!(registry.require("mathbasics").unwrap().descriptor, library::descriptor());
    }

    #[test]
    fn test_register_twice_is_idempotent() {
        let registry = LibraryRegistry::new();
        registry.register(library::descriptor()).unwrap();
        assert_eq!(
            registry.register(library::descriptor()),
            Ok(Registration::AlreadyLoaded)
        );
        assert_eq!(registry.len(), 1);
        assert_eq!(registry.loaded(), vec!["mathbasics"]);
    }

    #[test]
    fn test_register_conflicting_version() {
        let registry = LibraryRegistry::new();
        registry.register(LibraryDescriptor::new("mathbasics", "1.0.0")).unwrap();
        let err = registry
            .register(LibraryDescriptor::new("mathbasics", "2.0.0"))
            .unwrap_err();
        assert_eq!(
            err,
            LoaderError::ConflictingDescriptor {
                name: "mathbasics".into(),
                loaded: "1.0.0".into(),
                offered: "2.0.0".into(),
            }
        );
        assert_eq!(registry.require("mathbasics").unwrap().descriptor.version, "1.0.0");
    }

    #[test]
    fn test_register_missing_dependency() {
        let registry = LibraryRegistry::new();
        let app = LibraryDescriptor::new("app", "1").with_dependency("mathbasics");
        assert_eq!(
            registry.register(app),
            Err(LoaderError::MissingDependency {
                library: "app".into(),
                dependency: "mathbasics".into(),
            })
        );
        assert!(registry.is_empty());
    }

    #[test]
    fn test_require_not_loaded() {
        let registry = LibraryRegistry::new();
        assert_eq!(
            registry.require("mathbasics"),
            Err(LoaderError::LibraryNotLoaded("mathbasics".into()))
        );
    }

    #[test]
    fn test_load_resolves_dependencies_first() {
        let source = source_with(vec![
            LibraryDescriptor::new("core", "1"),
            LibraryDescriptor::new("widgets", "1").with_dependency("core"),
            LibraryDescriptor::new("app", "1")
                .with_dependency("widgets")
                .with_dependency("mathbasics"),
        ]);
        let registry = LibraryRegistry::new();
        assert_eq!(registry.load("app", &source), Ok(Registration::Loaded));
        assert_eq!(registry.loaded(), vec!["core", "widgets", "mathbasics", "app"]);
    }

    #[test]
    fn test_load_detects_cycle() {
        let source = source_with(vec![
            LibraryDescriptor::new("a", "1").with_dependency("b"),
            LibraryDescriptor::new("b", "1").with_dependency("c"),
            LibraryDescriptor::new("c", "1").with_dependency("b"),
        ]);
        let registry = LibraryRegistry::new();
        assert_eq!(
            registry.load("a", &source),
            Err(LoaderError::DependencyCycle {
                chain: vec!["b".into(), "c".into(), "b".into()],
            })
        );
        assert!(!registry.is_loaded("a"));
    }

    #[test]
    fn test_load_unknown_library() {
        let registry = LibraryRegistry::new();
        assert_eq!(
            registry.load("missing", &BuiltinSource::new()),
            Err(LoaderError::UnknownLibrary("missing".into()))
        );
    }

    #[test]
    fn test_resource_root_attached_on_load() {
        let registry = LibraryRegistry::new();
        registry
            .register_resource_root("mathbasics", "/resources/mathbasics")
            .unwrap();
        assert_eq!(registry.base_path("mathbasics").as_deref(), Some("/resources/mathbasics"));
        registry.load("mathbasics", &BuiltinSource::new()).unwrap();
        let entry = registry.require("mathbasics").unwrap();
        assert_eq!(entry.base_path.as_deref(), Some("/resources/mathbasics"));
    }

    #[test]
    fn test_resource_root_conflict_after_load() {
        let registry = LibraryRegistry::new();
        registry.register_resource_root("mathbasics", "/a").unwrap();
        registry.load("mathbasics", &BuiltinSource::new()).unwrap();

        assert_eq!(registry.register_resource_root("mathbasics", "/a"), Ok(()));
        assert!(matches!(
            registry.register_resource_root("mathbasics", "/b"),
            Err(LoaderError::ResourceRootConflict { .. })
        ));
        assert_eq!(registry.base_path("mathbasics").as_deref(), Some("/a"));
    }

    #[test]
    fn test_resource_root_can_change_before_load() {
        let registry = LibraryRegistry::new();
        registry.register_resource_root("mathbasics", "/a").unwrap();
        registry.register_resource_root("mathbasics", "/b").unwrap();
        assert_eq!(registry.base_path("mathbasics").as_deref(), Some("/b"));
    }
}
