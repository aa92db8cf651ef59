//! # mathbasics
//!
//! Basic arithmetic library together with the loader that makes it available
//! to a consuming application.
//!
//! ## Overview
//!
//! The crate has two halves:
//!
//! - **The library itself**: four pure operations ([`add`], [`subtract`],
//!   [`multiply`], [`divide`]) plus the [`ExampleColor`] metadata enum and the
//!   static [`LibraryDescriptor`] that identifies it (`name = "mathbasics"`).
//! - **The loader**: a name-keyed [`LibraryRegistry`] that records resource
//!   roots, loads dependencies before dependents, and guarantees that a library
//!   is initialized at most once no matter how many times it is requested.
//!
//! ## Architecture
//!
//! ```text
//! ┌───────────────┐  resolve(name, base)  ┌──────────────────┐
//! │ LibrarySource │ ◄──────────────────── │ LibraryRegistry  │
//! │   (trait)     │ ────────────────────► │  name → entry    │
//! └───────────────┘   LibraryDescriptor   └────────┬─────────┘
//!                                                  │ require(name)
//!                                                  ▼
//!                                          add / subtract /
//!                                          multiply / divide
//! ```
//!
//! The registry is an ordinary value that callers construct and pass around.
//! There is no process-wide singleton.
//!
//! ## Examples
//!
//! ### Loading, then calling
//!
//! ```
//! use mathbasics::{BuiltinSource, LibraryRegistry, LIBRARY_NAME};
//!
//! let registry = LibraryRegistry::new();
//! registry.register_resource_root(LIBRARY_NAME, "resources/mathbasics")?;
//! registry.load(LIBRARY_NAME, &BuiltinSource::new())?;
//! registry.require(LIBRARY_NAME)?;
//!
//! assert_eq!(mathbasics::add(10.0, 50.0), 60.0);
//! assert_eq!(mathbasics::divide(100.0, 5.0)?, 20.0);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! ### Handling division by zero
//!
//! ```
//! use mathbasics::{divide, MathError};
//!
//! match divide(100.0, 0.0) {
//!     Err(MathError::DivisionByZero { .. }) => {}
//!     other => panic!("unexpected: {:?}", other),
//! }
//! ```

/// Error types for arithmetic and loading.
pub mod error;
/// Library identity: descriptor and metadata enums.
pub mod library;
/// The four arithmetic operations.
pub mod ops;
/// Name-keyed registry of loaded libraries.
pub mod registry;
/// Pluggable descriptor sources used by the registry.
pub mod source;


pub use error::{LoaderError, MathError};
pub use library::{descriptor, ExampleColor, LibraryDescriptor, LIBRARY_NAME};
pub use ops::{add, divide, multiply, parse_operand, subtract, Evaluation, Operation};
pub use registry::{LibraryEntry, LibraryRegistry, Registration};
pub use source::{BuiltinSource, LibrarySource, ManifestSource, MANIFEST_FILE};
