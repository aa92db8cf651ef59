use std::path::PathBuf;
use thiserror::Error;

/// Errors raised by the arithmetic operations.
///
/// Both variants are recoverable: callers are expected to catch them and show
/// the `Display` text to the user.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum MathError {
    /// The divisor of [`divide`](crate::divide) was zero.
    #[error("division by zero: cannot divide {dividend} by 0")]
    DivisionByZero {
        /// The left-hand operand of the failed division.
        dividend: f64,
    },

    /// An operand given as text is not a finite number.
    #[error("invalid operand: {input:?} is not a finite number")]
    InvalidOperand {
        /// The rejected text, as received.
        input: String,
    },
}

/// Errors raised while resolving, registering or requiring a library.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LoaderError {
    /// No source knows a library by this name.
    #[error("unknown library '{0}'")]
    UnknownLibrary(String),

    /// The library was required before it finished loading.
    #[error("library '{0}' is not loaded")]
    LibraryNotLoaded(String),

    /// A descriptor was registered while one of its dependencies was absent.
    #[error("library '{library}' depends on '{dependency}', which is not loaded")]
    MissingDependency { library: String, dependency: String },

    /// Dependencies form a cycle; `chain` lists the names from the first
    /// repeated library back to itself.
    #[error("dependency cycle: {}", chain.join(" -> "))]
    DependencyCycle { chain: Vec<String> },

    /// A different descriptor is already registered under this name.
    #[error("library '{name}' is already loaded as version {loaded}, refusing version {offered}")]
    ConflictingDescriptor {
        name: String,
        loaded: String,
        offered: String,
    },

    /// A loaded library cannot be moved to a different resource root.
    #[error("library '{name}' is already loaded from '{current}', cannot move it to '{requested}'")]
    ResourceRootConflict {
        name: String,
        current: String,
        requested: String,
    },

    /// A manifest file could not be read or parsed.
    #[error("failed to read library manifest {}: {reason}", path.display())]
    Manifest { path: PathBuf, reason: String },
}
