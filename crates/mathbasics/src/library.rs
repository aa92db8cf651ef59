use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Name under which this library registers itself.
pub const LIBRARY_NAME: &str = "mathbasics";

/// Identity of a loadable library.
///
/// A descriptor is built once and never changed. The loader uses `name` as its
/// registry key and `dependencies` to decide what has to be loaded first.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LibraryDescriptor {
    pub name: String,
    pub version: String,
    /// Libraries that must be loaded before this one, in load order.
    #[serde(default)]
    pub dependencies: Vec<String>,
}

impl LibraryDescriptor {
    pub fn new(name: impl Into<String>, version: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            version: version.into(),
            dependencies: Vec::new(),
        }
    }

    /// Appends a dependency, keeping declaration order.
    pub fn with_dependency(mut self, dependency: impl Into<String>) -> Self {
        self.dependencies.push(dependency.into());
        self
    }

    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

/// Returns the descriptor of this library.
///
/// Evaluating it any number of times yields equal values and touches no state.
pub fn descriptor() -> LibraryDescriptor {
    LibraryDescriptor::new(LIBRARY_NAME, env!("CARGO_PKG_VERSION"))
}

/// Semantic colors of the example control.
///
/// Display metadata only; none of the arithmetic looks at it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum ExampleColor {
    /// Brand color.
    #[default]
    Default,
    Highlight,
}

impl ExampleColor {
    pub const ALL: [ExampleColor; 2] = [ExampleColor::Default, ExampleColor::Highlight];

    pub fn as_str(self) -> &'static str {
        match self {
            ExampleColor::Default => "Default",
            ExampleColor::Highlight => "Highlight",
        }
    }
}

impl fmt::Display for ExampleColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ExampleColor {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|color| color.as_str() == s)
            .ok_or_else(|| format!("unknown color '{}'", s))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_descriptor_identity() {
        let d = descriptor();
        assert_eq!(d.name, "mathbasics");
        assert_eq!(d.version, env!("CARGO_PKG_VERSION"));
        assert!(d.dependencies.is_empty());
    }

    #[test]
    fn test_descriptor_is_stable() {
        assert_eq!(descriptor(), descriptor());
    }

    #[test]
    fn test_descriptor_json() {
        let json = descriptor().to_json().unwrap();
        assert!(json.contains("\"name\": \"mathbasics\""));
        assert_eq!(LibraryDescriptor::from_json(&json).unwrap(), descriptor());
    }

    #[test]
    fn test_descriptor_json_without_dependencies() {
        let d = LibraryDescriptor::from_json(r#"{"name":"x","version":"1.0.0"}"#).unwrap();
        assert!(d.dependencies.is_empty());
    }

    #[test]
    fn test_with_dependency_keeps_order() {
        let d = LibraryDescriptor::new("app", "1")
            .with_dependency("core")
            .with_dependency("mathbasics");
        assert_eq!(d.dependencies, vec!["core", "mathbasics"]);
    }

    #[test]
    fn test_example_color_strings() {
        assert_eq!(ExampleColor::Default.to_string(), "Default");
        assert_eq!(ExampleColor::Highlight.as_str(), "Highlight");
        assert_eq!("Highlight".parse::<ExampleColor>(), Ok(ExampleColor::Highlight));
        assert!("highlight".parse::<ExampleColor>().is_err());
        assert_eq!(ExampleColor::default(), ExampleColor::Default);
    }

    #[test]
    fn test_example_color_serde() {
        let json = serde_json::to_string(&ExampleColor::Highlight).unwrap();
        assert_eq!(json, "\"Highlight\"");
    }
}
