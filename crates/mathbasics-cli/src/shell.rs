//! Application shell: bootstrap and event dispatch.
//!
//! ## Startup
//!
//! [`Shell::start`] runs one fixed sequence:
//!
//! 1. register the configured resource root of every library not yet loaded,
//! 2. load `mathbasics` (dependencies first) through the given source,
//! 3. initialize the shell around the loaded library.
//!
//! A failure in any step is a [`ShellError::Bootstrap`], so loading problems
//! are never reported as arithmetic errors.
//!
//! ## Events
//!
//! [`dispatch`] is the single failure-display boundary: every [`Event`] ends up
//! as a [`Message`], with errors rendered as an error message instead of
//! propagating further.

use crate::config::ShellConfig;
use crate::error::ShellError;
use mathbasics::{
    add, divide, multiply, parse_operand, subtract, ExampleColor, LibraryEntry, LibraryRegistry,
    LibrarySource, Operation, LIBRARY_NAME,
};
use serde::Serialize;
use std::fmt;

/// Something the user asked the shell to do.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    Hello,
    /// Run the four reference operations.
    TestMath,
    /// Run one operation on textual operands.
    Calc {
        operation: Operation,
        lhs: String,
        rhs: String,
    },
    /// Show the loaded library's descriptor.
    Describe,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Icon {
    Information,
    Success,
    Error,
}

impl Icon {
    fn label(self) -> &'static str {
        match self {
            Icon::Information => "INFO",
            Icon::Success => "SUCCESS",
            Icon::Error => "ERROR",
        }
    }
}

/// What the user gets to see.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Message {
    pub title: String,
    pub icon: Icon,
    pub text: String,
    /// Structured data shown after `text`, kept as JSON for `--json` output.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payload: Option<serde_json::Value>,
}

impl Message {
    fn new(title: impl Into<String>, icon: Icon, text: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            icon,
            text: text.into(),
            payload: None,
        }
    }

    fn with_payload(mut self, payload: serde_json::Value) -> Self {
        self.payload = Some(payload);
        self
    }

    pub fn error(err: &ShellError) -> Self {
        Self::new("Error", Icon::Error, format!("Error: {}", err))
    }

    pub fn is_error(&self) -> bool {
        self.icon == Icon::Error
    }
}

impl fmt::Display for Message {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}\n\n{}", self.icon.label(), self.title, self.text)?;
        if let Some(payload) = &self.payload {
            let pretty = serde_json::to_string_pretty(payload).map_err(|_| fmt::Error)?;
            write!(f, "\n\n{}", pretty)?;
        }
        Ok(())
    }
}

/// The running application, with `mathbasics` loaded.
#[derive(Debug)]
pub struct Shell {
    registry: LibraryRegistry,
    library: LibraryEntry,
}

impl Shell {
    /// Boots a fresh registry. See the [module docs](self) for the sequence.
    pub fn start(config: &ShellConfig, source: &dyn LibrarySource) -> Result<Self, ShellError> {
        Self::start_with(LibraryRegistry::new(), config, source)
    }

    /// Boots on top of an existing registry; libraries it already holds are
    /// not loaded again.
    pub fn start_with(
        registry: LibraryRegistry,
        config: &ShellConfig,
        source: &dyn LibrarySource,
    ) -> Result<Self, ShellError> {
        // A loaded library keeps the root it was loaded from.
        for (name, base_path) in &config.resource_roots {
            if registry.is_loaded(name) {
                log::debug!("Keeping resource root of already loaded '{}'", name);
                continue;
            }
            registry
                .register_resource_root(name, base_path.as_str())
                .map_err(ShellError::Bootstrap)?;
        }

        registry
            .load(LIBRARY_NAME, source)
            .map_err(ShellError::Bootstrap)?;

        let library = registry
            .require(LIBRARY_NAME)
            .map_err(ShellError::Bootstrap)?;
        log::info!(
            "Shell ready: {} v{} ({} libraries loaded)",
            library.descriptor.name,
            library.descriptor.version,
            registry.len()
        );

        Ok(Self { registry, library })
    }

    pub fn registry(&self) -> &LibraryRegistry {
        &self.registry
    }

    pub fn library(&self) -> &LibraryEntry {
        &self.library
    }

    pub fn dispatch(&self, event: &Event) -> Message {
        dispatch(&self.registry, event)
    }
}

/// Handles `event` against `registry`, turning any failure into an error message.
pub fn dispatch(registry: &LibraryRegistry, event: &Event) -> Message {
    match handle(registry, event) {
        Ok(message) => message,
        Err(err) => {
            log::debug!("{:?} failed: {}", event, err);
            Message::error(&err)
        }
    }
}

fn handle(registry: &LibraryRegistry, event: &Event) -> Result<Message, ShellError> {
    match event {
        Event::Hello => Ok(Message::new("Hello", Icon::Information, "Hello World!")),
        Event::TestMath => {
            require(registry)?;
            test_math()
        }
        Event::Calc {
            operation,
            lhs,
            rhs,
        } => {
            require(registry)?;
            let evaluation = operation.evaluate(parse_operand(lhs)?, parse_operand(rhs)?)?;
            Ok(Message::new(
                format!("BasicMath {}", operation),
                Icon::Success,
                evaluation.to_string(),
            ))
        }
        Event::Describe => describe(&require(registry)?),
    }
}

fn require(registry: &LibraryRegistry) -> Result<LibraryEntry, ShellError> {
    registry.require(LIBRARY_NAME).map_err(ShellError::NotReady)
}

fn test_math() -> Result<Message, ShellError> {
    let lines = [
        format!("10 + 50 = {}", add(10.0, 50.0)),
        format!("5 × 4 = {}", multiply(5.0, 4.0)),
        format!("50 - 30 = {}", subtract(50.0, 30.0)),
        format!("100 ÷ 5 = {}", divide(100.0, 5.0)?),
    ];
    Ok(Message::new(
        "BasicMath Library Test",
        Icon::Success,
        format!("Math Operations Results:\n\n{}", lines.join("\n")),
    ))
}

#[derive(Serialize)]
struct Description<'a> {
    #[serde(flatten)]
    library: &'a LibraryEntry,
    colors: [ExampleColor; 2],
}

fn describe(library: &LibraryEntry) -> Result<Message, ShellError> {
    let description = Description {
        library,
        colors: ExampleColor::ALL,
    };
    let summary = format!(
        "{} v{} from {}",
        library.descriptor.name,
        library.descriptor.version,
        library.base_path.as_deref().unwrap_or("<no resource root>")
    );
    Ok(
        Message::new(library.descriptor.name.clone(), Icon::Information, summary)
            .with_payload(serde_json::to_value(&description)?),
    )
}
