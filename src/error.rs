//! Error types for Swatch
//!
//! Uses `thiserror` for library errors. Every structural error carries the
//! component path of the offending value so authoring mistakes can be located
//! without reading compiler internals.

use std::path::PathBuf;
use thiserror::Error;

use crate::domain::entities::PropertyType;
use crate::domain::ports::FsError;
use crate::domain::value_objects::{ComponentPath, Target};

/// Result type alias for Swatch operations
pub type SwatchResult<T> = Result<T, SwatchError>;

/// How far an error reaches.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorClass {
    /// Aborts the whole compilation pass, no output is written
    Structural,
    /// Degrades to the generic structural binding
    Resolution,
    /// Aborts emission for the target that needs the asset
    Asset,
    /// Aborts emission for the affected target
    Dependency,
    /// Aborts emission for the affected target
    Toolchain,
    /// Disconnects the affected hot-reload client
    Transport,
    /// I/O, serialization and configuration failures
    Environment,
}

/// Main error type for Swatch operations
#[derive(Error, Debug)]
pub enum SwatchError {
    /// A reference revisits a definition already on the ancestor chain
    #[error("cyclic reference to component '{component}' at {path}")]
    CyclicReference {
        component: String,
        path: ComponentPath,
    },

    /// Two properties of one unified type (or a collection and its items) disagree
    #[error("type conflict on '{component}.{property}' at {path}: expected {expected}, found {found}")]
    TypeConflict {
        component: String,
        property: String,
        expected: PropertyType,
        found: PropertyType,
        path: ComponentPath,
    },

    /// Two definitions share a name but declare different properties
    #[error("component '{component}' at {path} redeclares the shape first seen at {first}")]
    NamingCollision {
        component: String,
        first: ComponentPath,
        path: ComponentPath,
    },

    /// A property type names a component that never appears in the tree
    #[error("unknown component type '{component}' referenced at {path}")]
    UnknownComponent {
        component: String,
        path: ComponentPath,
    },

    /// Component or property name is not a usable identifier
    #[error("invalid {what} name '{name}' at {path}")]
    InvalidName {
        what: &'static str,
        name: String,
        path: ComponentPath,
    },

    /// Color string in none of the accepted CSS forms
    #[error("invalid color '{value}'")]
    InvalidColor { value: String },

    /// NaN or infinite float literal
    #[error("non-finite number at {path}")]
    NonFiniteNumber { path: ComponentPath },

    /// Number with no exact native type on every target (Kotlin `Int` is
    /// 32-bit, `Float` single precision)
    #[error("number {value} at {path} does not fit a 32-bit Int or Float on every target")]
    NumberOutOfRange { value: String, path: ComponentPath },

    /// Asset path escapes the project root
    #[error("asset path '{}' at {at} escapes project root '{}'", path.display(), root.display())]
    PathEscape {
        path: PathBuf,
        root: PathBuf,
        at: ComponentPath,
    },

    /// Same asset source referenced with two different kinds
    #[error("asset '{}' at {path} is used as both {first} and {second}", source_path.display())]
    AssetKindConflict {
        source_path: PathBuf,
        first: String,
        second: String,
        path: ComponentPath,
    },

    /// No binding registered for a component on a target
    #[error("no {target} binding for component '{component}'")]
    MissingBinding { component: String, target: Target },

    /// Referenced asset file does not exist
    #[error("missing asset '{}' referenced at {path}", source_path.display())]
    MissingAsset {
        source_path: PathBuf,
        path: ComponentPath,
    },

    /// Two distinct assets sanitize to the same output path
    #[error(
        "{target} asset path '{}' is produced by both '{}' and '{}'",
        output.display(),
        first.display(),
        second.display()
    )]
    AssetPathCollision {
        target: Target,
        output: PathBuf,
        first: PathBuf,
        second: PathBuf,
    },

    /// Asset binder resource that would land outside the target root
    #[error(
        "resource path '{}' must be relative and stay inside the target root",
        path.display()
    )]
    InvalidResourcePath { path: PathBuf },

    /// Same native dependency requested with two version constraints
    #[error(
        "incompatible {target} dependency '{name}': '{first_version}' (from {first_component} at {first_path}) vs '{second_version}' (from {second_component} at {second_path})"
    )]
    IncompatibleDependency {
        target: Target,
        name: String,
        first_version: String,
        first_component: String,
        first_path: ComponentPath,
        second_version: String,
        second_component: String,
        second_path: ComponentPath,
    },

    /// Target toolchain is not installed
    #[error("{target} toolchain unavailable: '{program}' not found")]
    ToolchainUnavailable { target: Target, program: String },

    /// Hot-reload client send or acknowledgement failure
    #[error("transport error for client {client}: {message}")]
    Transport { client: u64, message: String },

    /// Binding rejected at registration time
    #[error("invalid {target} binding for '{component}': {message}")]
    InvalidBinding {
        component: String,
        target: Target,
        message: String,
    },

    /// Design dump could not be read or interpreted
    #[error("invalid design dump {}: {message}", file.display())]
    InvalidDesignDump { file: PathBuf, message: String },

    /// Invalid configuration file
    #[error("invalid config in {}: {message}", file.display())]
    InvalidConfig { file: PathBuf, message: String },

    /// Template compilation error
    #[error("template error: {0}")]
    Template(#[from] Box<handlebars::TemplateError>),

    /// Template rendering error
    #[error("render error: {0}")]
    Render(#[from] Box<handlebars::RenderError>),

    /// File system port error
    #[error(transparent)]
    Fs(#[from] FsError),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl SwatchError {
    /// Classify the error by how far it reaches.
    pub fn class(&self) -> ErrorClass {
        match self {
            SwatchError::CyclicReference { .. }
            | SwatchError::TypeConflict { .. }
            | SwatchError::NamingCollision { .. }
            | SwatchError::UnknownComponent { .. }
            | SwatchError::InvalidName { .. }
            | SwatchError::NonFiniteNumber { .. }
            | SwatchError::NumberOutOfRange { .. }
            | SwatchError::InvalidColor { .. }
            | SwatchError::PathEscape { .. }
            | SwatchError::AssetKindConflict { .. } => ErrorClass::Structural,
            SwatchError::MissingBinding { .. } => ErrorClass::Resolution,
            SwatchError::MissingAsset { .. }
            | SwatchError::AssetPathCollision { .. }
            | SwatchError::InvalidResourcePath { .. } => ErrorClass::Asset,
            SwatchError::IncompatibleDependency { .. } => ErrorClass::Dependency,
            SwatchError::ToolchainUnavailable { .. } => ErrorClass::Toolchain,
            SwatchError::Transport { .. } => ErrorClass::Transport,
            SwatchError::InvalidBinding { .. }
            | SwatchError::InvalidDesignDump { .. }
            | SwatchError::InvalidConfig { .. }
            | SwatchError::Template(_)
            | SwatchError::Render(_)
            | SwatchError::Fs(_)
            | SwatchError::Io(_)
            | SwatchError::Json(_) => ErrorClass::Environment,
        }
    }

    /// True when the whole compilation pass must stop.
    pub fn is_fatal_for_pass(&self) -> bool {
        matches!(self.class(), ErrorClass::Structural | ErrorClass::Environment)
    }
}

impl From<handlebars::TemplateError> for SwatchError {
    fn from(err: handlebars::TemplateError) -> Self {
        SwatchError::Template(Box::new(err))
    }
}

impl From<handlebars::RenderError> for SwatchError {
    fn from(err: handlebars::RenderError) -> Self {
        SwatchError::Render(Box::new(err))
    }
}
