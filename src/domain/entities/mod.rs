//! Domain Entities
//!
//! - `ComponentDefinition` - authored input, built with a builder
//! - `PropertyType` - resolved property kinds
//! - `ComponentGraph` - the IR: unified component types and default values
//! - `Binding` - per-target code generation recipe
//! - `Asset` - deduplicated design file
//! - `TargetOutput` - artifacts, imports and dependencies for one target
//! - `Snapshot` - serialized state pushed to hot-reload clients

mod asset;
mod binding;
mod definition;
mod graph;
mod output;
mod property_type;
mod snapshot;

pub use asset::{Asset, AssetId, AssetOutput, AssetRegistry, ResolvedAssets};
pub use binding::{
    binding_key, AssetBinder, AssetBinderContext, Binding, BindingOrigin, DependencyDescriptor,
};
pub use definition::{
    AssetRef, AssetSource, Collection, ComponentDefinition, DefinitionBuilder, Primitive,
    PropertyDecl, PropertyValue, ScaleVariant,
};
pub use graph::{ComponentGraph, ComponentNode, ComponentType, PropertySpec, ValueExpr};
pub use output::{
    Artifact, Diagnostic, Manifest, ManifestArtifact, ResourceEntry, ResourceFolders, Severity,
    TargetOutput, MANIFEST_FILE,
};
pub use property_type::{AssetKind, PropertyType};
pub use snapshot::Snapshot;
