//! Binding entity - how one component type is generated for one target

use std::fmt;
use std::sync::Arc;

use serde::Serialize;

use super::asset::{AssetRegistry, ResolvedAssets};
use super::graph::ComponentType;
use super::output::ResourceFolders;
use crate::domain::value_objects::Target;
use crate::error::SwatchResult;

/// Native dependency declaration, one variant family per package ecosystem.
///
/// The compiler never interprets versions; it only compares them for equality
/// when the same dependency is requested twice.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DependencyDescriptor {
    CocoaPods {
        name: String,
        version: String,
    },
    Carthage {
        name: String,
        github: String,
        version: String,
    },
    Gradle {
        name: String,
        min_version: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        source: Option<String>,
    },
    Npm {
        name: String,
        version: String,
    },
}

impl DependencyDescriptor {
    pub fn cocoapods(name: impl Into<String>, version: impl Into<String>) -> Self {
        DependencyDescriptor::CocoaPods {
            name: name.into(),
            version: version.into(),
        }
    }

    pub fn carthage(
        name: impl Into<String>,
        github: impl Into<String>,
        version: impl Into<String>,
    ) -> Self {
        DependencyDescriptor::Carthage {
            name: name.into(),
            github: github.into(),
            version: version.into(),
        }
    }

    pub fn gradle(name: impl Into<String>, min_version: impl Into<String>) -> Self {
        DependencyDescriptor::Gradle {
            name: name.into(),
            min_version: min_version.into(),
            source: None,
        }
    }

    pub fn npm(name: impl Into<String>, version: impl Into<String>) -> Self {
        DependencyDescriptor::Npm {
            name: name.into(),
            version: version.into(),
        }
    }

    /// Repository the dependency is fetched from (gradle only)
    pub fn with_source(self, repository: impl Into<String>) -> Self {
        match self {
            DependencyDescriptor::Gradle {
                name, min_version, ..
            } => DependencyDescriptor::Gradle {
                name,
                min_version,
                source: Some(repository.into()),
            },
            other => other,
        }
    }

    pub fn target(&self) -> Target {
        match self {
            DependencyDescriptor::CocoaPods { .. } | DependencyDescriptor::Carthage { .. } => {
                Target::Ios
            }
            DependencyDescriptor::Gradle { .. } => Target::Android,
            DependencyDescriptor::Npm { .. } => Target::Web,
        }
    }

    pub fn name(&self) -> &str {
        match self {
            DependencyDescriptor::CocoaPods { name, .. }
            | DependencyDescriptor::Carthage { name, .. }
            | DependencyDescriptor::Gradle { name, .. }
            | DependencyDescriptor::Npm { name, .. } => name,
        }
    }

    /// Version constraint, verbatim
    pub fn version(&self) -> &str {
        match self {
            DependencyDescriptor::CocoaPods { version, .. }
            | DependencyDescriptor::Carthage { version, .. }
            | DependencyDescriptor::Npm { version, .. } => version,
            DependencyDescriptor::Gradle { min_version, .. } => min_version,
        }
    }

    /// Optional source locator
    pub fn source(&self) -> Option<&str> {
        match self {
            DependencyDescriptor::Carthage { github, .. } => Some(github),
            DependencyDescriptor::Gradle { source, .. } => source.as_deref(),
            _ => None,
        }
    }
}

/// Where a binding came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum BindingOrigin {
    StandardLibrary,
    User,
    /// Structural fallback synthesized for unbound types
    Generic,
}

/// Inputs handed to an asset binder
pub struct AssetBinderContext<'a> {
    pub target: Target,
    pub component: &'a ComponentType,
    pub registry: &'a AssetRegistry,
    pub resolved: &'a ResolvedAssets,
}

/// Callback adding target-specific resource entries once assets are resolved
pub type AssetBinder =
    Arc<dyn Fn(&AssetBinderContext<'_>, &mut ResourceFolders) -> SwatchResult<()> + Send + Sync>;

/// Code-generation recipe for `(component, target)`
#[derive(Clone)]
pub struct Binding {
    component: String,
    target: Target,
    template: String,
    /// Ordered, duplicates dropped
    imports: Vec<String>,
    dependencies: Vec<DependencyDescriptor>,
    public: bool,
    asset_binder: Option<AssetBinder>,
    origin: BindingOrigin,
}

impl Binding {
    /// User binding with the given handlebars template
    pub fn new(component: impl Into<String>, target: Target, template: impl Into<String>) -> Self {
        Self {
            component: component.into(),
            target,
            template: template.into(),
            imports: Vec::new(),
            dependencies: Vec::new(),
            public: true,
            asset_binder: None,
            origin: BindingOrigin::User,
        }
    }

    pub fn with_import(mut self, import: impl Into<String>) -> Self {
        let import = import.into();
        if !self.imports.contains(&import) {
            self.imports.push(import);
        }
        self
    }

    pub fn with_dependency(mut self, dependency: DependencyDescriptor) -> Self {
        self.dependencies.push(dependency);
        self
    }

    /// Generated type is internal to the generated module
    pub fn private(mut self) -> Self {
        self.public = false;
        self
    }

    pub fn with_asset_binder<F>(mut self, binder: F) -> Self
    where
        F: Fn(&AssetBinderContext<'_>, &mut ResourceFolders) -> SwatchResult<()>
            + Send
            + Sync
            + 'static,
    {
        self.asset_binder = Some(Arc::new(binder));
        self
    }

    pub(crate) fn with_origin(mut self, origin: BindingOrigin) -> Self {
        self.origin = origin;
        self
    }

    pub fn component(&self) -> &str {
        &self.component
    }

    pub fn target(&self) -> Target {
        self.target
    }

    pub fn template(&self) -> &str {
        &self.template
    }

    pub fn imports(&self) -> &[String] {
        &self.imports
    }

    pub fn dependencies(&self) -> &[DependencyDescriptor] {
        &self.dependencies
    }

    pub fn is_public(&self) -> bool {
        self.public
    }

    pub fn asset_binder(&self) -> Option<&AssetBinder> {
        self.asset_binder.as_ref()
    }

    pub fn origin(&self) -> BindingOrigin {
        self.origin
    }

    /// Template registry key
    pub fn key(&self) -> String {
        binding_key(&self.component, self.target)
    }
}

/// Template registry key for `(component, target)`
pub fn binding_key(component: &str, target: Target) -> String {
    format!("{}@{}", component, target.directory_name())
}

impl fmt::Debug for Binding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Binding")
            .field("component", &self.component)
            .field("target", &self.target)
            .field("imports", &self.imports)
            .field("dependencies", &self.dependencies)
            .field("public", &self.public)
            .field("asset_binder", &self.asset_binder.is_some())
            .field("origin", &self.origin)
            .finish()
    }
}
