//! Target emitter
//!
//! Renders one artifact per component type through its resolved binding,
//! merges binding imports and native dependencies, and runs asset binders.
//! Output is a pure function of the graph, the catalog and the asset files on
//! disk: unchanged input yields byte-identical artifacts.

pub mod dialect;
pub mod escaping;
mod kotlin;
mod swift;
mod typescript;

#[cfg(test)]
mod tests;

use std::path::{Path, PathBuf};

use serde::Serialize;
use tracing::{debug, warn};

use self::dialect::{Dialect, BANNER, FILE_TYPE};
use super::asset_pipeline;
use super::binding_registry::BindingCatalog;
use crate::domain::entities::{
    Artifact, AssetBinderContext, Binding, ComponentGraph, ComponentType, DependencyDescriptor,
    Diagnostic, PropertySpec, PropertyType, ResolvedAssets, ResourceFolders, TargetOutput,
    ValueExpr, MANIFEST_FILE,
};
use crate::domain::ports::FileSystem;
use crate::domain::value_objects::{ComponentPath, Target};
use crate::error::{SwatchError, SwatchResult};

/// Naming of the generated projects
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmitSettings {
    /// Swift module name (`Sources/<module>/...`)
    pub module: String,
    /// Kotlin package
    pub package: String,
}

impl Default for EmitSettings {
    fn default() -> Self {
        Self {
            module: "SwatchTokens".to_string(),
            package: "com.swatch.tokens".to_string(),
        }
    }
}

pub struct Emitter<'a> {
    catalog: &'a BindingCatalog,
    fs: &'a dyn FileSystem,
    settings: EmitSettings,
}

impl<'a> Emitter<'a> {
    pub fn new(catalog: &'a BindingCatalog, fs: &'a dyn FileSystem) -> Self {
        Self {
            catalog,
            fs,
            settings: EmitSettings::default(),
        }
    }

    pub fn with_settings(mut self, settings: EmitSettings) -> Self {
        self.settings = settings;
        self
    }

    pub fn settings(&self) -> &EmitSettings {
        &self.settings
    }

    /// Emit every component type of `graph` for `target`.
    ///
    /// Asset and dependency errors abort this target only.
    pub fn emit(&self, graph: &ComponentGraph, target: Target) -> SwatchResult<TargetOutput> {
        let dialect = dialect::dialect(target);
        let assets = asset_pipeline::finalize(graph.assets(), target, self.fs)?;

        let runtime = (!graph.assets().is_empty()).then(runtime_file_type);
        let mut imports: Vec<String> = Vec::new();
        let mut dependencies = DependencySet::default();
        let mut resources = ResourceFolders::default();
        let mut diagnostics = graph.diagnostics().to_vec();
        let mut artifacts = Vec::with_capacity(graph.type_count() + 1);

        for component in runtime.iter().chain(graph.types()) {
            let resolution = self.catalog.resolve_or_generic(component.name(), target);
            if resolution.is_generic() {
                warn!(
                    component = component.name(),
                    target = %target,
                    "no binding registered, using the generic structural binding"
                );
                diagnostics.push(
                    Diagnostic::warning(format!(
                        "no {} binding, emitted with the generic structural binding",
                        target
                    ))
                    .for_component(component.name())
                    .at(component.first_seen().clone()),
                );
            }
            let binding = resolution.binding();

            let context = RenderContext::new(
                dialect,
                &self.settings,
                component,
                binding,
                component.name() == graph.root(),
                &assets,
            );
            let contents = self.catalog.render(binding, &context)?;
            let path = dialect.artifact_path(&self.settings, component.name());
            debug!(
                component = component.name(),
                target = %target,
                path = %path.display(),
                origin = ?binding.origin(),
                "rendered artifact"
            );
            artifacts.push(Artifact::new(path, component.name(), contents, binding.origin()));

            for import in binding.imports() {
                if !imports.contains(import) {
                    imports.push(import.clone());
                }
            }
            for dependency in binding.dependencies() {
                dependencies.add(dependency, component, target)?;
            }
            if let Some(binder) = binding.asset_binder() {
                let context = AssetBinderContext {
                    target,
                    component,
                    registry: graph.assets(),
                    resolved: &assets,
                };
                binder(&context, &mut resources)?;
            }
        }

        artifacts.sort_by(|a, b| a.path().cmp(b.path()));
        check_resource_paths(target, &artifacts, &assets, &resources)?;

        Ok(TargetOutput {
            target,
            artifacts,
            imports,
            dependencies: dependencies.into_vec(),
            assets,
            resources,
            diagnostics,
        })
    }
}

/// Binder resources share the target tree with artifacts, asset files and the
/// manifest; none of them may claim the same path.
fn check_resource_paths(
    target: Target,
    artifacts: &[Artifact],
    assets: &ResolvedAssets,
    resources: &ResourceFolders,
) -> SwatchResult<()> {
    for (path, _) in resources.iter() {
        let owner = artifacts
            .iter()
            .find(|artifact| artifact.path() == path)
            .map(|artifact| PathBuf::from(artifact.component()))
            .or_else(|| {
                assets
                    .files()
                    .iter()
                    .find(|file| file.output == path)
                    .map(|file| file.source.clone())
            })
            .or_else(|| {
                (path == Path::new(MANIFEST_FILE)).then(|| PathBuf::from(MANIFEST_FILE))
            });
        if let Some(first) = owner {
            return Err(SwatchError::AssetPathCollision {
                target,
                output: path.to_path_buf(),
                first,
                second: PathBuf::from("asset binder resource"),
            });
        }
    }
    Ok(())
}

/// The runtime type assets are wrapped in
fn runtime_file_type() -> ComponentType {
    let string = |name: &str, default: &str| PropertySpec {
        name: name.to_string(),
        ty: PropertyType::String,
        default: ValueExpr::String(default.to_string()),
        updateable: false,
    };
    ComponentType::new(
        FILE_TYPE,
        vec![string("src", ""), string("type", "raw")],
        ComponentPath::root(),
    )
}

/// Native dependencies, deduplicated by name in first-seen order
#[derive(Default)]
struct DependencySet {
    entries: Vec<(DependencyDescriptor, String, ComponentPath)>,
}

impl DependencySet {
    fn add(
        &mut self,
        dependency: &DependencyDescriptor,
        component: &ComponentType,
        target: Target,
    ) -> SwatchResult<()> {
        let existing = self
            .entries
            .iter()
            .find(|(d, ..)| d.name() == dependency.name() && d.target() == dependency.target());
        match existing {
            Some((first, _, _)) if first.version() == dependency.version() => Ok(()),
            Some((first, first_component, first_path)) => {
                Err(SwatchError::IncompatibleDependency {
                    target,
                    name: dependency.name().to_string(),
                    first_version: first.version().to_string(),
                    first_component: first_component.clone(),
                    first_path: first_path.clone(),
                    second_version: dependency.version().to_string(),
                    second_component: component.name().to_string(),
                    second_path: component.first_seen().clone(),
                })
            }
            None => {
                self.entries.push((
                    dependency.clone(),
                    component.name().to_string(),
                    component.first_seen().clone(),
                ));
                Ok(())
            }
        }
    }

    fn into_vec(self) -> Vec<DependencyDescriptor> {
        self.entries.into_iter().map(|(d, ..)| d).collect()
    }
}

/// Handlebars data for one artifact
#[derive(Debug, Serialize)]
struct RenderContext<'a> {
    component: &'a str,
    target: &'static str,
    public: bool,
    visibility: &'static str,
    access: &'static str,
    kind: &'static str,
    is_root: bool,
    banner: &'static str,
    package: &'a str,
    module: &'a str,
    imports: &'a [String],
    references: Vec<String>,
    properties: Vec<PropertyContext>,
    preamble: String,
    declarations: String,
    parameters: String,
    assignments: String,
    instantiation: String,
    members: String,
}

#[derive(Debug, Serialize)]
struct PropertyContext {
    name: String,
    #[serde(rename = "type")]
    type_name: String,
    default: String,
    updateable: bool,
}

impl<'a> RenderContext<'a> {
    fn new(
        dialect: &dyn Dialect,
        settings: &'a EmitSettings,
        component: &'a ComponentType,
        binding: &'a Binding,
        is_root: bool,
        assets: &ResolvedAssets,
    ) -> Self {
        let public = binding.is_public();
        let blocks = dialect.blocks(component, public, assets);
        Self {
            component: component.name(),
            target: dialect.target().directory_name(),
            public,
            visibility: dialect.visibility(public),
            access: dialect.access(public),
            kind: dialect.class_kind(component),
            is_root,
            banner: BANNER,
            package: &settings.package,
            module: &settings.module,
            imports: binding.imports(),
            references: dialect::referenced_types(component),
            properties: component
                .properties()
                .iter()
                .map(|p| PropertyContext {
                    name: p.name.clone(),
                    type_name: dialect.type_name(&p.ty),
                    default: dialect.literal(&p.default, assets),
                    updateable: p.updateable,
                })
                .collect(),
            preamble: dialect.preamble(settings, component, binding.imports()),
            declarations: blocks.declarations,
            parameters: blocks.parameters,
            assignments: blocks.assignments,
            instantiation: blocks.instantiation,
            members: blocks.members,
        }
    }
}
