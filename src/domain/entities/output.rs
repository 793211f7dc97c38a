//! Target output entities - what one emission pass produces for one target
//!
//! Everything here is plain data; the publisher decides where it lands.

use std::collections::BTreeMap;
use std::fmt;
use std::path::{Component, Path, PathBuf};

use serde::Serialize;

use super::asset::ResolvedAssets;
use super::binding::{BindingOrigin, DependencyDescriptor};
use super::property_type::AssetKind;
use crate::domain::value_objects::{ComponentPath, ContentHash, Target};
use crate::error::{SwatchError, SwatchResult};

/// File name of the per-target manifest
pub const MANIFEST_FILE: &str = "swatch.manifest.json";

/// A rendered source file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Artifact {
    /// Relative to the target output root
    path: PathBuf,
    component: String,
    contents: String,
    origin: BindingOrigin,
}

impl Artifact {
    pub fn new(
        path: impl Into<PathBuf>,
        component: impl Into<String>,
        contents: impl Into<String>,
        origin: BindingOrigin,
    ) -> Self {
        Self {
            path: path.into(),
            component: component.into(),
            contents: contents.into(),
            origin,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn component(&self) -> &str {
        &self.component
    }

    pub fn contents(&self) -> &str {
        &self.contents
    }

    pub fn origin(&self) -> BindingOrigin {
        self.origin
    }

    pub fn hash(&self) -> ContentHash {
        ContentHash::from_content(&self.contents)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Info,
    Warning,
}

/// Non-fatal finding surfaced alongside a successful result
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Diagnostic {
    pub severity: Severity,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub component: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<ComponentPath>,
    pub message: String,
}

impl Diagnostic {
    pub fn warning(message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Warning,
            component: None,
            path: None,
            message: message.into(),
        }
    }

    pub fn for_component(mut self, component: impl Into<String>) -> Self {
        self.component = Some(component.into());
        self
    }

    pub fn at(mut self, path: ComponentPath) -> Self {
        self.path = Some(path);
        self
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(component) = &self.component {
            write!(f, "{}: ", component)?;
        }
        write!(f, "{}", self.message)?;
        if let Some(path) = &self.path {
            write!(f, " (at {})", path)?;
        }
        Ok(())
    }
}

/// Entry placed into a target resource folder by an asset binder
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ResourceEntry {
    /// Written as-is
    Contents(String),
    /// Copied from a source file without rendering
    Copy(PathBuf),
}

/// Resource-folder entries keyed by output path relative to the target root
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResourceFolders {
    entries: BTreeMap<PathBuf, ResourceEntry>,
}

impl ResourceFolders {
    /// Insert `name` under `folder`; a later insert for the same path wins.
    ///
    /// The joined path must be relative with no `..` component.
    pub fn insert(
        &mut self,
        folder: impl AsRef<Path>,
        name: &str,
        entry: ResourceEntry,
    ) -> SwatchResult<()> {
        let joined = folder.as_ref().join(name);
        let mut path = PathBuf::new();
        for component in joined.components() {
            match component {
                Component::Normal(part) => path.push(part),
                Component::CurDir => {}
                Component::ParentDir | Component::RootDir | Component::Prefix(_) => {
                    return Err(SwatchError::InvalidResourcePath { path: joined });
                }
            }
        }
        if path.as_os_str().is_empty() {
            return Err(SwatchError::InvalidResourcePath { path: joined });
        }
        self.entries.insert(path, entry);
        Ok(())
    }

    pub fn get(&self, path: &Path) -> Option<&ResourceEntry> {
        self.entries.get(path)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&Path, &ResourceEntry)> {
        self.entries.iter().map(|(path, entry)| (path.as_path(), entry))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Everything emitted for one target
#[derive(Debug, Clone)]
pub struct TargetOutput {
    pub target: Target,
    /// Sorted by path
    pub artifacts: Vec<Artifact>,
    /// Union of binding imports, first-seen order
    pub imports: Vec<String>,
    /// Deduplicated by name, first-seen order
    pub dependencies: Vec<DependencyDescriptor>,
    pub assets: ResolvedAssets,
    pub resources: ResourceFolders,
    pub diagnostics: Vec<Diagnostic>,
}

impl TargetOutput {
    pub fn artifact(&self, path: impl AsRef<Path>) -> Option<&Artifact> {
        self.artifacts.iter().find(|a| a.path() == path.as_ref())
    }

    pub fn artifact_for(&self, component: &str) -> Option<&Artifact> {
        self.artifacts.iter().find(|a| a.component() == component)
    }

    pub fn warnings(&self) -> impl Iterator<Item = &Diagnostic> {
        self.diagnostics
            .iter()
            .filter(|d| d.severity == Severity::Warning)
    }

    /// Neutral JSON manifest describing imports, dependencies and files
    pub fn manifest(&self) -> Manifest<'_> {
        Manifest {
            target: self.target,
            imports: &self.imports,
            dependencies: &self.dependencies,
            artifacts: self
                .artifacts
                .iter()
                .map(|a| ManifestArtifact {
                    path: a.path(),
                    component: a.component(),
                    origin: a.origin(),
                    hash: a.hash().to_string(),
                })
                .collect(),
            assets: self.assets.files().iter().map(|f| f.output.as_path()).collect(),
            fonts: self
                .assets
                .files()
                .iter()
                .filter(|f| f.kind == AssetKind::Font)
                .map(|f| f.output.as_path())
                .collect(),
            resources: self.resources.iter().map(|(path, _)| path).collect(),
        }
    }

    /// Pretty JSON of [`TargetOutput::manifest`], newline terminated
    pub fn manifest_json(&self) -> serde_json::Result<String> {
        let mut json = serde_json::to_string_pretty(&self.manifest())?;
        json.push('\n');
        Ok(json)
    }
}

#[derive(Debug, Serialize)]
pub struct Manifest<'a> {
    pub target: Target,
    pub imports: &'a [String],
    pub dependencies: &'a [DependencyDescriptor],
    pub artifacts: Vec<ManifestArtifact<'a>>,
    pub assets: Vec<&'a Path>,
    /// Font files among `assets`, for runtimes that register fonts
    pub fonts: Vec<&'a Path>,
    pub resources: Vec<&'a Path>,
}

#[derive(Debug, Serialize)]
pub struct ManifestArtifact<'a> {
    pub path: &'a Path,
    pub component: &'a str,
    pub origin: BindingOrigin,
    pub hash: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn output() -> TargetOutput {
        TargetOutput {
            target: Target::Web,
            artifacts: vec![Artifact::new(
                "src/Header.ts",
                "Header",
                "export class Header {}\n",
                BindingOrigin::Generic,
            )],
            imports: vec!["lottie from 'lottie-web'".to_string()],
            dependencies: vec![DependencyDescriptor::npm("lottie-web", "^5.7.0")],
            assets: ResolvedAssets::new(Target::Web, Vec::new(), Vec::new()),
            resources: ResourceFolders::default(),
            diagnostics: vec![Diagnostic::warning("no binding").for_component("Header")],
        }
    }

    #[test]
    fn artifact_lookup() {
        let output = output();
        assert!(output.artifact("src/Header.ts").is_some());
        assert_eq!(output.artifact_for("Header").unwrap().origin(), BindingOrigin::Generic);
        assert!(output.artifact_for("Missing").is_none());
    }

    #[test]
    fn diagnostic_display() {
        let diagnostic = Diagnostic::warning("unable to locate system font assets for 'SomeFont'")
            .for_component("Font")
            .at(ComponentPath::root().child("font"));
        assert_eq!(
            diagnostic.to_string(),
            "Font: unable to locate system font assets for 'SomeFont' (at font)"
        );
    }

    #[test]
    fn manifest_lists_dependencies_and_hashes() {
        let json: serde_json::Value =
            serde_json::from_str(&output().manifest_json().unwrap()).unwrap();
        assert_eq!(json["target"], "web");
        assert_eq!(json["dependencies"][0]["kind"], "npm");
        assert_eq!(json["artifacts"][0]["origin"], "generic");
        assert!(json["artifacts"][0]["hash"]
            .as_str()
            .unwrap()
            .starts_with("sha256:"));
    }

    #[test]
    fn resource_folders_join_paths() {
        let mut resources = ResourceFolders::default();
        resources
            .insert("res/raw", "intro.json", ResourceEntry::Copy(PathBuf::from("/p/intro.json")))
            .unwrap();
        assert!(resources.get(Path::new("res/raw/intro.json")).is_some());
        assert_eq!(resources.len(), 1);
    }

    #[test]
    fn resource_paths_stay_inside_the_target_root() {
        let mut resources = ResourceFolders::default();
        let css = || ResourceEntry::Contents(String::new());

        for (folder, name) in [("static", "../../escape.css"), ("static", "/etc/passwd"), ("", "")] {
            let err = resources.insert(folder, name, css()).unwrap_err();
            assert!(matches!(err, SwatchError::InvalidResourcePath { .. }), "{folder}/{name}");
        }
        assert!(resources.is_empty());

        resources.insert("static", "./fonts.css", css()).unwrap();
        assert!(resources.get(Path::new("static/fonts.css")).is_some());
    }
}
