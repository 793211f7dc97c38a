//! Design dump importer
//!
//! Turns the JSON dump of a design file into a component tree named after
//! the design system, with one group per token kind:
//!
//! ```json
//! {
//!   "name": "poodle surf",
//!   "colors": [{"name": "ocean blue", "value": "#3ab4ff"}],
//!   "gradients": [{"name": "sky", "from": {"x": 0, "y": 0}, "to": {"x": 0, "y": 1},
//!                  "stops": [{"position": 0, "color": "#fff"}]}],
//!   "typographs": [{"name": "title", "font": {"family": "Inter", "name": "Inter-Bold", "size": 24}}],
//!   "layers": [{"name": "pin", "class": "MSLayerGroup", "exportable": true,
//!               "width": 29, "height": 38, "layers": []}]
//! }
//! ```
//!
//! Fonts are referenced by family and PostScript name; the IR builder locates
//! them through its `FontLocator`.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use convert_case::{Case, Casing};
use serde::Deserialize;
use tracing::debug;

use crate::domain::entities::{ComponentDefinition, DefinitionBuilder};
use crate::domain::ports::DesignSource;
use crate::domain::services::ir_builder::naming;
use crate::domain::services::stdlib;
use crate::error::{SwatchError, SwatchResult};

/// Layer classes that are containers, never slices
const CONTAINER_CLASSES: &[&str] = &["MSArtboardGroup", "MSPage"];

/// Folder under the assets directory holding exported slices
pub const SLICE_FOLDER: &str = "slices";

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct DesignDump {
    pub name: String,
    pub colors: Vec<ColorToken>,
    pub gradients: Vec<GradientToken>,
    pub typographs: Vec<TypographToken>,
    pub layers: Vec<Layer>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ColorToken {
    pub name: String,
    pub value: String,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct DumpPoint {
    pub x: f64,
    pub y: f64,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct GradientStopToken {
    pub position: f64,
    pub color: String,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct GradientToken {
    pub name: String,
    #[serde(default)]
    pub from: DumpPoint,
    #[serde(default = "default_gradient_end")]
    pub to: DumpPoint,
    #[serde(default)]
    pub stops: Vec<GradientStopToken>,
}

fn default_gradient_end() -> DumpPoint {
    DumpPoint { x: 0.0, y: 1.0 }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct FontToken {
    pub family: String,
    pub name: String,
    pub size: f64,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct TypographToken {
    pub name: String,
    pub font: FontToken,
    #[serde(default)]
    pub color: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct Layer {
    pub name: String,
    #[serde(rename = "class")]
    pub class_name: String,
    pub exportable: bool,
    pub width: f64,
    pub height: f64,
    pub layers: Vec<Layer>,
}

impl Layer {
    fn is_slice(&self) -> bool {
        self.exportable && !CONTAINER_CLASSES.contains(&self.class_name.as_str())
    }
}

impl DesignDump {
    pub fn load(path: &Path) -> SwatchResult<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::parse(&content, path)
    }

    pub fn parse(content: &str, file: &Path) -> SwatchResult<Self> {
        let dump: DesignDump =
            serde_json::from_str(content).map_err(|e| SwatchError::InvalidDesignDump {
                file: file.to_path_buf(),
                message: e.to_string(),
            })?;
        if dump.name.trim().is_empty() {
            return Err(SwatchError::InvalidDesignDump {
                file: file.to_path_buf(),
                message: "missing design system name".to_string(),
            });
        }
        Ok(dump)
    }

    /// Exportable layers in document order, nested ones included
    pub fn slices(&self) -> Vec<&Layer> {
        fn walk<'a>(layers: &'a [Layer], out: &mut Vec<&'a Layer>) {
            for layer in layers {
                if layer.is_slice() {
                    out.push(layer);
                }
                walk(&layer.layers, out);
            }
        }
        let mut out = Vec::new();
        walk(&self.layers, &mut out);
        out
    }
}

/// Builds component definitions from dumps
#[derive(Debug, Clone)]
pub struct DesignDumpImporter {
    /// Exported assets folder, relative to the project root
    assets_dir: PathBuf,
}

impl DesignDumpImporter {
    pub fn new(assets_dir: impl Into<PathBuf>) -> Self {
        Self {
            assets_dir: assets_dir.into(),
        }
    }

    pub fn load(&self, path: &Path) -> SwatchResult<ComponentDefinition> {
        let dump = DesignDump::load(path)?;
        self.import(&dump, path)
    }

    /// `file` only labels errors
    pub fn import(&self, dump: &DesignDump, file: &Path) -> SwatchResult<ComponentDefinition> {
        let system = component_name(&dump.name);
        if !naming::is_valid_component(&system) {
            return Err(SwatchError::InvalidDesignDump {
                file: file.to_path_buf(),
                message: format!("'{}' does not yield a usable component name", dump.name),
            });
        }
        let color = |name: &str, value: &str| {
            stdlib::color_hex(value).map_err(|e| SwatchError::InvalidDesignDump {
                file: file.to_path_buf(),
                message: format!("{}: {}", name, e),
            })
        };

        let mut root = ComponentDefinition::builder(system.clone());

        if !dump.colors.is_empty() {
            let mut group = Group::new(format!("{}Colors", system));
            for token in &dump.colors {
                group = group.add(&token.name, color(&token.name, &token.value)?);
            }
            root = root.property("colors", group.build());
        }

        if !dump.gradients.is_empty() {
            let mut group = Group::new(format!("{}Gradients", system));
            for token in &dump.gradients {
                let stops = token
                    .stops
                    .iter()
                    .map(|stop| Ok(stdlib::gradient_stop(stop.position, color(&token.name, &stop.color)?)))
                    .collect::<SwatchResult<Vec<_>>>()?;
                group = group.add(
                    &token.name,
                    stdlib::linear_gradient(
                        stops,
                        stdlib::point(token.from.x, token.from.y),
                        stdlib::point(token.to.x, token.to.y),
                    ),
                );
            }
            root = root.property("gradients", group.build());
        }

        if !dump.typographs.is_empty() {
            let mut group = Group::new(format!("{}Typographs", system));
            for token in &dump.typographs {
                let fill = match &token.color {
                    Some(value) => color(&token.name, value)?,
                    None => stdlib::color_hsla(0.0, 0.0, 0.0, 1.0),
                };
                group = group.add(
                    &token.name,
                    stdlib::typograph(
                        stdlib::font(&token.font.family, &token.font.name),
                        token.font.size,
                        fill,
                    ),
                );
            }
            root = root.property("typographs", group.build());
        }

        let slices = dump.slices();
        if !slices.is_empty() {
            let mut group = Group::new(format!("{}Slices", system));
            for layer in slices {
                let path = self
                    .assets_dir
                    .join(SLICE_FOLDER)
                    .join(format!("{}.png", layer.name));
                group = group.add(
                    &layer.name,
                    stdlib::image(path, layer.width.round() as i64, layer.height.round() as i64),
                );
            }
            root = root.property("slices", group.build());
        }

        debug!(
            system = %system,
            colors = dump.colors.len(),
            gradients = dump.gradients.len(),
            typographs = dump.typographs.len(),
            "imported design dump"
        );
        Ok(root.build())
    }
}

/// One token group, with collision-free property names
struct Group {
    builder: DefinitionBuilder,
    taken: HashSet<String>,
}

impl Group {
    fn new(name: String) -> Self {
        Self {
            builder: ComponentDefinition::builder(name),
            taken: HashSet::new(),
        }
    }

    fn add(mut self, token: &str, value: ComponentDefinition) -> Self {
        let base = property_name(token);
        let mut name = base.clone();
        let mut n = 2;
        while !self.taken.insert(name.clone()) {
            name = format!("{}{}", base, n);
            n += 1;
        }
        self.builder = self.builder.property(name, value);
        self
    }

    fn build(self) -> ComponentDefinition {
        self.builder.build()
    }
}

fn words(name: &str) -> String {
    name.chars()
        .map(|c| if c.is_ascii_alphanumeric() { c } else { ' ' })
        .collect()
}

pub fn component_name(name: &str) -> String {
    words(name).to_case(Case::Pascal)
}

/// camelCase, prefixed with `_` when that alone is not a usable name
pub fn property_name(token: &str) -> String {
    let name = words(token).to_case(Case::Camel);
    if naming::is_valid_property(&name) {
        name
    } else {
        format!("_{}", name)
    }
}

/// Design dump file read on every rebuild
#[derive(Debug, Clone)]
pub struct DumpFileSource {
    path: PathBuf,
    importer: DesignDumpImporter,
    watched: Vec<PathBuf>,
}

impl DumpFileSource {
    pub fn new(path: impl Into<PathBuf>, importer: DesignDumpImporter) -> Self {
        let path = path.into();
        Self {
            watched: vec![path.clone()],
            path,
            importer,
        }
    }

    /// Also rebuild when something under `path` changes
    pub fn watching(mut self, path: impl Into<PathBuf>) -> Self {
        self.watched.push(path.into());
        self
    }
}

impl DesignSource for DumpFileSource {
    fn load(&self) -> SwatchResult<ComponentDefinition> {
        self.importer.load(&self.path)
    }

    fn watch_paths(&self) -> Vec<PathBuf> {
        self.watched.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::{PropertyValue, Primitive};

    const DUMP: &str = r##"{
        "name": "poodle surf",
        "colors": [
            {"name": "ocean blue", "value": "#3ab4ff"},
            {"name": "Ocean-Blue", "value": "#000"}
        ],
        "gradients": [
            {"name": "sky", "from": {"x": 0, "y": 0}, "to": {"x": 1, "y": 1},
             "stops": [{"position": 0, "color": "#fff"}, {"position": 1, "color": "#000"}]}
        ],
        "typographs": [
            {"name": "headline title", "font": {"family": "Inter", "name": "Inter-Bold", "size": 24}}
        ],
        "layers": [
            {"name": "Report", "class": "MSArtboardGroup", "exportable": true, "layers": [
                {"name": "pin", "class": "MSLayerGroup", "exportable": true, "width": 29.4, "height": 38, "layers": []},
                {"name": "background", "class": "MSShapeGroup", "exportable": false}
            ]}
        ]
    }"##;

    fn import() -> ComponentDefinition {
        let dump = DesignDump::parse(DUMP, Path::new("surf.json")).unwrap();
        DesignDumpImporter::new("assets").import(&dump, Path::new("surf.json")).unwrap()
    }

    fn group<'a>(root: &'a ComponentDefinition, name: &str) -> &'a ComponentDefinition {
        match &root.get(name).unwrap().value {
            PropertyValue::Reference(def) => def,
            other => panic!("{} is not a reference: {:?}", name, other),
        }
    }

    #[test]
    fn root_is_named_after_the_design_system() {
        let root = import();
        assert_eq!(root.name(), "PoodleSurf");
        let groups: Vec<&str> = root.properties().map(|(name, _)| name).collect();
        assert_eq!(groups, vec!["colors", "gradients", "typographs", "slices"]);
        assert_eq!(group(&root, "colors").name(), "PoodleSurfColors");
    }

    #[test]
    fn colliding_token_names_get_suffixes() {
        let root = import();
        let names: Vec<&str> = group(&root, "colors").properties().map(|(n, _)| n).collect();
        assert_eq!(names, vec!["oceanBlue", "oceanBlue2"]);
    }

    #[test]
    fn only_exportable_non_container_layers_are_slices() {
        let dump = DesignDump::parse(DUMP, Path::new("surf.json")).unwrap();
        let slices: Vec<&str> = dump.slices().iter().map(|l| l.name.as_str()).collect();
        assert_eq!(slices, vec!["pin"]);

        let root = import();
        let pin = group(group(&root, "slices"), "pin");
        assert_eq!(pin.name(), "Image");
        assert_eq!(
            pin.get("width").unwrap().value,
            PropertyValue::Primitive(Primitive::Int(29))
        );
    }

    #[test]
    fn typographs_default_to_black() {
        let root = import();
        let title = group(group(&root, "typographs"), "headlineTitle");
        assert_eq!(title.name(), "Typograph");
        let color = group(title, "color");
        assert_eq!(color.get("l").unwrap().value, PropertyValue::Primitive(Primitive::Float(0.0)));
    }

    #[test]
    fn property_names_are_sanitized() {
        assert_eq!(property_name("Primary Text"), "primaryText");
        assert_eq!(property_name("2 large"), "_2Large");
        assert_eq!(property_name("default"), "_default");
        assert_eq!(component_name("my design-system"), "MyDesignSystem");
    }

    #[test]
    fn invalid_color_names_the_token() {
        let dump = DesignDump {
            name: "Brand".to_string(),
            colors: vec![ColorToken {
                name: "accent".to_string(),
                value: "chartreuse".to_string(),
            }],
            ..DesignDump::default()
        };
        let err = DesignDumpImporter::new("assets")
            .import(&dump, Path::new("brand.json"))
            .unwrap_err();
        assert_eq!(
            err.to_string(),
            "invalid design dump brand.json: accent: invalid color 'chartreuse'"
        );
    }

    #[test]
    fn malformed_json_is_rejected() {
        let err = DesignDump::parse("{\"name\": 3}", Path::new("bad.json")).unwrap_err();
        assert!(matches!(err, SwatchError::InvalidDesignDump { .. }));

        let err = DesignDump::parse("{}", Path::new("empty.json")).unwrap_err();
        assert_eq!(
            err.to_string(),
            "invalid design dump empty.json: missing design system name"
        );
    }
}
