//! Prefab constructors for the standard component types

use std::path::PathBuf;

use super::color::{self, Hsla};
use crate::domain::entities::{
    AssetKind, AssetRef, Collection, ComponentDefinition, PropertyType, PropertyValue,
};
use crate::error::SwatchResult;

pub fn color_hsla(h: f64, s: f64, l: f64, a: f64) -> ComponentDefinition {
    ComponentDefinition::builder("Color")
        .property("h", h)
        .property("s", s)
        .property("l", l)
        .property("a", a)
        .build()
}

/// Color from any CSS form accepted by [`color::parse`]
pub fn color_hex(value: &str) -> SwatchResult<ComponentDefinition> {
    let Hsla { h, s, l, a } = color::parse(value)?;
    Ok(color_hsla(h, s, l, a))
}

pub fn point(x: f64, y: f64) -> ComponentDefinition {
    ComponentDefinition::builder("Point2D")
        .property("x", x)
        .property("y", y)
        .build()
}

pub fn gradient_stop(position: f64, color: ComponentDefinition) -> ComponentDefinition {
    ComponentDefinition::builder("GradientStop")
        .property("position", position)
        .property("color", color)
        .build()
}

/// Gradient along the line from `start` to `end`, in unit coordinates
pub fn linear_gradient(
    stops: Vec<ComponentDefinition>,
    start: ComponentDefinition,
    end: ComponentDefinition,
) -> ComponentDefinition {
    ComponentDefinition::builder("LinearGradient")
        .property(
            "stops",
            Collection::new(
                PropertyType::component("GradientStop"),
                stops.into_iter().map(PropertyValue::from),
            ),
        )
        .property("start", start)
        .property("end", end)
        .build()
}

/// What a [`fill`] paints with
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FillType {
    Color,
    LinearGradient,
}

impl FillType {
    pub fn as_str(&self) -> &'static str {
        match self {
            FillType::Color => "Color",
            FillType::LinearGradient => "LinearGradient",
        }
    }
}

/// Paint carrying both a color and a gradient; `kind` says which one applies.
pub fn fill(
    color: ComponentDefinition,
    linear_gradient: ComponentDefinition,
    kind: FillType,
) -> ComponentDefinition {
    ComponentDefinition::builder("Fill")
        .property("color", color)
        .property("linearGradient", linear_gradient)
        .property("type", kind.as_str())
        .build()
}

/// Installed font, located through the system font catalog at build time.
///
/// When the font cannot be located the file list ends up empty.
pub fn font(family: &str, name: &str) -> ComponentDefinition {
    font_with(name, AssetRef::system_font(family, name))
}

/// Font shipped inside the project
pub fn font_file(path: impl Into<PathBuf>, name: &str) -> ComponentDefinition {
    font_with(name, AssetRef::font(path))
}

fn font_with(name: &str, file: AssetRef) -> ComponentDefinition {
    ComponentDefinition::builder("Font")
        .property("name", name)
        .property(
            "files",
            Collection::new(PropertyType::Asset(AssetKind::Font), [PropertyValue::from(file)]),
        )
        .build()
}

pub fn typograph(font: ComponentDefinition, size: f64, color: ComponentDefinition) -> ComponentDefinition {
    ComponentDefinition::builder("Typograph")
        .property("font", font)
        .property("fontSize", size)
        .property("color", color)
        .build()
}

/// Image with its 1x point size; `@2x` siblings are discovered per target
pub fn image(path: impl Into<PathBuf>, width: i64, height: i64) -> ComponentDefinition {
    ComponentDefinition::builder("Image")
        .property("file", AssetRef::image(path))
        .property("width", width)
        .property("height", height)
        .build()
}

pub fn lottie(path: impl Into<PathBuf>) -> ComponentDefinition {
    ComponentDefinition::builder("Lottie")
        .property("file", AssetRef::animation(path))
        .property("loop", true)
        .property("autoplay", true)
        .build()
}
