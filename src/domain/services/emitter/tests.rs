use std::fs;
use std::path::{Path, PathBuf};

use tempfile::{tempdir, TempDir};

use super::*;
use crate::domain::entities::{
    AssetRef, BindingOrigin, ComponentDefinition, ResourceEntry,
};
use crate::domain::ports::FontLocator;
use crate::domain::services::binding_registry::{templates, BindingRegistry};
use crate::domain::services::ir_builder::IrBuilder;
use crate::domain::services::stdlib;
use crate::infrastructure::fs::LocalFs;

fn project(files: &[&str]) -> TempDir {
    let dir = tempdir().unwrap();
    for file in files {
        let path = dir.path().join(file);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, b"data").unwrap();
    }
    dir
}

fn header() -> ComponentDefinition {
    ComponentDefinition::builder("Header")
        .property("icon", AssetRef::image("pin.png"))
        .property("spacing", 8)
        .build()
}

fn standard_catalog() -> BindingCatalog {
    BindingRegistry::with_standard_library().finalize().unwrap()
}

fn emit(root: &ComponentDefinition, dir: &Path, catalog: &BindingCatalog, target: Target) -> SwatchResult<TargetOutput> {
    let graph = IrBuilder::new(dir).build(root)?;
    let fs = LocalFs::new();
    Emitter::new(catalog, &fs).emit(&graph, target)
}

#[test]
fn header_declares_spacing_and_asset_on_ios() {
    let dir = project(&["pin.png"]);
    let output = emit(&header(), dir.path(), &standard_catalog(), Target::Ios).unwrap();

    let artifact = output
        .artifact("Sources/SwatchTokens/Components/Header.swift")
        .unwrap();
    assert_eq!(
        artifact.contents(),
        r#"// This file was generated by swatch. Do not edit.

import Foundation

public final class Header: Decodable {
    public internal(set) var icon: File
    public internal(set) var spacing: Int

    public init(
        icon: File,
        spacing: Int
    ) {
        self.icon = icon
        self.spacing = spacing
    }

    public static func makeDefault() -> Header {
        return Header(
            icon: File(src: "Resources/pin.png", type: "image"),
            spacing: 8
        )
    }
}
"#
    );
    assert_eq!(artifact.origin(), BindingOrigin::Generic);
}

#[test]
fn header_declares_spacing_and_asset_on_web() {
    let dir = project(&["pin.png"]);
    let output = emit(&header(), dir.path(), &standard_catalog(), Target::Web).unwrap();

    let artifact = output.artifact("src/Header.ts").unwrap();
    assert_eq!(
        artifact.contents(),
        r#"// This file was generated by swatch. Do not edit.

import { File } from './File';

export class Header {
  constructor(
    public icon: File,
    public spacing: number,
  ) {}

  static makeDefault(): Header {
    return new Header(
      new File("static/pin.png", "image"),
      8,
    );
  }
}
"#
    );
}

#[test]
fn header_on_android_uses_package_layout() {
    let dir = project(&["pin.png"]);
    let output = emit(&header(), dir.path(), &standard_catalog(), Target::Android).unwrap();

    let artifact = output
        .artifact("src/main/java/com/swatch/tokens/Header.kt")
        .unwrap();
    assert!(artifact.contents().contains("package com.swatch.tokens\n"));
    assert!(artifact.contents().contains("data class Header(\n    var icon: File,\n    var spacing: Int\n)"));
    assert!(artifact
        .contents()
        .contains("icon = File(src = \"res/drawable-mdpi/pin.png\", type = \"image\")"));
}

#[test]
fn runtime_file_type_is_emitted_only_with_assets() {
    let dir = project(&["pin.png"]);
    let catalog = standard_catalog();

    let with_assets = emit(&header(), dir.path(), &catalog, Target::Web).unwrap();
    let file = with_assets.artifact_for("File").unwrap();
    assert_eq!(file.origin(), BindingOrigin::StandardLibrary);
    assert!(file.contents().contains("public readonly src: string"));

    let plain = ComponentDefinition::builder("Spacing").property("base", 4).build();
    let without = emit(&plain, dir.path(), &catalog, Target::Web).unwrap();
    assert!(without.artifact_for("File").is_none());
}

#[test]
fn emission_is_deterministic() {
    let dir = project(&["pin.png"]);
    let root = ComponentDefinition::builder("Theme")
        .property("header", header())
        .property("primary", stdlib::color_hex("#336699").unwrap())
        .property(
            "gradient",
            stdlib::linear_gradient(
                vec![
                    stdlib::gradient_stop(0.0, stdlib::color_hex("#000").unwrap()),
                    stdlib::gradient_stop(1.0, stdlib::color_hex("#fff").unwrap()),
                ],
                stdlib::point(0.0, 0.0),
                stdlib::point(1.0, 1.0),
            ),
        )
        .build();
    let catalog = standard_catalog();

    for target in Target::ALL {
        let first = emit(&root, dir.path(), &catalog, target).unwrap();
        let second = emit(&root, dir.path(), &catalog, target).unwrap();
        assert_eq!(first.artifacts, second.artifacts);
        assert_eq!(first.manifest_json().unwrap(), second.manifest_json().unwrap());
    }
}

#[test]
fn artifacts_are_sorted_by_path() {
    let dir = project(&[]);
    let root = ComponentDefinition::builder("Zeta")
        .property("alpha", stdlib::point(1.0, 2.0))
        .build();
    let output = emit(&root, dir.path(), &standard_catalog(), Target::Web).unwrap();
    let paths: Vec<_> = output.artifacts.iter().map(|a| a.path().to_path_buf()).collect();
    assert_eq!(paths, vec![PathBuf::from("src/Point2D.ts"), PathBuf::from("src/Zeta.ts")]);
}

#[test]
fn missing_binding_emits_every_property_with_a_warning() {
    let dir = project(&[]);
    let root = ComponentDefinition::builder("Card")
        .property("radius", 4)
        .property("title", "Hello")
        .constant("elevated", true)
        .build();
    let catalog = BindingRegistry::new().finalize().unwrap();

    for target in Target::ALL {
        let output = emit(&root, dir.path(), &catalog, target).unwrap();
        let card = output.artifact_for("Card").unwrap();
        for property in ["radius", "title", "elevated"] {
            assert!(card.contents().contains(property), "{} missing on {}", property, target);
        }
        assert_eq!(output.warnings().count(), 1);
        assert_eq!(output.warnings().next().unwrap().component.as_deref(), Some("Card"));
    }
}

#[test]
fn constants_are_immutable() {
    let dir = project(&[]);
    let root = ComponentDefinition::builder("Card").constant("radius", 4).build();
    let catalog = standard_catalog();

    let swift = emit(&root, dir.path(), &catalog, Target::Ios).unwrap();
    assert!(swift.artifact_for("Card").unwrap().contents().contains("public let radius: Int"));

    let kotlin = emit(&root, dir.path(), &catalog, Target::Android).unwrap();
    assert!(kotlin.artifact_for("Card").unwrap().contents().contains("val radius: Int"));

    let ts = emit(&root, dir.path(), &catalog, Target::Web).unwrap();
    assert!(ts.artifact_for("Card").unwrap().contents().contains("public readonly radius: number"));
}

#[test]
fn floats_render_with_a_fraction_and_import_core_graphics() {
    let dir = project(&[]);
    let root = ComponentDefinition::builder("Layout").property("gutter", 8.0).build();
    let catalog = standard_catalog();

    let swift = emit(&root, dir.path(), &catalog, Target::Ios).unwrap();
    let contents = swift.artifact_for("Layout").unwrap().contents().to_string();
    assert!(contents.contains("import CoreGraphics\n"));
    assert!(contents.contains("gutter: CGFloat"));
    assert!(contents.contains("gutter: 8.0"));

    let kotlin = emit(&root, dir.path(), &catalog, Target::Android).unwrap();
    assert!(kotlin.artifact_for("Layout").unwrap().contents().contains("gutter = 8.0f"));
}

#[test]
fn user_binding_renders_through_its_template() {
    let dir = project(&[]);
    let mut registry = BindingRegistry::with_standard_library();
    registry
        .register(
            Binding::new(
                "Color",
                Target::Web,
                "{{banner}}\nexport const {{camel_case component}} = { {{#each properties}}{{name}}: {{default}}{{#unless @last}}, {{/unless}}{{/each}} };\n",
            )
            .with_import("tinycolor from 'tinycolor2'"),
        )
        .unwrap();
    let catalog = registry.finalize().unwrap();

    let root = ComponentDefinition::builder("Palette")
        .property("primary", stdlib::color_hsla(0.5, 1.0, 0.5, 1.0))
        .build();
    let output = emit(&root, dir.path(), &catalog, Target::Web).unwrap();

    let color = output.artifact_for("Color").unwrap();
    assert_eq!(color.origin(), BindingOrigin::User);
    assert_eq!(
        color.contents(),
        "// This file was generated by swatch. Do not edit.\nexport const color = { h: 0.5, s: 1.0, l: 0.5, a: 1.0 };\n"
    );
    assert_eq!(output.imports, vec!["tinycolor from 'tinycolor2'"]);
}

#[test]
fn private_binding_is_internal() {
    let dir = project(&[]);
    let mut registry = BindingRegistry::new();
    registry
        .register(
            Binding::new("Card", Target::Android, templates::class_template(Target::Android, ""))
                .private(),
        )
        .unwrap();
    let catalog = registry.finalize().unwrap();
    let root = ComponentDefinition::builder("Card").property("radius", 4).build();

    let output = emit(&root, dir.path(), &catalog, Target::Android).unwrap();
    let card = output.artifact_for("Card").unwrap().contents().to_string();
    assert!(card.contains("internal data class Card("));
    assert!(card.contains("internal fun makeDefault(): Card"));
}

fn header_with_resource(folder: &'static str, name: &'static str) -> BindingCatalog {
    let mut registry = BindingRegistry::with_standard_library();
    registry
        .register(
            Binding::new("Header", Target::Web, templates::class_template(Target::Web, ""))
                .with_asset_binder(move |_, resources| {
                    resources.insert(folder, name, ResourceEntry::Contents("x".to_string()))
                }),
        )
        .unwrap();
    registry.finalize().unwrap()
}

#[test]
fn resources_cannot_overwrite_artifacts_or_assets() {
    let dir = project(&["pin.png"]);

    let err = emit(&header(), dir.path(), &header_with_resource("src", "Header.ts"), Target::Web)
        .unwrap_err();
    assert!(matches!(
        err,
        SwatchError::AssetPathCollision { ref output, ref first, .. }
            if output == Path::new("src/Header.ts") && first == Path::new("Header")
    ));

    let err = emit(&header(), dir.path(), &header_with_resource("static", "pin.png"), Target::Web)
        .unwrap_err();
    assert!(matches!(
        err,
        SwatchError::AssetPathCollision { ref output, .. } if output == Path::new("static/pin.png")
    ));

    let output = emit(&header(), dir.path(), &header_with_resource("static", "extra.css"), Target::Web)
        .unwrap();
    assert!(output.resources.get(Path::new("static/extra.css")).is_some());
}

#[test]
fn lottie_dependencies_are_collected() {
    let dir = project(&["intro.json"]);
    let root = ComponentDefinition::builder("Onboarding")
        .property("intro", stdlib::lottie("intro.json"))
        .build();
    let catalog = standard_catalog();

    let web = emit(&root, dir.path(), &catalog, Target::Web).unwrap();
    assert_eq!(web.dependencies, vec![DependencyDescriptor::npm("lottie-web", "^5.7.0")]);
    assert!(web
        .artifact_for("Lottie")
        .unwrap()
        .contents()
        .contains("import lottie from 'lottie-web';"));

    let android = emit(&root, dir.path(), &catalog, Target::Android).unwrap();
    assert_eq!(android.dependencies[0].source(), Some("mavenCentral"));
}

#[test]
fn incompatible_dependency_names_both_components() {
    let dir = project(&["intro.json"]);
    let mut registry = BindingRegistry::with_standard_library();
    registry
        .register(
            Binding::new("Player", Target::Web, "player")
                .with_dependency(DependencyDescriptor::npm("lottie-web", "^5.8.0")),
        )
        .unwrap();
    let catalog = registry.finalize().unwrap();

    let root = ComponentDefinition::builder("Screen")
        .property("intro", stdlib::lottie("intro.json"))
        .property(
            "player",
            ComponentDefinition::builder("Player").property("speed", 1.0).build(),
        )
        .build();

    let err = emit(&root, dir.path(), &catalog, Target::Web).unwrap_err();
    assert_eq!(
        err.to_string(),
        "incompatible Web dependency 'lottie-web': '^5.7.0' (from Lottie at intro) vs '^5.8.0' (from Player at player)"
    );

    // The conflict is scoped to the web target
    assert!(emit(&root, dir.path(), &catalog, Target::Ios).is_ok());
}

#[test]
fn missing_asset_fails_the_target() {
    let dir = project(&[]);
    let err = emit(&header(), dir.path(), &standard_catalog(), Target::Ios).unwrap_err();
    assert!(matches!(err, SwatchError::MissingAsset { .. }));
}

struct FixedFont(PathBuf);

impl FontLocator for FixedFont {
    fn locate(&self, _family: &str, _name: &str) -> Option<PathBuf> {
        Some(self.0.clone())
    }
}

#[test]
fn web_fonts_get_a_stylesheet() {
    let dir = project(&["fonts/Inter-Bold.ttf"]);
    let locator = FixedFont(dir.path().join("fonts/Inter-Bold.ttf"));
    let root = ComponentDefinition::builder("Text")
        .property(
            "title",
            stdlib::typograph(
                stdlib::font("Inter", "Inter-Bold"),
                24.0,
                stdlib::color_hex("#111").unwrap(),
            ),
        )
        .build();
    let graph = IrBuilder::new(dir.path()).with_fonts(&locator).build(&root).unwrap();
    let catalog = standard_catalog();
    let fs = LocalFs::new();

    let output = Emitter::new(&catalog, &fs).emit(&graph, Target::Web).unwrap();

    let Some(ResourceEntry::Contents(css)) = output.resources.get(Path::new("static/fonts.css")) else {
        panic!("fonts.css missing");
    };
    assert!(css.contains("font-family: 'Inter-Bold';"));
    assert!(css.contains("src: url('Inter-Bold.ttf');"));
}

#[test]
fn unlocated_font_still_emits_typography() {
    let dir = project(&[]);
    let root = ComponentDefinition::builder("Text")
        .property(
            "title",
            stdlib::typograph(
                stdlib::font("SomeFont", "SomeFont"),
                50.0,
                stdlib::color_hex("#000").unwrap(),
            ),
        )
        .build();

    let output = emit(&root, dir.path(), &standard_catalog(), Target::Ios).unwrap();

    assert!(output.artifact_for("File").is_none());
    let text = output.artifact_for("Text").unwrap().contents().to_string();
    assert!(text.contains("fontSize: 50.0"));
    assert!(text.contains("files: []"));
    // Font degradation plus the generic binding for Text
    assert_eq!(output.warnings().count(), 2);
    assert!(output
        .warnings()
        .any(|w| w.message == "unable to locate system font assets for 'SomeFont'"));
}
