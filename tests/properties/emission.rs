//! Property tests for per-target emission.

use proptest::prelude::*;

use swatch::domain::entities::BindingOrigin;
use swatch::infrastructure::LocalFs;
use swatch::{Binding, BindingRegistry, ComponentDefinition, Emitter, IrBuilder, Target};

#[derive(Debug, Clone)]
enum Scalar {
    Int(i64),
    Float(f64),
    Bool(bool),
    Text(String),
}

fn value() -> impl Strategy<Value = Scalar> {
    prop_oneof![
        any::<i32>().prop_map(|v| Scalar::Int(i64::from(v))),
        (-1.0e6f64..1.0e6).prop_map(Scalar::Float),
        any::<bool>().prop_map(Scalar::Bool),
        "[ -~]{0,12}".prop_map(Scalar::Text),
    ]
}

/// Component with distinct property names `p0..pn`
fn component() -> impl Strategy<Value = ComponentDefinition> {
    proptest::collection::vec(value(), 1..8).prop_map(|values| {
        let mut builder = ComponentDefinition::builder("Card");
        for (index, value) in values.into_iter().enumerate() {
            let name = format!("p{}", index);
            builder = match value {
                Scalar::Int(v) => builder.property(name, v),
                Scalar::Float(v) => builder.property(name, v),
                Scalar::Bool(v) => builder.constant(name, v),
                Scalar::Text(v) => builder.property(name, v),
            };
        }
        builder.build()
    })
}

fn target() -> impl Strategy<Value = Target> {
    prop_oneof![Just(Target::Ios), Just(Target::Android), Just(Target::Web)]
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 48,
        .. ProptestConfig::default()
    })]

    /// PROPERTY: Emitting the same graph twice produces identical artifacts.
    #[test]
    fn property_emission_is_deterministic(root in component(), target in target()) {
        let dir = tempfile::tempdir().unwrap();
        let graph = IrBuilder::new(dir.path()).build(&root).unwrap();
        let catalog = BindingRegistry::with_standard_library().finalize().unwrap();
        let fs = LocalFs::new();
        let emitter = Emitter::new(&catalog, &fs);

        let first = emitter.emit(&graph, target).unwrap();
        let second = emitter.emit(&graph, target).unwrap();

        prop_assert_eq!(first.artifacts, second.artifacts);
    }

    /// PROPERTY: Without a binding every property still reaches the output.
    #[test]
    fn property_generic_binding_keeps_every_property(root in component(), target in target()) {
        let dir = tempfile::tempdir().unwrap();
        let graph = IrBuilder::new(dir.path()).build(&root).unwrap();
        let catalog = BindingRegistry::new().finalize().unwrap();
        let fs = LocalFs::new();

        let output = Emitter::new(&catalog, &fs).emit(&graph, target).unwrap();
        let card = output.artifact_for("Card").unwrap();

        prop_assert_eq!(card.origin(), BindingOrigin::Generic);
        for (name, _) in root.properties() {
            prop_assert!(card.contents().contains(name), "{} missing:\n{}", name, card.contents());
        }
    }

    /// PROPERTY: A user binding always replaces the generic one.
    #[test]
    fn property_user_binding_wins(root in component(), target in target()) {
        let dir = tempfile::tempdir().unwrap();
        let graph = IrBuilder::new(dir.path()).build(&root).unwrap();
        let mut registry = BindingRegistry::with_standard_library();
        registry
            .register(Binding::new("Card", target, "// custom {{component}} for {{target}}\n"))
            .unwrap();
        let catalog = registry.finalize().unwrap();
        let fs = LocalFs::new();

        let output = Emitter::new(&catalog, &fs).emit(&graph, target).unwrap();
        let card = output.artifact_for("Card").unwrap();

        prop_assert_eq!(card.origin(), BindingOrigin::User);
        prop_assert_eq!(
            card.contents(),
            format!("// custom Card for {}\n", target.directory_name())
        );
        prop_assert!(output.warnings().next().is_none());
    }
}
