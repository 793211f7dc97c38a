//! Property tests for IR construction over random component trees.

use proptest::prelude::*;

use swatch::{ComponentDefinition, IrBuilder};

/// Node `i > 0` hangs under node `parents[i - 1] % i`; every node gets its
/// own component name and `ints[i]` integer properties.
fn tree(parents: &[usize], ints: &[u8]) -> ComponentDefinition {
    let count = parents.len() + 1;
    let mut children: Vec<Vec<usize>> = vec![Vec::new(); count];
    for (offset, selector) in parents.iter().enumerate() {
        let child = offset + 1;
        children[selector % child].push(child);
    }

    let mut built: Vec<Option<ComponentDefinition>> = vec![None; count];
    for node in (0..count).rev() {
        let mut builder = ComponentDefinition::builder(format!("Node{}", node));
        for k in 0..ints.get(node).copied().unwrap_or(0) {
            builder = builder.property(format!("v{}", k), i64::from(k));
        }
        for child in &children[node] {
            let definition = built[*child].take().expect("children are built first");
            builder = builder.property(format!("child{}", child), definition);
        }
        built[node] = Some(builder.build());
    }
    built[0].take().expect("root")
}

fn shapes() -> impl Strategy<Value = (Vec<usize>, Vec<u8>)> {
    (0usize..12).prop_flat_map(|extra| {
        (
            proptest::collection::vec(any::<usize>(), extra),
            proptest::collection::vec(0u8..4, extra + 1),
        )
    })
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 64,
        .. ProptestConfig::default()
    })]

    /// PROPERTY: Each distinct component name yields exactly one type.
    #[test]
    fn property_one_type_per_component_name((parents, ints) in shapes()) {
        let root = tree(&parents, &ints);
        let dir = tempfile::tempdir().unwrap();

        let graph = IrBuilder::new(dir.path()).build(&root).unwrap();

        prop_assert_eq!(graph.type_count(), parents.len() + 1);
        prop_assert_eq!(graph.root(), "Node0");
    }

    /// PROPERTY: Types are ordered so that dependencies come first.
    #[test]
    fn property_dependencies_precede_referrers((parents, ints) in shapes()) {
        let root = tree(&parents, &ints);
        let dir = tempfile::tempdir().unwrap();
        let graph = IrBuilder::new(dir.path()).build(&root).unwrap();

        let order: Vec<&str> = graph.types().iter().map(|t| t.name()).collect();
        for (index, ty) in graph.types().iter().enumerate() {
            for dependency in ty.dependencies() {
                let position = order.iter().position(|name| *name == dependency).unwrap();
                prop_assert!(position < index, "{} before {} in {:?}", ty.name(), dependency, order);
            }
        }
    }

    /// PROPERTY: Building the same tree twice yields the same graph.
    #[test]
    fn property_build_is_deterministic((parents, ints) in shapes()) {
        let root = tree(&parents, &ints);
        let dir = tempfile::tempdir().unwrap();
        let builder = IrBuilder::new(dir.path());

        let first = builder.build(&root).unwrap();
        let second = builder.build(&root).unwrap();

        let names = |g: &swatch::ComponentGraph| -> Vec<String> {
            g.types().iter().map(|t| t.name().to_string()).collect()
        };
        prop_assert_eq!(names(&first), names(&second));
        prop_assert_eq!(first.root_value(), second.root_value());
    }

    /// PROPERTY: A component that contains itself is always rejected.
    #[test]
    fn property_self_reference_is_rejected((parents, ints) in shapes()) {
        let inner = tree(&parents, &ints);
        let root = ComponentDefinition::builder("Node0")
            .property("again", inner)
            .build();
        let dir = tempfile::tempdir().unwrap();

        prop_assert!(IrBuilder::new(dir.path()).build(&root).is_err());
    }
}
