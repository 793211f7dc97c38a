//! Binding registry
//!
//! Bindings are collected in a mutable [`BindingRegistry`] (seeded with the
//! standard library, user registrations on top) and then frozen into a
//! [`BindingCatalog`]. Templates are compiled once, at `finalize`; the catalog
//! is immutable and shared by reference between target workers.

pub mod templates;


use handlebars::Handlebars;
use indexmap::IndexMap;
use serde::Serialize;
use tracing::debug;

use super::ir_builder::naming;
use super::stdlib;
use crate::domain::entities::{binding_key, Binding, BindingOrigin};
use crate::domain::value_objects::Target;
use crate::error::{SwatchError, SwatchResult};

/// Component name of the structural fallback bindings
pub const GENERIC_COMPONENT: &str = "__generic";

/// Mutable binding collection, keyed by `(component, target)`
#[derive(Debug, Default)]
pub struct BindingRegistry {
    bindings: IndexMap<String, Binding>,
}

impl BindingRegistry {
    /// Empty registry, without the standard library
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry seeded with every standard library binding
    pub fn with_standard_library() -> Self {
        let mut registry = Self::new();
        for binding in stdlib::bindings() {
            registry.insert(binding);
        }
        registry
    }

    /// Register a binding. A later registration for the same key wins.
    ///
    /// Rejects bindings whose component is not an identifier and
    /// dependencies declared for another target.
    pub fn register(&mut self, binding: Binding) -> SwatchResult<()> {
        if !naming::is_identifier(binding.component()) {
            return Err(invalid(&binding, "component name is not an identifier".to_string()));
        }
        if let Some(dependency) = binding
            .dependencies()
            .iter()
            .find(|d| d.target() != binding.target())
        {
            return Err(invalid(
                &binding,
                format!(
                    "dependency '{}' belongs to the {} target",
                    dependency.name(),
                    dependency.target()
                ),
            ));
        }
        self.insert(binding);
        Ok(())
    }

    fn insert(&mut self, binding: Binding) {
        let key = binding.key();
        if let Some(previous) = self.bindings.shift_remove(&key) {
            debug!(
                binding = %key,
                replaced = ?previous.origin(),
                by = ?binding.origin(),
                "binding replaced"
            );
        }
        self.bindings.insert(key, binding);
    }

    pub fn get(&self, component: &str, target: Target) -> Option<&Binding> {
        self.bindings.get(&binding_key(component, target))
    }

    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }

    /// Compile every template and freeze the registry.
    pub fn finalize(self) -> SwatchResult<BindingCatalog> {
        let mut handlebars = templates::engine();

        let generic = [
            generic_binding(Target::Ios),
            generic_binding(Target::Android),
            generic_binding(Target::Web),
        ];
        for binding in generic.iter().chain(self.bindings.values()) {
            handlebars
                .register_template_string(&binding.key(), binding.template())
                .map_err(|err| invalid(binding, err.to_string()))?;
        }

        debug!(bindings = self.bindings.len(), "binding catalog finalized");
        Ok(BindingCatalog {
            bindings: self.bindings,
            generic,
            handlebars,
        })
    }
}

/// Outcome of [`BindingCatalog::resolve_or_generic`]
#[derive(Debug, Clone, Copy)]
pub enum Resolution<'c> {
    Bound(&'c Binding),
    /// No binding registered; the structural fallback applies
    Generic(&'c Binding),
}

impl<'c> Resolution<'c> {
    pub fn binding(&self) -> &'c Binding {
        match self {
            Resolution::Bound(binding) | Resolution::Generic(binding) => binding,
        }
    }

    pub fn is_generic(&self) -> bool {
        matches!(self, Resolution::Generic(_))
    }
}

/// Immutable, compiled binding set
pub struct BindingCatalog {
    bindings: IndexMap<String, Binding>,
    /// Indexed by `Target as usize`, matching `Target::ALL`
    generic: [Binding; 3],
    handlebars: Handlebars<'static>,
}

impl BindingCatalog {
    pub fn resolve(&self, component: &str, target: Target) -> SwatchResult<&Binding> {
        self.bindings
            .get(&binding_key(component, target))
            .ok_or_else(|| SwatchError::MissingBinding {
                component: component.to_string(),
                target,
            })
    }

    pub fn resolve_or_generic(&self, component: &str, target: Target) -> Resolution<'_> {
        match self.resolve(component, target) {
            Ok(binding) => Resolution::Bound(binding),
            Err(_) => Resolution::Generic(self.generic(target)),
        }
    }

    /// Structural fallback binding for `target`
    pub fn generic(&self, target: Target) -> &Binding {
        &self.generic[target as usize]
    }

    /// Render the compiled template of `binding`
    pub fn render<T: Serialize>(&self, binding: &Binding, data: &T) -> SwatchResult<String> {
        Ok(self.handlebars.render(&binding.key(), data)?)
    }

    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }

    pub fn bindings(&self) -> impl Iterator<Item = &Binding> {
        self.bindings.values()
    }
}

impl std::fmt::Debug for BindingCatalog {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BindingCatalog")
            .field("bindings", &self.bindings.keys().collect::<Vec<_>>())
            .finish()
    }
}

fn generic_binding(target: Target) -> Binding {
    let binding = Binding::new(
        GENERIC_COMPONENT,
        target,
        templates::class_template(target, ""),
    )
    .with_origin(BindingOrigin::Generic);
    match target {
        Target::Ios => binding.with_import("Foundation"),
        Target::Android | Target::Web => binding,
    }
}

fn invalid(binding: &Binding, message: String) -> SwatchError {
    SwatchError::InvalidBinding {
        component: binding.component().to_string(),
        target: binding.target(),
        message,
    }
}
