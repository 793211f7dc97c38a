//! Domain Layer
//!
//! The compiler core: pure logic over immutable values, no I/O except through
//! ports.
//!
//! ## Structure
//!
//! - `entities/` - Definitions, property types, the IR graph, bindings, assets, outputs
//! - `value_objects/` - Immutable value types (Target, ComponentPath, ContentHash)
//! - `services/` - IR builder, binding registry, asset pipeline, emitter, snapshots
//! - `ports/` - Interface definitions for infrastructure
//!
//! ## Design Principles
//!
//! 1. **No direct I/O** - File access, font lookup and toolchain probing go through ports
//! 2. **Rebuilt per pass** - Every derived value is recomputed, never mutated in place
//! 3. **Ports & Adapters** - Infrastructure provides the concrete implementations

pub mod entities;
pub mod ports;
pub mod services;
pub mod value_objects;
