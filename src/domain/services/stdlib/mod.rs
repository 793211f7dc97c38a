//! Standard library
//!
//! Prefab definitions for common design tokens (colors, gradients, fills, fonts,
//! typography, images, animations) and the bindings that generate them on
//! every target, including the runtime `File` type assets are wrapped in.

mod bindings;
pub mod color;
mod prefabs;

pub use bindings::bindings;
pub use color::Hsla;
pub use prefabs::{
    color_hex, color_hsla, fill, font, font_file, gradient_stop, image, linear_gradient, lottie,
    point, typograph, FillType,
};
