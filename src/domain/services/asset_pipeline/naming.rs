//! Output naming for assets
//!
//! iOS and web keep the logical path and percent-encode each segment. Android
//! flattens it into a resource name (`[a-z0-9_]`, starting with a letter)
//! inside a kind and density specific folder.

use std::path::{Component, Path, PathBuf};

use crate::domain::entities::AssetKind;
use crate::domain::value_objects::Target;

/// Characters left untouched by percent-encoding
fn is_unreserved(byte: u8) -> bool {
    byte.is_ascii_alphanumeric() || matches!(byte, b'-' | b'.' | b'_' | b'~')
}

/// Percent-encode one path segment (UTF-8, uppercase hex)
pub fn percent_encode(segment: &str) -> String {
    let mut out = String::with_capacity(segment.len());
    for byte in segment.bytes() {
        if is_unreserved(byte) {
            out.push(byte as char);
        } else {
            out.push_str(&format!("%{:02X}", byte));
        }
    }
    out
}

/// Android resource name for a logical path, extension excluded
pub fn android_resource_name(logical: &Path) -> String {
    let stem_path = logical.with_extension("");
    let joined = stem_path
        .components()
        .filter_map(|c| match c {
            Component::Normal(s) => Some(s.to_string_lossy().into_owned()),
            _ => None,
        })
        .collect::<Vec<_>>()
        .join("_");

    let mut name: String = joined
        .chars()
        .map(|c| {
            let c = c.to_ascii_lowercase();
            if c.is_ascii_lowercase() || c.is_ascii_digit() || c == '_' {
                c
            } else {
                '_'
            }
        })
        .collect();

    if !name.starts_with(|c: char| c.is_ascii_lowercase()) {
        name.insert_str(0, "asset_");
    }
    name
}

/// Android density qualifier for a scale multiplier
pub fn android_density(multiplier: u8) -> &'static str {
    match multiplier {
        0 | 1 => "mdpi",
        2 => "xhdpi",
        3 => "xxhdpi",
        _ => "xxxhdpi",
    }
}

fn extension_of(logical: &Path) -> Option<String> {
    logical
        .extension()
        .map(|ext| ext.to_string_lossy().to_lowercase())
}

/// Insert `@Nx` before the extension of a file name
fn scaled_file_name(file_name: &str, multiplier: u8) -> String {
    if multiplier <= 1 {
        return file_name.to_string();
    }
    match file_name.rfind('.') {
        Some(dot) if dot > 0 => format!(
            "{}@{}x{}",
            &file_name[..dot],
            multiplier,
            &file_name[dot..]
        ),
        _ => format!("{}@{}x", file_name, multiplier),
    }
}

/// Output path, relative to the target root, of one asset variant
pub fn output_path(target: Target, kind: AssetKind, logical: &Path, multiplier: u8) -> PathBuf {
    match target {
        Target::Ios | Target::Web => {
            let mut out = PathBuf::from(target.asset_folder());
            let segments: Vec<String> = logical
                .components()
                .filter_map(|c| match c {
                    Component::Normal(s) => Some(s.to_string_lossy().into_owned()),
                    _ => None,
                })
                .collect();
            if let Some((file_name, dirs)) = segments.split_last() {
                for dir in dirs {
                    out.push(percent_encode(dir));
                }
                let scaled = scaled_file_name(&percent_encode(file_name), multiplier);
                out.push(scaled);
            }
            out
        }
        Target::Android => {
            let folder = match kind {
                AssetKind::Image => format!("drawable-{}", android_density(multiplier)),
                AssetKind::Font => "font".to_string(),
                AssetKind::Raw | AssetKind::Animation => "raw".to_string(),
            };
            let mut name = android_resource_name(logical);
            if let Some(ext) = extension_of(logical) {
                name.push('.');
                name.push_str(&ext);
            }
            PathBuf::from(target.asset_folder()).join(folder).join(name)
        }
    }
}

/// Identity of an output file on the target.
///
/// Android resolves resources by folder and name alone, so `pin.png` and
/// `pin.jpg` are the same `R.drawable.pin`.
pub fn collision_key(target: Target, output: &Path) -> PathBuf {
    match target {
        Target::Android => output.with_extension(""),
        Target::Ios | Target::Web => output.to_path_buf(),
    }
}

/// Path of the `@Nx` sibling of a source file
pub fn scaled_sibling(source: &Path, multiplier: u8) -> PathBuf {
    let file_name = source
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    source.with_file_name(scaled_file_name(&file_name, multiplier))
}

/// Forward-slash form used in generated literals
pub fn to_literal(path: &Path) -> String {
    path.components()
        .filter_map(|c| match c {
            Component::Normal(s) => Some(s.to_string_lossy().into_owned()),
            _ => None,
        })
        .collect::<Vec<_>>()
        .join("/")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn percent_encodes_spaces_and_specials() {
        assert_eq!(percent_encode("image with spaces.jpg"), "image%20with%20spaces.jpg");
        assert_eq!(percent_encode("a&b#c"), "a%26b%23c");
        assert_eq!(percent_encode("héllo"), "h%C3%A9llo");
        assert_eq!(percent_encode("plain-name_1.png"), "plain-name_1.png");
    }

    #[test]
    fn android_names_are_resource_safe() {
        assert_eq!(android_resource_name(Path::new("assets/My Icon.PNG")), "assets_my_icon");
        assert_eq!(android_resource_name(Path::new("2x-logo.png")), "asset_2x_logo");
        assert_eq!(android_resource_name(Path::new("_hidden.png")), "asset__hidden");
    }

    #[test]
    fn ios_output_keeps_logical_path() {
        let path = output_path(
            Target::Ios,
            AssetKind::Image,
            Path::new("assets/image with spaces.jpg"),
            1,
        );
        assert_eq!(to_literal(&path), "Resources/assets/image%20with%20spaces.jpg");
    }

    #[test]
    fn web_output_scales_with_suffix() {
        let path = output_path(Target::Web, AssetKind::Image, Path::new("pin.png"), 3);
        assert_eq!(to_literal(&path), "static/pin@3x.png");
    }

    #[test]
    fn android_output_uses_density_folders() {
        let one = output_path(Target::Android, AssetKind::Image, Path::new("pin.png"), 1);
        let four = output_path(Target::Android, AssetKind::Image, Path::new("pin.png"), 4);
        assert_eq!(to_literal(&one), "res/drawable-mdpi/pin.png");
        assert_eq!(to_literal(&four), "res/drawable-xxxhdpi/pin.png");
    }

    #[test]
    fn android_output_kind_folders() {
        let font = output_path(Target::Android, AssetKind::Font, Path::new("Inter-Bold.ttf"), 1);
        let lottie = output_path(Target::Android, AssetKind::Animation, Path::new("intro.json"), 1);
        assert_eq!(to_literal(&font), "res/font/inter_bold.ttf");
        assert_eq!(to_literal(&lottie), "res/raw/intro.json");
    }

    #[test]
    fn scaled_sibling_inserts_multiplier() {
        assert_eq!(
            scaled_sibling(Path::new("/p/slices/pin.png"), 2),
            PathBuf::from("/p/slices/pin@2x.png")
        );
        assert_eq!(scaled_sibling(Path::new("/p/LICENSE"), 2), PathBuf::from("/p/LICENSE@2x"));
    }
}
