//! Standard library bindings for every target

use crate::domain::entities::{
    AssetBinderContext, Binding, BindingOrigin, DependencyDescriptor, ResourceEntry,
    ResourceFolders,
};
use crate::domain::services::binding_registry::templates::class_template;
use crate::domain::value_objects::Target;
use crate::error::SwatchResult;

/// Every standard binding, origin already set
pub fn bindings() -> Vec<Binding> {
    let mut all = Vec::new();
    all.extend(file());
    all.extend(color());
    all.extend(point());
    all.extend(gradient_stop());
    all.extend(linear_gradient());
    all.extend(fill());
    all.extend(font());
    all.extend(typograph());
    all.extend(image());
    all.extend(lottie());
    all
}

fn standard(component: &str, target: Target, extra: &str) -> Binding {
    let binding = Binding::new(component, target, class_template(target, extra))
        .with_origin(BindingOrigin::StandardLibrary);
    match target {
        Target::Ios => binding.with_import("Foundation"),
        Target::Android | Target::Web => binding,
    }
}

fn file() -> [Binding; 3] {
    [
        standard(
            "File",
            Target::Ios,
            "
    {{access}}var url: URL? {
        return Bundle.main.url(forResource: src, withExtension: nil)
    }
",
        ),
        standard("File", Target::Android, ""),
        standard("File", Target::Web, ""),
    ]
}

fn color() -> [Binding; 3] {
    [
        standard(
            "Color",
            Target::Ios,
            "
    {{access}}var uiColor: UIColor {
        let brightness = l + s * min(l, 1 - l)
        let saturation = brightness == 0 ? 0 : 2 * (1 - l / brightness)
        return UIColor(hue: h, saturation: saturation, brightness: brightness, alpha: a)
    }
",
        )
        .with_import("UIKit"),
        standard(
            "Color",
            Target::Android,
            "
    val argb: Int
        get() = ColorUtils.setAlphaComponent(
            ColorUtils.HSLToColor(floatArrayOf(h * 360f, s, l)),
            (a * 255f).toInt()
        )
",
        )
        .with_import("androidx.core.graphics.ColorUtils"),
        standard(
            "Color",
            Target::Web,
            "
  get css(): string {
    return `hsla(${this.h * 360}, ${this.s * 100}%, ${this.l * 100}%, ${this.a})`;
  }
",
        ),
    ]
}

fn point() -> [Binding; 3] {
    [
        standard(
            "Point2D",
            Target::Ios,
            "
    {{access}}var cgPoint: CGPoint {
        return CGPoint(x: x, y: y)
    }
",
        ),
        standard("Point2D", Target::Android, ""),
        standard("Point2D", Target::Web, ""),
    ]
}

fn gradient_stop() -> [Binding; 3] {
    [
        standard("GradientStop", Target::Ios, ""),
        standard("GradientStop", Target::Android, ""),
        standard("GradientStop", Target::Web, ""),
    ]
}

fn linear_gradient() -> [Binding; 3] {
    [
        standard("LinearGradient", Target::Ios, ""),
        standard("LinearGradient", Target::Android, ""),
        standard(
            "LinearGradient",
            Target::Web,
            "
  get css(): string {
    const stops = this.stops.map((stop) => `${stop.color.css} ${stop.position * 100}%`).join(', ');
    return `linear-gradient(${stops})`;
  }
",
        ),
    ]
}

fn fill() -> [Binding; 3] {
    [
        standard("Fill", Target::Ios, ""),
        standard("Fill", Target::Android, ""),
        standard(
            "Fill",
            Target::Web,
            "
  get css(): string {
    return this.type === 'LinearGradient' ? this.linearGradient.css : this.color.css;
  }
",
        ),
    ]
}

fn font() -> [Binding; 3] {
    [
        standard("Font", Target::Ios, ""),
        standard("Font", Target::Android, ""),
        standard(
            "Font",
            Target::Web,
            "
  get fontFamily(): string {
    return `'${this.name}'`;
  }
",
        )
        .with_asset_binder(web_font_faces),
    ]
}

fn typograph() -> [Binding; 3] {
    [
        standard(
            "Typograph",
            Target::Ios,
            "
    {{access}}var uiFont: UIFont? {
        return UIFont(name: font.name, size: fontSize)
    }
",
        )
        .with_import("UIKit"),
        standard("Typograph", Target::Android, ""),
        standard(
            "Typograph",
            Target::Web,
            "
  get style(): { fontFamily: string; fontSize: string; color: string } {
    return { fontFamily: this.font.fontFamily, fontSize: `${this.fontSize}px`, color: this.color.css };
  }
",
        ),
    ]
}

fn image() -> [Binding; 3] {
    [
        standard("Image", Target::Ios, ""),
        standard("Image", Target::Android, ""),
        standard(
            "Image",
            Target::Web,
            "
  get url(): string {
    return this.file.src;
  }
",
        ),
    ]
}

fn lottie() -> [Binding; 3] {
    [
        standard("Lottie", Target::Ios, "")
            .with_import("Lottie")
            .with_dependency(DependencyDescriptor::cocoapods("lottie-ios", "~> 3.1")),
        standard("Lottie", Target::Android, "")
            .with_import("com.airbnb.lottie.LottieAnimationView")
            .with_dependency(
                DependencyDescriptor::gradle("com.airbnb.android:lottie", "3.4.0")
                    .with_source("mavenCentral"),
            ),
        standard(
            "Lottie",
            Target::Web,
            "
  load(container: Element) {
    return lottie.loadAnimation({ container, path: this.file.src, loop: this.loop, autoplay: this.autoplay });
  }
",
        )
        .with_import("lottie from 'lottie-web'")
        .with_dependency(DependencyDescriptor::npm("lottie-web", "^5.7.0")),
    ]
}

/// `static/fonts.css` with one `@font-face` rule per registered font
fn web_font_faces(
    context: &AssetBinderContext<'_>,
    resources: &mut ResourceFolders,
) -> SwatchResult<()> {
    let folder = context.target.asset_folder();
    let mut css = String::new();
    for font in context.registry.fonts() {
        let Some(src) = context.resolved.src(font.id()) else {
            continue;
        };
        let family = font
            .logical()
            .file_stem()
            .map(|stem| stem.to_string_lossy().into_owned())
            .unwrap_or_default();
        let url = src
            .strip_prefix(folder)
            .map(|rest| rest.trim_start_matches('/'))
            .unwrap_or(src);
        css.push_str(&format!(
            "@font-face {{\n  font-family: '{}';\n  src: url('{}');\n}}\n",
            family, url
        ));
    }
    if !css.is_empty() {
        resources.insert(folder, "fonts.css", ResourceEntry::Contents(css))?;
    }
    Ok(())
}
