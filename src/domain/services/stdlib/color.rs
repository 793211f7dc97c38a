//! CSS color parsing into HSLA

use crate::error::{SwatchError, SwatchResult};

/// Hue, saturation, lightness and alpha, each in `0.0..=1.0`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Hsla {
    pub h: f64,
    pub s: f64,
    pub l: f64,
    pub a: f64,
}

impl Hsla {
    pub fn from_rgba(r: u8, g: u8, b: u8, a: f64) -> Self {
        let r = f64::from(r) / 255.0;
        let g = f64::from(g) / 255.0;
        let b = f64::from(b) / 255.0;
        let max = r.max(g).max(b);
        let min = r.min(g).min(b);
        let l = (max + min) / 2.0;

        if max == min {
            return Self { h: 0.0, s: 0.0, l, a };
        }

        let d = max - min;
        let s = if l > 0.5 {
            d / (2.0 - max - min)
        } else {
            d / (max + min)
        };
        let h = if max == r {
            (g - b) / d + if g < b { 6.0 } else { 0.0 }
        } else if max == g {
            (b - r) / d + 2.0
        } else {
            (r - g) / d + 4.0
        };

        Self { h: h / 6.0, s, l, a }
    }
}

/// Parse `#RGB`, `#RRGGBB`, `#RRGGBBAA`, `rgb(r, g, b)` or `rgba(r, g, b, a)`.
pub fn parse(value: &str) -> SwatchResult<Hsla> {
    let trimmed = value.trim();
    let parsed = if let Some(hex) = trimmed.strip_prefix('#') {
        parse_hex(hex)
    } else if let Some(args) = function_args(trimmed, "rgba") {
        parse_rgb(args, true)
    } else if let Some(args) = function_args(trimmed, "rgb") {
        parse_rgb(args, false)
    } else {
        None
    };
    parsed.ok_or_else(|| SwatchError::InvalidColor {
        value: value.to_string(),
    })
}

fn function_args<'a>(value: &'a str, name: &str) -> Option<&'a str> {
    value
        .strip_prefix(name)?
        .trim_start()
        .strip_prefix('(')?
        .strip_suffix(')')
}

fn parse_hex(hex: &str) -> Option<Hsla> {
    if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
        return None;
    }
    let channel = |i: usize, width: usize| -> Option<u8> {
        let digits = hex.get(i * width..(i + 1) * width)?;
        let value = u8::from_str_radix(digits, 16).ok()?;
        Some(if width == 1 { value * 17 } else { value })
    };
    match hex.len() {
        3 => Some(Hsla::from_rgba(channel(0, 1)?, channel(1, 1)?, channel(2, 1)?, 1.0)),
        6 => Some(Hsla::from_rgba(channel(0, 2)?, channel(1, 2)?, channel(2, 2)?, 1.0)),
        8 => Some(Hsla::from_rgba(
            channel(0, 2)?,
            channel(1, 2)?,
            channel(2, 2)?,
            f64::from(channel(3, 2)?) / 255.0,
        )),
        _ => None,
    }
}

fn parse_rgb(args: &str, with_alpha: bool) -> Option<Hsla> {
    let parts: Vec<&str> = args.split(',').map(str::trim).collect();
    let expected = if with_alpha { 4 } else { 3 };
    if parts.len() != expected {
        return None;
    }
    let channel = |part: &str| part.parse::<u8>().ok();
    let alpha = if with_alpha {
        let a = parts[3].parse::<f64>().ok()?;
        if !(0.0..=1.0).contains(&a) {
            return None;
        }
        a
    } else {
        1.0
    };
    Some(Hsla::from_rgba(
        channel(parts[0])?,
        channel(parts[1])?,
        channel(parts[2])?,
        alpha,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn primary_colors() {
        let red = parse("#FF0000").unwrap();
        assert_eq!(red, Hsla { h: 0.0, s: 1.0, l: 0.5, a: 1.0 });

        let green = parse("#0f0").unwrap();
        assert!(close(green.h, 1.0 / 3.0));

        let blue = parse("rgb(0, 0, 255)").unwrap();
        assert!(close(blue.h, 2.0 / 3.0));
    }

    #[test]
    fn greys_have_no_hue() {
        let grey = parse("#808080").unwrap();
        assert_eq!(grey.h, 0.0);
        assert_eq!(grey.s, 0.0);
        assert!(close(grey.l, 128.0 / 255.0));
    }

    #[test]
    fn alpha_forms() {
        assert_eq!(parse("#00000000").unwrap().a, 0.0);
        assert_eq!(parse("rgba(255, 255, 255, 0.5)").unwrap().a, 0.5);
    }

    #[test]
    fn rejects_malformed_values() {
        for value in ["", "#12", "#GGGGGG", "rgb(1, 2)", "rgba(1, 2, 3, 2)", "hsl(0, 0, 0)", "rgb(256, 0, 0)"] {
            assert!(parse(value).is_err(), "{} should not parse", value);
        }
        assert_eq!(
            parse("teal").unwrap_err().to_string(),
            "invalid color 'teal'"
        );
    }
}
