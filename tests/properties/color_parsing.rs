//! Property tests for CSS color parsing.

use proptest::prelude::*;

use swatch::domain::services::stdlib::color;

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 256,
        .. ProptestConfig::default()
    })]

    /// PROPERTY: Parsing arbitrary text never panics.
    #[test]
    fn property_parse_never_panics(input in ".{0,24}") {
        let _ = color::parse(&input);
    }

    /// PROPERTY: Every `#RRGGBBAA` parses into normalized components.
    #[test]
    fn property_hex_components_are_normalized(r in any::<u8>(), g in any::<u8>(), b in any::<u8>(), a in any::<u8>()) {
        let hsla = color::parse(&format!("#{:02x}{:02x}{:02x}{:02x}", r, g, b, a)).unwrap();

        for component in [hsla.h, hsla.s, hsla.l, hsla.a] {
            prop_assert!((0.0..=1.0).contains(&component), "{:?}", hsla);
        }
        prop_assert!((hsla.a - f64::from(a) / 255.0).abs() < 1e-9);
    }

    /// PROPERTY: Hex and `rgb()` spellings of one color agree.
    #[test]
    fn property_hex_and_rgb_agree(r in any::<u8>(), g in any::<u8>(), b in any::<u8>()) {
        let hex = color::parse(&format!("#{:02X}{:02X}{:02X}", r, g, b)).unwrap();
        let rgb = color::parse(&format!("rgb({}, {}, {})", r, g, b)).unwrap();

        prop_assert_eq!(hex, rgb);
    }
}
