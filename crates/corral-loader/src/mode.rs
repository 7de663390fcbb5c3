//! Light/dark classification of extracted background colors.
//!
//! The previewer coordinates its chrome (toolbar, scrollbar, editor
//! gutter) with the loaded theme: a dark page background gets dark chrome.
//! The extractor's closed grammar means every value reaching this module
//! is one of hex, named, rgb()/rgba(), or hsl()/hsla() - nothing else
//! needs to parse.

use serde::Serialize;

use corral_confine::named_color;

/// [§ 4 Color syntax](https://www.w3.org/TR/css-color-4/#color-syntax)
/// sRGB color represented as RGBA components.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ColorValue {
    /// "the red color channel" (0-255)
    pub r: u8,
    /// "the green color channel" (0-255)
    pub g: u8,
    /// "the blue color channel" (0-255)
    pub b: u8,
    /// "the alpha channel" (0-255, 255 = fully opaque)
    pub a: u8,
}

impl ColorValue {
    /// Parse a value accepted by the extractor's closed grammar.
    #[must_use]
    pub fn parse(value: &str) -> Option<Self> {
        let value = value.trim();
        if let Some(hex) = value.strip_prefix('#') {
            return Self::from_hex(hex);
        }
        let lower = value.to_ascii_lowercase();
        if let Some(args) = strip_function(&lower, &["rgb(", "rgba("]) {
            return Self::from_rgb_args(args);
        }
        if let Some(args) = strip_function(&lower, &["hsl(", "hsla("]) {
            return Self::from_hsl_args(args);
        }
        Self::from_named(&lower)
    }

    /// [§ 4.2 The RGB hexadecimal notations](https://www.w3.org/TR/css-color-4/#hex-notation)
    /// "The three-digit RGB notation (#RGB) is converted into six-digit
    /// form (#RRGGBB) by replicating digits, not by adding zeros."
    #[must_use]
    pub fn from_hex(hex: &str) -> Option<Self> {
        let hex = hex.strip_prefix('#').unwrap_or(hex);
        // The length dispatch below slices by byte offset, which is only a
        // char boundary for ASCII; a non-ASCII payload is not hex anyway.
        if !hex.is_ascii() {
            return None;
        }
        match hex.len() {
            3 => {
                let r = u8::from_str_radix(&hex[0..1].repeat(2), 16).ok()?;
                let g = u8::from_str_radix(&hex[1..2].repeat(2), 16).ok()?;
                let b = u8::from_str_radix(&hex[2..3].repeat(2), 16).ok()?;
                Some(Self { r, g, b, a: 255 })
            }
            6 => {
                let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
                let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
                let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
                Some(Self { r, g, b, a: 255 })
            }
            _ => None,
        }
    }

    /// [§ 6.1 Named Colors](https://www.w3.org/TR/css-color-4/#named-colors)
    /// Resolve a name from the extractor's fixed table.
    #[must_use]
    pub fn from_named(name: &str) -> Option<Self> {
        named_color(name).map(|(r, g, b)| Self { r, g, b, a: 255 })
    }

    /// [§ 4.1 The RGB Functions](https://www.w3.org/TR/css-color-4/#rgb-functions)
    ///
    /// "Values outside these ranges are not invalid, but are clamped to
    /// the ranges defined here at parsed-value time."
    fn from_rgb_args(args: &str) -> Option<Self> {
        let vals = parse_color_args(args)?;
        if vals.len() < 3 {
            return None;
        }
        let a = vals.get(3).copied().map_or(255, alpha_to_u8);
        Some(Self {
            r: channel_to_u8(vals[0]),
            g: channel_to_u8(vals[1]),
            b: channel_to_u8(vals[2]),
            a,
        })
    }

    /// [§ 4.1 The HSL Functions](https://www.w3.org/TR/css-color-4/#the-hsl-notation)
    ///
    /// "<hue> is a <number> or <angle>, interpreted as degrees."
    fn from_hsl_args(args: &str) -> Option<Self> {
        let vals = parse_color_args(args)?;
        if vals.len() < 3 {
            return None;
        }
        let hue = match vals[0] {
            ColorArg::Number(v) => v,
            // 100% = 360 degrees
            ColorArg::Percentage(v) => v * 3.6,
        };
        let saturation = vals[1].as_fraction();
        let lightness = vals[2].as_fraction();
        let a = vals.get(3).copied().map_or(255, alpha_to_u8);
        let (r, g, b) = hsl_to_rgb(hue, saturation, lightness);
        Some(Self { r, g, b, a })
    }

    /// Relative luminance of the color, 0.0 (black) to 1.0 (white).
    ///
    /// The Rec. 709 weighting is enough to pick chrome; gamma-correct
    /// luminance would move the boundary by a few shades at most.
    #[must_use]
    pub fn luminance(&self) -> f64 {
        (0.2126 * f64::from(self.r) + 0.7152 * f64::from(self.g) + 0.0722 * f64::from(self.b))
            / 255.0
    }
}

/// The previewer chrome mode implied by a theme's background.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub enum ThemeMode {
    /// Light chrome (the known-light baseline when no color was found).
    #[default]
    Light,
    /// Dark chrome.
    Dark,
}

impl ThemeMode {
    /// Classify an extracted background value; anything unreadable falls
    /// back to the light baseline.
    #[must_use]
    pub fn from_background(value: Option<&str>) -> Self {
        match value.and_then(ColorValue::parse) {
            Some(color) if color.luminance() < 0.5 => Self::Dark,
            _ => Self::Light,
        }
    }
}

/// A numeric value from a color function argument: a plain number or a
/// percentage.
#[derive(Debug, Clone, Copy)]
enum ColorArg {
    Number(f64),
    Percentage(f64),
}

impl ColorArg {
    /// Interpret the argument as a 0.0-1.0 fraction (saturation,
    /// lightness).
    fn as_fraction(self) -> f64 {
        match self {
            Self::Number(v) | Self::Percentage(v) => v / 100.0,
        }
    }
}

/// Strip a matching function prefix and the closing parenthesis.
fn strip_function<'a>(value: &'a str, prefixes: &[&str]) -> Option<&'a str> {
    for prefix in prefixes {
        if let Some(rest) = value.strip_prefix(prefix) {
            return rest.strip_suffix(')');
        }
    }
    None
}

/// Extract numeric arguments, handling both the legacy comma syntax and
/// the modern space/slash syntax.
fn parse_color_args(args: &str) -> Option<Vec<ColorArg>> {
    let mut out = Vec::new();
    for token in args.replace([',', '/'], " ").split_whitespace() {
        if let Some(p) = token.strip_suffix('%') {
            out.push(ColorArg::Percentage(p.parse().ok()?));
        } else {
            out.push(ColorArg::Number(token.parse().ok()?));
        }
    }
    Some(out)
}

/// Convert a color channel argument to 0-255, clamping out-of-range input.
fn channel_to_u8(arg: ColorArg) -> u8 {
    let v = match arg {
        ColorArg::Number(n) => n,
        // "100% = 255"
        ColorArg::Percentage(p) => p * 255.0 / 100.0,
    };
    v.round().clamp(0.0, 255.0) as u8
}

/// Convert an alpha argument to 0-255 (numbers are 0-1, percentages
/// 0%-100%).
fn alpha_to_u8(arg: ColorArg) -> u8 {
    let v = match arg {
        ColorArg::Number(n) => n * 255.0,
        ColorArg::Percentage(p) => p * 255.0 / 100.0,
    };
    v.round().clamp(0.0, 255.0) as u8
}

/// [§ 4.2.4 HSL-to-RGB](https://www.w3.org/TR/css-color-4/#hsl-to-rgb)
///
/// Standard conversion using chroma and the intermediate value.
/// Hue in degrees (wraps), saturation and lightness 0.0-1.0.
fn hsl_to_rgb(hue: f64, saturation: f64, lightness: f64) -> (u8, u8, u8) {
    let h = ((hue % 360.0) + 360.0) % 360.0;
    let s = saturation.clamp(0.0, 1.0);
    let l = lightness.clamp(0.0, 1.0);

    let c = (1.0 - (2.0 * l - 1.0).abs()) * s;
    let h_prime = h / 60.0;
    let x = c * (1.0 - (h_prime % 2.0 - 1.0).abs());

    let (r1, g1, b1) = match h_prime as u32 {
        0 => (c, x, 0.0),
        1 => (x, c, 0.0),
        2 => (0.0, c, x),
        3 => (0.0, x, c),
        4 => (x, 0.0, c),
        5 => (c, 0.0, x),
        _ => (0.0, 0.0, 0.0),
    };

    let m = l - c / 2.0;
    let to_u8 = |v: f64| ((v + m) * 255.0).round().clamp(0.0, 255.0) as u8;

    (to_u8(r1), to_u8(g1), to_u8(b1))
}
