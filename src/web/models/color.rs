//! Validated color values.
//!
//! Accepted input: CSS color names, hex (`#rgb`, `#rgba`, `#rrggbb`,
//! `#rrggbbaa`, with `#`, `0x` or no prefix), `rgb()`/`rgba()` and
//! `hsl()`/`hsla()` with either comma-separated arguments or the
//! space-separated form (`rgb(255 0 0 / 50%)`). A color renders as its CSS
//! name when it has one and no alpha, otherwise as the shortest hex form.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer, de};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("value is not a valid color: {reason} (got {input:?})")]
pub struct ColorError {
    input: String,
    reason: &'static str,
}

impl ColorError {
    fn new(input: &str, reason: &'static str) -> Self {
        ColorError {
            input: input.to_owned(),
            reason,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Color {
    red: u8,
    green: u8,
    blue: u8,
    // None means fully opaque.
    alpha: Option<f32>,
}

impl Color {
    pub fn from_rgb(red: u8, green: u8, blue: u8) -> Self {
        Color {
            red,
            green,
            blue,
            alpha: None,
        }
    }

    fn with_alpha(red: u8, green: u8, blue: u8, alpha: f32) -> Self {
        let alpha = if (alpha - 1.0).abs() < f32::EPSILON {
            None
        } else {
            Some(alpha)
        };
        Color {
            red,
            green,
            blue,
            alpha,
        }
    }

    pub fn rgb(&self) -> (u8, u8, u8) {
        (self.red, self.green, self.blue)
    }

    pub fn alpha(&self) -> Option<f32> {
        self.alpha
    }

    /// The CSS name of an opaque color, if it has one.
    pub fn name(&self) -> Option<&'static str> {
        if self.alpha.is_some() {
            return None;
        }
        NAMED_COLORS
            .iter()
            .rev()
            .find(|(_, rgb)| *rgb == self.rgb())
            .map(|(name, _)| *name)
    }

    pub fn to_hex(&self) -> String {
        let mut bytes = vec![self.red, self.green, self.blue];
        if let Some(alpha) = self.alpha {
            bytes.push((alpha * 255.0).round() as u8);
        }

        let short = bytes.iter().all(|b| b >> 4 == b & 0x0f);
        let digits: String = if short {
            bytes.iter().map(|b| format!("{:x}", b & 0x0f)).collect()
        } else {
            bytes.iter().map(|b| format!("{b:02x}")).collect()
        };
        format!("#{digits}")
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.name() {
            Some(name) => f.write_str(name),
            None => f.write_str(&self.to_hex()),
        }
    }
}

impl FromStr for Color {
    type Err = ColorError;

    fn from_str(input: &str) -> Result<Self, Self::Err> {
        let value = input.trim().to_ascii_lowercase();
        if value.is_empty() {
            return Err(ColorError::new(input, "empty string"));
        }

        if let Some((_, (r, g, b))) = NAMED_COLORS.iter().find(|(name, _)| *name == value) {
            return Ok(Color::from_rgb(*r, *g, *b));
        }
        if let Some(args) = call_args(&value, &["rgba", "rgb"]) {
            return parse_rgb_call(input, &args);
        }
        if let Some(args) = call_args(&value, &["hsla", "hsl"]) {
            return parse_hsl_call(input, &args);
        }
        parse_hex(input, &value)
    }
}

impl Serialize for Color {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Color {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(de::Error::custom)
    }
}

/// Splits `name(a, b, c[, d])` or `name(a b c[ / d])` into its arguments.
/// The space-separated form only takes an alpha after a `/`.
fn call_args<'a>(value: &'a str, names: &[&str]) -> Option<Vec<&'a str>> {
    names.iter().find_map(|name| {
        let rest = value.strip_prefix(name)?.trim_start();
        let inner = rest.strip_prefix('(')?.strip_suffix(')')?;
        if inner.contains(',') {
            return Some(inner.split(',').map(str::trim).collect());
        }

        let (channels, alpha) = match inner.split_once('/') {
            Some((channels, alpha)) => (channels, Some(alpha.trim())),
            None => (inner, None),
        };
        let mut args: Vec<&str> = channels.split_whitespace().collect();
        if args.len() != 3 {
            return None;
        }
        args.extend(alpha);
        Some(args)
    })
}

fn parse_rgb_call(input: &str, args: &[&str]) -> Result<Color, ColorError> {
    match args {
        [r, g, b] => Ok(Color::from_rgb(
            channel(input, r)?,
            channel(input, g)?,
            channel(input, b)?,
        )),
        [r, g, b, a] => Ok(Color::with_alpha(
            channel(input, r)?,
            channel(input, g)?,
            channel(input, b)?,
            alpha(input, a)?,
        )),
        _ => Err(ColorError::new(input, "expected 3 or 4 arguments")),
    }
}

fn parse_hsl_call(input: &str, args: &[&str]) -> Result<Color, ColorError> {
    let (h, s, l, a) = match args {
        [h, s, l] => (h, s, l, None),
        [h, s, l, a] => (h, s, l, Some(alpha(input, a)?)),
        _ => return Err(ColorError::new(input, "expected 3 or 4 arguments")),
    };
    let (r, g, b) = hsl_to_rgb(hue(input, h)?, percentage(input, s)?, percentage(input, l)?);
    Ok(match a {
        Some(a) => Color::with_alpha(r, g, b, a),
        None => Color::from_rgb(r, g, b),
    })
}

fn parse_hex(input: &str, value: &str) -> Result<Color, ColorError> {
    let digits = value
        .strip_prefix('#')
        .or_else(|| value.strip_prefix("0x"))
        .unwrap_or(value);

    let nibbles: Option<Vec<u8>> = digits
        .chars()
        .map(|c| c.to_digit(16).map(|d| d as u8))
        .collect();
    let nibbles = nibbles.ok_or_else(|| ColorError::new(input, "not a recognised color format"))?;

    let bytes: Vec<u8> = match nibbles.len() {
        3 | 4 => nibbles.iter().map(|n| n * 17).collect(),
        6 | 8 => nibbles.chunks(2).map(|pair| pair[0] * 16 + pair[1]).collect(),
        _ => return Err(ColorError::new(input, "hex colors need 3, 4, 6 or 8 digits")),
    };

    match bytes[..] {
        [r, g, b] => Ok(Color::from_rgb(r, g, b)),
        [r, g, b, a] => Ok(Color::with_alpha(r, g, b, f32::from(a) / 255.0)),
        _ => Err(ColorError::new(input, "not a recognised color format")),
    }
}

fn number(input: &str, raw: &str) -> Result<f64, ColorError> {
    raw.trim()
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .ok_or_else(|| ColorError::new(input, "expected a number"))
}

fn channel(input: &str, raw: &str) -> Result<u8, ColorError> {
    let value = match raw.strip_suffix('%') {
        Some(pct) => number(input, pct)? / 100.0 * 255.0,
        None => number(input, raw)?,
    };
    if !(0.0..=255.0).contains(&value) {
        return Err(ColorError::new(input, "color channels must be between 0 and 255"));
    }
    Ok(value.round() as u8)
}

fn alpha(input: &str, raw: &str) -> Result<f32, ColorError> {
    let value = match raw.strip_suffix('%') {
        Some(pct) => number(input, pct)? / 100.0,
        None => number(input, raw)?,
    };
    if !(0.0..=1.0).contains(&value) {
        return Err(ColorError::new(input, "alpha must be between 0 and 1"));
    }
    Ok(value as f32)
}

/// Hue in degrees. Plain numbers are degrees.
fn hue(input: &str, raw: &str) -> Result<f64, ColorError> {
    if let Some(v) = raw.strip_suffix("deg") {
        return number(input, v);
    }
    if let Some(v) = raw.strip_suffix("turn") {
        return Ok(number(input, v)? * 360.0);
    }
    if let Some(v) = raw.strip_suffix("grad") {
        return Ok(number(input, v)? * 0.9);
    }
    if let Some(v) = raw.strip_suffix("rad") {
        return Ok(number(input, v)?.to_degrees());
    }
    number(input, raw)
}

fn percentage(input: &str, raw: &str) -> Result<f64, ColorError> {
    let pct = raw
        .strip_suffix('%')
        .ok_or_else(|| ColorError::new(input, "saturation and lightness must be percentages"))?;
    let value = number(input, pct)?;
    if !(0.0..=100.0).contains(&value) {
        return Err(ColorError::new(input, "percentages must be between 0% and 100%"));
    }
    Ok(value / 100.0)
}

fn hsl_to_rgb(hue: f64, saturation: f64, lightness: f64) -> (u8, u8, u8) {
    let chroma = (1.0 - (2.0 * lightness - 1.0).abs()) * saturation;
    let sector = hue.rem_euclid(360.0) / 60.0;
    let x = chroma * (1.0 - (sector % 2.0 - 1.0).abs());
    let (r, g, b) = match sector as u32 {
        0 => (chroma, x, 0.0),
        1 => (x, chroma, 0.0),
        2 => (0.0, chroma, x),
        3 => (0.0, x, chroma),
        4 => (x, 0.0, chroma),
        _ => (chroma, 0.0, x),
    };
    let m = lightness - chroma / 2.0;
    let to_byte = |v: f64| ((v + m) * 255.0).round().clamp(0.0, 255.0) as u8;
    (to_byte(r), to_byte(g), to_byte(b))
}

// CSS Color Module Level 4 named colors. Where several names share a value,
// the last one is used when rendering.
const NAMED_COLORS: &[(&str, (u8, u8, u8))] = &[
    ("aliceblue", (240, 248, 255)),
    ("antiquewhite", (250, 235, 215)),
    ("aqua", (0, 255, 255)),
    ("aquamarine", (127, 255, 212)),
    ("azure", (240, 255, 255)),
    ("beige", (245, 245, 220)),
    ("bisque", (255, 228, 196)),
    ("black", (0, 0, 0)),
    ("blanchedalmond", (255, 235, 205)),
    ("blue", (0, 0, 255)),
    ("blueviolet", (138, 43, 226)),
    ("brown", (165, 42, 42)),
    ("burlywood", (222, 184, 135)),
    ("cadetblue", (95, 158, 160)),
    ("chartreuse", (127, 255, 0)),
    ("chocolate", (210, 105, 30)),
    ("coral", (255, 127, 80)),
    ("cornflowerblue", (100, 149, 237)),
    ("cornsilk", (255, 248, 220)),
    ("crimson", (220, 20, 60)),
    ("cyan", (0, 255, 255)),
    ("darkblue", (0, 0, 139)),
    ("darkcyan", (0, 139, 139)),
    ("darkgoldenrod", (184, 134, 11)),
    ("darkgray", (169, 169, 169)),
    ("darkgreen", (0, 100, 0)),
    ("darkgrey", (169, 169, 169)),
    ("darkkhaki", (189, 183, 107)),
    ("darkmagenta", (139, 0, 139)),
    ("darkolivegreen", (85, 107, 47)),
    ("darkorange", (255, 140, 0)),
    ("darkorchid", (153, 50, 204)),
    ("darkred", (139, 0, 0)),
    ("darksalmon", (233, 150, 122)),
    ("darkseagreen", (143, 188, 143)),
    ("darkslateblue", (72, 61, 139)),
    ("darkslategray", (47, 79, 79)),
    ("darkslategrey", (47, 79, 79)),
    ("darkturquoise", (0, 206, 209)),
    ("darkviolet", (148, 0, 211)),
    ("deeppink", (255, 20, 147)),
    ("deepskyblue", (0, 191, 255)),
    ("dimgray", (105, 105, 105)),
    ("dimgrey", (105, 105, 105)),
    ("dodgerblue", (30, 144, 255)),
    ("firebrick", (178, 34, 34)),
    ("floralwhite", (255, 250, 240)),
    ("forestgreen", (34, 139, 34)),
    ("fuchsia", (255, 0, 255)),
    ("gainsboro", (220, 220, 220)),
    ("ghostwhite", (248, 248, 255)),
    ("gold", (255, 215, 0)),
    ("goldenrod", (218, 165, 32)),
    ("gray", (128, 128, 128)),
    ("green", (0, 128, 0)),
    ("greenyellow", (173, 255, 47)),
    ("grey", (128, 128, 128)),
    ("honeydew", (240, 255, 240)),
    ("hotpink", (255, 105, 180)),
    ("indianred", (205, 92, 92)),
    ("indigo", (75, 0, 130)),
    ("ivory", (255, 255, 240)),
    ("khaki", (240, 230, 140)),
    ("lavender", (230, 230, 250)),
    ("lavenderblush", (255, 240, 245)),
    ("lawngreen", (124, 252, 0)),
    ("lemonchiffon", (255, 250, 205)),
    ("lightblue", (173, 216, 230)),
    ("lightcoral", (240, 128, 128)),
    ("lightcyan", (224, 255, 255)),
    ("lightgoldenrodyellow", (250, 250, 210)),
    ("lightgray", (211, 211, 211)),
    ("lightgreen", (144, 238, 144)),
    ("lightgrey", (211, 211, 211)),
    ("lightpink", (255, 182, 193)),
    ("lightsalmon", (255, 160, 122)),
    ("lightseagreen", (32, 178, 170)),
    ("lightskyblue", (135, 206, 250)),
    ("lightslategray", (119, 136, 153)),
    ("lightslategrey", (119, 136, 153)),
    ("lightsteelblue", (176, 196, 222)),
    ("lightyellow", (255, 255, 224)),
    ("lime", (0, 255, 0)),
    ("limegreen", (50, 205, 50)),
    ("linen", (250, 240, 230)),
    ("magenta", (255, 0, 255)),
    ("maroon", (128, 0, 0)),
    ("mediumaquamarine", (102, 205, 170)),
    ("mediumblue", (0, 0, 205)),
    ("mediumorchid", (186, 85, 211)),
    ("mediumpurple", (147, 112, 219)),
    ("mediumseagreen", (60, 179, 113)),
    ("mediumslateblue", (123, 104, 238)),
    ("mediumspringgreen", (0, 250, 154)),
    ("mediumturquoise", (72, 209, 204)),
    ("mediumvioletred", (199, 21, 133)),
    ("midnightblue", (25, 25, 112)),
    ("mintcream", (245, 255, 250)),
    ("mistyrose", (255, 228, 225)),
    ("moccasin", (255, 228, 181)),
    ("navajowhite", (255, 222, 173)),
    ("navy", (0, 0, 128)),
    ("oldlace", (253, 245, 230)),
    ("olive", (128, 128, 0)),
    ("olivedrab", (107, 142, 35)),
    ("orange", (255, 165, 0)),
    ("orangered", (255, 69, 0)),
    ("orchid", (218, 112, 214)),
    ("palegoldenrod", (238, 232, 170)),
    ("palegreen", (152, 251, 152)),
    ("paleturquoise", (175, 238, 238)),
    ("palevioletred", (219, 112, 147)),
    ("papayawhip", (255, 239, 213)),
    ("peachpuff", (255, 218, 185)),
    ("peru", (205, 133, 63)),
    ("pink", (255, 192, 203)),
    ("plum", (221, 160, 221)),
    ("powderblue", (176, 224, 230)),
    ("purple", (128, 0, 128)),
    ("red", (255, 0, 0)),
    ("rosybrown", (188, 143, 143)),
    ("royalblue", (65, 105, 225)),
    ("saddlebrown", (139, 69, 19)),
    ("salmon", (250, 128, 114)),
    ("sandybrown", (244, 164, 96)),
    ("seagreen", (46, 139, 87)),
    ("seashell", (255, 245, 238)),
    ("sienna", (160, 82, 45)),
    ("silver", (192, 192, 192)),
    ("skyblue", (135, 206, 235)),
    ("slateblue", (106, 90, 205)),
    ("slategray", (112, 128, 144)),
    ("slategrey", (112, 128, 144)),
    ("snow", (255, 250, 250)),
    ("springgreen", (0, 255, 127)),
    ("steelblue", (70, 130, 180)),
    ("tan", (210, 180, 140)),
    ("teal", (0, 128, 128)),
    ("thistle", (216, 191, 216)),
    ("tomato", (255, 99, 71)),
    ("turquoise", (64, 224, 208)),
    ("violet", (238, 130, 238)),
    ("wheat", (245, 222, 179)),
    ("white", (255, 255, 255)),
    ("whitesmoke", (245, 245, 245)),
    ("yellow", (255, 255, 0)),
    ("yellowgreen", (154, 205, 50)),
];

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(s: &str) -> Color {
        s.parse().unwrap()
    }

    #[test]
    fn test_named_colors() {
        let red = parse("  Red ");
        assert_eq!(red.rgb(), (255, 0, 0));
        assert_eq!(red.alpha(), None);
        assert_eq!(red.to_string(), "red");
        assert_eq!(parse("aqua").to_string(), "cyan");
    }

    #[test]
    fn test_hex_forms() {
        assert_eq!(parse("#fff").to_string(), "white");
        assert_eq!(parse("0x000000").to_string(), "black");
        assert_eq!(parse("123").rgb(), (0x11, 0x22, 0x33));
        assert_eq!(parse("#123").to_string(), "#123");
        assert_eq!(parse("#1a2b3c").to_string(), "#1a2b3c");

        let translucent = parse("#12345678");
        assert_eq!(translucent.rgb(), (0x12, 0x34, 0x56));
        assert_eq!(translucent.to_string(), "#12345678");
    }

    #[test]
    fn test_opaque_alpha_is_dropped() {
        let white = parse("#ffffffff");
        assert_eq!(white.alpha(), None);
        assert_eq!(white.to_string(), "white");
        assert_eq!(parse("rgba(255, 0, 0, 1)").to_string(), "red");
    }

    #[test]
    fn test_rgb_functions() {
        assert_eq!(parse("rgb(255, 0, 0)").to_string(), "red");
        assert_eq!(parse("rgb(100%, 0%, 0%)").to_string(), "red");

        let half_blue = parse("rgba(0, 0, 255, 0.5)");
        assert_eq!(half_blue.alpha(), Some(0.5));
        assert_eq!(half_blue.to_string(), "#0000ff80");

        assert_eq!(parse("rgb(255 0 0)").to_string(), "red");
        assert_eq!(parse("rgb(255 0 0 / 50%)").to_string(), "#ff000080");
        assert_eq!(parse("rgba(0 0 255/0.5)"), half_blue);
        assert_eq!(parse("rgb(100% 0% 0% / 1)").to_string(), "red");
    }

    #[test]
    fn test_hsl_functions() {
        assert_eq!(parse("hsl(0, 100%, 50%)").to_string(), "red");
        assert_eq!(parse("hsl(120deg, 100%, 25%)").rgb(), (0, 128, 0));
        assert_eq!(parse("hsla(240, 100%, 50%, 0.5)").to_string(), "#0000ff80");

        assert_eq!(parse("hsl(120 100% 50%)").to_string(), "lime");
        assert_eq!(parse("hsl(120deg 100% 25% / 0.5)").to_string(), "#00800080");
    }

    #[test]
    fn test_invalid_colors() {
        for input in [
            "",
            "   ",
            "notacolor",
            "#12",
            "#ggg",
            "#1234567",
            "rgb(256, 0, 0)",
            "rgb(-1, 0, 0)",
            "rgb(1, 2)",
            "rgba(0, 0, 0, 1.5)",
            "hsl(0, 100, 50%)",
            "hsl(0, 100%, 150%)",
            "rgb(255 0 0 0.5)",
            "rgb(255 0)",
            "rgb(255, 0 0)",
            "rgb(255 0 0 /)",
            "rgb(255 0 0 / 2)",
            "hsl(120 100 50%)",
        ] {
            assert!(input.parse::<Color>().is_err(), "{input:?} should be rejected");
        }
    }

    #[test]
    fn test_serde() {
        let color: Color = serde_json::from_str("\"#ff0000\"").unwrap();
        assert_eq!(serde_json::to_string(&color).unwrap(), "\"red\"");

        let err = serde_json::from_str::<Color>("\"#ff00f\"").unwrap_err();
        assert!(err.to_string().contains("not a valid color"));
        assert!(serde_json::from_str::<Color>("42").is_err());
    }
}
