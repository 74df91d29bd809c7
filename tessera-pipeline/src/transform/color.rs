//! Minimal CSS color parsing for the color value transforms.

use std::str::FromStr;

/// An sRGB color with alpha in `0.0..=1.0`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: f64,
}

const NAMED: &[(&str, [u8; 3])] = &[
    ("black", [0, 0, 0]),
    ("silver", [192, 192, 192]),
    ("gray", [128, 128, 128]),
    ("grey", [128, 128, 128]),
    ("white", [255, 255, 255]),
    ("maroon", [128, 0, 0]),
    ("red", [255, 0, 0]),
    ("purple", [128, 0, 128]),
    ("fuchsia", [255, 0, 255]),
    ("magenta", [255, 0, 255]),
    ("green", [0, 128, 0]),
    ("lime", [0, 255, 0]),
    ("olive", [128, 128, 0]),
    ("yellow", [255, 255, 0]),
    ("navy", [0, 0, 128]),
    ("blue", [0, 0, 255]),
    ("teal", [0, 128, 128]),
    ("aqua", [0, 255, 255]),
    ("cyan", [0, 255, 255]),
    ("orange", [255, 165, 0]),
];

impl Color {
    pub fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 1.0 }
    }

    /// Alpha rounded to two decimals.
    fn alpha(&self) -> f64 {
        (self.a * 100.0).round() / 100.0
    }

    /// `rgb(r, g, b)`, or `rgba(r, g, b, a)` when not fully opaque.
    pub fn to_rgb_string(&self) -> String {
        let a = self.alpha();
        if a >= 1.0 {
            format!("rgb({}, {}, {})", self.r, self.g, self.b)
        } else {
            format!("rgba({}, {}, {}, {})", self.r, self.g, self.b, a)
        }
    }

    /// `#aarrggbb`, the layout Android color resources use.
    pub fn to_hex8_argb(&self) -> String {
        let a = (self.a * 255.0).round() as u8;
        format!("#{:02x}{:02x}{:02x}{:02x}", a, self.r, self.g, self.b)
    }
}

impl FromStr for Color {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let lower = s.to_ascii_lowercase();

        if let Some(hex) = lower.strip_prefix('#') {
            return parse_hex(hex).ok_or_else(|| format!("invalid hex color '{}'", s));
        }
        if let Some(args) = lower
            .strip_prefix("rgba(")
            .or_else(|| lower.strip_prefix("rgb("))
            .and_then(|rest| rest.strip_suffix(')'))
        {
            return parse_rgb_args(args).ok_or_else(|| format!("invalid rgb color '{}'", s));
        }
        if lower == "transparent" {
            return Ok(Self {
                r: 0,
                g: 0,
                b: 0,
                a: 0.0,
            });
        }
        NAMED
            .iter()
            .find(|(name, _)| *name == lower)
            .map(|(_, [r, g, b])| Self::rgb(*r, *g, *b))
            .ok_or_else(|| format!("'{}' is not a recognized color", s))
    }
}

fn parse_hex(hex: &str) -> Option<Color> {
    if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
        return None;
    }
    let nibble = |i: usize| u8::from_str_radix(&hex[i..=i], 16).ok().map(|v| v * 17);
    let byte = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).ok();

    match hex.len() {
        3 => Some(Color::rgb(nibble(0)?, nibble(1)?, nibble(2)?)),
        4 => Some(Color {
            a: f64::from(nibble(3)?) / 255.0,
            ..Color::rgb(nibble(0)?, nibble(1)?, nibble(2)?)
        }),
        6 => Some(Color::rgb(byte(0)?, byte(2)?, byte(4)?)),
        8 => Some(Color {
            a: f64::from(byte(6)?) / 255.0,
            ..Color::rgb(byte(0)?, byte(2)?, byte(4)?)
        }),
        _ => None,
    }
}

fn parse_rgb_args(args: &str) -> Option<Color> {
    let parts: Vec<&str> = args.split(',').map(str::trim).collect();
    let channel = |s: &str| {
        let v: f64 = s.parse().ok()?;
        (0.0..=255.0).contains(&v).then(|| v.round() as u8)
    };

    match parts.as_slice() {
        &[r, g, b] => Some(Color::rgb(channel(r)?, channel(g)?, channel(b)?)),
        &[r, g, b, a] => {
            let a: f64 = a.parse().ok()?;
            (0.0..=1.0).contains(&a).then_some(())?;
            Some(Color {
                a,
                ..Color::rgb(channel(r)?, channel(g)?, channel(b)?)
            })
        }
        _ => None,
    }
}
