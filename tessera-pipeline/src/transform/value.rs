//! Individual value transforms.

use serde_json::{Number, Value};

use super::color::Color;

/// Base font size used to turn relative units into pixels.
const BASE_FONT_SIZE: f64 = 16.0;

/// One value conversion a platform transform applies.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueTransform {
    /// Any color to `rgb()` / `rgba()`.
    ColorRgb,
    /// Any color to `#aarrggbb`.
    ColorHex8Argb,
    /// `em`, `rem` and `px` sizes to a plain pixel number.
    RelativePixelValue,
    /// `50%` to `0.5`.
    PercentageFloat,
}

impl ValueTransform {
    pub fn name(&self) -> &'static str {
        match self {
            Self::ColorRgb => "color/rgb",
            Self::ColorHex8Argb => "color/hex8argb",
            Self::RelativePixelValue => "relative/pixelValue",
            Self::PercentageFloat => "percentage/float",
        }
    }

    /// Whether this conversion applies to a value of the given kind.
    pub fn matches(&self, kind: Option<&str>, value: &Value) -> bool {
        match self {
            Self::ColorRgb | Self::ColorHex8Argb => kind == Some("color"),
            Self::RelativePixelValue => kind == Some("size"),
            Self::PercentageFloat => value.as_str().is_some_and(|s| s.contains('%')),
        }
    }

    /// Convert `value`; the error is a human-readable reason.
    pub fn apply(&self, value: &Value) -> Result<Value, String> {
        match self {
            Self::ColorRgb => parse_color(value).map(|c| Value::String(c.to_rgb_string())),
            Self::ColorHex8Argb => parse_color(value).map(|c| Value::String(c.to_hex8_argb())),
            Self::RelativePixelValue => pixel_value(value),
            Self::PercentageFloat => Ok(Value::String(percentages_to_floats(
                value.as_str().unwrap_or_default(),
            ))),
        }
    }
}

fn describe(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

fn parse_color(value: &Value) -> Result<Color, String> {
    match value {
        Value::String(s) => s.parse(),
        other => Err(format!("expected a color string, found {}", describe(other))),
    }
}

fn pixel_value(value: &Value) -> Result<Value, String> {
    let s = match value {
        Value::Number(_) => return Ok(value.clone()),
        Value::String(s) => s.trim(),
        other => return Err(format!("expected a size, found {}", describe(other))),
    };

    let (number, scale) = if let Some(n) = s.strip_suffix("rem") {
        (n, BASE_FONT_SIZE)
    } else if let Some(n) = s.strip_suffix("em") {
        (n, BASE_FONT_SIZE)
    } else if let Some(n) = s.strip_suffix("px") {
        (n, 1.0)
    } else {
        (s, 1.0)
    };

    let parsed = number
        .trim()
        .parse::<f64>()
        .ok()
        .filter(|n: &f64| n.is_finite())
        .ok_or_else(|| format!("'{}' is not a size in px, em or rem", s))?;
    number_value(parsed * scale)
}

/// A JSON number, integral when the value has no fractional part.
fn number_value(n: f64) -> Result<Value, String> {
    if n.fract() == 0.0 && n.abs() < i64::MAX as f64 {
        Ok(Value::from(n as i64))
    } else {
        Number::from_f64(n)
            .map(Value::Number)
            .ok_or_else(|| format!("{n} is not a finite number"))
    }
}

/// Replace every `<number>%` in `s` with the number divided by 100.
fn percentages_to_floats(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut number = String::new();

    for c in s.chars() {
        if c.is_ascii_digit() || (c == '.' && !number.contains('.')) {
            number.push(c);
            continue;
        }
        if c == '%'
            && let Ok(n) = number.parse::<f64>()
        {
            out.push_str(&(n / 100.0).to_string());
            number.clear();
            continue;
        }
        out.push_str(&number);
        number.clear();
        out.push(c);
    }
    out.push_str(&number);
    out
}
