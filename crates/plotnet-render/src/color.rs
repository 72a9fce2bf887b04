use serde::{Deserialize, Serialize};
use std::fmt;
use std::hash::{Hash, Hasher};

/// An sRGB color with an optional alpha channel.
///
/// Deserializes from `[r, g, b]` or `[r, g, b, a]` (channels 0-255, alpha 0-1) and renders as the
/// CSS `rgb(...)` / `rgba(...)` string the plotting backend expects.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(try_from = "Vec<f64>", into = "Vec<f64>")]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: Option<f64>,
}

impl Color {
    pub const BLACK: Color = Color::rgb(0, 0, 0);
    pub const WHITE: Color = Color::rgb(255, 255, 255);
    pub const TRANSPARENT: Color = Color::rgba(0, 0, 0, 0.0);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: None }
    }

    pub const fn rgba(r: u8, g: u8, b: u8, a: f64) -> Self {
        Self {
            r,
            g,
            b,
            a: Some(a),
        }
    }

    pub fn to_css(&self) -> String {
        match self.a {
            Some(a) => format!("rgba({}, {}, {}, {a:?})", self.r, self.g, self.b),
            None => format!("rgb({}, {}, {})", self.r, self.g, self.b),
        }
    }

    /// Relative luminance on the 0-255 scale (Rec. 709 weights).
    pub fn luminance(&self) -> f64 {
        0.2126 * f64::from(self.r) + 0.7152 * f64::from(self.g) + 0.0722 * f64::from(self.b)
    }

    /// Black or white, whichever reads better on top of `self`.
    pub fn legible_font_color(&self) -> Color {
        if self.luminance() < 128.0 {
            Color::WHITE
        } else {
            Color::BLACK
        }
    }
}

impl PartialEq for Color {
    fn eq(&self, other: &Self) -> bool {
        self.r == other.r
            && self.g == other.g
            && self.b == other.b
            && self.a.map(f64::to_bits) == other.a.map(f64::to_bits)
    }
}

impl Eq for Color {}

impl Hash for Color {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.r.hash(state);
        self.g.hash(state);
        self.b.hash(state);
        self.a.map(f64::to_bits).hash(state);
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_css())
    }
}

fn channel(v: f64) -> Result<u8, String> {
    if v.fract() != 0.0 || !(0.0..=255.0).contains(&v) {
        return Err(format!("color channel {v} is not an integer in 0..=255"));
    }
    Ok(v as u8)
}

impl TryFrom<Vec<f64>> for Color {
    type Error = String;

    fn try_from(value: Vec<f64>) -> Result<Self, Self::Error> {
        match value.as_slice() {
            &[r, g, b] => Ok(Color::rgb(channel(r)?, channel(g)?, channel(b)?)),
            &[r, g, b, a] => {
                if !(0.0..=1.0).contains(&a) {
                    return Err(format!("alpha {a} is outside 0..=1"));
                }
                Ok(Color::rgba(channel(r)?, channel(g)?, channel(b)?, a))
            }
            other => Err(format!(
                "expected 3 or 4 color channels, got {}",
                other.len()
            )),
        }
    }
}

impl From<Color> for Vec<f64> {
    fn from(c: Color) -> Self {
        let mut out = vec![f64::from(c.r), f64::from(c.g), f64::from(c.b)];
        out.extend(c.a);
        out
    }
}
