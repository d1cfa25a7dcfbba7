use once_cell::sync::Lazy;
use regex::Regex;
use thiserror::Error;

#[allow(non_camel_case_types)]
pub type sRGB = [u8; 3];

pub const BLACK: sRGB = [0x00, 0x00, 0x00];
pub const WHITE: sRGB = [0xFF, 0xFF, 0xFF];

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ColorError {
    #[error("invalid color `{0}`: expected #RGB or #RRGGBB")]
    InvalidHex(String),
}

pub fn as_index(c: &sRGB) -> usize {
    // RGB order, so the hex digits read left to right.
    let mut out: usize = c[2] as usize;
    out |= (c[1] as usize) << 8;
    out |= (c[0] as usize) << 16;
    out
}

// Lowercase, matching how the default palette is written.
pub fn to_string(c: &sRGB) -> String {
    format!("#{:06x}", as_index(c))
}

static HEX_COLOR: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^#?(?:(?P<long>[0-9a-fA-F]{6})|(?P<short>[0-9a-fA-F]{3}))$").expect("bad regex")
});

/// Parses `#RRGGBB` or the `#RGB` shorthand. The leading `#` is optional.
pub fn parse(text: &str) -> Result<sRGB, ColorError> {
    let invalid = || ColorError::InvalidHex(text.to_string());
    let caps = HEX_COLOR.captures(text.trim()).ok_or_else(invalid)?;

    let (digits, width) = match (caps.name("long"), caps.name("short")) {
        (Some(m), _) => (m.as_str(), 2),
        (None, Some(m)) => (m.as_str(), 1),
        (None, None) => return Err(invalid()),
    };

    let mut out = BLACK;
    for (i, channel) in out.iter_mut().enumerate() {
        let v = u8::from_str_radix(&digits[i * width..(i + 1) * width], 16).map_err(|_| invalid())?;
        // #abc is shorthand for #aabbcc
        *channel = if width == 1 { v * 0x11 } else { v };
    }
    Ok(out)
}

/// Color with channels in [0, 1].
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct RGB {
    pub r: f32,
    pub g: f32,
    pub b: f32,
}

impl RGB {
    pub fn to_hex(&self) -> String {
        to_string(&(*self).into())
    }
}

fn to_channel(v: f32) -> u8 {
    (v.clamp(0.0, 1.0) * 255.0).round() as u8
}

impl From<RGB> for sRGB {
    fn from(c: RGB) -> Self {
        [to_channel(c.r), to_channel(c.g), to_channel(c.b)]
    }
}

impl From<sRGB> for RGB {
    fn from(c: sRGB) -> Self {
        RGB {
            r: c[0] as f32 / 255.0,
            g: c[1] as f32 / 255.0,
            b: c[2] as f32 / 255.0,
        }
    }
}
