use thiserror::Error;
use tracing::warn;

use crate::color::RGB;

/// Hue in degrees, saturation and lightness in [0, 1].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Hsl {
    pub h: f32,
    pub s: f32,
    pub l: f32,
}

#[derive(Debug, Error, PartialEq)]
pub enum HslError {
    #[error("hue {0} is outside [0, 360)")]
    Hue(f32),
    #[error("saturation {0} is outside [0, 1]")]
    Saturation(f32),
    #[error("lightness {0} is outside [0, 1]")]
    Lightness(f32),
}

impl Hsl {
    pub fn new(h: f32, s: f32, l: f32) -> Self {
        Self { h, s, l }
    }

    // NaN fails every range check, so it is rejected too.
    pub fn validate(&self) -> Result<(), HslError> {
        if !(0.0..360.0).contains(&self.h) {
            return Err(HslError::Hue(self.h));
        }
        if !(0.0..=1.0).contains(&self.s) {
            return Err(HslError::Saturation(self.s));
        }
        if !(0.0..=1.0).contains(&self.l) {
            return Err(HslError::Lightness(self.l));
        }
        Ok(())
    }
}

impl TryFrom<Hsl> for RGB {
    type Error = HslError;

    fn try_from(c: Hsl) -> Result<Self, Self::Error> {
        c.validate()?;

        let chroma = (1.0 - (2.0 * c.l - 1.0).abs()) * c.s;
        let x = chroma * (1.0 - ((c.h / 60.0) % 2.0 - 1.0).abs());
        let m = c.l - chroma / 2.0;

        let sector = ((c.h / 60.0) as usize).min(5);
        let (r, g, b) = match sector {
            0 => (chroma, x, 0.0),
            1 => (x, chroma, 0.0),
            2 => (0.0, chroma, x),
            3 => (0.0, x, chroma),
            4 => (x, 0.0, chroma),
            _ => (chroma, 0.0, x),
        };

        Ok(RGB {
            r: (r + m).clamp(0.0, 1.0),
            g: (g + m).clamp(0.0, 1.0),
            b: (b + m).clamp(0.0, 1.0),
        })
    }
}

impl From<RGB> for Hsl {
    fn from(c: RGB) -> Self {
        let max = c.r.max(c.g).max(c.b);
        let min = c.r.min(c.g).min(c.b);
        let d = max - min;
        let l = (max + min) / 2.0;
        if d <= f32::EPSILON {
            return Hsl::new(0.0, 0.0, l);
        }

        let s = (d / (1.0 - (2.0 * l - 1.0).abs())).clamp(0.0, 1.0);
        let h = if max == c.r {
            60.0 * ((c.g - c.b) / d)
        } else if max == c.g {
            60.0 * ((c.b - c.r) / d + 2.0)
        } else {
            60.0 * ((c.r - c.g) / d + 4.0)
        };
        let h = h.rem_euclid(360.0);
        // rem_euclid can round up to exactly 360 for tiny negative hues
        Hsl::new(if h >= 360.0 { 0.0 } else { h }, s, l)
    }
}

/// Converts HSL to RGB and its `#rrggbb` text.
///
/// Out-of-range input is not an error here: a warning is logged and black is
/// returned. Use `RGB::try_from(Hsl)` to observe the failure instead.
pub fn hsl_to_rgb(h: f32, s: f32, l: f32) -> (RGB, String) {
    let rgb = match RGB::try_from(Hsl::new(h, s, l)) {
        Ok(rgb) => rgb,
        Err(e) => {
            warn!("{e}; make sure that 0<=H<360, 0<=S<=1 and 0<=L<=1. Returning black");
            RGB::default()
        }
    };
    (rgb, rgb.to_hex())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::{parse, sRGB};
    use crate::testing::capture_logs;
    use approx::assert_abs_diff_eq;
    use itertools::iproduct;

    fn rgb(h: f32, s: f32, l: f32) -> RGB {
        RGB::try_from(Hsl::new(h, s, l)).unwrap()
    }

    fn assert_rgb(c: RGB, (r, g, b): (f32, f32, f32)) {
        let eps = 1e-6;
        assert_abs_diff_eq!(c.r, r, epsilon = eps);
        assert_abs_diff_eq!(c.g, g, epsilon = eps);
        assert_abs_diff_eq!(c.b, b, epsilon = eps);
    }

    #[test]
    fn test_primaries() {
        assert_rgb(rgb(0.0, 1.0, 0.5), (1.0, 0.0, 0.0));
        assert_rgb(rgb(60.0, 1.0, 0.5), (1.0, 1.0, 0.0));
        assert_rgb(rgb(120.0, 1.0, 0.5), (0.0, 1.0, 0.0));
        assert_rgb(rgb(180.0, 1.0, 0.5), (0.0, 1.0, 1.0));
        assert_rgb(rgb(240.0, 1.0, 0.5), (0.0, 0.0, 1.0));
        assert_rgb(rgb(300.0, 1.0, 0.5), (1.0, 0.0, 1.0));
    }

    // Mid-sector hues where the blue channel carries the intermediate value.
    #[test]
    fn test_blue_sectors() {
        assert_rgb(rgb(150.0, 1.0, 0.5), (0.0, 1.0, 0.5));
        assert_rgb(rgb(330.0, 1.0, 0.5), (1.0, 0.0, 0.5));
        assert_rgb(rgb(210.0, 1.0, 0.5), (0.0, 0.5, 1.0));
        assert_rgb(rgb(270.0, 1.0, 0.5), (0.5, 0.0, 1.0));
    }

    #[test]
    fn test_grey_and_extremes() {
        assert_rgb(rgb(200.0, 0.0, 0.25), (0.25, 0.25, 0.25));
        assert_rgb(rgb(17.0, 0.8, 0.0), (0.0, 0.0, 0.0));
        assert_rgb(rgb(359.0, 0.8, 1.0), (1.0, 1.0, 1.0));
    }

    #[test]
    fn test_in_range_grid() {
        let hues = (0..72).map(|i| i as f32 * 5.0);
        let units = || (0..=10).map(|i| i as f32 / 10.0);
        for (h, s, l) in iproduct!(hues, units(), units()) {
            let (c, hex) = hsl_to_rgb(h, s, l);
            for v in [c.r, c.g, c.b] {
                assert!((0.0..=1.0).contains(&v), "{h} {s} {l} -> {c:?}");
            }
            let channels: sRGB = c.into();
            assert_eq!(parse(&hex), Ok(channels));
            assert_eq!(channels[0], (c.r * 255.0).round() as u8);
        }
    }

    #[test]
    fn test_out_of_range_returns_black() {
        for (h, s, l) in [
            (400.0, 0.5, 0.5),
            (360.0, 0.5, 0.5),
            (-1.0, 0.5, 0.5),
            (10.0, 1.5, 0.5),
            (10.0, 0.5, -0.1),
            (400.0, 1.5, -0.1),
            (f32::NAN, 0.5, 0.5),
        ] {
            let (c, hex) = hsl_to_rgb(h, s, l);
            assert_eq!(c, RGB::default());
            assert_eq!(hex, "#000000");
        }
    }

    #[test]
    fn test_from_rgb() {
        let hsl = Hsl::from(rgb(210.0, 0.6, 0.4));
        assert_abs_diff_eq!(hsl.h, 210.0, epsilon = 1e-3);
        assert_abs_diff_eq!(hsl.s, 0.6, epsilon = 1e-5);
        assert_abs_diff_eq!(hsl.l, 0.4, epsilon = 1e-5);

        let grey = Hsl::from(RGB { r: 0.5, g: 0.5, b: 0.5 });
        assert_eq!((grey.h, grey.s), (0.0, 0.0));
        assert_abs_diff_eq!(grey.l, 0.5);

        for (h, s, l) in iproduct!([0.0, 45.0, 150.0, 275.0, 330.0], [0.3, 1.0], [0.2, 0.55]) {
            let back = Hsl::from(rgb(h, s, l));
            assert_abs_diff_eq!(back.h, h, epsilon = 1e-3);
            assert!(back.validate().is_ok());
        }
    }

    #[test]
    fn test_out_of_range_warns() {
        let ((c, _), logs) = capture_logs(|| hsl_to_rgb(400.0, 0.5, 0.5));
        assert_eq!(c, RGB::default());
        assert!(logs.contains("WARN"), "{logs}");
        assert!(logs.contains("hue 400 is outside [0, 360)"), "{logs}");
        assert!(logs.contains("Returning black"), "{logs}");

        let (_, logs) = capture_logs(|| hsl_to_rgb(120.0, 0.5, 0.5));
        assert!(logs.is_empty(), "{logs}");
    }

    #[test]
    fn test_errors() {
        assert_eq!(
            RGB::try_from(Hsl::new(400.0, 0.5, 0.5)),
            Err(HslError::Hue(400.0))
        );
        assert_eq!(
            RGB::try_from(Hsl::new(10.0, 1.5, 0.5)),
            Err(HslError::Saturation(1.5))
        );
        assert_eq!(
            RGB::try_from(Hsl::new(10.0, 0.5, -0.1)),
            Err(HslError::Lightness(-0.1))
        );
    }
}
