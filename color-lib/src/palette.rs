use std::ops::Range;

use itertools::Itertools;
use rand::Rng;
use tracing::{debug, warn};

use crate::color::{sRGB, RGB};
use crate::hsl::{hsl_to_rgb, Hsl};

/// A lane's foreground color and the light tint drawn behind it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PaletteEntry {
    pub primary: sRGB,
    pub pale: sRGB,
}

pub const DEFAULT_COLORS: [sRGB; 5] = [
    [0xc7, 0xaf, 0x49],
    [0x9d, 0xc3, 0xe6],
    [0xd6, 0xa9, 0xdb],
    [0x99, 0xb6, 0x5a],
    [0xbf, 0xbf, 0xbf],
];

pub const DEFAULT_PALE_COLORS: [sRGB; 5] = [
    [0xfb, 0xf6, 0xe3],
    [0xeb, 0xf3, 0xfb],
    [0xf8, 0xe7, 0xfa],
    [0xf3, 0xfc, 0xe0],
    [0xf2, 0xf2, 0xf2],
];

// Keeps generated foregrounds away from near-black and near-white.
pub const PRIMARY_LIGHTNESS: Range<f32> = 0.2..0.6;
pub const PALE_LIGHTNESS: f32 = 0.92;

/// Draws a random hue and saturation and returns the (primary, pale) pair
/// sharing them.
pub fn random_pair<R: Rng + ?Sized>(rng: &mut R) -> (Hsl, Hsl) {
    let h = rng.gen_range(0..=359u16) as f32;
    let s = rng.gen::<f32>();
    let l = PRIMARY_LIGHTNESS.start
        + rng.gen::<f32>() * (PRIMARY_LIGHTNESS.end - PRIMARY_LIGHTNESS.start);
    (Hsl::new(h, s, l), Hsl::new(h, s, PALE_LIGHTNESS))
}

pub fn synthesize_entry<R: Rng + ?Sized>(rng: &mut R) -> PaletteEntry {
    let (primary, pale) = random_pair(rng);
    PaletteEntry {
        primary: hsl_to_rgb(primary.h, primary.s, primary.l).0.into(),
        pale: hsl_to_rgb(pale.h, pale.s, pale.l).0.into(),
    }
}

/// A pale tint sharing `primary`'s hue and saturation.
pub fn pale_for(primary: sRGB) -> sRGB {
    let hsl = Hsl::from(RGB::from(primary));
    hsl_to_rgb(hsl.h, hsl.s, PALE_LIGHTNESS).0.into()
}

/// Per-render palette. Always built from fresh copies; the caller's lists are
/// only read.
#[derive(Debug, Clone, PartialEq)]
pub struct Palette {
    entries: Vec<PaletteEntry>,
    synthesized: usize,
}

impl Palette {
    /// Pairs `colors` with `pale_colors` positionally, either falling back to
    /// the defaults when absent, and synthesizes entries until there are at
    /// least `n`.
    ///
    /// Every primary in `colors` is kept. One without a pale partner gets a
    /// tint derived from it by [`pale_for`].
    pub fn resolve<R: Rng + ?Sized>(
        n: usize,
        colors: Option<&[sRGB]>,
        pale_colors: Option<&[sRGB]>,
        rng: &mut R,
    ) -> Self {
        let colors = colors.unwrap_or(&DEFAULT_COLORS);
        let pale_colors = pale_colors.unwrap_or(&DEFAULT_PALE_COLORS);

        let mut entries = colors
            .iter()
            .enumerate()
            .map(|(i, &primary)| PaletteEntry {
                primary,
                pale: pale_colors
                    .get(i)
                    .copied()
                    .unwrap_or_else(|| pale_for(primary)),
            })
            .collect_vec();

        let derived = colors.len().saturating_sub(pale_colors.len());
        if derived > 0 {
            debug!(derived, "derived pale colors for unpaired primaries");
        }

        let available = colors.len();
        let lack = n.saturating_sub(available);
        if lack > 0 {
            warn!(
                "There are {n} columns in the data, but only {available} colors are specified. \
                 {lack} color{} will be randomly generated, which are not guaranteed to look nice. \
                 You may specify the colors of your choice and run again.",
                if lack > 1 { "s" } else { "" }
            );
            entries.extend((0..lack).map(|_| synthesize_entry(rng)));
        }

        Self {
            entries,
            synthesized: lack,
        }
    }

    pub fn entries(&self) -> &[PaletteEntry] {
        &self.entries
    }

    pub fn get(&self, i: usize) -> Option<&PaletteEntry> {
        self.entries.get(i)
    }

    /// Number of entries generated to cover the shortfall.
    pub fn synthesized(&self) -> usize {
        self.synthesized
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::capture_logs;
    use approx::assert_abs_diff_eq;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_defaults_cover_small_tables() {
        let mut rng = StdRng::seed_from_u64(0);
        let palette = Palette::resolve(3, None, None, &mut rng);
        assert_eq!(palette.synthesized(), 0);
        for i in 0..3 {
            assert_eq!(
                palette.get(i),
                Some(&PaletteEntry {
                    primary: DEFAULT_COLORS[i],
                    pale: DEFAULT_PALE_COLORS[i],
                })
            );
        }
    }

    #[test]
    fn test_shortfall_is_synthesized() {
        let mut rng = StdRng::seed_from_u64(7);
        let palette = Palette::resolve(7, None, None, &mut rng);
        assert_eq!(palette.len(), 7);
        assert_eq!(palette.synthesized(), 2);
        let primaries = palette.entries()[..5].iter().map(|e| e.primary).collect_vec();
        assert_eq!(primaries, DEFAULT_COLORS);

        // Same seed, same draws.
        let mut rng = StdRng::seed_from_u64(7);
        for i in 5..7 {
            let (primary, pale) = random_pair(&mut rng);
            assert_eq!(primary.h, pale.h);
            assert_eq!(primary.s, pale.s);
            assert_abs_diff_eq!(pale.l, 0.92);
            assert!(PRIMARY_LIGHTNESS.contains(&primary.l));
            assert_eq!(
                palette.entries()[i].primary,
                sRGB::from(hsl_to_rgb(primary.h, primary.s, primary.l).0)
            );
            assert_eq!(
                palette.entries()[i].pale,
                sRGB::from(hsl_to_rgb(pale.h, pale.s, pale.l).0)
            );
        }
    }

    #[test]
    fn test_shortfall_warning() {
        let mut rng = StdRng::seed_from_u64(7);
        let (palette, logs) = capture_logs(|| Palette::resolve(7, None, None, &mut rng));
        assert_eq!(palette.synthesized(), 2);
        assert!(logs.contains("WARN"), "{logs}");
        assert!(
            logs.contains("There are 7 columns in the data, but only 5 colors are specified."),
            "{logs}"
        );
        assert!(logs.contains("2 colors will be randomly generated"), "{logs}");

        let colors = vec![[1, 2, 3]; 6];
        let (_, logs) = capture_logs(|| {
            Palette::resolve(7, Some(colors.as_slice()), None, &mut rng)
        });
        assert!(logs.contains("only 6 colors are specified"), "{logs}");
        assert!(logs.contains("1 color will be randomly generated"), "{logs}");

        let (_, logs) = capture_logs(|| Palette::resolve(3, None, None, &mut rng));
        assert!(!logs.contains("WARN"), "{logs}");
    }

    #[test]
    fn test_seeded_synthesis_is_deterministic() {
        let a = Palette::resolve(12, None, None, &mut StdRng::seed_from_u64(42));
        let b = Palette::resolve(12, None, None, &mut StdRng::seed_from_u64(42));
        assert_eq!(a, b);
        assert_eq!(a.synthesized(), 7);
    }

    #[test]
    fn test_caller_lists_are_paired_and_untouched() {
        let colors = vec![[1, 2, 3], [4, 5, 6], [200, 40, 40]];
        let pale = vec![[9, 9, 9], [8, 8, 8]];
        let mut rng = StdRng::seed_from_u64(1);
        let palette =
            Palette::resolve(3, Some(colors.as_slice()), Some(pale.as_slice()), &mut rng);

        assert_eq!(palette.synthesized(), 0);
        let primaries = palette.entries().iter().map(|e| e.primary).collect_vec();
        assert_eq!(primaries, colors);
        assert_eq!(palette.entries()[1].pale, [8, 8, 8]);
        assert_eq!(palette.entries()[2].pale, pale_for([200, 40, 40]));
        assert_eq!(colors.len(), 3);
        assert_eq!(pale.len(), 2);
    }

    #[test]
    fn test_unpaired_primaries_are_kept() {
        let colors = vec![[1, 2, 3]; 7];
        let mut rng = StdRng::seed_from_u64(1);
        let palette = Palette::resolve(7, Some(colors.as_slice()), None, &mut rng);

        assert_eq!(palette.len(), 7);
        assert_eq!(palette.synthesized(), 0);
        for (i, entry) in palette.entries().iter().enumerate() {
            assert_eq!(entry.primary, [1, 2, 3]);
            if i < 5 {
                assert_eq!(entry.pale, DEFAULT_PALE_COLORS[i]);
            } else {
                assert_eq!(entry.pale, pale_for([1, 2, 3]));
            }
        }
    }

    #[test]
    fn test_pale_for_keeps_hue() {
        let primary: sRGB = hsl_to_rgb(210.0, 0.6, 0.4).0.into();
        let pale = Hsl::from(RGB::from(pale_for(primary)));
        assert_abs_diff_eq!(pale.h, 210.0, epsilon = 4.0);
        assert_abs_diff_eq!(pale.s, 0.6, epsilon = 0.05);
        assert_abs_diff_eq!(pale.l, PALE_LIGHTNESS, epsilon = 0.01);
    }

    #[test]
    fn test_missing_pale_list_uses_defaults() {
        let colors = vec![[1, 2, 3]];
        let mut rng = StdRng::seed_from_u64(1);
        let palette = Palette::resolve(1, Some(colors.as_slice()), None, &mut rng);
        assert_eq!(
            palette.entries(),
            &[PaletteEntry {
                primary: [1, 2, 3],
                pale: DEFAULT_PALE_COLORS[0],
            }]
        );
    }

    #[test]
    fn test_extra_colors_are_kept() {
        let mut rng = StdRng::seed_from_u64(1);
        let palette = Palette::resolve(2, None, None, &mut rng);
        assert_eq!(palette.len(), 5);
        assert_eq!(palette.synthesized(), 0);
    }
}
