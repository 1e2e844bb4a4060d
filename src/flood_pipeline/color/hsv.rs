/// HSV color with every component normalized to [0.0, 1.0].
///
/// Hue is folded into [0.0, 1.0), so pure red is `h = 0.0`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Hsv {
    pub h: f64,
    pub s: f64,
    pub v: f64,
}

impl Hsv {
    pub fn new(h: f64, s: f64, v: f64) -> Self {
        Self { h, s, v }
    }
}

/// Converts an 8-bit RGB triple to HSV.
///
/// The hue sector is picked by the first channel equal to the maximum, in the
/// order red, green, blue. Achromatic input (`r == g == b`) yields `h = 0`, `s = 0`.
#[inline]
pub fn rgb_to_hsv(r: u8, g: u8, b: u8) -> Hsv {
    let r = r as f64 / 255.0;
    let g = g as f64 / 255.0;
    let b = b as f64 / 255.0;

    let max = r.max(g).max(b);
    let min = r.min(g).min(b);
    let delta = max - min;

    let mut h = 0.0;
    let mut s = 0.0;

    if delta != 0.0 {
        s = delta / max;

        h = if max == r {
            ((g - b) / delta + if g < b { 6.0 } else { 0.0 }) / 6.0
        } else if max == g {
            ((b - r) / delta + 2.0) / 6.0
        } else {
            ((r - g) / delta + 4.0) / 6.0
        };
    }

    Hsv { h, s, v: max }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-9;

    #[test]
    fn test_primaries() {
        let red = rgb_to_hsv(255, 0, 0);
        assert!(red.h.abs() < EPS);
        assert_eq!(red.s, 1.0);
        assert_eq!(red.v, 1.0);

        let green = rgb_to_hsv(0, 255, 0);
        assert!((green.h - 1.0 / 3.0).abs() < EPS);

        let blue = rgb_to_hsv(0, 0, 255);
        assert!((blue.h - 2.0 / 3.0).abs() < EPS);
    }

    #[test]
    fn test_white_and_black() {
        let white = rgb_to_hsv(255, 255, 255);
        assert_eq!(white.s, 0.0);
        assert_eq!(white.v, 1.0);
        assert_eq!(white.h, 0.0);

        let black = rgb_to_hsv(0, 0, 0);
        assert_eq!(black, Hsv::new(0.0, 0.0, 0.0));
    }

    #[test]
    fn test_magenta_wraps_into_unit_range() {
        // red is max and green < blue, so the +6 term folds the hue
        let hsv = rgb_to_hsv(255, 0, 128);
        assert!(hsv.h > 0.8 && hsv.h < 1.0);
    }

    #[test]
    fn test_red_green_tie_uses_red_sector() {
        // r == g == max: the red branch wins, giving (g - b) / delta / 6 = 1/6
        let hsv = rgb_to_hsv(200, 200, 50);
        assert!((hsv.h - 1.0 / 6.0).abs() < EPS);
    }

    #[test]
    fn test_muddy_brown() {
        let hsv = rgb_to_hsv(180, 140, 90);
        assert!((hsv.h - 50.0 / 90.0 / 6.0).abs() < EPS);
        assert!((hsv.s - 0.5).abs() < EPS);
        assert!((hsv.v - 180.0 / 255.0).abs() < EPS);
    }

    #[test]
    fn test_all_components_in_unit_range() {
        for r in (0..=255u16).step_by(5) {
            for g in (0..=255u16).step_by(5) {
                for b in (0..=255u16).step_by(5) {
                    let hsv = rgb_to_hsv(r as u8, g as u8, b as u8);
                    assert!((0.0..=1.0).contains(&hsv.h), "h out of range for {r},{g},{b}");
                    assert!((0.0..=1.0).contains(&hsv.s));
                    assert!((0.0..=1.0).contains(&hsv.v));
                    if r == g && g == b {
                        assert_eq!(hsv.s, 0.0);
                    }
                }
            }
        }
    }
}
