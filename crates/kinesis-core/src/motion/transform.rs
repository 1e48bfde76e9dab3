//! Range mapping for scroll-linked properties

use serde::Serialize;

/// Map `value` from `input` to `output`, clamping to the output range
///
/// A degenerate input range maps everything at or past its start to the end
/// of the output range.
pub fn map_range(value: f64, input: (f64, f64), output: (f64, f64)) -> f64 {
    let (in_start, in_end) = input;
    let (out_start, out_end) = output;
    if !value.is_finite() {
        return out_start;
    }
    let span = in_end - in_start;
    let t = if span.abs() < f64::EPSILON {
        if value >= in_start {
            1.0
        } else {
            0.0
        }
    } else {
        ((value - in_start) / span).clamp(0.0, 1.0)
    };
    out_start + (out_end - out_start) * t
}

/// Scroll-linked hero transform: fades, shrinks and drifts while the page
/// leaves the top
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct HeroTransform {
    pub opacity: f64,
    pub scale: f64,
    pub y: f64,
}

impl HeroTransform {
    pub fn from_progress(progress: f64) -> Self {
        Self {
            opacity: map_range(progress, (0.0, 0.15), (1.0, 0.0)),
            scale: map_range(progress, (0.0, 0.2), (1.0, 0.88)),
            y: map_range(progress, (0.0, 0.25), (0.0, 80.0)),
        }
    }
}

/// Vertical parallax shift as a fraction of the element's height
///
/// `amplitude` 0.10 moves from -10% to +10% while the element travels through
/// the viewport; `invert` swaps the direction (alternating grid cards).
pub fn parallax_shift(element_progress: f64, amplitude: f64, invert: bool) -> f64 {
    let (from, to) = if invert {
        (amplitude, -amplitude)
    } else {
        (-amplitude, amplitude)
    };
    map_range(element_progress, (0.0, 1.0), (from, to))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_map_range_clamps() {
        assert_eq!(map_range(-1.0, (0.0, 1.0), (10.0, 20.0)), 10.0);
        assert_eq!(map_range(0.5, (0.0, 1.0), (10.0, 20.0)), 15.0);
        assert_eq!(map_range(3.0, (0.0, 1.0), (10.0, 20.0)), 20.0);
    }

    #[test]
    fn test_map_range_degenerate_and_nan() {
        assert_eq!(map_range(0.2, (0.2, 0.2), (0.0, 1.0)), 1.0);
        assert_eq!(map_range(0.1, (0.2, 0.2), (0.0, 1.0)), 0.0);
        assert_eq!(map_range(f64::NAN, (0.0, 1.0), (5.0, 9.0)), 5.0);
    }

    #[test]
    fn test_hero_transform_endpoints() {
        let top = HeroTransform::from_progress(0.0);
        assert_eq!(top, HeroTransform { opacity: 1.0, scale: 1.0, y: 0.0 });
        let gone = HeroTransform::from_progress(0.3);
        assert_eq!(gone.opacity, 0.0);
        assert!((gone.scale - 0.88).abs() < 1e-12);
        assert_eq!(gone.y, 80.0);
    }

    #[test]
    fn test_parallax_alternates() {
        assert!((parallax_shift(0.0, 0.04, false) + 0.04).abs() < 1e-12);
        assert!((parallax_shift(0.0, 0.04, true) - 0.04).abs() < 1e-12);
        assert_eq!(parallax_shift(0.5, 0.1, false), 0.0);
    }
}
