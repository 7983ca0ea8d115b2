use image::{GrayImage, Luma};
use strum::EnumCount;
use tracing::debug;
use crate::{
    color::{color_ranges, ColorLabel, ColorRange, ColorSet, HUE_DOMAIN},
    types::HsvImage,
};

const MASK_SET: Luma<u8> = Luma([255]);

/// Closed hue interval on `[0, 180)`; `lo > hi` means empty.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HueInterval {
    pub lo: u8,
    pub hi: u8,
}

impl HueInterval {
    pub const EMPTY: HueInterval = HueInterval { lo: 1, hi: 0 };

    fn new(lo: i16, hi: i16) -> Self {
        let max = HUE_DOMAIN - 1;
        if hi < lo || hi < 0 || lo > max {
            return Self::EMPTY;
        }
        Self {
            lo: lo.max(0) as u8,
            hi: hi.min(max) as u8,
        }
    }

    #[inline]
    pub fn contains(&self, hue: u8) -> bool {
        self.lo <= hue && hue <= self.hi
    }

    pub fn is_empty(&self) -> bool {
        self.lo > self.hi
    }
}

/// A color range with its hue already split into at most two ordinary
/// intervals, so matching never has to reason about wraparound.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CompiledRange {
    pub hue: [HueInterval; 2],
    pub saturation: (u8, u8),
    pub value: (u8, u8),
}

impl CompiledRange {
    pub fn compile(range: &ColorRange) -> Self {
        Self {
            hue: split_hue(range.lower.hue, range.upper.hue),
            saturation: (range.lower.saturation, range.upper.saturation),
            value: (range.lower.value, range.upper.value),
        }
    }

    #[inline]
    pub fn matches(&self, [h, s, v]: [u8; 3]) -> bool {
        (self.hue[0].contains(h) || self.hue[1].contains(h))
            && self.saturation.0 <= s
            && s <= self.saturation.1
            && self.value.0 <= v
            && v <= self.value.1
    }
}

/// Splits `[lower, upper]` on the hue circle into ordinary intervals.
///
/// Both bounds are first reduced mod 180. If the reduced lower bound is
/// above the reduced upper one the range wraps: `[lower, 179] ∪ [0, upper]`.
/// A span of a full turn or more covers every hue.
fn split_hue(lower: i16, upper: i16) -> [HueInterval; 2] {
    let max = HUE_DOMAIN - 1;
    if upper - lower >= max {
        return [HueInterval::new(0, max), HueInterval::EMPTY];
    }

    let lo = lower.rem_euclid(HUE_DOMAIN);
    let hi = upper.rem_euclid(HUE_DOMAIN);
    if lo <= hi {
        [HueInterval::new(lo, hi), HueInterval::EMPTY]
    } else {
        [HueInterval::new(lo, max), HueInterval::new(0, hi)]
    }
}

/// Builds binary masks from HSV frames for a set of active colors.
#[derive(Debug, Clone)]
pub struct FrameSegmenter {
    compiled: [CompiledRange; ColorLabel::COUNT],
}

impl FrameSegmenter {
    pub fn new() -> Self {
        let ranges = color_ranges();
        Self {
            compiled: std::array::from_fn(|i| CompiledRange::compile(&ranges[i])),
        }
    }

    pub fn compiled(&self, label: ColorLabel) -> &CompiledRange {
        &self.compiled[label.index()]
    }

    /// Whether `hsv` falls inside any of the `active` ranges.
    pub fn matches(&self, hsv: [u8; 3], active: ColorSet) -> bool {
        active.iter().any(|label| self.compiled(label).matches(hsv))
    }

    /// Marks every pixel inside the union of `active` ranges with 255.
    pub fn segment(&self, hsv: &HsvImage, active: ColorSet) -> GrayImage {
        let mut mask = GrayImage::new(hsv.width(), hsv.height());
        if active.is_empty() {
            return mask;
        }

        let ranges: Vec<&CompiledRange> = active.iter().map(|label| self.compiled(label)).collect();
        for (dst, src) in mask.pixels_mut().zip(hsv.pixels()) {
            if ranges.iter().any(|range| range.matches(src.0)) {
                *dst = MASK_SET;
            }
        }

        debug!(colors = %active, width = hsv.width(), height = hsv.height(), "segmented frame");
        mask
    }
}

impl Default for FrameSegmenter {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::{HsvBound, range_of};
    use image::Rgb;

    fn active(labels: &[ColorLabel]) -> ColorSet {
        labels.iter().copied().collect()
    }

    #[test]
    fn test_magenta_wraps_across_zero() {
        let segmenter = FrameSegmenter::new();
        let magenta = active(&[ColorLabel::Magenta]);

        assert!(segmenter.matches([2, 200, 200], magenta));
        assert!(segmenter.matches([179, 200, 200], magenta));
        assert!(segmenter.matches([150, 200, 200], magenta));
        assert!(!segmenter.matches([90, 200, 200], magenta));
        assert!(!segmenter.matches([149, 200, 200], magenta));
        assert!(!segmenter.matches([11, 200, 200], magenta));
    }

    #[test]
    fn test_wraparound_is_split_at_construction() {
        let compiled = CompiledRange::compile(&range_of(ColorLabel::Magenta));
        assert_eq!(compiled.hue, [HueInterval { lo: 150, hi: 179 }, HueInterval { lo: 0, hi: 10 }]);

        let green = CompiledRange::compile(&range_of(ColorLabel::Green));
        assert_eq!(green.hue[0], HueInterval { lo: 50, hi: 70 });
        assert!(green.hue[1].is_empty());
    }

    #[test]
    fn test_split_hue_edge_forms() {
        // lower numerically above upper, both positive
        assert_eq!(split_hue(170, 5), [HueInterval { lo: 170, hi: 179 }, HueInterval { lo: 0, hi: 5 }]);
        // whole interval below zero
        assert_eq!(split_hue(-30, -10), [HueInterval { lo: 150, hi: 170 }, HueInterval::EMPTY]);
        // 180 is hue 0 again
        assert_eq!(split_hue(160, 180), [HueInterval { lo: 160, hi: 179 }, HueInterval { lo: 0, hi: 0 }]);
        // both negative with lower above upper still wraps
        assert_eq!(split_hue(-10, -30), [HueInterval { lo: 170, hi: 179 }, HueInterval { lo: 0, hi: 150 }]);
        // bounds past one turn reduce to an ordinary interval
        assert_eq!(split_hue(190, 200), [HueInterval { lo: 10, hi: 20 }, HueInterval::EMPTY]);
        assert_eq!(split_hue(-165, 180), [HueInterval { lo: 0, hi: 179 }, HueInterval::EMPTY]);
    }

    #[test]
    fn test_saturation_and_value_bounds_are_inclusive() {
        let segmenter = FrameSegmenter::new();
        let green = active(&[ColorLabel::Green]);
        let range = range_of(ColorLabel::Green);
        let HsvBound { saturation, value, .. } = range.lower;

        assert!(segmenter.matches([60, saturation, value], green));
        assert!(!segmenter.matches([60, saturation - 1, value], green));
        assert!(!segmenter.matches([60, saturation, value - 1], green));
        assert!(segmenter.matches([50, 255, 255], green));
        assert!(segmenter.matches([70, 255, 255], green));
        assert!(!segmenter.matches([71, 255, 255], green));
    }

    #[test]
    fn test_mask_is_union_of_active_ranges() {
        let segmenter = FrameSegmenter::new();
        let mut hsv = HsvImage::new(4, 1);
        hsv.put_pixel(0, 0, Rgb([60, 200, 200])); // green
        hsv.put_pixel(1, 0, Rgb([100, 200, 200])); // blue
        hsv.put_pixel(2, 0, Rgb([25, 200, 200])); // yellow
        hsv.put_pixel(3, 0, Rgb([60, 10, 200])); // washed out

        let mask = segmenter.segment(&hsv, active(&[ColorLabel::Green, ColorLabel::Blue]));
        let values: Vec<u8> = mask.pixels().map(|p| p.0[0]).collect();
        assert_eq!(values, vec![255, 255, 0, 0]);
    }

    #[test]
    fn test_mask_agrees_with_ranges_for_every_pixel() {
        let segmenter = FrameSegmenter::new();
        let labels = active(&[ColorLabel::Red, ColorLabel::Magenta]);

        let hsv = HsvImage::from_fn(180, 8, |x, y| Rgb([x as u8, 30 + (y as u8) * 30, 220]));
        let mask = segmenter.segment(&hsv, labels);

        for (x, y, pixel) in hsv.enumerate_pixels() {
            let [h, s, v] = pixel.0;
            let expected = labels.iter().any(|label| {
                let range = range_of(label);
                let hue_ok = if range.wraps() {
                    h as i16 >= range.lower.hue.rem_euclid(HUE_DOMAIN) || h as i16 <= range.upper.hue
                } else {
                    h as i16 >= range.lower.hue && h as i16 <= range.upper.hue
                };
                hue_ok
                    && (range.lower.saturation..=range.upper.saturation).contains(&s)
                    && (range.lower.value..=range.upper.value).contains(&v)
            });
            assert_eq!(mask.get_pixel(x, y).0[0] == 255, expected, "pixel ({x}, {y}) = {:?}", pixel.0);
        }
    }

    #[test]
    fn test_empty_active_set_gives_empty_mask() {
        let segmenter = FrameSegmenter::new();
        let hsv = HsvImage::from_pixel(16, 16, Rgb([60, 255, 255]));
        let mask = segmenter.segment(&hsv, ColorSet::empty());
        assert_eq!(mask.dimensions(), (16, 16));
        assert!(mask.pixels().all(|p| p.0[0] == 0));
    }
}
