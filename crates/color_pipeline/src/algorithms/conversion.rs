use image::{RgbImage, Rgb};
use crate::{
    traits::ColorSpaceConverter,
    types::HsvImage,
};

/// RGB to 8-bit HSV with hue halved onto `[0, 180)`.
#[derive(Debug, Clone, Default)]
pub struct RgbToHsvConverter;

impl ColorSpaceConverter for RgbToHsvConverter {
    fn to_hsv(&self, frame: &RgbImage) -> HsvImage {
        let mut hsv = HsvImage::new(frame.width(), frame.height());
        for (dst, src) in hsv.pixels_mut().zip(frame.pixels()) {
            let Rgb([r, g, b]) = *src;
            *dst = Rgb(rgb_to_hsv(r, g, b));
        }
        hsv
    }
}

/// Converts one RGB triple to `[hue, saturation, value]`.
pub fn rgb_to_hsv(r: u8, g: u8, b: u8) -> [u8; 3] {
    let max = r.max(g).max(b);
    let min = r.min(g).min(b);
    if max == 0 {
        return [0, 0, 0];
    }

    let delta = (max - min) as f32;
    let saturation = (255.0 * delta / max as f32).round() as u8;
    if max == min {
        return [0, saturation, max];
    }

    let (rf, gf, bf) = (r as f32, g as f32, b as f32);
    let degrees = if max == r {
        60.0 * (gf - bf) / delta
    } else if max == g {
        120.0 + 60.0 * (bf - rf) / delta
    } else {
        240.0 + 60.0 * (rf - gf) / delta
    };
    let degrees = if degrees < 0.0 { degrees + 360.0 } else { degrees };

    // 359.x degrees rounds up to 180, which is hue 0 again
    let hue = ((degrees / 2.0).round() as u16 % 180) as u8;

    [hue, saturation, max]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_primaries() {
        assert_eq!(rgb_to_hsv(255, 0, 0), [0, 255, 255]);
        assert_eq!(rgb_to_hsv(0, 255, 0), [60, 255, 255]);
        assert_eq!(rgb_to_hsv(0, 0, 255), [120, 255, 255]);
        assert_eq!(rgb_to_hsv(255, 0, 255), [150, 255, 255]);
    }

    #[test]
    fn test_greys_have_no_saturation() {
        assert_eq!(rgb_to_hsv(0, 0, 0), [0, 0, 0]);
        assert_eq!(rgb_to_hsv(128, 128, 128), [0, 0, 128]);
    }

    #[test]
    fn test_hue_stays_below_domain() {
        // Just short of a full turn
        let [hue, _, _] = rgb_to_hsv(255, 0, 1);
        assert!(hue < 180);
        assert!(hue == 0 || hue == 179);
    }

    #[test]
    fn test_frame_conversion_keeps_dimensions() {
        let frame = RgbImage::from_pixel(7, 3, Rgb([0, 255, 0]));
        let hsv = RgbToHsvConverter.to_hsv(&frame);
        assert_eq!(hsv.dimensions(), (7, 3));
        assert!(hsv.pixels().all(|p| p.0 == [60, 255, 255]));
    }
}
