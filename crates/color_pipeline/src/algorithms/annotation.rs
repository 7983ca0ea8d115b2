use image::{Rgb, RgbImage};
use imageproc::{drawing::draw_hollow_rect_mut, rect::Rect};
use crate::{traits::FrameAnnotator, types::Contour};

/// Draws the bounding rectangle of every contour.
#[derive(Debug, Clone)]
pub struct BoundingBoxAnnotator {
    pub color: Rgb<u8>,
    /// Line width in pixels, growing inwards from the box edge
    pub thickness: u32,
}

impl Default for BoundingBoxAnnotator {
    fn default() -> Self {
        Self {
            color: Rgb([0, 255, 0]),
            thickness: 2,
        }
    }
}

impl FrameAnnotator for BoundingBoxAnnotator {
    fn annotate(&self, frame: &mut RgbImage, contours: &[Contour]) {
        for bbox in contours.iter().filter_map(Contour::bounding_box) {
            let x = bbox.min[0].round() as i32;
            let y = bbox.min[1].round() as i32;
            let width = bbox.width().round() as i32 + 1;
            let height = bbox.height().round() as i32 + 1;

            for inset in 0..self.thickness as i32 {
                let (w, h) = (width - 2 * inset, height - 2 * inset);
                if w <= 0 || h <= 0 {
                    break;
                }
                let rect = Rect::at(x + inset, y + inset).of_size(w as u32, h as u32);
                draw_hollow_rect_mut(frame, rect, self.color);
            }
        }
    }
}
