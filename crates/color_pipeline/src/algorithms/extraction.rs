use image::GrayImage;
use imageproc::contours::BorderType;
use crate::{
    error::Result,
    traits::ContourExtractor,
    types::{BorderKind, Contour},
};

/// Imageproc-based contour extractor.
///
/// Contours come back in raster-scan discovery order, outer borders and
/// holes alike, each carrying the index of its parent. Pixels outside the
/// frame count as background, so a region touching the edge still has a
/// closed border.
#[derive(Debug, Clone, Default)]
pub struct ImageprocContourExtractor;

/// Copies `mask` into a zero frame one pixel wider on every side.
fn pad(mask: &GrayImage) -> GrayImage {
    let (width, height) = mask.dimensions();
    let mut padded = GrayImage::new(width + 2, height + 2);
    image::imageops::replace(&mut padded, mask, 1, 1);
    padded
}

impl ContourExtractor for ImageprocContourExtractor {
    fn extract_contours(&self, mask: &GrayImage) -> Result<Vec<Contour>> {
        // find_contours never closes a border that runs along the image edge
        let contours = imageproc::contours::find_contours::<i32>(&pad(mask));

        let result = contours
            .into_iter()
            .map(|contour| Contour {
                points: contour.points
                    .iter()
                    .map(|p| [(p.x - 1) as f32, (p.y - 1) as f32])
                    .collect(),
                border: match contour.border_type {
                    BorderType::Outer => BorderKind::Outer,
                    BorderType::Hole => BorderKind::Hole,
                },
                parent: contour.parent,
            })
            .collect();

        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Luma;

    fn fill(mask: &mut GrayImage, x0: u32, y0: u32, x1: u32, y1: u32) {
        for y in y0..y1 {
            for x in x0..x1 {
                mask.put_pixel(x, y, Luma([255u8]));
            }
        }
    }

    #[test]
    fn test_empty_mask_yields_nothing() {
        let mask = GrayImage::new(32, 32);
        let contours = ImageprocContourExtractor.extract_contours(&mask).unwrap();
        assert!(contours.is_empty());
    }

    #[test]
    fn test_discovery_order_is_raster_order() {
        let mut mask = GrayImage::new(64, 64);
        fill(&mut mask, 40, 5, 50, 15);
        fill(&mut mask, 5, 30, 35, 60);

        let contours = ImageprocContourExtractor.extract_contours(&mask).unwrap();
        assert_eq!(contours.len(), 2);
        // The region whose top row comes first is found first
        assert_eq!(contours[0].bounding_box().unwrap().min, [40.0, 5.0]);
        assert_eq!(contours[1].bounding_box().unwrap().min, [5.0, 30.0]);

        let again = ImageprocContourExtractor.extract_contours(&mask).unwrap();
        assert_eq!(contours, again);
    }

    #[test]
    fn test_hole_is_reported_with_parent() {
        let mut mask = GrayImage::new(40, 40);
        fill(&mut mask, 5, 5, 35, 35);
        for y in 15..25 {
            for x in 15..25 {
                mask.put_pixel(x, y, Luma([0u8]));
            }
        }

        let contours = ImageprocContourExtractor.extract_contours(&mask).unwrap();
        assert_eq!(contours.len(), 2);
        assert_eq!(contours[0].border, BorderKind::Outer);
        assert_eq!(contours[1].border, BorderKind::Hole);
        assert_eq!(contours[1].parent, Some(0));
    }

    #[test]
    fn test_full_mask_is_one_contour() {
        let mask = GrayImage::from_pixel(64, 48, Luma([255u8]));
        let contours = ImageprocContourExtractor.extract_contours(&mask).unwrap();

        assert_eq!(contours.len(), 1);
        assert_eq!(contours[0].border, BorderKind::Outer);
        let bbox = contours[0].bounding_box().unwrap();
        assert_eq!(bbox.min, [0.0, 0.0]);
        assert_eq!(bbox.max, [63.0, 47.0]);
    }

    #[test]
    fn test_single_pixel_frame() {
        let mask = GrayImage::from_pixel(1, 1, Luma([255u8]));
        let contours = ImageprocContourExtractor.extract_contours(&mask).unwrap();

        assert_eq!(contours.len(), 1);
        let bbox = contours[0].bounding_box().unwrap();
        assert_eq!((bbox.min, bbox.max), ([0.0, 0.0], [0.0, 0.0]));
    }

    #[test]
    fn test_regions_on_the_frame_edge() {
        let mut mask = GrayImage::new(32, 24);
        fill(&mut mask, 0, 0, 32, 1);
        let contours = ImageprocContourExtractor.extract_contours(&mask).unwrap();
        assert_eq!(contours.len(), 1);
        let bbox = contours[0].bounding_box().unwrap();
        assert_eq!((bbox.min, bbox.max), ([0.0, 0.0], [31.0, 0.0]));

        // one blob in the bottom-right corner, one against the left edge
        let mut mask = GrayImage::new(32, 24);
        fill(&mut mask, 0, 8, 4, 12);
        fill(&mut mask, 26, 18, 32, 24);
        let contours = ImageprocContourExtractor.extract_contours(&mask).unwrap();
        assert_eq!(contours.len(), 2);
        assert_eq!(contours[0].bounding_box().unwrap().min, [0.0, 8.0]);
        assert_eq!(contours[1].bounding_box().unwrap().max, [31.0, 23.0]);
    }
}
