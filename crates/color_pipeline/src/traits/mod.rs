use image::{GrayImage, RgbImage};
use crate::{
    error::Result,
    types::{Contour, HsvImage, Position},
};

/// Trait for color-space conversion of incoming frames
pub trait ColorSpaceConverter: Send + Sync {
    /// Convert an RGB frame into an 8-bit HSV image of the same size
    fn to_hsv(&self, frame: &RgbImage) -> HsvImage;
}

/// Trait for contour extraction algorithms
///
/// Implementations must return contours in the same order every time they
/// see the same mask, and an empty list when the mask has no regions.
pub trait ContourExtractor: Send + Sync {
    /// Extract contours from a binary mask
    fn extract_contours(&self, mask: &GrayImage) -> Result<Vec<Contour>>;
}

/// Trait for choosing which contour's position gets reported
pub trait SelectionStrategy: Send + Sync {
    /// Pick one contour, given the last published position if any
    fn select<'a>(&self, contours: &'a [Contour], previous: Option<Position>) -> Option<&'a Contour>;

    fn name(&self) -> &'static str;
}

/// Trait for drawing detections onto the outgoing frame
pub trait FrameAnnotator: Send + Sync {
    fn annotate(&self, frame: &mut RgbImage, contours: &[Contour]);
}
