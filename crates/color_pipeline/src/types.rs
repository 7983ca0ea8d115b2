use geo_types::{Coord, LineString, Polygon};
use image::{ImageBuffer, Rgb};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// An 8-bit HSV image stored in an `Rgb` buffer: channel 0 is hue on the
/// `[0, 180)` scale, channel 1 saturation and channel 2 value, both `[0, 255]`.
pub type HsvImage = ImageBuffer<Rgb<u8>, Vec<u8>>;

/// A point in pixel coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct Position {
    pub x: f32,
    pub y: f32,
}

impl Position {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    pub fn distance_squared(&self, other: &Position) -> f32 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        dx * dx + dy * dy
    }
}

/// Result published once per frame with at least one detection.
///
/// `count` and `position` always come from the same frame.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct FrameResult {
    /// Number of contours found in the frame (holes included)
    pub count: usize,
    /// Bounding-box midpoint of the selected contour, `None` until the first detection
    pub position: Option<Position>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BorderKind {
    Outer,
    Hole,
}

/// Axis-aligned extents of a contour, inclusive on both ends.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingBox {
    pub min: [f32; 2],
    pub max: [f32; 2],
}

impl BoundingBox {
    pub fn midpoint(&self) -> Position {
        Position::new(
            (self.max[0] + self.min[0]) / 2.0,
            (self.max[1] + self.min[1]) / 2.0,
        )
    }

    pub fn width(&self) -> f32 {
        self.max[0] - self.min[0]
    }

    pub fn height(&self) -> f32 {
        self.max[1] - self.min[1]
    }
}

/// A closed boundary polygon found in a mask.
#[derive(Debug, Clone, PartialEq)]
pub struct Contour {
    /// Boundary points in traversal order
    pub points: Vec<[f32; 2]>,
    pub border: BorderKind,
    /// Index of the enclosing contour in the same extraction result
    pub parent: Option<usize>,
}

impl Contour {
    pub fn outer(points: Vec<[f32; 2]>) -> Self {
        Self {
            points,
            border: BorderKind::Outer,
            parent: None,
        }
    }

    /// Convert to geo-types Polygon for geometric operations
    pub fn to_geo_polygon(&self) -> Polygon<f32> {
        let coords: Vec<Coord<f32>> = self.points
            .iter()
            .map(|&[x, y]| Coord { x, y })
            .collect();

        Polygon::new(LineString::new(coords), vec![])
    }

    /// Enclosed area of the boundary polygon
    pub fn area(&self) -> f32 {
        use geo::Area;
        self.to_geo_polygon().unsigned_area()
    }

    /// Get the bounding box of the contour in one pass over its points.
    /// Returns `None` for a contour without points.
    pub fn bounding_box(&self) -> Option<BoundingBox> {
        let (&[x0, y0], rest) = self.points.split_first()?;
        let mut bbox = BoundingBox {
            min: [x0, y0],
            max: [x0, y0],
        };

        for &[x, y] in rest {
            bbox.min[0] = bbox.min[0].min(x);
            bbox.min[1] = bbox.min[1].min(y);
            bbox.max[0] = bbox.max[0].max(x);
            bbox.max[1] = bbox.max[1].max(y);
        }

        Some(bbox)
    }

    pub fn midpoint(&self) -> Option<Position> {
        self.bounding_box().map(|bbox| bbox.midpoint())
    }
}
