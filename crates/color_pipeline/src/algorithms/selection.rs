use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString, IntoStaticStr, VariantNames};
use crate::{
    traits::SelectionStrategy,
    types::{Contour, Position},
};

/// Reports the first contour in discovery order.
#[derive(Debug, Clone, Default)]
pub struct FirstContour;

impl SelectionStrategy for FirstContour {
    fn select<'a>(&self, contours: &'a [Contour], _previous: Option<Position>) -> Option<&'a Contour> {
        contours.first()
    }

    fn name(&self) -> &'static str {
        "first"
    }
}

/// Reports the contour enclosing the most area; ties go to the earliest.
#[derive(Debug, Clone, Default)]
pub struct LargestArea;

impl SelectionStrategy for LargestArea {
    fn select<'a>(&self, contours: &'a [Contour], _previous: Option<Position>) -> Option<&'a Contour> {
        let mut best: Option<(&Contour, f32)> = None;
        for contour in contours {
            let area = contour.area();
            if best.map_or(true, |(_, best_area)| area > best_area) {
                best = Some((contour, area));
            }
        }
        best.map(|(contour, _)| contour)
    }

    fn name(&self) -> &'static str {
        "largest_area"
    }
}

/// Reports the contour whose box midpoint is closest to the last published
/// position, so a target keeps being followed while others come and go.
#[derive(Debug, Clone, Default)]
pub struct NearestToPrevious;

impl SelectionStrategy for NearestToPrevious {
    fn select<'a>(&self, contours: &'a [Contour], previous: Option<Position>) -> Option<&'a Contour> {
        let Some(previous) = previous else {
            return contours.first();
        };

        let mut best: Option<(&Contour, f32)> = None;
        for contour in contours {
            let Some(midpoint) = contour.midpoint() else { continue };
            let distance = midpoint.distance_squared(&previous);
            if best.map_or(true, |(_, best_distance)| distance < best_distance) {
                best = Some((contour, distance));
            }
        }
        best.map(|(contour, _)| contour).or_else(|| contours.first())
    }

    fn name(&self) -> &'static str {
        "nearest_to_previous"
    }
}

/// Named selection policies for configuration files and the command line
#[derive(
    Debug, Clone, Copy, Default,
    PartialEq, Eq,
    Serialize, Deserialize, JsonSchema,
    Display, EnumString, EnumIter, VariantNames, IntoStaticStr,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum SelectionPolicy {
    #[default]
    First,
    LargestArea,
    NearestToPrevious,
}

impl SelectionPolicy {
    pub fn strategy(self) -> Box<dyn SelectionStrategy> {
        match self {
            Self::First => Box::new(FirstContour),
            Self::LargestArea => Box::new(LargestArea),
            Self::NearestToPrevious => Box::new(NearestToPrevious),
        }
    }
}
