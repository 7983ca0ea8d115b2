//! Color labels and their HSV ranges.
//!
//! Hue uses the 8-bit convention `[0, 180)` (degrees halved); saturation and
//! value are `[0, 255]`. A range whose lower hue is negative, or greater than
//! its upper hue, wraps across hue 0.

pub mod set;

pub use set::ColorSet;

use std::str::FromStr;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumCount, EnumIter, EnumString, IntoStaticStr, VariantNames};

use crate::error::{PipelineError, Result};

/// Size of the cyclical hue domain.
pub const HUE_DOMAIN: i16 = 180;

#[derive(
    Debug, Clone, Copy,
    PartialEq, Eq, Hash, PartialOrd, Ord,
    Serialize, Deserialize, JsonSchema,
    Display, EnumString, EnumIter, EnumCount, VariantNames, IntoStaticStr,
)]
#[repr(u8)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum ColorLabel {
    /// Red to reddish-orange
    Red,
    /// Yellow-orange to lime-yellow
    Yellow,
    Green,
    /// Teal to indigo
    Blue,
    /// Magenta through to red, wrapping across hue 0
    Magenta,
}

impl ColorLabel {
    pub(crate) fn index(self) -> usize {
        self as usize
    }

    /// The fixed HSV range for this label.
    pub fn range(self) -> ColorRange {
        COLOR_RANGES[self.index()]
    }
}

/// One inclusive HSV corner of a color range. `hue` is signed so that a
/// lower bound can sit below the origin.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HsvBound {
    pub hue: i16,
    pub saturation: u8,
    pub value: u8,
}

impl HsvBound {
    pub const fn new(hue: i16, saturation: u8, value: u8) -> Self {
        Self { hue, saturation, value }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColorRange {
    pub label: ColorLabel,
    pub lower: HsvBound,
    pub upper: HsvBound,
}

impl ColorRange {
    pub fn range(&self) -> (HsvBound, HsvBound) {
        (self.lower, self.upper)
    }

    /// Whether the hue interval crosses the origin of the hue circle.
    pub fn wraps(&self) -> bool {
        let (lower, upper) = (self.lower.hue, self.upper.hue);
        upper - lower < HUE_DOMAIN - 1 && lower.rem_euclid(HUE_DOMAIN) > upper.rem_euclid(HUE_DOMAIN)
    }
}

const fn entry(label: ColorLabel, lower: HsvBound, upper: HsvBound) -> ColorRange {
    ColorRange { label, lower, upper }
}

/// Indexed by `ColorLabel as usize`.
static COLOR_RANGES: [ColorRange; ColorLabel::COUNT] = [
    entry(ColorLabel::Red, HsvBound::new(0, 70, 40), HsvBound::new(15, 255, 255)),
    entry(ColorLabel::Yellow, HsvBound::new(20, 70, 50), HsvBound::new(33, 255, 255)),
    entry(ColorLabel::Green, HsvBound::new(50, 100, 100), HsvBound::new(70, 255, 255)),
    entry(ColorLabel::Blue, HsvBound::new(90, 70, 50), HsvBound::new(125, 255, 255)),
    entry(ColorLabel::Magenta, HsvBound::new(-30, 70, 40), HsvBound::new(10, 255, 255)),
];

pub fn range_of(label: ColorLabel) -> ColorRange {
    label.range()
}

/// Parses a comma-separated list such as `"green, Blue"`. Blank entries are
/// ignored.
pub fn parse_colors(list: &str) -> Result<ColorSet> {
    list.split(',')
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .map(|name| {
            ColorLabel::from_str(name).map_err(|_| PipelineError::UnknownColor(name.to_string()))
        })
        .collect()
}

/// All ranges in label order.
pub fn color_ranges() -> &'static [ColorRange] {
    &COLOR_RANGES
}
