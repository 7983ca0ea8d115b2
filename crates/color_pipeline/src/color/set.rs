use std::fmt;

use bitflags::bitflags;
use serde::{Deserialize, Serialize};
use strum::IntoEnumIterator;

use super::ColorLabel;

bitflags! {
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    struct Labels: u8 {
        const RED = 0b0_0001;
        const YELLOW = 0b0_0010;
        const GREEN = 0b0_0100;
        const BLUE = 0b0_1000;
        const MAGENTA = 0b1_0000;
    }
}

impl From<ColorLabel> for Labels {
    fn from(label: ColorLabel) -> Self {
        match label {
            ColorLabel::Red => Labels::RED,
            ColorLabel::Yellow => Labels::YELLOW,
            ColorLabel::Green => Labels::GREEN,
            ColorLabel::Blue => Labels::BLUE,
            ColorLabel::Magenta => Labels::MAGENTA,
        }
    }
}

/// A set of color labels packed into one byte.
///
/// `ColorSet` is `Copy`, so every read of a shared set is a snapshot.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "Vec<ColorLabel>", into = "Vec<ColorLabel>")]
pub struct ColorSet(Labels);

impl ColorSet {
    pub const fn empty() -> Self {
        Self(Labels::empty())
    }

    /// Adds `label`, returning `true` if it was not already present.
    pub fn insert(&mut self, label: ColorLabel) -> bool {
        let added = !self.contains(label);
        self.0.insert(label.into());
        added
    }

    pub fn remove(&mut self, label: ColorLabel) -> bool {
        let present = self.contains(label);
        self.0.remove(label.into());
        present
    }

    pub fn contains(&self, label: ColorLabel) -> bool {
        self.0.contains(label.into())
    }

    pub fn clear(&mut self) {
        self.0 = Labels::empty();
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.bits().count_ones() as usize
    }

    /// Labels in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = ColorLabel> + '_ {
        ColorLabel::iter().filter(move |label| self.contains(*label))
    }
}

impl Default for ColorSet {
    fn default() -> Self {
        Self::empty()
    }
}

impl fmt::Debug for ColorSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

impl fmt::Display for ColorSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let names: Vec<&'static str> = self.iter().map(Into::into).collect();
        write!(f, "{{{}}}", names.join(", "))
    }
}

impl FromIterator<ColorLabel> for ColorSet {
    fn from_iter<I: IntoIterator<Item = ColorLabel>>(iter: I) -> Self {
        let mut set = ColorSet::empty();
        set.extend(iter);
        set
    }
}

impl Extend<ColorLabel> for ColorSet {
    fn extend<I: IntoIterator<Item = ColorLabel>>(&mut self, iter: I) {
        for label in iter {
            self.insert(label);
        }
    }
}

impl From<Vec<ColorLabel>> for ColorSet {
    fn from(labels: Vec<ColorLabel>) -> Self {
        labels.into_iter().collect()
    }
}

impl From<ColorSet> for Vec<ColorLabel> {
    fn from(set: ColorSet) -> Self {
        set.iter().collect()
    }
}
