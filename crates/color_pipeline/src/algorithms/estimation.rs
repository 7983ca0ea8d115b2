use crate::{
    algorithms::selection::FirstContour,
    traits::SelectionStrategy,
    types::{Contour, FrameResult, Position},
};

/// Reduces a frame's contours to a count and a single position.
pub struct PositionEstimator {
    strategy: Box<dyn SelectionStrategy>,
}

impl PositionEstimator {
    pub fn new(strategy: Box<dyn SelectionStrategy>) -> Self {
        Self { strategy }
    }

    pub fn strategy_name(&self) -> &'static str {
        self.strategy.name()
    }

    /// Returns `None` when there is nothing to report, so the caller keeps the
    /// last published result.
    ///
    /// Otherwise `count` covers every contour and `position` is the
    /// bounding-box midpoint of the selected one. A selected contour without
    /// points keeps `previous` as its position.
    pub fn estimate(&self, contours: &[Contour], previous: Option<Position>) -> Option<FrameResult> {
        if contours.is_empty() {
            return None;
        }

        let position = self.strategy
            .select(contours, previous)
            .and_then(Contour::midpoint)
            .or(previous);

        Some(FrameResult {
            count: contours.len(),
            position,
        })
    }
}

impl Default for PositionEstimator {
    fn default() -> Self {
        Self::new(Box::new(FirstContour))
    }
}

impl std::fmt::Debug for PositionEstimator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PositionEstimator")
            .field("strategy", &self.strategy.name())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::algorithms::selection::LargestArea;

    fn rect(x0: f32, y0: f32, x1: f32, y1: f32) -> Contour {
        Contour::outer(vec![[x0, y0], [x1, y0], [x1, y1], [x0, y1]])
    }

    #[test]
    fn test_empty_means_no_update() {
        let estimator = PositionEstimator::default();
        assert_eq!(estimator.estimate(&[], Some(Position::new(3.0, 3.0))), None);
    }

    #[test]
    fn test_counts_all_and_positions_first() {
        let estimator = PositionEstimator::default();
        let contours = vec![rect(0.0, 0.0, 4.0, 2.0), rect(10.0, 10.0, 50.0, 50.0)];

        let result = estimator.estimate(&contours, None).unwrap();
        assert_eq!(result.count, 2);
        assert_eq!(result.position, Some(Position::new(2.0, 1.0)));
    }

    #[test]
    fn test_strategy_is_pluggable() {
        let estimator = PositionEstimator::new(Box::new(LargestArea));
        let contours = vec![rect(0.0, 0.0, 4.0, 2.0), rect(10.0, 10.0, 50.0, 50.0)];

        let result = estimator.estimate(&contours, None).unwrap();
        assert_eq!(result.count, 2);
        assert_eq!(result.position, Some(Position::new(30.0, 30.0)));
        assert_eq!(estimator.strategy_name(), "largest_area");
    }

    #[test]
    fn test_pointless_contour_keeps_previous_position() {
        let estimator = PositionEstimator::default();
        let previous = Some(Position::new(7.0, 9.0));

        let result = estimator.estimate(&[Contour::outer(Vec::new())], previous).unwrap();
        assert_eq!(result.count, 1);
        assert_eq!(result.position, previous);
    }
}
