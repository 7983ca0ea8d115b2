pub mod builder;

use std::sync::Arc;

use image::RgbImage;
use tracing::{debug, info, warn};
use crate::{
    algorithms::{FrameSegmenter, PositionEstimator},
    color::ColorSet,
    source::FrameSource,
    state::PipelineState,
    traits::{ColorSpaceConverter, ContourExtractor, FrameAnnotator},
    types::Contour,
};

/// Per-frame color tracking: convert, segment, extract, estimate, publish,
/// annotate.
///
/// `process_frame` is meant to be driven by a single producer. Consumers read
/// and steer the pipeline through its shared [`PipelineState`].
pub struct VisionPipeline {
    converter: Box<dyn ColorSpaceConverter>,
    segmenter: FrameSegmenter,
    contour_extractor: Box<dyn ContourExtractor>,
    estimator: PositionEstimator,
    annotators: Vec<Box<dyn FrameAnnotator>>,
    state: Arc<PipelineState>,
}

impl VisionPipeline {
    /// Create a new pipeline builder
    pub fn builder() -> builder::PipelineBuilder {
        builder::PipelineBuilder::new()
    }

    /// Create a new pipeline with the given components
    pub fn new(
        converter: Box<dyn ColorSpaceConverter>,
        contour_extractor: Box<dyn ContourExtractor>,
        estimator: PositionEstimator,
        annotators: Vec<Box<dyn FrameAnnotator>>,
        state: Arc<PipelineState>,
    ) -> Self {
        Self {
            converter,
            segmenter: FrameSegmenter::new(),
            contour_extractor,
            estimator,
            annotators,
            state,
        }
    }

    /// Handle to the state shared with consumers
    pub fn state(&self) -> Arc<PipelineState> {
        Arc::clone(&self.state)
    }

    pub fn segmenter(&self) -> &FrameSegmenter {
        &self.segmenter
    }

    /// Process one frame and return it with detections drawn.
    ///
    /// A frame with no detections leaves the published result untouched.
    /// Failures inside the pipeline are logged and treated as an empty frame.
    pub fn process_frame(&self, mut frame: RgbImage) -> RgbImage {
        let targets = self.state.colors();
        let contours = self.detect(&frame, targets);

        if let Some(result) = self.estimator.estimate(&contours, self.state.result().position) {
            debug!(count = result.count, position = ?result.position, "publishing frame result");
            self.state.publish(result);
        }

        for annotator in &self.annotators {
            annotator.annotate(&mut frame, &contours);
        }

        self.state.record_frame();
        frame
    }

    /// Contours of the regions matching `targets`, in discovery order.
    pub fn detect(&self, frame: &RgbImage, targets: ColorSet) -> Vec<Contour> {
        if targets.is_empty() {
            return Vec::new();
        }

        let hsv = self.converter.to_hsv(frame);
        let mask = self.segmenter.segment(&hsv, targets);
        match self.contour_extractor.extract_contours(&mask) {
            Ok(contours) => contours,
            Err(err) => {
                warn!(error = %err, "contour extraction failed, treating frame as empty");
                Vec::new()
            }
        }
    }

    /// Pull frames from `source` until it runs dry, handing every annotated
    /// frame to `on_frame`. Frames that fail to load are skipped.
    ///
    /// Returns the number of frames processed.
    pub fn run<S, F>(&self, source: &mut S, mut on_frame: F) -> u64
    where
        S: FrameSource + ?Sized,
        F: FnMut(RgbImage),
    {
        let mut processed = 0;
        loop {
            match source.next_frame() {
                Ok(Some(frame)) => {
                    on_frame(self.process_frame(frame));
                    processed += 1;
                }
                Ok(None) => break,
                Err(err) => warn!(error = %err, "skipping frame"),
            }
        }
        info!(processed, "frame source exhausted");
        processed
    }

    /// Get information about the pipeline configuration
    pub fn info(&self) -> String {
        format!(
            "Pipeline: selection '{}', {} annotators, targets {}",
            self.estimator.strategy_name(),
            self.annotators.len(),
            self.state.colors()
        )
    }
}
