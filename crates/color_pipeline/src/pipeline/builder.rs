use std::sync::Arc;

use image::Rgb;
use crate::{
    algorithms::{
        BoundingBoxAnnotator,
        FirstContour,
        ImageprocContourExtractor,
        PositionEstimator,
        RgbToHsvConverter,
        SelectionPolicy,
    },
    color::{ColorLabel, ColorSet},
    config::TrackerConfig,
    pipeline::VisionPipeline,
    state::PipelineState,
    traits::{ColorSpaceConverter, ContourExtractor, FrameAnnotator, SelectionStrategy},
};

/// Builder for creating vision pipelines with a fluent API
pub struct PipelineBuilder {
    converter: Option<Box<dyn ColorSpaceConverter>>,
    contour_extractor: Option<Box<dyn ContourExtractor>>,
    selection: Option<Box<dyn SelectionStrategy>>,
    annotators: Vec<Box<dyn FrameAnnotator>>,
    default_annotation: bool,
    colors: ColorSet,
    state: Option<Arc<PipelineState>>,
}

impl PipelineBuilder {
    /// Create a new pipeline builder
    pub fn new() -> Self {
        Self {
            converter: None,
            contour_extractor: None,
            selection: None,
            annotators: Vec::new(),
            default_annotation: true,
            colors: ColorSet::empty(),
            state: None,
        }
    }

    /// Apply a loaded configuration
    pub fn from_config(config: &TrackerConfig) -> Self {
        let builder = Self::new()
            .with_colors(config.target_colors.iter().copied())
            .set_selection(config.selection);

        if !config.annotation.enabled {
            return builder.without_annotation();
        }

        let [r, g, b] = config.annotation.color;
        builder
            .without_annotation()
            .add_annotator(BoundingBoxAnnotator {
                color: Rgb([r, g, b]),
                thickness: config.annotation.thickness,
            })
    }

    /// Set the color-space converter (replaces any existing one)
    pub fn set_converter<C>(mut self, converter: C) -> Self
    where
        C: ColorSpaceConverter + 'static,
    {
        self.converter = Some(Box::new(converter));
        self
    }

    /// Set the contour extractor (replaces any existing one)
    pub fn set_contour_extractor<E>(mut self, extractor: E) -> Self
    where
        E: ContourExtractor + 'static,
    {
        self.contour_extractor = Some(Box::new(extractor));
        self
    }

    /// Set the contour selection strategy (replaces any existing one)
    pub fn set_selection_strategy<S>(mut self, strategy: S) -> Self
    where
        S: SelectionStrategy + 'static,
    {
        self.selection = Some(Box::new(strategy));
        self
    }

    /// Set the contour selection strategy by name
    pub fn set_selection(mut self, policy: SelectionPolicy) -> Self {
        self.selection = Some(policy.strategy());
        self
    }

    /// Add an annotator; annotators run in insertion order
    pub fn add_annotator<A>(mut self, annotator: A) -> Self
    where
        A: FrameAnnotator + 'static,
    {
        self.annotators.push(Box::new(annotator));
        self
    }

    /// Skip the default green bounding boxes
    pub fn without_annotation(mut self) -> Self {
        self.default_annotation = false;
        self
    }

    /// Colors enabled from the first frame
    pub fn with_colors<I>(mut self, colors: I) -> Self
    where
        I: IntoIterator<Item = ColorLabel>,
    {
        self.colors.extend(colors);
        self
    }

    /// Share an existing state instead of creating a fresh one
    pub fn with_state(mut self, state: Arc<PipelineState>) -> Self {
        self.state = Some(state);
        self
    }

    /// Build the pipeline with default components if not specified
    pub fn build(self) -> VisionPipeline {
        let converter = self.converter
            .unwrap_or_else(|| Box::new(RgbToHsvConverter));

        let contour_extractor = self.contour_extractor
            .unwrap_or_else(|| Box::new(ImageprocContourExtractor));

        let estimator = PositionEstimator::new(
            self.selection.unwrap_or_else(|| Box::new(FirstContour)),
        );

        let mut annotators = self.annotators;
        if self.default_annotation {
            annotators.insert(0, Box::new(BoundingBoxAnnotator::default()));
        }

        let state = match self.state {
            Some(state) => {
                for label in self.colors.iter() {
                    state.add_color(label);
                }
                state
            }
            None => Arc::new(PipelineState::with_colors(self.colors)),
        };

        VisionPipeline::new(converter, contour_extractor, estimator, annotators, state)
    }
}

impl Default for PipelineBuilder {
    fn default() -> Self {
        Self::new()
    }
}
