use std::sync::Arc;

use crate::{
    color::{ColorLabel, ColorSet},
    pipeline::VisionPipeline,
    state::PipelineState,
    types::FrameResult,
};

/// Control-loop handle onto a running pipeline.
///
/// A tracker can exist before any pipeline does. Until one is attached,
/// mutations are ignored and reads return empty values.
#[derive(Debug, Clone, Default)]
pub struct ColorTracker {
    state: Option<Arc<PipelineState>>,
}

impl ColorTracker {
    pub fn detached() -> Self {
        Self::default()
    }

    pub fn new(pipeline: &VisionPipeline) -> Self {
        Self::from_state(pipeline.state())
    }

    pub fn from_state(state: Arc<PipelineState>) -> Self {
        Self { state: Some(state) }
    }

    pub fn attach(&mut self, pipeline: &VisionPipeline) {
        self.state = Some(pipeline.state());
    }

    pub fn is_attached(&self) -> bool {
        self.state.is_some()
    }

    pub fn add_target_color(&self, label: ColorLabel) {
        if let Some(state) = &self.state {
            state.add_color(label);
        }
    }

    pub fn clear_target_colors(&self) {
        if let Some(state) = &self.state {
            state.clear_colors();
        }
    }

    pub fn get_target_colors(&self) -> ColorSet {
        self.state
            .as_ref()
            .map(|state| state.colors())
            .unwrap_or_default()
    }

    pub fn get_frame_result(&self) -> FrameResult {
        self.state
            .as_ref()
            .map(|state| state.result())
            .unwrap_or_default()
    }
}
