//! State shared between the frame producer and control-loop consumers.
//!
//! Both values are small `Copy` types behind their own `parking_lot::RwLock`.
//! Every critical section is a single load or store, so neither side can hold
//! the other up for longer than a copy.

use std::sync::atomic::{AtomicU64, Ordering};

use parking_lot::RwLock;
use tracing::debug;

use crate::{
    color::{ColorLabel, ColorSet},
    types::FrameResult,
};

#[derive(Debug, Default)]
pub struct PipelineState {
    targets: RwLock<ColorSet>,
    latest: RwLock<FrameResult>,
    frames_processed: AtomicU64,
}

impl PipelineState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_colors(colors: ColorSet) -> Self {
        Self {
            targets: RwLock::new(colors),
            ..Self::default()
        }
    }

    /// Enables `label`. Adding a color twice is a no-op.
    pub fn add_color(&self, label: ColorLabel) {
        if self.targets.write().insert(label) {
            debug!(color = %label, "target color added");
        }
    }

    pub fn clear_colors(&self) {
        self.targets.write().clear();
        debug!("target colors cleared");
    }

    /// Point-in-time copy of the active colors.
    pub fn colors(&self) -> ColorSet {
        *self.targets.read()
    }

    /// Latest published result.
    pub fn result(&self) -> FrameResult {
        *self.latest.read()
    }

    /// Replaces the published result as one unit.
    pub fn publish(&self, result: FrameResult) {
        *self.latest.write() = result;
    }

    pub fn frames_processed(&self) -> u64 {
        self.frames_processed.load(Ordering::Acquire)
    }

    pub(crate) fn record_frame(&self) {
        self.frames_processed.fetch_add(1, Ordering::AcqRel);
    }
}
