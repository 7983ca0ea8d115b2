//! # Color Tracking Pipeline
//!
//! Per-frame color segmentation for a robot's camera. Each frame is converted
//! to HSV, masked against the active color ranges, split into contours, and
//! reduced to a target count and position that a control loop can poll at its
//! own pace.
//!
//! ## Core Features
//!
//! - **Fixed color table**: red, yellow, green, blue and magenta, with hue
//!   wraparound for ranges crossing hue 0
//! - **Trait-based stages**: swap the converter, contour extractor, selection
//!   strategy or annotators
//! - **Shared state**: target colors and the latest result are safe to use from
//!   the frame thread and any number of control threads
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use color_pipeline::{ColorLabel, ColorTracker, VisionPipeline};
//!
//! let pipeline = VisionPipeline::builder().build();
//! let tracker = ColorTracker::new(&pipeline);
//! tracker.add_target_color(ColorLabel::Green);
//!
//! let frame = image::open("frame.png")?.to_rgb8();
//! let annotated = pipeline.process_frame(frame);
//! annotated.save("annotated.png")?;
//!
//! let result = tracker.get_frame_result();
//! println!("{} targets, first at {:?}", result.count, result.position);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! ## Custom Pipeline
//!
//! ```rust,no_run
//! use color_pipeline::{VisionPipeline, ColorLabel, algorithms::*};
//!
//! let pipeline = VisionPipeline::builder()
//!     .with_colors([ColorLabel::Blue, ColorLabel::Magenta])
//!     .set_selection_strategy(LargestArea)
//!     .without_annotation()
//!     .build();
//! ```

// Core modules
pub mod error;
pub mod types;
pub mod color;
pub mod traits;
pub mod algorithms;
pub mod state;
pub mod pipeline;
pub mod source;
pub mod tracker;
pub mod config;

// Re-exports for convenience
pub use error::{PipelineError, Result};
pub use types::{BoundingBox, Contour, FrameResult, HsvImage, Position};
pub use color::{ColorLabel, ColorRange, ColorSet, HsvBound, range_of};
pub use traits::*;
pub use algorithms::*;
pub use state::PipelineState;
pub use pipeline::{VisionPipeline, builder::PipelineBuilder};
pub use source::{FrameSource, ImageSequence};
pub use tracker::ColorTracker;
pub use config::{AnnotationConfig, TrackerConfig};

/// Pipeline with the stock converter, imageproc contours and first-contour selection
pub fn default_pipeline() -> VisionPipeline {
    PipelineBuilder::new().build()
}
