pub mod conversion;
pub mod segmentation;
pub mod extraction;
pub mod selection;
pub mod estimation;
pub mod annotation;

pub use conversion::*;
pub use segmentation::*;
pub use extraction::*;
pub use selection::*;
pub use estimation::*;
pub use annotation::*;
