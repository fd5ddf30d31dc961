//! Release analysis: splitting walked history into release groups and
//! describing each group

pub mod collator;
pub mod segmenter;

pub use collator::HeaderCollator;
pub use segmenter::{Segmentation, TreeSegmenter};
