pub mod annotator;
pub mod report;

pub use annotator::AnnotationPipeline;
pub use report::summary;
