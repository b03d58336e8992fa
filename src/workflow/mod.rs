pub mod pipeline;

pub use pipeline::{McqOutput, McqPipeline};
