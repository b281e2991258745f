pub mod error;
pub mod pipeline;
pub mod render;
pub mod schema;
pub mod store;

pub use error::{Error, Result};
pub use pipeline::{recommend, PipelineOptions, Recommendation};
pub use store::{LoadOptions, Query, RecordStore};
