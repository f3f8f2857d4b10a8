pub mod astronomy;
pub mod calendar;
pub mod etl;
pub mod extractor;
pub mod locations;
pub mod merge;
pub mod pipeline;
pub mod recommend;
pub mod seasonal;
pub mod vocabulary;

pub use crate::domain::model::{CatchRecord, Report, SourceOutcome};
pub use crate::domain::ports::{Fetcher, Pipeline, Storage};
pub use crate::utils::error::Result;
