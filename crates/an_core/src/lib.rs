pub mod error;
pub mod pipeline;
pub mod types;

pub use error::{Error, Result};
pub use pipeline::{ListParams, ListQuery, SortKey};
pub use types::{Article, ExtractedArticle, PagedResult};
