//! Content classification and retrieval

mod classifier;
mod fetcher;

pub use classifier::{classify, ContentKind};
pub use fetcher::{encode_data_uri, ContentFetcher, FetchedContent, DEFAULT_IMAGE_CONTENT_TYPE};
