//! Aggregate reporting over saved collections

mod aggregate;
mod ranker;

pub use aggregate::{
    summary_processor, virtual_url, AggregateSummaryBuilder, MAX_PROMPT_ENTRIES,
    NOTHING_FOUND_MESSAGE,
};
pub use ranker::{count_tags, rank_tags, TagCount, TOP_TAG_LIMIT};
