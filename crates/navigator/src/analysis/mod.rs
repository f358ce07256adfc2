//! Pure transformations over Hansard results, plus the topic fan-out search
//! that feeds them

pub mod debate;
pub mod speakers;
pub mod topic;

pub use debate::{filter_items, group_by_date, sorted_dates_descending, UNKNOWN_DATE};
pub use speakers::{aggregate, extract_speakers, DebateSpeaker};
pub use topic::{analyze_topic, analyze_topic_until, TOPIC_SEARCH_TAKE};
