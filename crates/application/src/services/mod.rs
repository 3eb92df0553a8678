pub mod domain_filter;
pub mod sinkhole;

pub use domain_filter::{filter_questions, is_allowed, FilterOutcome};
pub use sinkhole::{sinkhole_answer, synthesize_blocked_answers, SINKHOLE_TTL};
