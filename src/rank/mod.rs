pub mod filter;
pub mod score;

pub use filter::rank_and_filter;
pub use score::{score_fields, score_string, MatchScore};
