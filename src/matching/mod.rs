//! Transaction-to-bill matching and recurring-charge detection.

pub mod matcher;
pub mod normalize;
pub mod patterns;

pub use matcher::{first_qualifying_match, match_transaction, MatchCriteria, MatchResult};
pub use normalize::{name_similarity, names_match, normalize_merchant, token_jaccard};
pub use patterns::{
    category_for_merchant, detect_candidates, is_duplicate_of, RecurringCandidate, SuggestedKind,
};
