// ─── Score Tiers ────────────────────────────────────────────────────────────
//
// Exact > case-insensitive > containment > subsequence. Containment decays
// with match offset but never drops below its floor, so a substring hit
// always outranks a scattered one.

pub const SCORE_EXACT: i32 = 1000;
pub const SCORE_CASE_INSENSITIVE: i32 = 900;
pub const SCORE_CONTAINS_BASE: i32 = 800;
pub const SCORE_CONTAINS_FLOOR: i32 = 700;
pub const SCORE_FUZZY_BASE: i32 = 500;
pub const SCORE_FUZZY_FLOOR: i32 = 100;

const OFFSET_PENALTY: i32 = 10;
const GAP_PENALTY: i32 = 5;
const LENGTH_PENALTY: i32 = 2;
const CONSECUTIVE_BONUS: i32 = 20;

/// Outcome of scoring a single query/target pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MatchScore {
    pub score: i32,
    pub matches: bool,
}

impl MatchScore {
    pub const MISS: Self = Self {
        score: 0,
        matches: false,
    };

    const fn hit(score: i32) -> Self {
        Self {
            score,
            matches: true,
        }
    }
}

/// Score how well `query` matches `target`. Higher is better.
///
/// An empty query matches everything at score 0 (no-op filter). An empty
/// target never matches a non-empty query. Offsets and gaps are counted in
/// characters so multi-byte text doesn't skew the penalties.
pub fn score_string(query: &str, target: &str) -> MatchScore {
    if query.is_empty() {
        return MatchScore::hit(0);
    }
    if target.is_empty() {
        return MatchScore::MISS;
    }
    if query == target {
        return MatchScore::hit(SCORE_EXACT);
    }

    let query_lower = query.to_lowercase();
    let target_lower = target.to_lowercase();
    if query_lower == target_lower {
        return MatchScore::hit(SCORE_CASE_INSENSITIVE);
    }

    if let Some(byte_offset) = target_lower.find(&query_lower) {
        let offset = target_lower[..byte_offset].chars().count() as i32;
        let score = (SCORE_CONTAINS_BASE - OFFSET_PENALTY * offset).max(SCORE_CONTAINS_FLOOR);
        return MatchScore::hit(score);
    }

    subsequence_score(&query_lower, &target_lower)
}

/// Best score across several candidate fields; matches if any field does.
pub fn score_fields(query: &str, fields: &[String]) -> MatchScore {
    let mut best = MatchScore::MISS;
    for field in fields {
        let result = score_string(query, field);
        if result.matches && (!best.matches || result.score > best.score) {
            best = result;
        }
    }
    best
}

/// In-order subsequence walk over `target`, greedy leftmost assignment.
/// Every query character must be found in sequence or the whole match fails.
fn subsequence_score(query: &str, target: &str) -> MatchScore {
    let mut positions: Vec<usize> = Vec::new();
    let mut wanted = query.chars().peekable();

    for (pos, ch) in target.chars().enumerate() {
        match wanted.peek() {
            Some(&w) if w == ch => {
                positions.push(pos);
                wanted.next();
            }
            Some(_) => {}
            None => break,
        }
    }
    if wanted.peek().is_some() {
        return MatchScore::MISS;
    }

    let mut gap = 0i32;
    let mut consecutive = 0i32;
    for pair in positions.windows(2) {
        let dist = (pair[1] - pair[0] - 1) as i32;
        gap += dist;
        if dist == 0 {
            consecutive += 1;
        }
    }

    let target_len = target.chars().count() as i32;
    let matched_len = positions.len() as i32;
    let score = SCORE_FUZZY_BASE - GAP_PENALTY * gap - LENGTH_PENALTY * (target_len - matched_len)
        + CONSECUTIVE_BONUS * consecutive;
    MatchScore::hit(score.max(SCORE_FUZZY_FLOOR))
}
