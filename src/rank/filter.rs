use super::score::score_fields;

/// Rank `items` against a whitespace-separated query and return the best
/// `limit` of them, best first.
///
/// A blank query is the no-search default view: the first `limit` items in
/// input order. Otherwise every term must match at least one of the item's
/// fields (AND across terms, OR across fields per term); the item's score is
/// the mean of each term's best field score, so multi-term queries don't
/// out-rank single-term ones by accumulation. The sort is stable, ties keep
/// input order.
pub fn rank_and_filter<T, F>(items: &[T], query: &str, fields: F, limit: usize) -> Vec<T>
where
    T: Clone,
    F: Fn(&T) -> Vec<String>,
{
    let trimmed = query.trim();
    if trimmed.is_empty() {
        return items.iter().take(limit).cloned().collect();
    }

    let terms: Vec<&str> = trimmed.split_whitespace().collect();

    let mut scored: Vec<(f64, &T)> = Vec::new();
    'items: for item in items {
        let candidates = fields(item);
        let mut total = 0i64;
        for term in &terms {
            let best = score_fields(term, &candidates);
            if !best.matches {
                continue 'items;
            }
            total += i64::from(best.score);
        }
        scored.push((total as f64 / terms.len() as f64, item));
    }

    scored.sort_by(|a, b| b.0.partial_cmp(&a.0).unwrap_or(std::cmp::Ordering::Equal));
    scored
        .into_iter()
        .take(limit)
        .map(|(_, item)| item.clone())
        .collect()
}
