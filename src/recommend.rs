//! # Popular Dish Recommendations
//!
//! Recomputed from persisted order summaries, never maintained incrementally.
//! Each `<Kind> x<quantity>` token counts once regardless of quantity; the
//! most frequent kinds win, and ties keep the order in which kinds were first
//! seen.

use crate::model::FoodKind;
use regex::Regex;
use std::str::FromStr;
use std::sync::LazyLock;
use tracing::debug;

/// Upper bound on the number of dishes recommended.
pub const MAX_RECOMMENDATIONS: usize = 3;

static ORDER_TOKEN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(\w+)\s*x\s*(\d+)").expect("order token pattern is valid"));

/// Ranks the most frequently ordered kinds across `summaries`.
pub fn recommend<'a>(summaries: impl IntoIterator<Item = &'a str>) -> Vec<FoodKind> {
    // First-seen order is kept so the stable sort below breaks ties by it.
    let mut counts: Vec<(FoodKind, usize)> = Vec::new();

    for summary in summaries {
        for token in ORDER_TOKEN.captures_iter(summary) {
            let word = &token[1];
            let Ok(kind) = FoodKind::from_str(word) else {
                debug!(word, "Skipping token that is not on the menu");
                continue;
            };
            match counts.iter_mut().find(|(seen, _)| *seen == kind) {
                Some((_, count)) => *count += 1,
                None => counts.push((kind, 1)),
            }
        }
    }

    counts.sort_by(|a, b| b.1.cmp(&a.1));
    counts
        .into_iter()
        .take(MAX_RECOMMENDATIONS)
        .map(|(kind, _)| kind)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_counts_occurrences_not_quantities() {
        let history = ["Tea x9", "Coffee x1, Cake x1", "Coffee x1"];
        assert_eq!(
            recommend(history),
            vec![FoodKind::Coffee, FoodKind::Tea, FoodKind::Cake]
        );
    }

    #[test]
    fn test_at_most_three_with_first_seen_tie_break() {
        let history = [
            "Fries x1, Burger x2",
            "Sandwich x1, Cake x3",
            "Tea x1",
            "Burger x1",
        ];
        // Burger leads; Fries, Sandwich, Cake and Tea tie and keep first-seen order.
        assert_eq!(
            recommend(history),
            vec![FoodKind::Burger, FoodKind::Fries, FoodKind::Sandwich]
        );
    }

    #[test]
    fn test_tolerates_noise_and_unknown_dishes() {
        let history = ["", "Pizza x4, coffee  x 2", "nothing here"];
        assert_eq!(recommend(history), vec![FoodKind::Coffee]);
        assert!(recommend(std::iter::empty::<&str>()).is_empty());
    }

    #[test]
    fn test_recomputing_is_idempotent() {
        let history = vec!["Cake x1, Tea x2".to_string(), "Cake x2".to_string()];
        let first = recommend(history.iter().map(String::as_str));
        let second = recommend(history.iter().map(String::as_str));
        assert_eq!(first, second);
        assert_eq!(first, vec![FoodKind::Cake, FoodKind::Tea]);
    }
}
