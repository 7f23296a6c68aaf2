//! Case-insensitive substring filter over the in-memory memo list.
//!
//! # Responsibility
//! - Derive the visible subsequence for a search box value.
//!
//! # Invariants
//! - Pure derivation: the input list is never mutated or reordered.
//! - A blank (empty or whitespace-only) search returns the whole list.

use crate::model::memo::Memo;

/// Returns the ordered subsequence of `memos` whose title or content
/// contains `search_text` as a case-insensitive substring.
///
/// Blank search text selects everything. Relative order is always preserved;
/// recompute whenever the list or the search text changes.
pub fn filter_memos<'a>(memos: &'a [Memo], search_text: &str) -> Vec<&'a Memo> {
    if search_text.trim().is_empty() {
        return memos.iter().collect();
    }

    let needle = search_text.to_lowercase();
    memos
        .iter()
        .filter(|memo| {
            memo.title.to_lowercase().contains(&needle)
                || memo.content.to_lowercase().contains(&needle)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::filter_memos;
    use crate::model::memo::{Memo, MemoId};
    use uuid::Uuid;

    fn memo(id_suffix: u8, title: &str, content: &str) -> Memo {
        let id: MemoId = Uuid::from_u128(u128::from(id_suffix));
        Memo {
            id,
            title: title.to_string(),
            content: content.to_string(),
            created_at: 1_000,
            updated_at: 1_000,
        }
    }

    #[test]
    fn blank_search_returns_everything_in_order() {
        let memos = vec![memo(1, "Trip plan", ""), memo(2, "Recipe", "")];

        for blank in ["", "   ", "\t\n"] {
            let hits = filter_memos(&memos, blank);
            assert_eq!(hits.len(), 2);
            assert_eq!(hits[0].id, memos[0].id);
            assert_eq!(hits[1].id, memos[1].id);
        }
    }

    #[test]
    fn search_is_case_insensitive_over_title_and_content() {
        let memos = vec![
            memo(1, "Trip plan", "pack passport"),
            memo(2, "Recipe", "citrus TRIP cake"),
            memo(3, "Groceries", "milk, eggs"),
        ];

        let hits = filter_memos(&memos, "trip");
        assert_eq!(hits.len(), 2);
        assert_eq!(hits[0].id, memos[0].id);
        assert_eq!(hits[1].id, memos[1].id);
    }

    #[test]
    fn no_match_yields_empty_view() {
        let memos = vec![memo(1, "Trip plan", "")];
        assert!(filter_memos(&memos, "recipe").is_empty());
    }

    #[test]
    fn relative_order_is_preserved_for_sparse_matches() {
        let memos = vec![
            memo(1, "alpha", "x"),
            memo(2, "beta", "x"),
            memo(3, "alphabet", "y"),
        ];

        let hits = filter_memos(&memos, "alpha");
        let ids: Vec<_> = hits.iter().map(|m| m.id).collect();
        assert_eq!(ids, vec![memos[0].id, memos[2].id]);
    }
}
