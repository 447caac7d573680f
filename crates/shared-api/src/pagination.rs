//! # List Pagination
//!
//! Slices an in-memory list into pages addressed by a start index. The page
//! token handed back to callers is the decimal index of the next element.

use serde::{Deserialize, Serialize};

/// One page of results.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListPage<T> {
    pub results_on_page: Vec<T>,
    pub next_page_token: Option<String>,
}

impl<T> ListPage<T> {
    pub fn new(results_on_page: Vec<T>, next_page_token: Option<String>) -> Self {
        Self {
            results_on_page,
            next_page_token,
        }
    }

    pub fn empty() -> Self {
        Self::new(Vec::new(), None)
    }

    /// Convert the results while keeping the token.
    pub fn map<U>(self, f: impl FnMut(T) -> U) -> ListPage<U> {
        ListPage {
            results_on_page: self.results_on_page.into_iter().map(f).collect(),
            next_page_token: self.next_page_token,
        }
    }
}

impl<T> Default for ListPage<T> {
    fn default() -> Self {
        Self::empty()
    }
}

/// Stateless paginator over a full result list.
pub struct ListPaginator;

impl ListPaginator {
    /// Return the page starting at `page_token` holding at most `limit` items.
    ///
    /// An empty list or a token outside `[0, len)` yields an empty page with
    /// no next token. Without a limit the page runs to the end of the list.
    pub fn get_single_page<T: Clone>(
        all: &[T],
        limit: Option<usize>,
        page_token: Option<usize>,
    ) -> ListPage<T> {
        let len = all.len();
        let start = page_token.unwrap_or(0);
        if len == 0 || start >= len {
            return ListPage::empty();
        }

        let end = match limit {
            Some(limit) => start.saturating_add(limit).min(len),
            None => len,
        };
        let next_page_token = (end < len).then(|| end.to_string());

        ListPage::new(all[start..end].to_vec(), next_page_token)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_empty_list() {
        let all: Vec<u32> = vec![];
        assert_eq!(ListPaginator::get_single_page(&all, Some(2), None), ListPage::empty());
    }

    #[test]
    fn test_first_page_without_token() {
        let all = vec![1, 2, 3, 4];
        let page = ListPaginator::get_single_page(&all, Some(3), None);
        assert_eq!(page.results_on_page, vec![1, 2, 3]);
        assert_eq!(page.next_page_token.as_deref(), Some("3"));
    }

    #[test]
    fn test_middle_then_last_page() {
        let all = vec![1, 2, 3, 4];

        let page = ListPaginator::get_single_page(&all, Some(2), Some(1));
        assert_eq!(page.results_on_page, vec![2, 3]);
        assert_eq!(page.next_page_token.as_deref(), Some("3"));

        let page = ListPaginator::get_single_page(&all, Some(2), Some(3));
        assert_eq!(page.results_on_page, vec![4]);
        assert!(page.next_page_token.is_none());
    }

    #[test]
    fn test_no_limit_returns_rest() {
        let all = vec![1, 2, 3, 4];
        let page = ListPaginator::get_single_page(&all, None, Some(1));
        assert_eq!(page.results_on_page, vec![2, 3, 4]);
        assert!(page.next_page_token.is_none());
    }

    #[test]
    fn test_token_out_of_bounds() {
        let all = vec![1, 2, 3, 4];
        assert_eq!(ListPaginator::get_single_page(&all, Some(2), Some(4)), ListPage::empty());
        assert_eq!(ListPaginator::get_single_page(&all, None, Some(99)), ListPage::empty());
    }

    #[test]
    fn test_map_keeps_token() {
        let page = ListPage::new(vec![1, 2], Some("2".to_string())).map(|n| n * 10);
        assert_eq!(page.results_on_page, vec![10, 20]);
        assert_eq!(page.next_page_token.as_deref(), Some("2"));
    }

    proptest! {
        #[test]
        fn prop_following_tokens_visits_every_element_once(
            all in proptest::collection::vec(any::<u16>(), 0..64),
            limit in 1usize..10,
        ) {
            let mut collected = Vec::new();
            let mut token: Option<usize> = None;
            loop {
                let page = ListPaginator::get_single_page(&all, Some(limit), token);
                prop_assert!(page.results_on_page.len() <= limit);
                collected.extend(page.results_on_page);
                match page.next_page_token {
                    Some(next) => token = Some(next.parse().unwrap()),
                    None => break,
                }
            }
            prop_assert_eq!(collected, all);
        }
    }
}
