use std::cmp::Reverse;

use crate::core::kv::KeyValue;
use crate::models::models::{FilterState, Post, SortMode};
use crate::store::PersistedStore;

impl<K: KeyValue> PersistedStore<K> {
    /// Updates only the fields that are given. Filter state is not persisted.
    pub fn set_filter(&mut self, search_text: Option<&str>, sort_mode: Option<SortMode>) {
        if let Some(search) = search_text {
            self.filter.search_text = search.to_string();
        }
        if let Some(sort) = sort_mode {
            self.filter.sort_mode = sort;
        }
    }

    pub fn clear_filters(&mut self) {
        self.filter = FilterState::default();
    }

    pub fn filter(&self) -> &FilterState {
        &self.filter
    }

    /// Posts matching the search text, ordered by the sort mode. Ties keep
    /// storage order.
    pub fn list_visible_posts(&self) -> Vec<Post> {
        let mut visible: Vec<Post> = self
            .posts
            .iter()
            .filter(|p| self.filter.matches(p))
            .cloned()
            .collect();

        match self.filter.sort_mode {
            SortMode::Latest => visible.sort_by_key(|p| Reverse(p.created_at)),
            SortMode::Oldest => visible.sort_by_key(|p| p.created_at),
            SortMode::MostLiked => visible.sort_by_key(|p| Reverse(p.like_count())),
        }
        visible
    }
}
