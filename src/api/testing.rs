//! In-memory PokéAPI used by the loader and TUI tests

use super::types::ItemRef;
use super::{ItemDetail, ListingPage, LoadFailure, LoadResult, PokeApi};
use async_trait::async_trait;
use reqwest::StatusCode;
use std::collections::HashSet;
use std::sync::Mutex;

pub(crate) fn pokemon(id: u32, name: &str) -> ItemDetail {
    let stats = [("hp", 40 + id), ("attack", 50 + id), ("defense", 60 + id)]
        .into_iter()
        .map(|(stat, value)| (stat.to_string(), value))
        .collect();

    ItemDetail {
        id,
        name: name.to_string(),
        sprite_url: Some(format!("https://img.example/{id}.png")),
        types: vec!["grass".to_string(), "poison".to_string()],
        abilities: vec!["overgrow".to_string()],
        stats,
    }
}

pub(crate) fn detail_url(id: u32) -> String {
    format!("fake://pokemon/{id}/")
}

/// Serves `entries` in order as if they were the whole remote collection
pub(crate) struct FakeApi {
    entries: Vec<ItemDetail>,
    total_count: Option<u64>,
    listing_status: Option<StatusCode>,
    failing: HashSet<String>,
    listing_calls: Mutex<Vec<(u32, u32)>>,
    detail_calls: Mutex<Vec<String>>,
}

impl FakeApi {
    pub(crate) fn new(entries: Vec<ItemDetail>) -> Self {
        Self {
            entries,
            total_count: None,
            listing_status: None,
            failing: HashSet::new(),
            listing_calls: Mutex::new(Vec::new()),
            detail_calls: Mutex::new(Vec::new()),
        }
    }

    /// Generate `count` numbered Pokémon
    pub(crate) fn with_count(count: u32) -> Self {
        Self::new((1..=count).map(|id| pokemon(id, &format!("mon-{id}"))).collect())
    }

    /// Report a `count` that differs from the number of entries
    pub(crate) fn reporting_count(mut self, count: u64) -> Self {
        self.total_count = Some(count);
        self
    }

    pub(crate) fn listing_fails_with(mut self, status: StatusCode) -> Self {
        self.listing_status = Some(status);
        self
    }

    pub(crate) fn detail_fails(mut self, id: u32) -> Self {
        self.failing.insert(detail_url(id));
        self
    }

    pub(crate) fn listing_calls(&self) -> Vec<(u32, u32)> {
        self.listing_calls.lock().unwrap().clone()
    }

    pub(crate) fn detail_calls(&self) -> Vec<String> {
        self.detail_calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl PokeApi for FakeApi {
    async fn fetch_listing(&self, offset: u32, limit: u32) -> LoadResult<ListingPage> {
        self.listing_calls.lock().unwrap().push((offset, limit));

        if let Some(status) = self.listing_status {
            return Err(LoadFailure::status(status));
        }

        let items = self
            .entries
            .iter()
            .skip(offset as usize)
            .take(limit as usize)
            .map(|entry| ItemRef {
                name: entry.name.clone(),
                detail_url: detail_url(entry.id),
            })
            .collect();

        Ok(ListingPage {
            total_count: self.total_count.unwrap_or(self.entries.len() as u64),
            items,
        })
    }

    async fn fetch_detail(&self, url: &str) -> LoadResult<ItemDetail> {
        self.detail_calls.lock().unwrap().push(url.to_string());

        if self.failing.contains(url) {
            return Err(LoadFailure::status(StatusCode::INTERNAL_SERVER_ERROR));
        }

        self.entries
            .iter()
            .find(|entry| detail_url(entry.id) == url)
            .cloned()
            .ok_or_else(|| LoadFailure::status(StatusCode::NOT_FOUND))
    }
}
