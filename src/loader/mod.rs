//! Page loading
//!
//! [`PageLoader`] owns the [`PageState`] and turns a page number into one
//! listing request plus a concurrent fan-out of detail requests. Results come
//! back as [`LoadEvent`]s tagged with a generation so completions of a
//! superseded request can be dropped instead of overwriting newer content.

use crate::api::{ItemDetail, LoadFailure, LoadResult, PokeApi};
use futures::future::try_join_all;
use std::sync::Arc;
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

/// Number of Pokémon requested per page
pub const PAGE_SIZE: u32 = 20;

/// Navigation state shared with the renderer by value
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageState {
    pub current_page: u32,
    pub total_pages: u32,
}

impl Default for PageState {
    fn default() -> Self {
        Self {
            current_page: 1,
            total_pages: 1,
        }
    }
}

/// Listing offset of the first item on `page` (1-based)
pub fn offset_for(page: u32) -> u32 {
    page.saturating_sub(1).saturating_mul(PAGE_SIZE)
}

/// Page count for a listing total; never less than one
pub fn total_pages_for(total_count: u64) -> u32 {
    let pages = total_count.div_ceil(u64::from(PAGE_SIZE)).max(1);
    u32::try_from(pages).unwrap_or(u32::MAX)
}

/// Progress reported by a running page load
#[derive(Debug)]
pub enum LoadEvent {
    /// The listing arrived; `total_count` is the API-wide item count
    Listed { generation: u64, total_count: u64 },

    /// Every detail arrived, or the load failed
    Finished {
        generation: u64,
        page: u32,
        result: LoadResult<Vec<ItemDetail>>,
    },
}

impl LoadEvent {
    pub fn generation(&self) -> u64 {
        match self {
            LoadEvent::Listed { generation, .. } | LoadEvent::Finished { generation, .. } => {
                *generation
            }
        }
    }
}

/// What the renderer should do once a current load settles
#[derive(Debug)]
pub enum LoadOutcome {
    Ready { page: u32, items: Vec<ItemDetail> },
    Failed { page: u32, error: LoadFailure },
}

pub struct PageLoader {
    api: Arc<dyn PokeApi>,
    state: PageState,
    generation: u64,
    events: mpsc::UnboundedSender<LoadEvent>,
}

impl PageLoader {
    /// Create a loader reporting background loads on `events`
    pub fn new(api: Arc<dyn PokeApi>, events: mpsc::UnboundedSender<LoadEvent>) -> Self {
        Self {
            api,
            state: PageState::default(),
            generation: 0,
            events,
        }
    }

    pub fn state(&self) -> PageState {
        self.state
    }

    fn begin(&mut self, page: u32) -> u64 {
        self.state.current_page = page;
        self.generation += 1;
        debug!("Requesting page {} (generation {})", page, self.generation);
        self.generation
    }

    /// Start loading `page` in the background.
    ///
    /// `page` is not bounds-checked; the API decides what an out-of-range
    /// offset returns. Progress arrives on the event channel and must be fed
    /// back through [`PageLoader::apply`].
    pub fn request_page(&mut self, page: u32) -> u64 {
        let generation = self.begin(page);
        let api = Arc::clone(&self.api);
        let events = self.events.clone();

        tokio::spawn(async move {
            let result = fetch_items(api, page, generation, &events).await;
            // The receiver is gone only during shutdown
            let _ = events.send(LoadEvent::Finished {
                generation,
                page,
                result,
            });
        });

        generation
    }

    /// Load `page` and wait for it, applying state changes as they happen
    pub async fn load_page(&mut self, page: u32) -> LoadResult<Vec<ItemDetail>> {
        let generation = self.begin(page);
        let (events, mut progress) = mpsc::unbounded_channel();

        let result = fetch_items(Arc::clone(&self.api), page, generation, &events).await;
        drop(events);

        while let Ok(event) = progress.try_recv() {
            self.apply(event);
        }

        result
    }

    /// Fold a load event into the page state.
    ///
    /// Events from superseded requests are dropped. Failures leave the state
    /// exactly as the request left it; nothing is rolled back.
    pub fn apply(&mut self, event: LoadEvent) -> Option<LoadOutcome> {
        if event.generation() != self.generation {
            debug!(
                "Discarding stale load event (generation {}, latest {})",
                event.generation(),
                self.generation
            );
            return None;
        }

        match event {
            LoadEvent::Listed { total_count, .. } => {
                self.state.total_pages = total_pages_for(total_count);
                None
            }
            LoadEvent::Finished { page, result, .. } => Some(match result {
                Ok(items) => {
                    info!("Loaded page {} with {} Pokémon", page, items.len());
                    LoadOutcome::Ready { page, items }
                }
                Err(error) => LoadOutcome::Failed { page, error },
            }),
        }
    }
}

/// Listing request followed by an all-or-nothing join of the detail requests
async fn fetch_items(
    api: Arc<dyn PokeApi>,
    page: u32,
    generation: u64,
    events: &mpsc::UnboundedSender<LoadEvent>,
) -> LoadResult<Vec<ItemDetail>> {
    let listing = match api.fetch_listing(offset_for(page), PAGE_SIZE).await {
        Ok(listing) => listing,
        Err(e) => {
            warn!("Listing request for page {} failed: {}", page, e);
            return Err(e);
        }
    };

    let _ = events.send(LoadEvent::Listed {
        generation,
        total_count: listing.total_count,
    });

    let tasks = listing.items.into_iter().map(|item| {
        debug!("Fetching details for {}", item.name);
        let api = Arc::clone(&api);
        let handle = tokio::spawn(async move { api.fetch_detail(&item.detail_url).await });

        async move {
            handle
                .await
                .map_err(|e| LoadFailure::Task(e.to_string()))
                .and_then(|detail| detail)
        }
    });

    // Results keep listing order; the first failure fails the page
    try_join_all(tasks).await.map_err(|e| {
        warn!("Detail request for page {} failed: {}", page, e);
        e
    })
}
