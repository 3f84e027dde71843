//! Remote PokéAPI access
//!
//! The loader only sees the [`PokeApi`] trait; [`HttpPokeApi`] is the
//! production implementation and tests swap in an in-memory fake.

mod client;
mod errors;
mod types;

#[cfg(test)]
pub(crate) mod testing;

pub use client::HttpPokeApi;
pub use errors::{LoadFailure, LoadResult};
pub use types::{ItemDetail, ListingPage};

use async_trait::async_trait;

/// Default listing endpoint
pub const DEFAULT_BASE_URL: &str = "https://pokeapi.co/api/v2/pokemon";

/// The two requests a page load needs
#[async_trait]
pub trait PokeApi: Send + Sync {
    /// `GET {base}?offset={offset}&limit={limit}`
    async fn fetch_listing(&self, offset: u32, limit: u32) -> LoadResult<ListingPage>;

    /// `GET {detail_url}` for one listed item
    async fn fetch_detail(&self, detail_url: &str) -> LoadResult<ItemDetail>;
}
