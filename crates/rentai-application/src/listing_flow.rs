//! Property listing and detail views over the search service.

use rentai_core::Result;
use rentai_core::presentation::{ListingCard, present_listing};
use rentai_core::property::{PropertyListing, SearchQuery, SearchResults};
use rentai_interaction::SearchApi;

use crate::query_cache::QueryCache;

#[derive(Debug, Clone, PartialEq)]
pub enum ListingView {
    /// Search is not configured; no listing UI at all.
    Hidden,
    Empty,
    Results(Vec<ListingCard>),
}

#[derive(Debug, Clone, PartialEq)]
pub enum DetailView {
    Hidden,
    /// No identifier selected yet.
    Idle,
    NotFound,
    Loaded(ListingCard),
}

pub struct ListingFlow {
    search: Option<SearchApi>,
    retries: u32,
    listings: QueryCache<SearchResults>,
    details: QueryCache<Option<PropertyListing>>,
}

impl ListingFlow {
    pub fn new(search: Option<SearchApi>, retries: u32) -> Self {
        Self {
            search,
            retries,
            listings: QueryCache::new(),
            details: QueryCache::new(),
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.search.is_some()
    }

    /// Runs (or reuses) the listing query.
    pub async fn browse(&self, query: &SearchQuery) -> Result<ListingView> {
        let Some(search) = &self.search else {
            return Ok(ListingView::Hidden);
        };

        let results = self
            .listings
            .get_or_fetch(&query.cache_key(), self.retries, || search.search(query))
            .await?;

        if results.is_empty() {
            return Ok(ListingView::Empty);
        }
        Ok(ListingView::Results(
            results.results.iter().map(present_listing).collect(),
        ))
    }

    /// Loads one property. A 404 or a `null` body both render as not found.
    pub async fn detail(&self, id: Option<&str>) -> Result<DetailView> {
        let Some(search) = &self.search else {
            return Ok(DetailView::Hidden);
        };
        let Some(id) = id.map(str::trim).filter(|id| !id.is_empty()) else {
            return Ok(DetailView::Idle);
        };

        let listing = match self
            .details
            .get_or_fetch(id, self.retries, || search.property(id))
            .await
        {
            Ok(listing) => listing,
            Err(e) if e.is_not_found() => return Ok(DetailView::NotFound),
            Err(e) => return Err(e),
        };

        Ok(match listing.as_ref() {
            Some(listing) => DetailView::Loaded(present_listing(listing)),
            None => DetailView::NotFound,
        })
    }
}
