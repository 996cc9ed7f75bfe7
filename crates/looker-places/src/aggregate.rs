//! Multi-keyword / fixed-type search and aggregation.
//!
//! One [`Aggregator::search`] call covers a single (point, category) pair:
//! it runs the nearby-search queries for the category, follows continuation
//! tokens, deduplicates candidates by place ID, and enriches each survivor
//! with a detail lookup. Upstream failures are logged and skipped so one bad
//! request never aborts a run.

use std::collections::HashSet;
use std::time::Duration;

use looker_core::{PacingConfig, PlaceRecord, SearchQuery};

use crate::api::PlacesApi;
use crate::types::{NearbyRequest, RawHit};

/// Continuation pages followed after the first page of each query.
pub const MAX_EXTRA_PAGES: usize = 2;

/// Counters for one [`Aggregator::search`] call.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct SearchStats {
    /// Nearby-search queries issued, not counting continuation pages.
    pub queries: usize,
    /// Pages fetched successfully, continuation pages included.
    pub pages: usize,
    /// Candidates returned across all pages, before dedup.
    pub candidates: usize,
    /// Candidates left after dedup.
    pub unique: usize,
    pub failed_queries: usize,
    pub failed_details: usize,
    pub records: usize,
}

/// Runs category searches against a [`PlacesApi`] handle.
pub struct Aggregator<'a, A: PlacesApi + ?Sized> {
    api: &'a A,
    pacing: PacingConfig,
}

impl<'a, A: PlacesApi + ?Sized> Aggregator<'a, A> {
    #[must_use]
    pub fn new(api: &'a A, pacing: PacingConfig) -> Self {
        Self { api, pacing }
    }

    /// Search one point for one category and return enriched, deduplicated
    /// records.
    ///
    /// Order is query order, then page order, then within-page order.
    /// Deduplication covers this call only; merging across calls is
    /// [`dedup_by_place_id`]'s job.
    pub async fn search(&self, query: &SearchQuery) -> Vec<PlaceRecord> {
        self.search_with_stats(query).await.0
    }

    /// Same as [`Aggregator::search`], also returning the call's counters.
    pub async fn search_with_stats(
        &self,
        query: &SearchQuery,
    ) -> (Vec<PlaceRecord>, SearchStats) {
        let mut stats = SearchStats::default();
        let mut candidates: Vec<RawHit> = Vec::new();

        if query.fixed_type.is_some() {
            // A type filter is precise enough that one query suffices.
            let keyword = query.keywords.first().map(String::as_str);
            candidates.extend(self.run_query(query, keyword, &mut stats).await);
        } else {
            for keyword in &query.keywords {
                let hits = self
                    .run_query(query, Some(keyword.as_str()), &mut stats)
                    .await;
                candidates.extend(hits);
                pause(self.pacing.keyword_delay()).await;
            }
        }
        stats.candidates = candidates.len();

        let mut seen: HashSet<String> = HashSet::new();
        let unique: Vec<RawHit> = candidates
            .into_iter()
            .filter(|hit| seen.insert(hit.place_id.clone()))
            .collect();
        stats.unique = unique.len();

        let search_origin = query.search_origin();
        let mut records = Vec::with_capacity(unique.len());
        for hit in unique {
            match self.api.place_details(&hit.place_id).await {
                Ok(details) => {
                    records.push(PlaceRecord {
                        place_id: hit.place_id,
                        name: details.name,
                        address: details.address,
                        phone: details.phone,
                        website: details.website,
                        latitude: details.latitude,
                        longitude: details.longitude,
                        rating: details.rating,
                        rating_count: details.rating_count,
                        category: query.category_label.clone(),
                        search_origin: search_origin.clone(),
                    });
                    pause(self.pacing.detail_delay()).await;
                }
                Err(e) => {
                    stats.failed_details += 1;
                    tracing::warn!(
                        place_id = %hit.place_id,
                        name = hit.name.as_deref().unwrap_or(""),
                        error = %e,
                        "place details fetch failed; skipping place"
                    );
                }
            }
        }
        stats.records = records.len();

        tracing::info!(
            category = %query.category_label,
            origin = %search_origin,
            radius = query.radius,
            queries = stats.queries,
            pages = stats.pages,
            candidates = stats.candidates,
            unique = stats.unique,
            failed_queries = stats.failed_queries,
            failed_details = stats.failed_details,
            records = stats.records,
            "category search complete"
        );

        (records, stats)
    }

    /// Issue one nearby-search query and follow up to [`MAX_EXTRA_PAGES`]
    /// continuation tokens.
    ///
    /// A failed first page yields no candidates. A failed continuation page
    /// stops pagination but keeps what was already fetched.
    async fn run_query(
        &self,
        query: &SearchQuery,
        keyword: Option<&str>,
        stats: &mut SearchStats,
    ) -> Vec<RawHit> {
        stats.queries += 1;
        let request = NearbyRequest::Query {
            location: query.point,
            radius: query.radius,
            place_type: query.fixed_type.clone(),
            keyword: keyword.map(str::to_owned),
        };

        let first = match self.api.nearby_search(&request).await {
            Ok(page) => page,
            Err(e) => {
                stats.failed_queries += 1;
                tracing::warn!(
                    category = %query.category_label,
                    keyword = keyword.unwrap_or(""),
                    error = %e,
                    "nearby search failed; treating as no results"
                );
                return Vec::new();
            }
        };
        stats.pages += 1;

        let mut hits = first.hits;
        let mut token = first.next_page_token;

        for _ in 0..MAX_EXTRA_PAGES {
            let Some(next) = token.take() else {
                break;
            };
            // Tokens are rejected if used too soon after they are issued.
            pause(self.pacing.page_token_delay()).await;
            match self
                .api
                .nearby_search(&NearbyRequest::Page { token: next })
                .await
            {
                Ok(page) => {
                    stats.pages += 1;
                    hits.extend(page.hits);
                    token = page.next_page_token;
                }
                Err(e) => {
                    tracing::warn!(
                        category = %query.category_label,
                        keyword = keyword.unwrap_or(""),
                        error = %e,
                        "pagination request failed; keeping earlier pages"
                    );
                    break;
                }
            }
        }

        hits
    }
}

/// Merge records from several searches, keeping the first record seen for
/// each place ID. Relative order of the survivors is preserved.
#[must_use]
pub fn dedup_by_place_id(records: Vec<PlaceRecord>) -> Vec<PlaceRecord> {
    let mut seen = HashSet::new();
    records
        .into_iter()
        .filter(|r| seen.insert(r.place_id.clone()))
        .collect()
}

async fn pause(duration: Duration) {
    if !duration.is_zero() {
        tokio::time::sleep(duration).await;
    }
}

#[cfg(test)]
#[path = "aggregate_test.rs"]
mod tests;
