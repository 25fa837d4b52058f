//! Debounced place search used to position the zone.
//!
//! Typing fires [`PlaceSearchResolver::query`] on every keystroke; the
//! geocoder is only called once the input has been quiet for the debounce
//! delay, and a response that comes back after a newer query was issued is
//! thrown away. Search is advisory: failures clear the candidate list and are
//! logged, nothing is surfaced to the user.

mod debounce;

use std::cell::{Cell, RefCell};

use async_trait::async_trait;
use common::model::place::GeocodedPlace;
use log::{debug, info, warn};

pub use debounce::{DebounceTicket, Debouncer, Timer};

use crate::config::SearchConfig;
use crate::error::SearchError;
use crate::Coordinate;

/// External geocoding service.
#[async_trait(?Send)]
pub trait Geocoder {
    async fn search(&self, text: &str, limit: usize) -> Result<Vec<GeocodedPlace>, SearchError>;
}

/// A place the administrator can pick as the zone center.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchCandidate {
    pub label: String,
    pub coordinate: Coordinate,
}

/// How a single `query` call ended.
#[derive(Debug, Clone, PartialEq)]
pub enum SearchOutcome {
    /// Input too short; candidates were cleared without a request.
    Cleared,
    /// The geocoder answered; these are the new candidates.
    Results(Vec<SearchCandidate>),
    /// The geocoder failed; candidates were cleared.
    Failed,
    /// A newer query took over, either during the debounce or while the
    /// request was in flight. Nothing was changed.
    Superseded,
}

/// Converts raw geocoder rows into candidates, skipping rows whose
/// coordinates do not parse or fall outside the valid ranges.
pub fn to_candidates(places: Vec<GeocodedPlace>, limit: usize) -> Vec<SearchCandidate> {
    places
        .into_iter()
        .filter_map(|place| {
            let latitude = place.lat.trim().parse::<f64>().ok();
            let longitude = place.lon.trim().parse::<f64>().ok();
            match latitude.zip(longitude).and_then(|(lat, lon)| Coordinate::checked(lat, lon)) {
                Some(coordinate) => Some(SearchCandidate {
                    label: place.display_name,
                    coordinate,
                }),
                None => {
                    warn!(
                        "skipping geocoder row {:?} with coordinates {:?}, {:?}",
                        place.display_name, place.lat, place.lon
                    );
                    None
                }
            }
        })
        .take(limit)
        .collect()
}

/// Counts a geocoder request for as long as it lives, including when the
/// query future is dropped mid-request.
struct InFlight<'a>(&'a Cell<usize>);

impl<'a> InFlight<'a> {
    fn enter(counter: &'a Cell<usize>) -> Self {
        counter.set(counter.get() + 1);
        Self(counter)
    }
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        self.0.set(self.0.get().saturating_sub(1));
    }
}

pub struct PlaceSearchResolver<G, T> {
    geocoder: G,
    timer: T,
    debouncer: Debouncer,
    config: SearchConfig,
    candidates: RefCell<Vec<SearchCandidate>>,
    in_flight: Cell<usize>,
}

impl<G: Geocoder, T: Timer> PlaceSearchResolver<G, T> {
    pub fn new(geocoder: G, timer: T, config: SearchConfig) -> Self {
        Self {
            geocoder,
            timer,
            debouncer: Debouncer::new(config.debounce()),
            config,
            candidates: RefCell::new(Vec::new()),
            in_flight: Cell::new(0),
        }
    }

    pub fn geocoder(&self) -> &G {
        &self.geocoder
    }

    /// Debounced search, meant to be called on every keystroke.
    pub async fn query(&self, text: &str) -> SearchOutcome {
        let text = text.trim();
        if self.too_short(text) {
            self.cancel();
            self.clear();
            return SearchOutcome::Cleared;
        }

        let ticket = self.debouncer.arm();
        if !self.debouncer.fire(&ticket, &self.timer).await {
            return SearchOutcome::Superseded;
        }
        self.run(text, &ticket).await
    }

    /// Searches right away (Enter key, search button). Still cancels any
    /// pending debounce and loses to later queries.
    pub async fn query_now(&self, text: &str) -> SearchOutcome {
        let text = text.trim();
        if self.too_short(text) {
            self.cancel();
            self.clear();
            return SearchOutcome::Cleared;
        }

        let ticket = self.debouncer.arm();
        self.run(text, &ticket).await
    }

    pub fn candidates(&self) -> Vec<SearchCandidate> {
        self.candidates.borrow().clone()
    }

    /// Picks a candidate and discards the list.
    pub fn select(&self, index: usize) -> Option<SearchCandidate> {
        self.cancel();
        let candidates = self.candidates.take();
        candidates.into_iter().nth(index)
    }

    /// Abandons any pending debounce and in-flight result.
    pub fn cancel(&self) {
        self.debouncer.cancel();
    }

    pub fn is_searching(&self) -> bool {
        self.in_flight.get() > 0
    }

    fn clear(&self) {
        self.candidates.borrow_mut().clear();
    }

    fn too_short(&self, text: &str) -> bool {
        text.chars().count() < self.config.min_query_chars
    }

    async fn run(&self, text: &str, ticket: &DebounceTicket) -> SearchOutcome {
        info!("searching places for {text:?}");
        let response = {
            let _in_flight = InFlight::enter(&self.in_flight);
            self.geocoder.search(text, self.config.max_results).await
        };

        if !self.debouncer.is_current(ticket) {
            debug!("discarding stale place results for {text:?}");
            return SearchOutcome::Superseded;
        }

        match response {
            Ok(places) => {
                let found = to_candidates(places, self.config.max_results);
                debug!("{} place candidates for {text:?}", found.len());
                *self.candidates.borrow_mut() = found.clone();
                SearchOutcome::Results(found)
            }
            Err(error) => {
                warn!("place search failed: {error}");
                self.clear();
                SearchOutcome::Failed
            }
        }
    }
}
