//! Continuous device location as a cancellable stream.
//!
//! A [`LocationSource`] wraps the platform's position watch. The tracker
//! turns it into a [`LocationStream`] of samples plus a [`Subscription`]
//! handle; dropping the handle clears the platform watch, so tearing down
//! the view that owns it is enough to stop the GPS.

use std::cell::Cell;
use std::pin::Pin;
use std::rc::Rc;
use std::task::{Context, Poll};

use futures::channel::mpsc;
use futures::{Stream, StreamExt};
use log::{debug, info, warn};

use crate::error::LocationError;
use crate::Coordinate;

/// Identifier the platform hands back for an active watch.
pub type WatchId = i32;

/// One item of the location stream.
pub type LocationEvent = Result<Coordinate, LocationError>;

/// Write end given to a [`LocationSource`]; the source pushes every fix and
/// failure through it, in the order the platform reports them.
#[derive(Debug, Clone)]
pub struct LocationSink {
    tx: mpsc::UnboundedSender<LocationEvent>,
}

impl LocationSink {
    /// Forwards a raw fix. Fixes outside the valid coordinate ranges are
    /// dropped. Returns `false` once the receiving side is gone.
    pub fn sample(&self, latitude: f64, longitude: f64) -> bool {
        match Coordinate::checked(latitude, longitude) {
            Some(coordinate) => {
                debug!("location sample {latitude:.6}, {longitude:.6}");
                self.tx.unbounded_send(Ok(coordinate)).is_ok()
            }
            None => {
                warn!("dropping invalid location sample {latitude}, {longitude}");
                !self.tx.is_closed()
            }
        }
    }

    pub fn fail(&self, error: LocationError) -> bool {
        warn!("location watch reported: {error}");
        self.tx.unbounded_send(Err(error)).is_ok()
    }

    pub fn is_closed(&self) -> bool {
        self.tx.is_closed()
    }
}

/// Platform capability that pushes position fixes until its watch is cleared.
pub trait LocationSource {
    /// Starts watching. Fixes and errors are delivered through `sink`.
    fn watch(&self, sink: LocationSink) -> Result<WatchId, LocationError>;

    /// Stops the watch started under `id`. Must be idempotent.
    fn clear_watch(&self, id: WatchId);
}

/// Samples delivered by an active subscription.
pub struct LocationStream {
    rx: mpsc::UnboundedReceiver<LocationEvent>,
}

impl Stream for LocationStream {
    type Item = LocationEvent;

    fn poll_next(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        Pin::new(&mut self.rx).poll_next(cx)
    }
}

/// Handle of an active watch. Dropping it clears the platform watch.
pub struct Subscription<S: LocationSource> {
    id: WatchId,
    source: Rc<S>,
    active: Rc<Cell<bool>>,
}

impl<S: LocationSource> Subscription<S> {
    pub fn id(&self) -> WatchId {
        self.id
    }
}

impl<S: LocationSource> Drop for Subscription<S> {
    fn drop(&mut self) {
        self.source.clear_watch(self.id);
        self.active.set(false);
        info!("location watch {} stopped", self.id);
    }
}

/// Owns a location source and allows one subscription at a time.
pub struct LocationTracker<S: LocationSource> {
    source: Rc<S>,
    active: Rc<Cell<bool>>,
}

impl<S: LocationSource> LocationTracker<S> {
    pub fn new(source: S) -> Self {
        Self {
            source: Rc::new(source),
            active: Rc::new(Cell::new(false)),
        }
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    pub fn is_tracking(&self) -> bool {
        self.active.get()
    }

    /// Starts the platform watch.
    ///
    /// Fails with [`LocationError::AlreadyTracking`] while a previous
    /// subscription is alive, or with whatever the source reports when the
    /// watch cannot be started (e.g. no geolocation support).
    pub fn start(&self) -> Result<(Subscription<S>, LocationStream), LocationError> {
        if self.active.get() {
            return Err(LocationError::AlreadyTracking);
        }

        let (tx, rx) = mpsc::unbounded();
        let id = self.source.watch(LocationSink { tx })?;
        self.active.set(true);
        info!("location watch {id} started");

        let subscription = Subscription {
            id,
            source: Rc::clone(&self.source),
            active: Rc::clone(&self.active),
        };
        Ok((subscription, LocationStream { rx }))
    }

    pub fn stop(&self, subscription: Subscription<S>) {
        drop(subscription);
    }

    /// Waits for a single fix and stops watching right after.
    pub async fn current_position(&self) -> Result<Coordinate, LocationError> {
        let (subscription, mut samples) = self.start()?;
        let first = samples.next().await;
        self.stop(subscription);

        first.unwrap_or_else(|| {
            Err(LocationError::Unavailable(
                "location watch ended without a fix".to_string(),
            ))
        })
    }
}
