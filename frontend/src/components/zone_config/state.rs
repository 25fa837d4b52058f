use std::rc::Rc;

use futures::future::{abortable, AbortHandle};
use yew::html::Scope;
use yew::platform::spawn_local;

use engine::location::LocationTracker;
use engine::search::PlaceSearchResolver;
use engine::zone::ZoneDraft;

use crate::config::engine_config;
use crate::platform::api::HttpBackend;
use crate::platform::geocoder::NominatimGeocoder;
use crate::platform::geolocation::BrowserLocationSource;
use crate::platform::timer::GlooTimer;

use super::messages::Msg;

pub type PlaceSearch = PlaceSearchResolver<NominatimGeocoder, GlooTimer>;

pub struct ZoneConfigComponent {
    pub draft: ZoneDraft,

    /// Text currently in the search box.
    pub search_text: String,

    /// Shared with the search tasks spawned for each keystroke.
    pub resolver: Rc<PlaceSearch>,

    pub tracker: Rc<LocationTracker<BrowserLocationSource>>,

    /// Pending one-shot position lookup. Aborting it drops the watch.
    pub position_lookup: Option<AbortHandle>,

    /// The pending lookup was asked for by the user and should move the
    /// center even when one is already set.
    pub center_on_fix: bool,

    pub backend: HttpBackend,

    pub saving: bool,
}

impl ZoneConfigComponent {
    pub fn new() -> Self {
        let config = engine_config();
        Self {
            draft: ZoneDraft::new(config.zone.clone()),
            search_text: String::new(),
            resolver: Rc::new(PlaceSearchResolver::new(
                NominatimGeocoder::default(),
                GlooTimer,
                config.search,
            )),
            tracker: Rc::new(LocationTracker::new(BrowserLocationSource::default())),
            position_lookup: None,
            center_on_fix: false,
            backend: HttpBackend::default(),
            saving: false,
        }
    }

    /// Looks the device position up once; the answer arrives as
    /// [`Msg::PositionFound`].
    pub fn locate(&mut self, link: Scope<ZoneConfigComponent>) {
        let tracker = Rc::clone(&self.tracker);
        let (lookup, handle) = abortable(async move { tracker.current_position().await });
        self.position_lookup = Some(handle);
        spawn_local(async move {
            if let Ok(result) = lookup.await {
                link.send_message(Msg::PositionFound(result));
            }
        });
    }

    /// Abandons a pending lookup, clearing its platform watch.
    pub fn stop_locating(&mut self) {
        if let Some(handle) = self.position_lookup.take() {
            handle.abort();
        }
    }
}
