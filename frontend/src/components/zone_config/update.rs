//! Message handling for the zone editor.

use std::rc::Rc;

use engine::backend::AttendanceBackend;
use engine::search::SearchOutcome;
use engine::Coordinate;
use log::{info, warn};
use yew::platform::spawn_local;
use yew::prelude::*;

use crate::components::toast::show_toast;
use crate::config::engine_config;

use super::messages::Msg;
use super::state::ZoneConfigComponent;

pub fn update(
    component: &mut ZoneConfigComponent,
    ctx: &Context<ZoneConfigComponent>,
    msg: Msg,
) -> bool {
    match msg {
        Msg::ZoneLoaded(Ok(Some(zone))) => {
            component.draft.load(zone);
            true
        }
        Msg::ZoneLoaded(Ok(None)) => false,
        Msg::ZoneLoaded(Err(err)) => {
            warn!("Error loading zone: {err}");
            false
        }
        Msg::PositionFound(result) => {
            component.position_lookup = None;
            let requested = std::mem::take(&mut component.center_on_fix);
            match result {
                Ok(position) if requested => {
                    component.draft.set_center(position);
                    true
                }
                Ok(position) => component.draft.adopt_position(position),
                Err(err) if requested => {
                    warn!("{err}");
                    show_toast(&err.to_string());
                    false
                }
                Err(err) => {
                    info!("device position unavailable for the zone editor: {err}");
                    match engine_config().location.fallback {
                        Some(fallback) => component.draft.adopt_position(fallback),
                        None => false,
                    }
                }
            }
        }
        Msg::UseMyPosition => {
            component.center_on_fix = true;
            // A lookup already under way answers this request too.
            if component.position_lookup.is_none() {
                component.locate(ctx.link().clone());
            }
            false
        }
        Msg::SetRadius(value) => match value.trim().parse::<f64>() {
            Ok(radius) => {
                component.draft.set_radius(radius);
                true
            }
            Err(_) => false,
        },
        Msg::SetLatitude(value) => set_center_field(component, &value, true),
        Msg::SetLongitude(value) => set_center_field(component, &value, false),
        Msg::SearchInput(text) => {
            component.search_text = text.clone();
            let resolver = Rc::clone(&component.resolver);
            let link = ctx.link().clone();
            spawn_local(async move {
                link.send_message(Msg::SearchDone(resolver.query(&text).await));
            });
            true
        }
        Msg::SearchSubmit => {
            let text = component.search_text.clone();
            let resolver = Rc::clone(&component.resolver);
            let link = ctx.link().clone();
            spawn_local(async move {
                link.send_message(Msg::SearchDone(resolver.query_now(&text).await));
            });
            false
        }
        Msg::SearchDone(outcome) => !matches!(outcome, SearchOutcome::Superseded),
        Msg::SelectCandidate(index) => match component.resolver.select(index) {
            Some(candidate) => {
                component.draft.apply_candidate(&candidate);
                component.search_text.clear();
                true
            }
            None => false,
        },
        Msg::Save => {
            if component.saving {
                return false;
            }
            let zone = match component.draft.to_zone() {
                Ok(zone) => zone,
                Err(err) => {
                    show_toast(&err.to_string());
                    return false;
                }
            };
            component.saving = true;
            let backend = component.backend.clone();
            let link = ctx.link().clone();
            spawn_local(async move {
                link.send_message(Msg::Saved(backend.save_zone(&zone).await));
            });
            true
        }
        Msg::Saved(result) => {
            component.saving = false;
            match result {
                Ok(()) => show_toast("Zone updated successfully"),
                Err(err) => {
                    warn!("zone not saved: {err}");
                    show_toast("Failed to update zone");
                }
            }
            true
        }
    }
}

/// Applies one manually typed coordinate. The other half comes from the
/// current center, or 0 when there is none yet.
fn set_center_field(component: &mut ZoneConfigComponent, value: &str, latitude: bool) -> bool {
    let Ok(parsed) = value.trim().parse::<f64>() else {
        return false;
    };
    let current = component.draft.center().unwrap_or(Coordinate::new(0.0, 0.0));
    let candidate = if latitude {
        Coordinate::checked(parsed, current.longitude)
    } else {
        Coordinate::checked(current.latitude, parsed)
    };
    match candidate {
        Some(center) => {
            component.draft.set_center(center);
            true
        }
        None => false,
    }
}
