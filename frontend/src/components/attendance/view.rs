//! Markup for the check-in view: zone status card, current coordinates and
//! the camera panel, whose content follows the capture phase.

use engine::photo::Phase;
use engine::session::LocationStatus;
use yew::html::Scope;
use yew::prelude::*;

use super::messages::Msg;
use super::state::AttendanceComponent;

pub fn view(component: &AttendanceComponent, ctx: &Context<AttendanceComponent>) -> Html {
    let link = ctx.link();

    html! {
        <div class="attendance-root">
            { build_status_card(component) }
            { build_camera_panel(component, link) }
        </div>
    }
}

fn build_status_card(component: &AttendanceComponent) -> Html {
    let session = &component.session;
    let class = match session.verdict() {
        Some(verdict) if verdict.in_zone => "status-card in-zone",
        Some(_) => "status-card out-of-zone",
        None => "status-card pending",
    };

    html! {
        <div class={class}>
            <h3>{ session.status_line() }</h3>
            {
                match session.position() {
                    Some(position) => html! {
                        <p class="coords">
                            { format!("Lat: {:.5}, Lng: {:.5}", position.latitude, position.longitude) }
                        </p>
                    },
                    None => html! {},
                }
            }
            {
                match session.location_status() {
                    LocationStatus::Unavailable(err) => html! {
                        <p class="location-error">{ err.to_string() }</p>
                    },
                    _ => html! {},
                }
            }
            {
                if session.zone().is_none() {
                    html! { <p class="hint">{ "No attendance zone configured yet" }</p> }
                } else {
                    html! {}
                }
            }
        </div>
    }
}

fn build_camera_panel(component: &AttendanceComponent, link: &Scope<AttendanceComponent>) -> Html {
    let camera = component.session.camera();
    let streaming = camera.phase() == Phase::Streaming;
    let video_style = if streaming {
        "width:100%;max-width:480px;border-radius:8px;"
    } else {
        "display:none;"
    };

    html! {
        <div class="camera-panel">
            // Kept mounted in every phase; the camera adapter looks it up by ref.
            <video
                ref={component.video_ref.clone()}
                autoplay=true
                muted=true
                playsinline=true
                style={video_style}
            />
            {
                match camera.phase() {
                    Phase::Closed => html! {
                        <button class="btn" onclick={link.callback(|_| Msg::OpenCamera)}>
                            { "Open Camera" }
                        </button>
                    },
                    Phase::Opening => html! {
                        <p class="hint">{ "Opening camera..." }</p>
                    },
                    Phase::Streaming => html! {
                        <button class="btn" onclick={link.callback(|_| Msg::Capture)}>
                            { "Capture" }
                        </button>
                    },
                    Phase::Captured => build_preview(component, link),
                }
            }
        </div>
    }
}

fn build_preview(component: &AttendanceComponent, link: &Scope<AttendanceComponent>) -> Html {
    let Some(photo) = component.session.camera().photo() else {
        return html! {};
    };

    html! {
        <div class="photo-preview">
            <img
                src={photo.to_data_url()}
                alt="Captured photo"
                style="width:100%;max-width:480px;border-radius:8px;"
            />
            <div class="actions">
                <button
                    class="btn primary"
                    disabled={component.submitting}
                    onclick={link.callback(|_| Msg::Submit)}
                >
                    { if component.submitting { "Submitting..." } else { "Submit Check-In" } }
                </button>
                <button
                    class="btn"
                    disabled={component.submitting}
                    onclick={link.batch_callback(|_| vec![Msg::Retake, Msg::OpenCamera])}
                >
                    { "Retake" }
                </button>
            </div>
        </div>
    }
}
