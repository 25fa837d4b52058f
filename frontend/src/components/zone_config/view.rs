//! Markup for the zone editor: search box with candidate list, manual
//! coordinates, radius slider and the save button.

use engine::search::SearchCandidate;
use web_sys::HtmlInputElement;
use yew::html::Scope;
use yew::prelude::*;

use super::messages::Msg;
use super::state::ZoneConfigComponent;

pub fn view(component: &ZoneConfigComponent, ctx: &Context<ZoneConfigComponent>) -> Html {
    let link = ctx.link();

    html! {
        <div class="zone-config-root">
            <h3>{ "Attendance Zone" }</h3>
            { build_search(component, link) }
            { build_center_fields(component, link) }
            { build_radius_slider(component, link) }
            <button
                class="btn primary"
                disabled={component.saving}
                onclick={link.callback(|_| Msg::Save)}
            >
                { if component.saving { "Saving..." } else { "Save Zone" } }
            </button>
        </div>
    }
}

fn input_value(e: &InputEvent) -> String {
    e.target_unchecked_into::<HtmlInputElement>().value()
}

fn build_search(component: &ZoneConfigComponent, link: &Scope<ZoneConfigComponent>) -> Html {
    let candidates = component.resolver.candidates();

    html! {
        <div class="zone-search">
            <input
                type="text"
                placeholder="Search for a place..."
                value={component.search_text.clone()}
                oninput={link.callback(|e: InputEvent| Msg::SearchInput(input_value(&e)))}
                onkeydown={link.batch_callback(|e: KeyboardEvent| {
                    if e.key() == "Enter" {
                        e.prevent_default();
                        vec![Msg::SearchSubmit]
                    } else {
                        vec![]
                    }
                })}
            />
            {
                if candidates.is_empty() {
                    html! {}
                } else {
                    html! {
                        <ul class="search-results">
                            { for candidates.iter().enumerate().map(|(index, candidate)| build_candidate(index, candidate, link)) }
                        </ul>
                    }
                }
            }
        </div>
    }
}

fn build_candidate(
    index: usize,
    candidate: &SearchCandidate,
    link: &Scope<ZoneConfigComponent>,
) -> Html {
    html! {
        <li
            class="search-result"
            style="cursor:pointer;"
            onclick={link.callback(move |_| Msg::SelectCandidate(index))}
        >
            { candidate.label.clone() }
        </li>
    }
}

fn build_center_fields(component: &ZoneConfigComponent, link: &Scope<ZoneConfigComponent>) -> Html {
    let (latitude, longitude) = component
        .draft
        .center()
        .map(|center| (format!("{:.6}", center.latitude), format!("{:.6}", center.longitude)))
        .unwrap_or_default();

    html! {
        <div class="zone-center">
            <label>
                { "Latitude" }
                <input
                    type="number"
                    step="any"
                    value={latitude}
                    onchange={link.callback(|e: Event| {
                        Msg::SetLatitude(e.target_unchecked_into::<HtmlInputElement>().value())
                    })}
                />
            </label>
            <label>
                { "Longitude" }
                <input
                    type="number"
                    step="any"
                    value={longitude}
                    onchange={link.callback(|e: Event| {
                        Msg::SetLongitude(e.target_unchecked_into::<HtmlInputElement>().value())
                    })}
                />
            </label>
            <button class="btn" onclick={link.callback(|_| Msg::UseMyPosition)}>
                { "Use my position" }
            </button>
        </div>
    }
}

fn build_radius_slider(component: &ZoneConfigComponent, link: &Scope<ZoneConfigComponent>) -> Html {
    let bounds = component.draft.bounds();
    let radius = component.draft.radius();

    html! {
        <div class="zone-radius">
            <label>{ format!("Radius: {}m", radius.round()) }</label>
            <input
                type="range"
                min={bounds.min_radius.to_string()}
                max={bounds.max_radius.to_string()}
                value={radius.to_string()}
                oninput={link.callback(|e: InputEvent| Msg::SetRadius(input_value(&e)))}
            />
        </div>
    }
}
