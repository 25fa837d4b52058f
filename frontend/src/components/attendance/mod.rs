//! Employee check-in view.
//!
//! Responsibilities
//! - Watch the device position for as long as the view is mounted and feed
//!   every fix into the [`AttendanceSession`](engine::session::AttendanceSession).
//! - Load the configured zone once on mount.
//! - Drive the camera (open, capture, retake) and submit the check-in.
//! - Release the position watch and the camera when the view goes away.

use futures::StreamExt;
use log::warn;
use yew::platform::spawn_local;
use yew::prelude::*;

use engine::backend::AttendanceBackend;

mod messages;
mod props;
mod state;
mod update;
mod view;

pub use messages::Msg;
pub use props::AttendanceProps;
pub use state::AttendanceComponent;

impl Component for AttendanceComponent {
    type Message = Msg;
    type Properties = AttendanceProps;

    fn create(ctx: &Context<Self>) -> Self {
        let mut component = AttendanceComponent::new(ctx.props().identity.clone());

        match component.tracker.start() {
            Ok((subscription, mut samples)) => {
                component.subscription = Some(subscription);
                let link = ctx.link().clone();
                spawn_local(async move {
                    while let Some(event) = samples.next().await {
                        link.send_message(Msg::Location(event));
                    }
                });
            }
            Err(error) => {
                warn!("location tracking not started: {error}");
                component.session.on_location_error(error);
            }
        }

        let backend = component.backend.clone();
        let link = ctx.link().clone();
        spawn_local(async move {
            link.send_message(Msg::ZoneLoaded(backend.load_zone().await));
        });

        component
    }

    fn update(&mut self, ctx: &Context<Self>, msg: Self::Message) -> bool {
        update::update(self, ctx, msg)
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        view::view(self, ctx)
    }

    fn destroy(&mut self, _ctx: &Context<Self>) {
        self.shutdown();
    }
}
