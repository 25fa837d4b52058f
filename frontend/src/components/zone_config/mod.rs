//! Administrator view for positioning the attendance zone.
//!
//! The center comes from one of three places: the zone already stored on the
//! backend, a place picked from the debounced search, or the device position
//! (used only when nothing else set a center). The radius is a slider.

use yew::platform::spawn_local;
use yew::prelude::*;

use engine::backend::AttendanceBackend;

mod messages;
mod state;
mod update;
mod view;

pub use messages::Msg;
pub use state::ZoneConfigComponent;

impl Component for ZoneConfigComponent {
    type Message = Msg;
    type Properties = ();

    fn create(ctx: &Context<Self>) -> Self {
        let mut component = ZoneConfigComponent::new();

        let backend = component.backend.clone();
        let link = ctx.link().clone();
        spawn_local(async move {
            link.send_message(Msg::ZoneLoaded(backend.load_zone().await));
        });
        // A stored zone loaded later replaces whatever center this picks.
        component.locate(ctx.link().clone());

        component
    }

    fn update(&mut self, ctx: &Context<Self>, msg: Self::Message) -> bool {
        update::update(self, ctx, msg)
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        view::view(self, ctx)
    }

    fn destroy(&mut self, _ctx: &Context<Self>) {
        self.resolver.cancel();
        self.stop_locating();
    }
}
