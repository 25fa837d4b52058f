use engine::Identity;
use yew::{html, Component, Context, Html};

use crate::components::attendance::AttendanceComponent;
use crate::components::zone_config::ZoneConfigComponent;
use crate::platform::session_store::{clear_identity, load_identity};

pub enum Msg {
    Logout,
}

pub struct App {
    identity: Option<Identity>,
}

impl Component for App {
    type Message = Msg;
    type Properties = ();

    fn create(_ctx: &Context<Self>) -> Self {
        Self {
            identity: load_identity(),
        }
    }

    fn update(&mut self, _ctx: &Context<Self>, msg: Self::Message) -> bool {
        match msg {
            Msg::Logout => {
                clear_identity();
                self.identity = None;
                true
            }
        }
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        let Some(identity) = &self.identity else {
            return html! {
                <div class="app-root">
                    <p>{ "Please sign in to record your attendance." }</p>
                </div>
            };
        };

        let name = identity.username.clone().unwrap_or_else(|| identity.id.clone());
        html! {
            <div class="app-root">
                <header class="app-header">
                    <span>{ name }</span>
                    <button class="btn" onclick={ctx.link().callback(|_| Msg::Logout)}>
                        { "Logout" }
                    </button>
                </header>
                {
                    if identity.is_admin() {
                        html! { <ZoneConfigComponent /> }
                    } else {
                        html! { <AttendanceComponent identity={Some(identity.clone())} /> }
                    }
                }
            </div>
        }
    }
}
