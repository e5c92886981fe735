//! Title Bar Component
//!
//! App title, backend status and the signed-in user with a logout button.

use leptos::prelude::*;

use crate::components::health_badge::HealthBadge;
use crate::context::AppContext;

#[component]
pub fn TitleBar() -> impl IntoView {
    let ctx = use_context::<AppContext>().expect("AppContext should be provided");

    view! {
        <header class="custom-titlebar">
            <div class="titlebar-title">
                <span class="titlebar-icon">"👗"</span>
                <span>"Wardrobe"</span>
            </div>
            <div class="titlebar-controls">
                <HealthBadge />
                {move || ctx.identity.get().map(|user| {
                    let name = user.display_name().to_string();
                    view! {
                        <span class="titlebar-user">
                            {user.picture.clone().map(|src| view! {
                                <img class="avatar" src=src alt="" referrerpolicy="no-referrer" />
                            })}
                            <span class="user-name">{name}</span>
                        </span>
                        <button class="titlebar-btn logout" on:click=move |_| ctx.logout()>
                            "Log out"
                        </button>
                    }
                })}
            </div>
        </header>
    }
}
