//! Wardrobe Frontend App
//!
//! Composition root: builds the session and API client, provides them via
//! context and switches between the login screen and the wardrobe.

use leptos::prelude::*;
use reactive_stores::Store;

use crate::api::ApiClient;
use crate::components::{ItemGrid, LoginButton, NewItemForm, StatsPanel, TitleBar};
use crate::config::AppConfig;
use crate::context::AppContext;
use crate::google;
use crate::session::{AuthStore, BrowserSessionStorage};
use crate::store::WardrobeState;

#[component]
pub fn App(config: AppConfig) -> impl IntoView {
    let auth = AuthStore::new(BrowserSessionStorage).with_sign_out_hook(google::disable_auto_select);
    auth.hydrate();
    let api = ApiClient::new(config, auth.clone());
    log::info!("[APP] Using API at {}", api.config().api_base());

    let (reload_trigger, set_reload_trigger) = signal(0u32);
    let ctx = AppContext::new(api, auth, (reload_trigger, set_reload_trigger));

    // Provide context to all children
    provide_context(ctx);
    provide_context(Store::new(WardrobeState::default()));

    view! {
        <div class="app-layout">
            <TitleBar />
            <Show when=move || ctx.is_authenticated() fallback=|| view! { <LoginButton /> }>
                <main class="main-content">
                    <NewItemForm />
                    <ItemGrid />
                </main>
                <StatsPanel />
            </Show>
        </div>
    }
}
