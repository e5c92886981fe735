//! Login Button Component
//!
//! Google sign-in button. The Google credential is exchanged for an app
//! token, which then becomes the session.

use std::time::Duration;

use gloo_timers::future::sleep;
use leptos::html::Div;
use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::context::AppContext;
use crate::google;

const SCRIPT_POLLS: u32 = 50;
const SCRIPT_POLL_INTERVAL: Duration = Duration::from_millis(200);

#[component]
pub fn LoginButton() -> impl IntoView {
    let ctx = use_context::<AppContext>().expect("AppContext should be provided");
    let container = NodeRef::<Div>::new();
    let (error, set_error) = signal(None::<String>);
    let (signing_in, set_signing_in) = signal(false);
    let (waiting, set_waiting) = signal(false);

    let on_credential = move |credential: String| {
        set_signing_in.set(true);
        set_error.set(None);
        spawn_local(async move {
            let api = ctx.api();
            match api.google_login(&credential).await {
                Ok(auth) => {
                    ctx.auth().save_token(&auth.token);
                    ctx.reload();
                }
                Err(e) => {
                    log::error!("[AUTH] Google login failed: {}", e);
                    set_error.set(Some(format!("Login failed: {}", e)));
                }
            }
            set_signing_in.set(false);
        });
    };

    let (attempt, set_attempt) = signal(0u32);

    Effect::new(move |_| {
        let _ = attempt.get();
        let Some(div) = container.get() else {
            return;
        };
        let Some(client_id) = ctx.api().config().google_client_id.clone() else {
            set_error.set(Some("Google sign-in is not configured".to_string()));
            return;
        };
        set_error.set(None);
        set_waiting.set(true);
        spawn_local(async move {
            // The GIS script loads async and may land after the app mounts
            let loaded =
                google::wait_until(google::is_available, SCRIPT_POLLS, || sleep(SCRIPT_POLL_INTERVAL)).await;
            set_waiting.set(false);
            if !loaded {
                set_error.set(Some("Google sign-in could not be loaded".to_string()));
                return;
            }
            if let Err(e) = google::render_sign_in(&client_id, &div, on_credential) {
                log::error!("[AUTH] Failed to render Google button: {:?}", e);
                set_error.set(Some("Google sign-in could not be started".to_string()));
            }
        });
    });

    view! {
        <div class="login-panel">
            <h2>"Welcome to your wardrobe"</h2>
            <p>"Sign in to manage your items."</p>
            <div class="google-button" node_ref=container></div>
            <Show when=move || signing_in.get()>
                <span class="signing-in">"Signing in..."</span>
            </Show>
            <Show when=move || waiting.get()>
                <span class="signing-in">"Loading Google sign-in..."</span>
            </Show>
            {move || error.get().map(|msg| view! {
                <div class="form-error">
                    <span>{msg}</span>
                    <button class="retry-btn" on:click=move |_| set_attempt.update(|n| *n += 1)>"Retry"</button>
                </div>
            })}
        </div>
    }
}
