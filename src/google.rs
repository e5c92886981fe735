//! Google Identity Services
//!
//! Minimal bindings to the `google.accounts.id` script loaded by index.html.
//! Every call is `catch`ed so a missing or blocked script degrades to an
//! error instead of a trap.

use std::future::Future;

use js_sys::{Function, Reflect};
use serde::Serialize;
use wasm_bindgen::prelude::*;

#[wasm_bindgen]
extern "C" {
    #[wasm_bindgen(catch, js_namespace = ["google", "accounts", "id"], js_name = initialize)]
    fn gis_initialize(config: &JsValue) -> Result<(), JsValue>;

    #[wasm_bindgen(catch, js_namespace = ["google", "accounts", "id"], js_name = renderButton)]
    fn gis_render_button(parent: &web_sys::HtmlElement, options: &JsValue) -> Result<(), JsValue>;

    #[wasm_bindgen(catch, js_namespace = ["google", "accounts", "id"], js_name = disableAutoSelect)]
    fn gis_disable_auto_select() -> Result<(), JsValue>;
}

#[derive(Serialize)]
struct InitOptions<'a> {
    client_id: &'a str,
    auto_select: bool,
    cancel_on_tap_outside: bool,
}

#[derive(Serialize)]
struct ButtonOptions {
    theme: &'static str,
    size: &'static str,
    text: &'static str,
    shape: &'static str,
}

/// Has the GIS script finished loading?
pub fn is_available() -> bool {
    let Some(window) = web_sys::window() else {
        return false;
    };
    Reflect::get(&window, &JsValue::from_str("google"))
        .map(|g| !g.is_undefined())
        .unwrap_or(false)
}

/// Re-check `ready` up to `attempts` times, pausing between checks.
/// Returns whether it became ready.
pub async fn wait_until<R, P, F>(mut ready: R, attempts: u32, mut pause: P) -> bool
where
    R: FnMut() -> bool,
    P: FnMut() -> F,
    F: Future<Output = ()>,
{
    for attempt in 0..attempts {
        if ready() {
            return true;
        }
        if attempt + 1 < attempts {
            pause().await;
        }
    }
    false
}

/// Initialise the client and draw the sign-in button into `parent`.
/// `on_credential` receives the Google ID token.
pub fn render_sign_in(
    client_id: &str,
    parent: &web_sys::HtmlElement,
    on_credential: impl Fn(String) + 'static,
) -> Result<(), JsValue> {
    let callback = Closure::<dyn Fn(JsValue)>::new(move |response: JsValue| {
        let credential = Reflect::get(&response, &JsValue::from_str("credential"))
            .ok()
            .and_then(|c| c.as_string());
        match credential {
            Some(credential) => on_credential(credential),
            None => log::warn!("[AUTH] Google response carried no credential"),
        }
    });

    let config = serde_wasm_bindgen::to_value(&InitOptions {
        client_id,
        auto_select: false,
        cancel_on_tap_outside: true,
    })?;
    Reflect::set(&config, &JsValue::from_str("callback"), callback.as_ref().unchecked_ref::<Function>())?;
    // Lives as long as the page; GIS may call it any number of times.
    callback.forget();
    gis_initialize(&config)?;

    let options = serde_wasm_bindgen::to_value(&ButtonOptions {
        theme: "outline",
        size: "large",
        text: "signin_with",
        shape: "rectangular",
    })?;
    gis_render_button(parent, &options)
}

/// Stop GIS from silently re-selecting the account after logout
pub fn disable_auto_select() {
    if !is_available() {
        return;
    }
    if let Err(e) = gis_disable_auto_select() {
        log::warn!("[AUTH] disableAutoSelect failed: {:?}", e);
    }
}
