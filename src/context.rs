//! Application Context
//!
//! Shared handles provided via Leptos Context API.

use leptos::prelude::*;

use crate::api::ApiClient;
use crate::session::{AuthStore, Identity};

/// App-wide handles provided via context
#[derive(Clone, Copy)]
pub struct AppContext {
    api: StoredValue<ApiClient>,
    auth: StoredValue<AuthStore>,
    /// Current user, `None` when logged out
    pub identity: Signal<Option<Identity>>,
    /// Trigger to refetch items from the server - read
    pub reload_trigger: ReadSignal<u32>,
    /// Trigger to refetch items from the server - write
    set_reload_trigger: WriteSignal<u32>,
}

impl AppContext {
    pub fn new(api: ApiClient, auth: AuthStore, reload_trigger: (ReadSignal<u32>, WriteSignal<u32>)) -> Self {
        Self {
            identity: auth.identity(),
            api: StoredValue::new(api),
            auth: StoredValue::new(auth),
            reload_trigger: reload_trigger.0,
            set_reload_trigger: reload_trigger.1,
        }
    }

    pub fn api(&self) -> ApiClient {
        self.api.get_value()
    }

    pub fn auth(&self) -> AuthStore {
        self.auth.get_value()
    }

    /// Tracked: re-runs the caller when the user logs in or out
    pub fn is_authenticated(&self) -> bool {
        self.identity.with(|i| i.is_some())
    }

    /// Trigger a refetch of items
    pub fn reload(&self) {
        self.set_reload_trigger.update(|v| *v += 1);
    }

    pub fn logout(&self) {
        self.auth.with_value(|auth| auth.logout());
    }
}
