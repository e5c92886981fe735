//! Health Badge Component

use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::context::AppContext;

#[derive(Debug, Clone, PartialEq)]
enum HealthState {
    Checking,
    Healthy,
    Degraded(String),
    Offline,
}

/// Backend status dot in the header
#[component]
pub fn HealthBadge() -> impl IntoView {
    let ctx = use_context::<AppContext>().expect("AppContext should be provided");
    let (state, set_state) = signal(HealthState::Checking);

    let check = move || {
        set_state.set(HealthState::Checking);
        spawn_local(async move {
            let next = match ctx.api().health().await {
                Ok(health) if health.is_healthy() => HealthState::Healthy,
                Ok(health) => HealthState::Degraded(health.database.unwrap_or(health.status)),
                Err(e) => {
                    log::warn!("[HEALTH] Backend unreachable: {}", e);
                    HealthState::Offline
                }
            };
            set_state.set(next);
        });
    };
    check();

    let (class, label) = (
        move || match state.get() {
            HealthState::Checking => "health-badge checking",
            HealthState::Healthy => "health-badge healthy",
            HealthState::Degraded(_) => "health-badge degraded",
            HealthState::Offline => "health-badge offline",
        },
        move || match state.get() {
            HealthState::Checking => "Checking...".to_string(),
            HealthState::Healthy => "API online".to_string(),
            HealthState::Degraded(detail) => format!("API degraded ({})", detail),
            HealthState::Offline => "API offline".to_string(),
        },
    );

    view! {
        <button class=class title="Check again" on:click=move |_| check()>
            <span class="health-dot"></span>
            <span class="health-label">{label}</span>
        </button>
    }
}
