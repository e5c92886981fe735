//! Color Palette Component

use leptos::prelude::*;

use crate::models::ColorEntry;

/// Swatches with their share of the image
#[component]
pub fn ColorPalette(#[prop(into)] colors: Signal<Vec<ColorEntry>>) -> impl IntoView {
    view! {
        <Show when=move || colors.with(|c| !c.is_empty())>
            <div class="color-palette">
                {move || colors.get().into_iter().map(|entry| {
                    let hex = entry.hex();
                    view! {
                        <span class="color-swatch" title=hex.clone()>
                            <span class="color-chip" style=format!("background-color: {}", hex)></span>
                            <span class="color-share">{entry.percentage_label()}</span>
                        </span>
                    }
                }).collect_view()}
            </div>
        </Show>
    }
}
