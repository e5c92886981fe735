//! UI Components
//!
//! Reusable Leptos components.

mod category_selector;
mod color_palette;
mod delete_confirm_button;
mod health_badge;
mod item_card;
mod item_editor;
mod item_grid;
mod login_button;
mod new_item_form;
mod stats_panel;
mod title_bar;

pub use item_grid::ItemGrid;
pub use login_button::LoginButton;
pub use new_item_form::NewItemForm;
pub use stats_panel::StatsPanel;
pub use title_bar::TitleBar;
