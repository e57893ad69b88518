//! View rendering.
//!
//! A pure function of the state: toggles the three view containers and
//! rebuilds the grid. No state of its own.

use gp_core::ViewState;
use wasm_bindgen::JsCast;
use web_sys::HtmlImageElement;

use crate::dom::{self, Elements};
use crate::state;

/// Redraw everything from the current state.
pub fn render(els: &Elements) {
    let view = state::view();

    dom::toggle_class(
        &els.connect_container,
        "hidden",
        view != ViewState::ConnectPrompt,
    );
    dom::toggle_class(
        &els.init_container,
        "hidden",
        view != ViewState::NeedsInitialization,
    );
    dom::toggle_class(
        &els.collection_container,
        "hidden",
        view != ViewState::Collection,
    );

    match state::connected_address() {
        Some(address) => dom::set_text(
            &els.wallet_status,
            &format!("Connected: {}", shorten(&address, 6, 4)),
        ),
        None => dom::set_text(&els.wallet_status, "Not connected"),
    }

    if view == ViewState::Collection {
        render_grid(els);
    }
}

/// Rebuild the grid of submitted links.
fn render_grid(els: &Elements) {
    let container = &els.gif_grid;
    container.set_inner_html("");

    let entries = state::entries().unwrap_or_default();
    if entries.is_empty() {
        container.set_inner_html(
            r#"<div class="gif-item gif-item--empty">No GIFs yet. Submit the first one!</div>"#,
        );
        return;
    }

    for entry in &entries {
        let item = dom::create_element("div");
        let _ = item.set_attribute("class", "gif-item");

        let img: HtmlImageElement = dom::create_element("img").dyn_into().unwrap();
        img.set_src(&entry.link);
        img.set_alt(&entry.link);

        let _ = item.append_child(&img);
        let _ = container.append_child(&item);
    }
}

fn shorten(value: &str, head: usize, tail: usize) -> String {
    if value.chars().count() <= head + tail + 1 {
        return value.to_string();
    }
    let start: String = value.chars().take(head).collect();
    let end: String = value.chars().skip(value.chars().count() - tail).collect();
    format!("{start}\u{2026}{end}")
}
