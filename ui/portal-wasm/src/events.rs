//! Event binding.
//!
//! Wires all UI event listeners once at startup. Async handlers are spawned
//! via `wasm_bindgen_futures::spawn_local`.

use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;

use crate::dom::{self, Elements};
use crate::ops;
use crate::state;

/// Helper: attach async click handler to an HtmlElement.
macro_rules! on_click_async {
    ($el:expr, $els:expr, $handler:expr) => {{
        let els = $els.clone();
        let cb = Closure::wrap(Box::new(move |_: web_sys::MouseEvent| {
            let els2 = els.clone();
            wasm_bindgen_futures::spawn_local(async move {
                $handler(&els2).await;
            });
        }) as Box<dyn FnMut(_)>);
        $el.add_event_listener_with_callback("click", cb.as_ref().unchecked_ref())
            .unwrap();
        cb.forget();
    }};
}

/// Bind all UI event listeners. Call once after init.
pub fn bind_events(els: &Elements) {
    on_click_async!(els.connect_btn, els, ops::on_connect);
    on_click_async!(els.init_btn, els, ops::on_initialize);
    on_click_async!(els.submit_btn, els, ops::on_submit);

    // Keep the draft in sync with the input buffer.
    {
        let els2 = els.clone();
        let cb = Closure::wrap(Box::new(move |_: web_sys::Event| {
            state::set_draft(&dom::get_input_value(&els2.link_input));
        }) as Box<dyn FnMut(_)>);
        els.link_input
            .add_event_listener_with_callback("input", cb.as_ref().unchecked_ref())
            .unwrap();
        cb.forget();
    }
}
