//! DOM element bindings.
//!
//! All references are resolved once at startup via `Elements::bind()`. To
//! add new UI elements, add a field here and bind it there.

use wasm_bindgen::prelude::*;
use web_sys::{Document, Element, HtmlElement, HtmlInputElement};

// ── Helpers ──

fn doc() -> Document {
    web_sys::window().unwrap().document().unwrap()
}

pub fn by_id(id: &str) -> Option<Element> {
    doc().get_element_by_id(id)
}

pub fn by_id_typed<T: JsCast>(id: &str) -> Option<T> {
    by_id(id).and_then(|e| e.dyn_into::<T>().ok())
}

pub fn set_text(el: &Element, text: &str) {
    el.set_text_content(Some(text));
}

pub fn get_input_value(el: &HtmlInputElement) -> String {
    el.value()
}

pub fn set_input_value(el: &HtmlInputElement, val: &str) {
    el.set_value(val);
}

pub fn add_class(el: &Element, cls: &str) {
    let _ = el.class_list().add_1(cls);
}

pub fn remove_class(el: &Element, cls: &str) {
    let _ = el.class_list().remove_1(cls);
}

pub fn toggle_class(el: &Element, cls: &str, force: bool) {
    let _ = el.class_list().toggle_with_force(cls, force);
}

pub fn create_element(tag: &str) -> Element {
    doc().create_element(tag).unwrap()
}

pub fn document() -> Document {
    doc()
}

pub fn window() -> web_sys::Window {
    web_sys::window().unwrap()
}

// ── Elements struct ──

/// All DOM element references used by the portal UI.
/// Clone-friendly (all inner types are reference-counted via JS GC).
#[derive(Clone)]
pub struct Elements {
    /// App root; carries the injected `data-account-address` and
    /// `data-endpoint` attributes.
    pub portal_root: Element,

    // Header
    pub wallet_status: Element,

    // Connect affordance
    pub connect_container: Element,
    pub connect_btn: HtmlElement,

    // Initialize affordance
    pub init_container: Element,
    pub init_btn: HtmlElement,

    // Form + grid
    pub collection_container: Element,
    pub link_input: HtmlInputElement,
    pub submit_btn: HtmlElement,
    pub gif_grid: Element,
}

macro_rules! get_el {
    ($id:expr) => {
        by_id($id).ok_or_else(|| JsValue::from_str(&format!("missing element #{}", $id)))?
    };
}

macro_rules! get_input {
    ($id:expr) => {
        by_id_typed::<HtmlInputElement>($id)
            .ok_or_else(|| JsValue::from_str(&format!("missing input #{}", $id)))?
    };
}

macro_rules! get_html {
    ($id:expr) => {
        by_id_typed::<HtmlElement>($id)
            .ok_or_else(|| JsValue::from_str(&format!("missing html element #{}", $id)))?
    };
}

impl Elements {
    /// Resolve all DOM references. Call once after DOMContentLoaded.
    pub fn bind() -> Result<Elements, JsValue> {
        Ok(Elements {
            portal_root: get_el!("portalApp"),

            wallet_status: get_el!("walletStatus"),

            connect_container: get_el!("connectContainer"),
            connect_btn: get_html!("connectBtn"),

            init_container: get_el!("initContainer"),
            init_btn: get_html!("initBtn"),

            collection_container: get_el!("collectionContainer"),
            link_input: get_input!("linkInput"),
            submit_btn: get_html!("submitBtn"),
            gif_grid: get_el!("gifGrid"),
        })
    }
}
