//! Browser bindings
//!
//! Applies the calendar and puzzle models to the page markup and exposes
//! the developer commands on the console. Missing elements are skipped.

pub mod calendar;
pub mod puzzle;

use wasm_bindgen::prelude::*;
use web_sys::{Document, Element, HtmlElement};

use crate::dev::DevCommands;
use crate::persistence::{KeyValueStore, LocalStore, MemoryStore, StoreError};
use crate::progress::ProgressStore;

#[wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Info);

    if document()
        .and_then(|d| d.get_element_by_id("calendarGrid"))
        .is_some()
    {
        calendar::initialize();
    }
}

pub(crate) fn document() -> Option<Document> {
    web_sys::window()?.document()
}

/// LocalStorage, or an empty read-only stand-in when the browser refuses it
pub(crate) enum PageStore {
    Local(LocalStore),
    Fallback(MemoryStore),
}

impl PageStore {
    pub(crate) fn is_fallback(&self) -> bool {
        matches!(self, PageStore::Fallback(_))
    }
}

impl KeyValueStore for PageStore {
    fn get(&self, key: &str) -> Option<String> {
        match self {
            PageStore::Local(store) => store.get(key),
            PageStore::Fallback(store) => store.get(key),
        }
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        match self {
            PageStore::Local(store) => store.set(key, value),
            PageStore::Fallback(store) => store.set(key, value),
        }
    }

    fn remove(&mut self, key: &str) -> Result<(), StoreError> {
        match self {
            PageStore::Local(store) => store.remove(key),
            PageStore::Fallback(store) => store.remove(key),
        }
    }
}

/// Progress backed by this origin's LocalStorage. Without storage the
/// defaults are shown and every write fails with a logged warning.
pub(crate) fn open_progress() -> ProgressStore<PageStore> {
    let store = match LocalStore::open() {
        Ok(store) => PageStore::Local(store),
        Err(e) => {
            log::warn!("Progress will not be saved: {}", e);
            PageStore::Fallback(MemoryStore::read_only())
        }
    };
    ProgressStore::new(store)
}

/// Full page navigation
pub(crate) fn navigate(url: &str) {
    if let Some(window) = web_sys::window() {
        if let Err(e) = window.location().set_href(url) {
            log::error!("Navigation to {} failed: {:?}", url, e);
        }
    }
}

pub(crate) fn set_style(el: &Element, property: &str, value: &str) {
    if let Some(html) = el.dyn_ref::<HtmlElement>() {
        let _ = html.style().set_property(property, value);
    }
}

pub(crate) fn clear_style(el: &Element, property: &str) {
    if let Some(html) = el.dyn_ref::<HtmlElement>() {
        let _ = html.style().remove_property(property);
    }
}

/// Run a console command against stored progress, redrawing the calendar
/// after every mutation
fn with_dev<T>(command: impl FnOnce(&mut DevCommands<'_, PageStore>) -> T) -> T {
    let mut progress = open_progress();
    let mut dev = DevCommands::new(&mut progress).on_change(calendar::draw);
    command(&mut dev)
}

#[wasm_bindgen(js_name = unlockDay)]
pub fn unlock_day(day: i32) -> bool {
    with_dev(|dev| dev.unlock_day(day.into()))
}

#[wasm_bindgen(js_name = lockDay)]
pub fn lock_day(day: i32) -> bool {
    with_dev(|dev| dev.lock_day(day.into()))
}

#[wasm_bindgen(js_name = completeDay)]
pub fn complete_day(day: i32) -> bool {
    with_dev(|dev| dev.complete_day(day.into()))
}

#[wasm_bindgen(js_name = resetProgress)]
pub fn reset_progress() -> bool {
    with_dev(|dev| dev.reset_progress())
}

#[wasm_bindgen(js_name = unlockAllDays)]
pub fn unlock_all_days() -> bool {
    with_dev(|dev| dev.unlock_all_days())
}

#[wasm_bindgen(js_name = clearCompletedDays)]
pub fn clear_completed_days() -> bool {
    with_dev(|dev| dev.clear_completed_days())
}

/// `{unlocked, completed, locked}` as a plain JS object
#[wasm_bindgen(js_name = getCalendarState)]
pub fn get_calendar_state() -> JsValue {
    let mut progress = open_progress();
    let state = DevCommands::new(&mut progress).calendar_state();
    serde_json::to_string(&state)
        .ok()
        .and_then(|json| js_sys::JSON::parse(&json).ok())
        .unwrap_or(JsValue::NULL)
}

#[wasm_bindgen(js_name = closeModal)]
pub fn close_modal(modal_id: &str) {
    if let Some(modal) = document().and_then(|d| d.get_element_by_id(modal_id)) {
        let _ = modal.class_list().remove_1("show");
    }
}
