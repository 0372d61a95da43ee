//! Puzzle page: answer field, continue button and win modal

use std::cell::RefCell;
use std::rc::Rc;

use wasm_bindgen::prelude::*;
use web_sys::{Event, HtmlButtonElement, HtmlInputElement, KeyboardEvent, MouseEvent};

use super::{clear_style, document, navigate, open_progress, set_style};
use crate::config::{GameConfig, PageConfig};
use crate::consts::{CALENDAR_URL, RETURN_DELAY_MS};
use crate::persistence::LocalStore;
use crate::puzzle::{Feedback, PuzzleController, Submission};

thread_local! {
    /// Controller of the current page, for the console commands
    static PAGE: RefCell<Option<Rc<RefCell<PuzzleController>>>> = const { RefCell::new(None) };
}

fn current_page() -> Option<Rc<RefCell<PuzzleController>>> {
    PAGE.with(|page| page.borrow().clone())
}

/// Entry point called by each puzzle page with `{dayNumber, correctAnswer, nextPageUrl}`
#[wasm_bindgen(js_name = initializePage)]
pub fn initialize_page(config: JsValue) {
    let page = match js_sys::JSON::stringify(&config)
        .ok()
        .and_then(|json| json.as_string())
        .ok_or_else(|| "config is not serializable".to_string())
        .and_then(|json| PageConfig::from_json(&json).map_err(|e| e.to_string()))
    {
        Ok(page) => page,
        Err(e) => {
            log::error!("Invalid page config: {}", e);
            return;
        }
    };

    let game = LocalStore::open()
        .map(|store| GameConfig::load(&store))
        .unwrap_or_default();

    // Without storage nothing is known about unlocks, so the page stays open
    let progress = open_progress();
    if !progress.store().is_fallback() && !progress.status(page.day_number).is_open() {
        log::info!("Day {} is locked", page.day_number);
        show_not_available();
        return;
    }

    show_puzzle_content();

    let controller = Rc::new(RefCell::new(PuzzleController::new(game, page)));
    PAGE.with(|p| *p.borrow_mut() = Some(controller.clone()));
    setup_event_listeners(controller);

    log::info!("revealAnswer() - Shows the correct answer");
    log::info!("hideModalAndGoBack() - Hides win modal and goes to calendar");
    log::info!("clearCompletedDays() - Reset all completed progress");
}

fn show_puzzle_content() {
    toggle_sections(true);
}

fn show_not_available() {
    toggle_sections(false);
}

fn toggle_sections(available: bool) {
    let Some(document) = document() else {
        return;
    };
    let (content, notice) = if available {
        ("block", "none")
    } else {
        ("none", "block")
    };
    if let Some(el) = document.query_selector(".puzzle-content").ok().flatten() {
        set_style(&el, "display", content);
    }
    if let Some(el) = document.query_selector(".not-available").ok().flatten() {
        set_style(&el, "display", notice);
    }
}

fn setup_event_listeners(controller: Rc<RefCell<PuzzleController>>) {
    let Some(document) = document() else {
        return;
    };

    if let Some(input) = document
        .get_element_by_id("answer")
        .and_then(|el| el.dyn_into::<HtmlInputElement>().ok())
    {
        // Validate on every edit
        {
            let controller = controller.clone();
            let field = input.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: Event| {
                let feedback = controller.borrow_mut().input(&field.value());
                apply_feedback(&field, &feedback);
            });
            let _ = input
                .add_event_listener_with_callback("input", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Enter submits a correct answer
        {
            let controller = controller.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                if event.key() == "Enter" && controller.borrow().is_answer_correct() {
                    handle_continue(&controller);
                }
            });
            let _ = input
                .add_event_listener_with_callback("keypress", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        let _ = input.focus();
    }

    if let Some(button) = document.get_element_by_id("continueBtn") {
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
            handle_continue(&controller);
        });
        let _ = button.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
        closure.forget();
    }
}

fn apply_feedback(field: &HtmlInputElement, feedback: &Feedback) {
    set_style(field, "border-color", feedback.field.border_color());
    set_style(field, "box-shadow", feedback.field.box_shadow());

    let Some(button) = document()
        .and_then(|d| d.get_element_by_id("continueBtn"))
        .and_then(|el| el.dyn_into::<HtmlButtonElement>().ok())
    else {
        return;
    };
    let state = feedback.button;
    button.set_disabled(!state.enabled);
    button.set_text_content(Some(state.label()));
    set_style(&button, "background", state.background());
    set_style(&button, "color", state.color());
    set_style(&button, "cursor", state.cursor());
}

fn handle_continue(controller: &Rc<RefCell<PuzzleController>>) {
    // Without storage the player still moves on; the write failure is logged
    let submission = controller.borrow_mut().submit(&mut open_progress());

    match submission {
        Submission::Ignored => {}
        Submission::Navigate(url) => navigate(&url),
        Submission::ShowWinModal => show_win_modal(),
    }
}

fn show_win_modal() {
    let Some(document) = document() else {
        return;
    };
    if let Some(modal) = document.get_element_by_id("winModal") {
        let _ = modal.class_list().add_1("show");
        if let Some(container) = document.query_selector(".container").ok().flatten() {
            set_style(&container, "pointer-events", "none");
            set_style(&container, "opacity", "0.3");
        }
    }
}

fn hide_win_modal() {
    let Some(document) = document() else {
        return;
    };
    if let Some(modal) = document.get_element_by_id("winModal") {
        let _ = modal.class_list().remove_1("show");
    }
    if let Some(container) = document.query_selector(".container").ok().flatten() {
        clear_style(&container, "pointer-events");
        clear_style(&container, "opacity");
    }
}

/// Close the win modal and head back to the calendar
#[wasm_bindgen(js_name = hideModalAndGoBack)]
pub fn hide_modal_and_go_back() {
    hide_win_modal();

    let back = current_page().map(|c| c.borrow().dismiss());
    let (delay, url) = match back {
        Some(back) => (back.delay_ms, back.url),
        None => (RETURN_DELAY_MS, CALENDAR_URL.to_string()),
    };

    let Some(window) = web_sys::window() else {
        return;
    };
    let closure = Closure::once(move || navigate(&url));
    if let Err(e) = window.set_timeout_with_callback_and_timeout_and_arguments_0(
        closure.as_ref().unchecked_ref(),
        delay,
    ) {
        log::warn!("Could not schedule return to calendar: {:?}", e);
    }
    closure.forget();
}

/// Fill in the correct answer and validate it
#[wasm_bindgen(js_name = revealAnswer)]
pub fn reveal_answer() {
    let Some(controller) = current_page() else {
        log::warn!("No puzzle on this page");
        return;
    };
    let answer = controller.borrow().reveal_answer().to_string();

    let Some(input) = document()
        .and_then(|d| d.get_element_by_id("answer"))
        .and_then(|el| el.dyn_into::<HtmlInputElement>().ok())
    else {
        return;
    };
    input.set_value(&answer);
    if let Ok(event) = Event::new("input") {
        let _ = input.dispatch_event(&event);
    }
}
