//! Calendar page: day grid and progress bar

use wasm_bindgen::prelude::*;
use web_sys::{Document, Element, MouseEvent};

use super::{clear_style, document, navigate, open_progress, set_style};
use crate::calendar::{Calendar, Progress, Tile, TileAction};

pub fn initialize() {
    render();
    log::info!("Calendar initialized");
    log::info!("getCalendarState() - Check unlocked and completed days");
}

/// Rebuild the whole grid and progress bar from stored progress
pub fn render() {
    draw(&Calendar::build(&open_progress()));
}

/// Replace the grid and progress bar with `calendar`
pub fn draw(calendar: &Calendar) {
    let Some(document) = document() else {
        return;
    };
    let Some(grid) = document.get_element_by_id("calendarGrid") else {
        return;
    };

    grid.set_inner_html("");
    for tile in &calendar.tiles {
        match create_tile(&document, tile) {
            Ok(el) => {
                let _ = grid.append_child(&el);
            }
            Err(e) => log::warn!("Could not create tile for day {}: {:?}", tile.day, e),
        }
    }

    update_progress(&document, &calendar.progress);
}

fn create_tile(document: &Document, tile: &Tile) -> Result<Element, JsValue> {
    let el = document.create_element("div")?;
    el.set_class_name(&format!("calendar-day {}", tile.status.as_str()));
    el.set_attribute("data-day", &tile.day.to_string())?;
    el.set_attribute("data-url", &tile.url())?;
    el.set_inner_html(&format!(
        "<div class=\"day-number\">{}</div><div class=\"day-status\">{}</div>",
        tile.day,
        tile.status.icon()
    ));

    // Click: navigate or show locked notice
    {
        let action = tile.click();
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| match &action {
            TileAction::Navigate(url) => navigate(url),
            TileAction::ShowLocked(message) => show_locked_message(message),
        });
        el.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref())?;
        closure.forget();
    }

    // Hover lift, open tiles only
    if let Some(transform) = tile.hover_transform() {
        let target = el.clone();
        let enter = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
            set_style(&target, "transform", transform);
        });
        el.add_event_listener_with_callback("mouseenter", enter.as_ref().unchecked_ref())?;
        enter.forget();

        let target = el.clone();
        let leave = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
            clear_style(&target, "transform");
        });
        el.add_event_listener_with_callback("mouseleave", leave.as_ref().unchecked_ref())?;
        leave.forget();
    }

    Ok(el)
}

fn show_locked_message(message: &str) {
    let Some(document) = document() else {
        return;
    };
    if let (Some(modal), Some(text)) = (
        document.get_element_by_id("lockedModal"),
        document.get_element_by_id("lockedMessage"),
    ) {
        text.set_text_content(Some(message));
        let _ = modal.class_list().add_1("show");
    }
}

fn update_progress(document: &Document, progress: &Progress) {
    if let Some(fill) = document.get_element_by_id("progressFill") {
        set_style(&fill, "width", &progress.fill_width());
    }
    if let Some(text) = document.get_element_by_id("progressText") {
        text.set_text_content(Some(&progress.text()));
    }
}
