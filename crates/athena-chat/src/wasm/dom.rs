//! DOM glue for the chat page
//!
//! Element lookups and mutations against the documented page ids:
//! `welcomeState`, `chatState`, `messagesArea`, `messageInput`,
//! `sendButton`, `charCount`, `loadingOverlay`, `sessionsModal`,
//! `sessionsList`, `configPanel`, `apiUrl`, `configStatus`, plus the
//! `.connection-dot` indicator. Missing elements are tolerated; every
//! mutation is a no-op when its target is absent.

use wasm_bindgen::JsCast;
use web_sys::{
    Document, Element, HtmlButtonElement, HtmlElement, HtmlInputElement, HtmlTextAreaElement,
};

use crate::api::SessionInfo;
use crate::format;
use crate::state::{ConnectionStatus, InterfaceState, Message};

fn document() -> Option<Document> {
    web_sys::window()?.document()
}

fn by_id(id: &str) -> Option<Element> {
    document()?.get_element_by_id(id)
}

fn html_by_id(id: &str) -> Option<HtmlElement> {
    by_id(id)?.dyn_into::<HtmlElement>().ok()
}

pub fn message_input() -> Option<HtmlTextAreaElement> {
    by_id("messageInput")?.dyn_into::<HtmlTextAreaElement>().ok()
}

pub fn input_value() -> String {
    message_input().map(|i| i.value()).unwrap_or_default()
}

pub fn clear_input() {
    if let Some(input) = message_input() {
        input.set_value("");
        let _ = input.style().set_property("height", "auto");
    }
}

/// Grow the textarea with its content.
pub fn autosize_input() {
    if let Some(input) = message_input() {
        let _ = input.style().set_property("height", "auto");
        let _ = input
            .style()
            .set_property("height", &format!("{}px", input.scroll_height()));
    }
}

pub fn focus_input() {
    if let Some(input) = message_input() {
        let _ = input.focus();
    }
}

pub fn update_char_count(length: usize) {
    if let Some(el) = by_id("charCount") {
        el.set_text_content(Some(&length.to_string()));
    }
}

pub fn update_send_button(enabled: bool) {
    if let Some(button) = by_id("sendButton").and_then(|e| e.dyn_into::<HtmlButtonElement>().ok()) {
        button.set_disabled(!enabled);
        let _ = button
            .style()
            .set_property("opacity", if enabled { "1" } else { "0.6" });
    }
}

/// Swap the two page layouts.
pub fn show_interface(state: InterfaceState) {
    let (welcome, chat) = match state {
        InterfaceState::Welcome => ("flex", "none"),
        InterfaceState::Chat => ("none", "flex"),
    };
    if let Some(el) = html_by_id("welcomeState") {
        let _ = el.style().set_property("display", welcome);
    }
    if let Some(el) = html_by_id("chatState") {
        let _ = el.style().set_property("display", chat);
    }
}

pub fn set_loading(loading: bool) {
    if let Some(overlay) = by_id("loadingOverlay") {
        let classes = overlay.class_list();
        let _ = if loading {
            classes.add_1("show")
        } else {
            classes.remove_1("show")
        };
    }
}

pub fn update_connection_dot(status: ConnectionStatus) {
    let dot = document()
        .and_then(|d| d.query_selector(".connection-dot").ok().flatten())
        .and_then(|e| e.dyn_into::<HtmlElement>().ok());
    if let Some(dot) = dot {
        dot.set_class_name(&format!("connection-dot {}", status.css_class()));
        dot.set_title(status.tooltip());
    }
}

/// Append one transcript entry and keep the view pinned to the bottom.
pub fn append_message(message: &Message) {
    let area = match html_by_id("messagesArea") {
        Some(area) => area,
        None => return,
    };
    let element = match document().and_then(|d| d.create_element("div").ok()) {
        Some(el) => el,
        None => return,
    };
    element.set_class_name(format::message_css_class(message));
    element.set_inner_html(&format::message_element_html(message));
    let _ = area.append_child(&element);
    scroll_to_bottom();
}

pub fn clear_messages() {
    if let Some(area) = by_id("messagesArea") {
        area.set_inner_html("");
    }
}

pub fn scroll_to_bottom() {
    if let Some(area) = html_by_id("messagesArea") {
        area.set_scroll_top(area.scroll_height());
    }
}

// ---- Sessions modal ----------------------------------------------------

pub fn open_sessions_modal() {
    if let Some(modal) = by_id("sessionsModal") {
        let _ = modal.class_list().add_1("show");
    }
    set_sessions_list_html("<div class=\"sessions-loading\">Loading conversations...</div>");
}

pub fn close_sessions_modal() {
    if let Some(modal) = by_id("sessionsModal") {
        let _ = modal.class_list().remove_1("show");
    }
}

pub fn set_sessions_list_html(html: &str) {
    if let Some(list) = by_id("sessionsList") {
        list.set_inner_html(html);
    }
}

/// Render the sessions list, one clickable row per conversation with
/// its id in `data-session-id`.
pub fn render_sessions(sessions: &[SessionInfo]) {
    if sessions.is_empty() {
        set_sessions_list_html("<div class=\"sessions-empty\">No previous conversations found</div>");
        return;
    }
    let html: String = sessions
        .iter()
        .map(|session| {
            let title = session.title.as_deref().unwrap_or("Untitled Chat");
            let updated = session.updated_at.as_deref().unwrap_or("");
            format!(
                "<div class=\"session-item\" data-session-id=\"{}\">\
                 <div class=\"session-title\">{}</div>\
                 <div class=\"session-date\">{}</div>\
                 </div>",
                format::escape_html(&session.session_id),
                format::escape_html(title),
                format::escape_html(updated)
            )
        })
        .collect();
    set_sessions_list_html(&html);
}

// ---- Config panel ------------------------------------------------------

pub fn toggle_config_panel() {
    if let Some(panel) = by_id("configPanel") {
        let classes = panel.class_list();
        let _ = if classes.contains("show") {
            classes.remove_1("show")
        } else {
            classes.add_1("show")
        };
    }
}

pub fn api_url_input() -> Option<HtmlInputElement> {
    by_id("apiUrl")?.dyn_into::<HtmlInputElement>().ok()
}

pub fn set_config_status(html: &str) {
    if let Some(status) = by_id("configStatus") {
        status.set_inner_html(html);
    }
}
