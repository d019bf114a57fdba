//! WASM exports for the chat interface
//!
//! Wraps [`ChatState`] with the browser wiring: element lookups, the
//! fetch client, input handling, session management and the config
//! panel. The page constructs one `ChatApp` and calls its exported
//! methods from its `onclick` handlers; everything else runs through
//! listeners the app owns. No failure is allowed to escape into the
//! host page: errors log and render as apology bubbles.

mod dom;
mod http;

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use wasm_bindgen::closure::Closure;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::spawn_local;

use crate::api::ChatRequest;
use crate::config::{ApiConfig, API_URL_KEY, CONVERSATION_KEY};
use crate::state::{generate_session_id, ChatState, ConnectionStatus, InterfaceState, Message};
use crate::storage::ConversationSnapshot;

#[wasm_bindgen]
extern "C" {
    #[wasm_bindgen(js_namespace = console)]
    pub(crate) fn log(s: &str);
    #[wasm_bindgen(js_namespace = console, js_name = warn)]
    pub(crate) fn warn(s: &str);
}

thread_local! {
    static ERROR_HOOKS_INSTALLED: Cell<bool> = Cell::new(false);
}

const APOLOGY: &str = "I apologize, seeker. I am experiencing a temporary disruption \
                       in my wisdom channels. Please try your query again in a moment.";

/// The chat application.
///
/// Exposed to the page as `ChatApp`. The page's buttons call the
/// exported methods; input listeners are wired at construction.
#[wasm_bindgen]
pub struct ChatApp {
    state: Rc<RefCell<ChatState>>,
    // Listener closures are owned here so a future teardown can detach
    // them deterministically.
    _send_click: Option<Closure<dyn FnMut()>>,
    _input: Option<Closure<dyn FnMut()>>,
    _keydown: Option<Closure<dyn FnMut(web_sys::KeyboardEvent)>>,
    _messages_click: Option<Closure<dyn FnMut(web_sys::MouseEvent)>>,
    _sessions_click: Option<Closure<dyn FnMut(web_sys::MouseEvent)>>,
}

#[wasm_bindgen]
impl ChatApp {
    #[wasm_bindgen(constructor)]
    pub fn new() -> ChatApp {
        let mut config = ApiConfig::default();
        config.apply_saved_url(storage_get(API_URL_KEY));

        let session_id = generate_session_id(js_sys::Date::now(), js_sys::Math::random());
        let state = Rc::new(RefCell::new(ChatState::new(session_id, config)));

        install_error_hooks(&state);

        let mut app = ChatApp {
            state,
            _send_click: None,
            _input: None,
            _keydown: None,
            _messages_click: None,
            _sessions_click: None,
        };
        if let Err(e) = app.init() {
            log(&format!("[athena-chat] initialization failed: {}", e));
        }
        app
    }

    fn init(&mut self) -> Result<(), String> {
        self.wire_listeners()?;

        dom::update_connection_dot(ConnectionStatus::Connecting);
        dom::update_send_button(false);

        if !restore_conversation(&self.state) {
            load_latest_history(&self.state);
        }

        // Probe the backend once at boot so the dot reflects reality.
        let state = self.state.clone();
        spawn_local(async move {
            let base = state.borrow().api_config.base_url.clone();
            let status = match http::health_check(&base).await {
                Ok(()) => ConnectionStatus::Connected,
                Err(e) => {
                    log(&format!("[athena-chat] health check failed: {}", e));
                    ConnectionStatus::Disconnected
                }
            };
            state.borrow_mut().connection_status = status;
            dom::update_connection_dot(status);
        });
        Ok(())
    }

    fn wire_listeners(&mut self) -> Result<(), String> {
        let input = dom::message_input().ok_or_else(|| "messageInput not found".to_string())?;

        let send_state = self.state.clone();
        let send_click = Closure::wrap(Box::new(move || {
            send_text(&send_state, dom::input_value());
        }) as Box<dyn FnMut()>);
        if let Some(button) = web_sys::window()
            .and_then(|w| w.document())
            .and_then(|d| d.get_element_by_id("sendButton"))
        {
            button
                .add_event_listener_with_callback("click", send_click.as_ref().unchecked_ref())
                .map_err(|_| "failed to attach send listener".to_string())?;
        }

        let input_state = self.state.clone();
        let on_input = Closure::wrap(Box::new(move || {
            let text = dom::input_value();
            dom::update_char_count(text.chars().count());
            dom::update_send_button(input_state.borrow().can_send(&text));
            dom::autosize_input();
        }) as Box<dyn FnMut()>);
        input
            .add_event_listener_with_callback("input", on_input.as_ref().unchecked_ref())
            .map_err(|_| "failed to attach input listener".to_string())?;

        // Enter sends, Shift+Enter inserts a newline.
        let key_state = self.state.clone();
        let keydown = Closure::wrap(Box::new(move |event: web_sys::KeyboardEvent| {
            if event.key() == "Enter" && !event.shift_key() {
                event.prevent_default();
                send_text(&key_state, dom::input_value());
            }
        }) as Box<dyn FnMut(web_sys::KeyboardEvent)>);
        input
            .add_event_listener_with_callback("keydown", keydown.as_ref().unchecked_ref())
            .map_err(|_| "failed to attach keydown listener".to_string())?;

        // Clarification buttons re-enter the send path. Delegated from
        // the transcript container so restored messages work too.
        let clarify_state = self.state.clone();
        let messages_click = Closure::wrap(Box::new(move |event: web_sys::MouseEvent| {
            if let Some(option) = delegated_target(&event, ".clarification-option") {
                if let Some(text) = option.text_content() {
                    send_text(&clarify_state, text);
                }
            }
        }) as Box<dyn FnMut(web_sys::MouseEvent)>);
        if let Some(area) = web_sys::window()
            .and_then(|w| w.document())
            .and_then(|d| d.get_element_by_id("messagesArea"))
        {
            area.add_event_listener_with_callback(
                "click",
                messages_click.as_ref().unchecked_ref(),
            )
            .map_err(|_| "failed to attach transcript listener".to_string())?;
        }

        let session_state = self.state.clone();
        let sessions_click = Closure::wrap(Box::new(move |event: web_sys::MouseEvent| {
            if let Some(item) = delegated_target(&event, ".session-item") {
                if let Some(id) = item.get_attribute("data-session-id") {
                    dom::close_sessions_modal();
                    load_session_by_id(&session_state, id);
                }
            }
        }) as Box<dyn FnMut(web_sys::MouseEvent)>);
        if let Some(list) = web_sys::window()
            .and_then(|w| w.document())
            .and_then(|d| d.get_element_by_id("sessionsList"))
        {
            list.add_event_listener_with_callback(
                "click",
                sessions_click.as_ref().unchecked_ref(),
            )
            .map_err(|_| "failed to attach sessions listener".to_string())?;
        }

        self._send_click = Some(send_click);
        self._input = Some(on_input);
        self._keydown = Some(keydown);
        self._messages_click = Some(messages_click);
        self._sessions_click = Some(sessions_click);
        Ok(())
    }

    /// Send whatever is in the input box.
    #[wasm_bindgen(js_name = sendMessage)]
    pub fn send_message(&self) {
        send_text(&self.state, dom::input_value());
    }

    /// Send a canned question (the welcome page's wisdom cards).
    #[wasm_bindgen(js_name = askAthena)]
    pub fn ask_athena(&self, question: String) {
        send_text(&self.state, question);
    }

    /// Drop the transcript and start over with a fresh session id.
    #[wasm_bindgen(js_name = startNewChat)]
    pub fn start_new_chat(&self) {
        dom::close_sessions_modal();
        let session_id = generate_session_id(js_sys::Date::now(), js_sys::Math::random());
        self.state.borrow_mut().start_new_session(session_id);
        dom::clear_messages();
        dom::show_interface(InterfaceState::Welcome);
        persist_conversation(&self.state);
        log("[athena-chat] started new chat session");
    }

    /// Open the sessions modal and populate it from the backend.
    #[wasm_bindgen(js_name = showSessionsList)]
    pub fn show_sessions_list(&self) {
        dom::open_sessions_modal();
        let state = self.state.clone();
        spawn_local(async move {
            let config = state.borrow().api_config.clone();
            match http::get_sessions(&config).await {
                Ok(list) => dom::render_sessions(&list.sessions),
                Err(e) => {
                    log(&format!("[athena-chat] failed to load sessions: {}", e));
                    dom::set_sessions_list_html(
                        "<div class=\"sessions-error\">Failed to load conversations</div>",
                    );
                }
            }
        });
    }

    #[wasm_bindgen(js_name = hideSessionsList)]
    pub fn hide_sessions_list(&self) {
        dom::close_sessions_modal();
    }

    /// Replace the transcript with a stored conversation.
    #[wasm_bindgen(js_name = loadSession)]
    pub fn load_session(&self, session_id: String) {
        dom::close_sessions_modal();
        load_session_by_id(&self.state, session_id);
    }

    /// Show or hide the config panel, seeding the URL field.
    #[wasm_bindgen(js_name = toggleConfig)]
    pub fn toggle_config(&self) {
        if let Some(input) = dom::api_url_input() {
            input.set_value(&self.state.borrow().api_config.base_url);
        }
        dom::toggle_config_panel();
    }

    /// Persist the URL from the config panel and close it.
    #[wasm_bindgen(js_name = saveConfig)]
    pub fn save_config(&self) {
        if let Some(input) = dom::api_url_input() {
            let url = input.value().trim().to_string();
            if !url.is_empty() {
                self.state.borrow_mut().api_config.base_url = url.clone();
                storage_set(API_URL_KEY, &url);
                dom::update_connection_dot(ConnectionStatus::Connected);
            }
        }
        dom::toggle_config_panel();
    }

    /// Hit `/healthz` on the URL in the config panel and report the
    /// outcome inline and on the status dot.
    #[wasm_bindgen(js_name = testConnection)]
    pub fn test_connection(&self) {
        let state = self.state.clone();
        dom::set_config_status("<div class=\"config-testing\">Testing connection...</div>");
        spawn_local(async move {
            let base = dom::api_url_input()
                .map(|i| i.value().trim().to_string())
                .filter(|v| !v.is_empty())
                .unwrap_or_else(|| state.borrow().api_config.base_url.clone());
            match http::health_check(&base).await {
                Ok(()) => {
                    state.borrow_mut().connection_status = ConnectionStatus::Connected;
                    dom::update_connection_dot(ConnectionStatus::Connected);
                    dom::set_config_status(
                        "<div class=\"config-success\">Connection successful!</div>",
                    );
                }
                Err(e) => {
                    state.borrow_mut().connection_status = ConnectionStatus::Error;
                    dom::update_connection_dot(ConnectionStatus::Error);
                    dom::set_config_status(&format!(
                        "<div class=\"config-error\">Connection failed: {}</div>",
                        crate::format::escape_html(&e)
                    ));
                }
            }
        });
    }
}

impl Default for ChatApp {
    fn default() -> Self {
        Self::new()
    }
}

/// Walk up from an event target to a matching ancestor, if any.
fn delegated_target(event: &web_sys::MouseEvent, selector: &str) -> Option<web_sys::Element> {
    event
        .target()?
        .dyn_into::<web_sys::Element>()
        .ok()?
        .closest(selector)
        .ok()
        .flatten()
}

fn now_timestamp() -> String {
    let now = js_sys::Date::new_0();
    format!("{:02}:{:02}", now.get_hours(), now.get_minutes())
}

fn storage_get(key: &str) -> Option<String> {
    web_sys::window()?
        .local_storage()
        .ok()
        .flatten()?
        .get_item(key)
        .ok()
        .flatten()
}

fn storage_set(key: &str, value: &str) {
    if let Some(storage) = web_sys::window().and_then(|w| w.local_storage().ok().flatten()) {
        let _ = storage.set_item(key, value);
    }
}

/// The core send path: gate, render the user bubble, post, render the
/// answer or an apology.
fn send_text(state_rc: &Rc<RefCell<ChatState>>, text: String) {
    let request = {
        let mut state = state_rc.borrow_mut();
        if !state.can_send(&text) {
            return;
        }
        let trimmed = text.trim().to_string();
        let user_name = state.user_name.clone();
        let stamped = state
            .add_message(Message::user(trimmed.clone(), user_name), now_timestamp())
            .clone();
        dom::append_message(&stamped);

        state.is_loading = true;
        ChatRequest {
            session_id: state.session_id.clone(),
            message: trimmed,
            title: None,
        }
    };

    dom::show_interface(InterfaceState::Chat);
    dom::clear_input();
    dom::update_char_count(0);
    dom::update_send_button(false);
    dom::set_loading(true);
    persist_conversation(state_rc);

    let state_rc = state_rc.clone();
    spawn_local(async move {
        let config = state_rc.borrow().api_config.clone();
        let result = http::post_chat(&config, &request).await;

        let stamped = {
            let mut state = state_rc.borrow_mut();
            state.is_loading = false;
            let message = match result {
                Ok(response) => {
                    let mut msg = Message::assistant(response.answer);
                    msg.latency_ms = response.latency_ms;
                    msg.data_preview = response.data_preview;
                    msg.sql = response.sql;
                    msg.clarify = response.clarify;
                    msg
                }
                Err(e) => {
                    log(&format!("[athena-chat] chat request failed: {}", e));
                    Message::error(APOLOGY)
                }
            };
            state.add_message(message, now_timestamp()).clone()
        };

        dom::set_loading(false);
        dom::append_message(&stamped);
        dom::focus_input();
        persist_conversation(&state_rc);
    });
}

/// Mirror the transcript into browser storage.
fn persist_conversation(state_rc: &Rc<RefCell<ChatState>>) {
    let snapshot = {
        let state = state_rc.borrow();
        ConversationSnapshot::new(
            state.session_id.clone(),
            state.messages.clone(),
            js_sys::Date::now() as u64,
        )
    };
    storage_set(CONVERSATION_KEY, &snapshot.to_json());
}

/// Restore a stored transcript, if one exists. Returns whether
/// anything was restored.
fn restore_conversation(state_rc: &Rc<RefCell<ChatState>>) -> bool {
    let snapshot = match storage_get(CONVERSATION_KEY).and_then(|s| {
        ConversationSnapshot::from_json(&s)
    }) {
        Some(s) if !s.messages.is_empty() => s,
        _ => return false,
    };

    let messages = {
        let mut state = state_rc.borrow_mut();
        state.session_id = snapshot.session_id;
        for message in snapshot.messages {
            let timestamp = message.timestamp.clone();
            state.add_message(message, timestamp);
        }
        state.messages.clone()
    };

    dom::clear_messages();
    for message in &messages {
        dom::append_message(message);
    }
    dom::show_interface(InterfaceState::Chat);
    log(&format!(
        "[athena-chat] restored {} messages from storage",
        messages.len()
    ));
    true
}

/// Continue the most recent server-side conversation, when there is
/// one. Failures start a fresh session instead of surfacing.
fn load_latest_history(state_rc: &Rc<RefCell<ChatState>>) {
    let state_rc = state_rc.clone();
    spawn_local(async move {
        let config = state_rc.borrow().api_config.clone();
        let latest = match http::get_latest_session(&config).await {
            Ok(latest) => latest,
            Err(e) => {
                log(&format!("[athena-chat] no chat history loaded: {}", e));
                return;
            }
        };
        let session = match latest.session {
            Some(session) if !latest.messages.is_empty() => session,
            _ => return,
        };

        adopt_history(&state_rc, session.session_id, latest.messages);
    });
}

fn load_session_by_id(state_rc: &Rc<RefCell<ChatState>>, session_id: String) {
    let state_rc = state_rc.clone();
    spawn_local(async move {
        let config = state_rc.borrow().api_config.clone();
        match http::get_session_messages(&config, &session_id).await {
            Ok(data) => adopt_history(&state_rc, session_id, data.messages),
            Err(e) => log(&format!("[athena-chat] failed to load session: {}", e)),
        }
    });
}

/// Replace the transcript with server history and re-render it.
fn adopt_history(
    state_rc: &Rc<RefCell<ChatState>>,
    session_id: String,
    history: Vec<crate::api::HistoryMessage>,
) {
    let messages = {
        let mut state = state_rc.borrow_mut();
        let user_name = state.user_name.clone();
        state.start_new_session(session_id);
        for entry in history {
            if let Some(message) = entry.into_message(&user_name) {
                let timestamp = message.timestamp.clone();
                state.add_message(message, timestamp);
            }
        }
        state.messages.clone()
    };

    dom::clear_messages();
    for message in &messages {
        dom::append_message(message);
    }
    if !messages.is_empty() {
        dom::show_interface(InterfaceState::Chat);
    }
    persist_conversation(state_rc);
    log(&format!(
        "[athena-chat] loaded {} messages from history",
        messages.len()
    ));
}

/// Log uncaught errors and rejected promises, clear the loading state
/// and apologize in the transcript instead of leaving a stuck spinner.
/// Installed once per page.
fn install_error_hooks(state_rc: &Rc<RefCell<ChatState>>) {
    ERROR_HOOKS_INSTALLED.with(|installed| {
        if installed.get() {
            return;
        }
        installed.set(true);
        let window = match web_sys::window() {
            Some(w) => w,
            None => return,
        };

        let error_state = state_rc.clone();
        let on_error = Closure::wrap(Box::new(move |event: web_sys::ErrorEvent| {
            warn(&format!("[athena-chat] uncaught error: {}", event.message()));
            recover_from_fault(&error_state);
        }) as Box<dyn FnMut(web_sys::ErrorEvent)>);
        let _ = window.add_event_listener_with_callback("error", on_error.as_ref().unchecked_ref());
        on_error.forget();

        let rejection_state = state_rc.clone();
        let on_rejection = Closure::wrap(Box::new(
            move |_event: web_sys::PromiseRejectionEvent| {
                warn("[athena-chat] unhandled promise rejection");
                recover_from_fault(&rejection_state);
            },
        )
            as Box<dyn FnMut(web_sys::PromiseRejectionEvent)>);
        let _ = window.add_event_listener_with_callback(
            "unhandledrejection",
            on_rejection.as_ref().unchecked_ref(),
        );
        on_rejection.forget();
    });
}

fn recover_from_fault(state_rc: &Rc<RefCell<ChatState>>) {
    let stamped = {
        let mut state = state_rc.borrow_mut();
        if !state.is_loading {
            return;
        }
        state.is_loading = false;
        state.add_message(Message::error(APOLOGY), now_timestamp()).clone()
    };
    dom::set_loading(false);
    dom::append_message(&stamped);
}
