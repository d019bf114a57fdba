//! WASM exports for the shader footer
//!
//! Wraps [`FooterEngine`] with the browser wiring: capability probe,
//! canvas and GL setup, CSS fallback, event listeners and the
//! requestAnimationFrame loop. Construction never throws into the host
//! page; any failure logs and leaves an inert widget behind.

mod dom;
mod gl;
mod logo_switch;

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use wasm_bindgen::closure::Closure;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{HtmlCanvasElement, HtmlElement, HtmlImageElement};

use crate::backend::{css_gradient, BackendKind};
use crate::config::FooterConfig;
use crate::engine::FooterEngine;

use gl::GlState;

#[wasm_bindgen]
extern "C" {
    #[wasm_bindgen(js_namespace = console)]
    pub(crate) fn log(s: &str);
    #[wasm_bindgen(js_namespace = console, js_name = warn)]
    pub(crate) fn warn(s: &str);
}

thread_local! {
    static ERROR_HOOK_INSTALLED: Cell<bool> = Cell::new(false);
}

/// Widget state shared between the event listeners and the frame loop.
struct Inner {
    engine: FooterEngine,
    container: HtmlElement,
    canvas: Option<HtmlCanvasElement>,
    gl: Option<GlState>,
    logo_prefix: String,
}

impl Inner {
    fn pointer_moved(&mut self, client_x: f64, client_y: f64, vw: f64, vh: f64) {
        self.engine.pointer.set_from_client(client_x, client_y, vw, vh);
    }

    fn resize(&mut self) {
        let dims = dom::measure_surface(&self.container);
        self.engine.set_surface(dims);
        // Safe before the drawable exists: nothing to apply yet.
        if let Some(canvas) = &self.canvas {
            dom::apply_surface(canvas, &dims);
            if let Some(gl) = &self.gl {
                gl.set_viewport(dims.device_width, dims.device_height);
            }
        }
    }

    fn logo_element(&self) -> Option<HtmlImageElement> {
        web_sys::window()?
            .document()?
            .get_element_by_id("logoImage")?
            .dyn_into::<HtmlImageElement>()
            .ok()
    }

    fn refresh_logo(&self) {
        if let Some(logo) = self.logo_element() {
            let is_dark = self.engine.current_palette(current_hour()).is_dark;
            logo_switch::update_logo(&logo, &self.logo_prefix, is_dark);
        }
    }
}

fn current_hour() -> u32 {
    js_sys::Date::new_0().get_hours()
}

/// The animated footer widget.
///
/// Exposed to the page as `ShaderFooter`; constructed with an optional
/// options object (see [`FooterConfig`] for recognized keys).
#[wasm_bindgen]
pub struct ShaderFooter {
    inner: Option<Rc<RefCell<Inner>>>,
    // Listener closures are owned here so a future teardown can detach
    // them deterministically.
    _mousemove: Option<Closure<dyn FnMut(web_sys::MouseEvent)>>,
    _touchmove: Option<Closure<dyn FnMut(web_sys::TouchEvent)>>,
    _resize: Option<Closure<dyn FnMut()>>,
    _logo_timer: Option<Closure<dyn FnMut()>>,
}

#[wasm_bindgen]
impl ShaderFooter {
    /// Construct the widget from an optional options object.
    #[wasm_bindgen(constructor)]
    pub fn new(options: JsValue) -> ShaderFooter {
        install_error_hook();

        let config = parse_options(&options);
        let mut widget = ShaderFooter {
            inner: None,
            _mousemove: None,
            _touchmove: None,
            _resize: None,
            _logo_timer: None,
        };
        if let Err(e) = widget.init(config) {
            // Never break the host page: log and stay inert.
            log(&format!("[ac-footer] initialization failed: {}", e));
        }
        widget
    }

    /// Convenience factory mirroring the constructor.
    pub fn create(options: JsValue) -> ShaderFooter {
        ShaderFooter::new(options)
    }

    /// Which backend the widget settled on ("shader", "css"), if any.
    pub fn backend(&self) -> Option<String> {
        let inner = self.inner.as_ref()?;
        inner.borrow().engine.backend().map(|b| {
            match b {
                BackendKind::Shader => "shader",
                BackendKind::Css => "css",
            }
            .to_string()
        })
    }

    fn init(&mut self, config: FooterConfig) -> Result<(), String> {
        let document = web_sys::window()
            .and_then(|w| w.document())
            .ok_or_else(|| "no document".to_string())?;

        let container = dom::resolve_container(&document, &config)
            .ok_or_else(|| "footer container not found".to_string())?;
        dom::apply_config_styles(&container, &config);

        let logo_prefix = crate::logo::resolve_logo_prefix(&dom::collect_page_signals(&document));

        let mut engine = FooterEngine::new(config);
        let probe_ok = gl::detect_webgl_support();
        let backend = engine.select_backend(probe_ok);

        let inner = Rc::new(RefCell::new(Inner {
            engine,
            container,
            canvas: None,
            gl: None,
            logo_prefix,
        }));

        match backend {
            BackendKind::Shader => {
                log("[ac-footer] WebGL supported, initializing shader backend");
                if let Err(e) = setup_shader_backend(&document, &inner) {
                    // Setup failure after a positive probe: one-time
                    // demotion to the CSS gradient.
                    log(&format!("[ac-footer] shader setup failed: {}", e));
                    demote_to_css(&inner);
                    self.start_logo_timer(&inner);
                } else {
                    start_frame_loop(&inner);
                }
            }
            BackendKind::Css => {
                log("[ac-footer] WebGL not supported, using CSS fallback");
                apply_css_backend(&inner);
                self.start_logo_timer(&inner);
            }
        }

        self.wire_listeners(&inner)?;
        self.inner = Some(inner);
        Ok(())
    }

    fn wire_listeners(&mut self, inner: &Rc<RefCell<Inner>>) -> Result<(), String> {
        let window = web_sys::window().ok_or_else(|| "no window".to_string())?;

        let move_inner = inner.clone();
        let mousemove = Closure::wrap(Box::new(move |event: web_sys::MouseEvent| {
            if let (Some(w), Some(h)) = (viewport_width(), viewport_height()) {
                move_inner.borrow_mut().pointer_moved(
                    event.client_x() as f64,
                    event.client_y() as f64,
                    w,
                    h,
                );
            }
            follow_cursor(event.client_x(), event.client_y());
        }) as Box<dyn FnMut(web_sys::MouseEvent)>);
        window
            .add_event_listener_with_callback("mousemove", mousemove.as_ref().unchecked_ref())
            .map_err(|_| "failed to attach mousemove listener".to_string())?;

        let touch_inner = inner.clone();
        let touchmove = Closure::wrap(Box::new(move |event: web_sys::TouchEvent| {
            event.prevent_default();
            if let Some(touch) = event.touches().get(0) {
                if let (Some(w), Some(h)) = (viewport_width(), viewport_height()) {
                    touch_inner.borrow_mut().pointer_moved(
                        touch.client_x() as f64,
                        touch.client_y() as f64,
                        w,
                        h,
                    );
                }
            }
        }) as Box<dyn FnMut(web_sys::TouchEvent)>);
        window
            .add_event_listener_with_callback("touchmove", touchmove.as_ref().unchecked_ref())
            .map_err(|_| "failed to attach touchmove listener".to_string())?;

        let resize_inner = inner.clone();
        let resize = Closure::wrap(Box::new(move || {
            resize_inner.borrow_mut().resize();
        }) as Box<dyn FnMut()>);
        window
            .add_event_listener_with_callback("resize", resize.as_ref().unchecked_ref())
            .map_err(|_| "failed to attach resize listener".to_string())?;

        self._mousemove = Some(mousemove);
        self._touchmove = Some(touchmove);
        self._resize = Some(resize);
        Ok(())
    }

    /// CSS path has no frame loop, so the logo cadence runs on a plain
    /// one-minute interval instead of logical time.
    fn start_logo_timer(&mut self, inner: &Rc<RefCell<Inner>>) {
        inner.borrow().refresh_logo();

        let timer_inner = inner.clone();
        let tick = Closure::wrap(Box::new(move || {
            timer_inner.borrow().refresh_logo();
        }) as Box<dyn FnMut()>);

        if let Some(window) = web_sys::window() {
            let _ = window.set_interval_with_callback_and_timeout_and_arguments_0(
                tick.as_ref().unchecked_ref(),
                60_000,
            );
        }
        self._logo_timer = Some(tick);
    }
}

fn parse_options(options: &JsValue) -> FooterConfig {
    if options.is_undefined() || options.is_null() {
        return FooterConfig::default();
    }
    js_sys::JSON::stringify(options)
        .ok()
        .and_then(|s| s.as_string())
        .map(|json| FooterConfig::from_json(&json))
        .unwrap_or_default()
}

fn viewport_width() -> Option<f64> {
    web_sys::window()?.inner_width().ok()?.as_f64()
}

fn viewport_height() -> Option<f64> {
    web_sys::window()?.inner_height().ok()?.as_f64()
}

/// Keep the optional `#cursor` follower element under the pointer.
fn follow_cursor(client_x: i32, client_y: i32) {
    let cursor = web_sys::window()
        .and_then(|w| w.document())
        .and_then(|d| d.get_element_by_id("cursor"))
        .and_then(|e| e.dyn_into::<HtmlElement>().ok());
    if let Some(cursor) = cursor {
        let style = cursor.style();
        let _ = style.set_property("left", &format!("{}px", client_x));
        let _ = style.set_property("top", &format!("{}px", client_y));
    }
}

fn setup_shader_backend(
    document: &web_sys::Document,
    inner: &Rc<RefCell<Inner>>,
) -> Result<(), String> {
    let mut state = inner.borrow_mut();
    let canvas = dom::create_canvas(document, &state.container)?;
    state.canvas = Some(canvas.clone());
    state.resize();

    let gl = GlState::new(&canvas)?;
    let dims = state.engine.surface();
    gl.set_viewport(dims.device_width, dims.device_height);
    state.gl = Some(gl);
    Ok(())
}

/// Demote a failed shader setup to the CSS gradient, removing the dead
/// drawable so nothing canvas-like lingers without a render loop.
fn demote_to_css(inner: &Rc<RefCell<Inner>>) {
    let mut state = inner.borrow_mut();
    state.engine.fall_back_to_css();
    state.gl = None;
    if let Some(canvas) = state.canvas.take() {
        canvas.remove();
    }
    drop(state);
    apply_css_backend(inner);
}

fn apply_css_backend(inner: &Rc<RefCell<Inner>>) {
    let state = inner.borrow();
    let palette = state.engine.current_palette(current_hour());
    dom::apply_css_gradient(&state.container, &css_gradient(&palette));
}

/// Start the self-rescheduling frame loop.
///
/// One callback per display refresh for the lifetime of the page; each
/// tick advances logical time, re-reads the palette, uploads uniforms
/// and issues the draw. The closure holds itself through an `Rc` cycle,
/// which is exactly the intended page-lifetime ownership.
fn start_frame_loop(inner: &Rc<RefCell<Inner>>) {
    let f: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
    let g = f.clone();
    let loop_inner = inner.clone();

    *g.borrow_mut() = Some(Closure::wrap(Box::new(move || {
        {
            let mut state = loop_inner.borrow_mut();
            let uniforms = state.engine.frame(current_hour());
            if let Some(gl) = &state.gl {
                gl.draw(&uniforms);
            }
            if state.engine.logo_refresh_due() {
                state.refresh_logo();
            }
        }
        request_next_frame(&f);
    }) as Box<dyn FnMut()>));

    request_next_frame(&g);
}

fn request_next_frame(f: &Rc<RefCell<Option<Closure<dyn FnMut()>>>>) {
    if let (Some(window), Some(cb)) = (web_sys::window(), f.borrow().as_ref()) {
        let _ = window.request_animation_frame(cb.as_ref().unchecked_ref());
    }
}

/// Log uncaught errors instead of letting the widget take the page
/// down with it. Installed once per page.
fn install_error_hook() {
    ERROR_HOOK_INSTALLED.with(|installed| {
        if installed.get() {
            return;
        }
        installed.set(true);
        if let Some(window) = web_sys::window() {
            let hook = Closure::wrap(Box::new(|event: web_sys::ErrorEvent| {
                warn(&format!("[ac-footer] uncaught error: {}", event.message()));
            }) as Box<dyn FnMut(web_sys::ErrorEvent)>);
            let _ = window.add_event_listener_with_callback("error", hook.as_ref().unchecked_ref());
            hook.forget();
        }
    });
}
