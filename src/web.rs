//! Browser front-end: a canvas, DOM labels, and pointer/keyboard wiring.
//!
//! The page provides a `<canvas>` and a positioned container for labels.
//! JavaScript calls [`mount`] with their ids and a description of the
//! scene, either as a JSON string or a plain object:
//!
//! ```text
//! {
//!   "objects": [
//!     { "name": "Building A", "position": [0, 1, 1], "size": [2, 2, 2] }
//!   ],
//!   "options": { "transition": { "duration_secs": 1.0 } }
//! }
//! ```
//!
//! Each object gets a `<div class="vantage-label">` inside the container;
//! clicking it focuses the object. An optional `"info_card"` element id
//! names an element that is shown while an object is focused. Label positions are written as CSS
//! pixels, so the container must overlay the canvas exactly.

use std::cell::RefCell;
use std::rc::Rc;

use glam::{Vec2, Vec3};
use serde::Deserialize;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::prelude::wasm_bindgen;
use wasm_bindgen::{JsCast, JsValue};
use web_sys as web;

use crate::error::VantageError;
use crate::input::{InputEvent, MouseButton};
use crate::label::LabelElement;
use crate::options::Options;
use crate::scene::{ObjectId, Scene};
use crate::ViewerEngine;

/// CSS class given to generated label elements.
const LABEL_CLASS: &str = "vantage-label";
/// Wheel pixels per dolly unit (`WheelEvent.deltaMode == 0`).
const PIXELS_PER_SCROLL_LINE: f32 = 100.0;

type SharedEngine = Rc<RefCell<ViewerEngine>>;

fn js_error(err: JsValue) -> VantageError {
    VantageError::Web(format!("{err:?}"))
}

// ── Labels ───────────────────────────────────────────────────────────────

/// An absolutely positioned DOM element used as an object label.
///
/// The engine works in physical pixels; `pixel_ratio` converts between
/// those and CSS pixels.
#[derive(Debug)]
pub struct DomLabel {
    element: web::HtmlElement,
    pixel_ratio: f32,
}

impl DomLabel {
    /// Wrap an existing element.
    #[must_use]
    pub fn from_element(element: web::HtmlElement, pixel_ratio: f32) -> Self {
        let style = element.style();
        let _ = style.set_property("position", "absolute");
        let _ = style.set_property("left", "0px");
        let _ = style.set_property("top", "0px");
        Self {
            element,
            pixel_ratio: pixel_ratio.max(f32::EPSILON),
        }
    }

    /// Create a `<div>` with `text` and append it to `container`.
    ///
    /// # Errors
    ///
    /// Returns [`VantageError::Web`] if the element cannot be created or
    /// appended.
    pub fn create(
        document: &web::Document,
        container: &web::Element,
        text: &str,
        pixel_ratio: f32,
    ) -> Result<Self, VantageError> {
        let element: web::HtmlElement = document
            .create_element("div")
            .map_err(js_error)?
            .dyn_into()
            .map_err(|_| VantageError::Web("label is not an HtmlElement".into()))?;
        element.set_class_name(LABEL_CLASS);
        element.set_text_content(Some(text));
        let _ = container.append_child(&element).map_err(js_error)?;
        Ok(Self::from_element(element, pixel_ratio))
    }

    /// The wrapped element.
    #[must_use]
    pub fn element(&self) -> &web::HtmlElement {
        &self.element
    }
}

impl LabelElement for DomLabel {
    fn set_position(&mut self, pos: Vec2) {
        let css = pos / self.pixel_ratio;
        let style = self.element.style();
        let _ = style.set_property("left", &format!("{:.1}px", css.x));
        let _ = style.set_property("top", &format!("{:.1}px", css.y));
    }

    fn set_visible(&mut self, visible: bool) {
        let display = if visible { "" } else { "none" };
        let _ = self.element.style().set_property("display", display);
    }

    fn rendered_size(&self) -> Vec2 {
        let rect = self.element.get_bounding_client_rect();
        Vec2::new(rect.width() as f32, rect.height() as f32) * self.pixel_ratio
    }
}

// ── Scene description ────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
struct ObjectDesc {
    name: String,
    position: [f32; 3],
    #[serde(default = "unit_size")]
    size: [f32; 3],
}

fn unit_size() -> [f32; 3] {
    [1.0; 3]
}

fn default_true() -> bool {
    true
}

#[derive(Debug, Deserialize)]
struct MountConfig {
    #[serde(default)]
    objects: Vec<ObjectDesc>,
    #[serde(default = "default_true")]
    ground: bool,
    #[serde(default)]
    options: Options,
    /// Id of an element shown while an object is focused.
    #[serde(default)]
    info_card: Option<String>,
}

impl MountConfig {
    fn parse(json: &str) -> Result<Self, VantageError> {
        if json.trim().is_empty() {
            return serde_json::from_str("{}")
                .map_err(|e| VantageError::OptionsParse(e.to_string()));
        }
        serde_json::from_str(json)
            .map_err(|e| VantageError::OptionsParse(e.to_string()))
    }

    fn build_scene(&self) -> Scene {
        let mut scene = if self.ground {
            Scene::with_ground()
        } else {
            Scene::new()
        };
        for desc in &self.objects {
            let _ = scene.add_box(
                &desc.name,
                Vec3::from(desc.position),
                Vec3::from(desc.size),
            );
        }
        scene
    }
}

fn config_text(config: &JsValue) -> Result<String, VantageError> {
    if config.is_undefined() || config.is_null() {
        return Ok(String::new());
    }
    if let Some(text) = config.as_string() {
        return Ok(text);
    }
    js_sys::JSON::stringify(config)
        .map(String::from)
        .map_err(js_error)
}

// ── Entry points ─────────────────────────────────────────────────────────

/// Module initialization: panic hook and console logging.
#[wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Info);
}

/// Mount a viewer on the canvas `canvas_id`, with labels placed inside
/// `label_container_id`. `config` describes the scene and options; it may
/// be `undefined`, a JSON string, or an object.
///
/// # Errors
///
/// Returns an error string if the page elements are missing or the config
/// does not parse. GPU setup failures are logged to the console.
#[wasm_bindgen]
pub fn mount(
    canvas_id: &str,
    label_container_id: &str,
    config: &JsValue,
) -> Result<(), JsValue> {
    let config = config_text(config)
        .and_then(|text| MountConfig::parse(&text))
        .map_err(|e| JsValue::from_str(&e.to_string()))?;
    let page = Page::find(canvas_id, label_container_id, config.info_card.as_deref())
        .map_err(|e| JsValue::from_str(&e.to_string()))?;

    wasm_bindgen_futures::spawn_local(async move {
        if let Err(e) = run(page, config).await {
            log::error!("viewer init failed: {e}");
        }
    });
    Ok(())
}

/// DOM handles the front-end needs.
#[derive(Clone)]
struct Page {
    window: web::Window,
    document: web::Document,
    canvas: web::HtmlCanvasElement,
    labels: web::Element,
    info_card: Option<web::HtmlElement>,
}

impl Page {
    fn find(
        canvas_id: &str,
        label_container_id: &str,
        info_card_id: Option<&str>,
    ) -> Result<Self, VantageError> {
        let window =
            web::window().ok_or_else(|| VantageError::Web("no window".into()))?;
        let document = window
            .document()
            .ok_or_else(|| VantageError::Web("no document".into()))?;
        let canvas = document
            .get_element_by_id(canvas_id)
            .ok_or_else(|| VantageError::Web(format!("no element #{canvas_id}")))?
            .dyn_into::<web::HtmlCanvasElement>()
            .map_err(|_| VantageError::Web(format!("#{canvas_id} is not a canvas")))?;
        let labels = document
            .get_element_by_id(label_container_id)
            .ok_or_else(|| {
                VantageError::Web(format!("no element #{label_container_id}"))
            })?;
        let info_card = match info_card_id {
            Some(id) => Some(
                document
                    .get_element_by_id(id)
                    .ok_or_else(|| VantageError::Web(format!("no element #{id}")))?
                    .dyn_into::<web::HtmlElement>()
                    .map_err(|_| VantageError::Web(format!("#{id} is not an HtmlElement")))?,
            ),
            None => None,
        };
        let page = Self {
            window,
            document,
            canvas,
            labels,
            info_card,
        };
        page.show_info_card(false);
        Ok(page)
    }

    fn show_info_card(&self, visible: bool) {
        if let Some(card) = &self.info_card {
            let display = if visible { "block" } else { "none" };
            let _ = card.style().set_property("display", display);
        }
    }

    fn pixel_ratio(&self) -> f32 {
        (self.window.device_pixel_ratio() as f32).max(1.0)
    }

    /// Match the canvas backing store to its CSS size. Returns the new
    /// size in physical pixels.
    fn fit_canvas(&self) -> (u32, u32) {
        let ratio = self.pixel_ratio();
        let width = ((self.canvas.client_width() as f32) * ratio).max(1.0) as u32;
        let height = ((self.canvas.client_height() as f32) * ratio).max(1.0) as u32;
        self.canvas.set_width(width);
        self.canvas.set_height(height);
        (width, height)
    }

    /// Pointer position in physical canvas pixels.
    fn pointer_px(&self, ev: &web::MouseEvent) -> (f32, f32) {
        let ratio = self.pixel_ratio();
        (ev.offset_x() as f32 * ratio, ev.offset_y() as f32 * ratio)
    }
}

async fn run(page: Page, config: MountConfig) -> Result<(), VantageError> {
    let size = page.fit_canvas();
    let scene = config.build_scene();
    let mut engine = ViewerEngine::new(
        wgpu::SurfaceTarget::Canvas(page.canvas.clone()),
        size,
        scene,
        config.options,
    )
    .await?;
    engine.disable_label_markers();

    let engine = Rc::new(RefCell::new(engine));
    attach_labels(&page, &engine)?;
    wire_pointer(&page, &engine)?;
    wire_keyboard(&page, &engine)?;
    wire_resize(&page, &engine)?;
    start_loop(page, engine);
    Ok(())
}

/// Replace the overlay labels with DOM elements and route their clicks.
fn attach_labels(page: &Page, engine: &SharedEngine) -> Result<(), VantageError> {
    let objects: Vec<(ObjectId, String)> = engine
        .borrow()
        .scene()
        .objects()
        .iter()
        .map(|o| (o.id, o.name.clone()))
        .collect();
    let ratio = page.pixel_ratio();

    for (id, name) in objects {
        let label = DomLabel::create(&page.document, &page.labels, &name, ratio)?;
        let element = label.element().clone();
        engine
            .borrow_mut()
            .register_label(id, &name, Box::new(label));

        let engine = engine.clone();
        let on_click = Closure::wrap(Box::new(move |ev: web::MouseEvent| {
            ev.stop_propagation();
            engine.borrow_mut().handle_label_click(id);
        }) as Box<dyn FnMut(_)>);
        element
            .add_event_listener_with_callback("click", on_click.as_ref().unchecked_ref())
            .map_err(js_error)?;
        on_click.forget();
    }
    Ok(())
}

fn listen<E: wasm_bindgen::convert::FromWasmAbi + 'static>(
    target: &web::EventTarget,
    kind: &str,
    handler: impl FnMut(E) + 'static,
) -> Result<(), VantageError> {
    let closure = Closure::wrap(Box::new(handler) as Box<dyn FnMut(E)>);
    target
        .add_event_listener_with_callback(kind, closure.as_ref().unchecked_ref())
        .map_err(js_error)?;
    closure.forget();
    Ok(())
}

fn send_pointer(
    engine: &SharedEngine,
    page: &Page,
    ev: &web::PointerEvent,
    pressed: Option<bool>,
) {
    let (x, y) = page.pointer_px(ev);
    let mut engine = engine.borrow_mut();
    engine.handle_input(InputEvent::CursorMoved { x, y });
    let (Some(pressed), Some(button)) =
        (pressed, MouseButton::from_dom_index(ev.button()))
    else {
        return;
    };
    engine.handle_input(InputEvent::MouseButton { button, pressed });
}

fn wire_pointer(page: &Page, engine: &SharedEngine) -> Result<(), VantageError> {
    let target: &web::EventTarget = page.canvas.as_ref();

    {
        let (engine, page) = (engine.clone(), page.clone());
        listen(target, "pointerdown", move |ev: web::PointerEvent| {
            let _ = page.canvas.set_pointer_capture(ev.pointer_id());
            send_pointer(&engine, &page, &ev, Some(true));
        })?;
    }
    {
        let (engine, page) = (engine.clone(), page.clone());
        listen(target, "pointermove", move |ev: web::PointerEvent| {
            send_pointer(&engine, &page, &ev, None);
        })?;
    }
    {
        let (engine, page) = (engine.clone(), page.clone());
        listen(target, "pointerup", move |ev: web::PointerEvent| {
            let _ = page.canvas.release_pointer_capture(ev.pointer_id());
            send_pointer(&engine, &page, &ev, Some(false));
        })?;
    }
    {
        let engine = engine.clone();
        listen(target, "pointercancel", move |_: web::PointerEvent| {
            engine.borrow_mut().release_pointer();
        })?;
    }
    listen(target, "contextmenu", |ev: web::MouseEvent| ev.prevent_default())?;

    let engine = engine.clone();
    listen(target, "wheel", move |ev: web::WheelEvent| {
        ev.prevent_default();
        let delta = -ev.delta_y() as f32;
        let delta = if ev.delta_mode() == web::WheelEvent::DOM_DELTA_PIXEL {
            delta / PIXELS_PER_SCROLL_LINE
        } else {
            delta
        };
        engine
            .borrow_mut()
            .handle_input(InputEvent::Scroll { delta });
    })
}

fn wire_keyboard(page: &Page, engine: &SharedEngine) -> Result<(), VantageError> {
    let target: &web::EventTarget = page.window.as_ref();
    {
        let engine = engine.clone();
        listen(target, "keydown", move |ev: web::KeyboardEvent| {
            if ev.repeat() {
                return;
            }
            if engine.borrow_mut().handle_key_press(&ev.code()) {
                ev.prevent_default();
            }
        })?;
    }
    let engine = engine.clone();
    listen(target, "blur", move |_: web::Event| {
        engine.borrow_mut().release_pointer();
    })
}

fn wire_resize(page: &Page, engine: &SharedEngine) -> Result<(), VantageError> {
    let target: &web::EventTarget = page.window.as_ref();
    let (engine, page) = (engine.clone(), page.clone());
    listen(target, "resize", move |_: web::Event| {
        let (width, height) = page.fit_canvas();
        engine.borrow_mut().resize(width, height);
    })
}

fn request_frame(window: &web::Window, tick: &Rc<RefCell<Option<Closure<dyn FnMut()>>>>) {
    if let Some(callback) = tick.borrow().as_ref() {
        let _ = window.request_animation_frame(callback.as_ref().unchecked_ref());
    }
}

/// Drive update and render from `requestAnimationFrame`.
fn start_loop(page: Page, engine: SharedEngine) {
    let tick: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
    let tick_next = tick.clone();
    let window = page.window.clone();

    *tick.borrow_mut() = Some(Closure::wrap(Box::new(move || {
        {
            let mut engine = engine.borrow_mut();
            let _ = engine.update();
            match engine.render() {
                Ok(()) => {}
                Err(wgpu::SurfaceError::Outdated | wgpu::SurfaceError::Lost) => {
                    engine.reconfigure();
                }
                Err(e) => log::error!("render error: {e:?}"),
            }
            for event in engine.drain_events() {
                log::debug!("{event:?}");
                if let Some(visible) = event.info_card_visible() {
                    page.show_info_card(visible);
                }
            }
        }
        request_frame(&page.window, &tick_next);
    }) as Box<dyn FnMut()>));

    request_frame(&window, &tick);
}
