use crate::engine::Size;
use anyhow::{anyhow, Result};
use serde::de::DeserializeOwned;
use std::future::Future;
use wasm_bindgen::closure::{Closure, WasmClosureFnOnce};
use wasm_bindgen::convert::FromWasmAbi;
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;

#[rustfmt::skip]
use web_sys::{
    AddEventListenerOptions,
    CanvasRenderingContext2d,
    Document,
    Element,
    EventTarget,
    HtmlAudioElement,
    HtmlCanvasElement,
    HtmlElement,
    HtmlImageElement,
    Response,
    Window,
};

// ==================== Constants ====================
// Constants related to HTML elements
mod html {
    pub const CANVAS_ID: &str = "gameCanvas";
    pub const CONTEXT_2D: &str = "2d";
}

/// requestAnimationFrame callback, receives the frame timestamp in ms
pub type LoopClosure = Closure<dyn FnMut(f64)>;

// ==================== Handles ====================
pub fn window() -> Result<Window> {
    web_sys::window().ok_or_else(|| anyhow!("Window not found"))
}

pub fn document() -> Result<Document> {
    window()?
        .document()
        .ok_or_else(|| anyhow!("No Document Found"))
}

pub fn canvas() -> Result<HtmlCanvasElement> {
    document()?
        .get_element_by_id(html::CANVAS_ID)
        .ok_or_else(|| anyhow!("No Canvas Element found with ID : '{}'", html::CANVAS_ID))?
        .dyn_into::<HtmlCanvasElement>()
        .map_err(|element| anyhow!("Error converting {:#?} to HtmlCanvasElement", element))
}

pub fn context() -> Result<CanvasRenderingContext2d> {
    canvas()?
        .get_context(html::CONTEXT_2D)
        // Result<Option<Object>, JsValue>
        // - JsValue error -> anyhow
        // - None -> anyhow
        .map_err(|js_value| anyhow!("Error getting context : {:#?}", js_value))?
        .ok_or_else(|| anyhow!("No 2d context found"))?
        .dyn_into::<CanvasRenderingContext2d>()
        .map_err(|element| {
            anyhow!(
                "Error converting {:#?} to CanvasRenderingContext2d",
                element
            )
        })
}

pub fn element(id: &str) -> Result<Element> {
    document()?
        .get_element_by_id(id)
        .ok_or_else(|| anyhow!("No Element found with ID : '{}'", id))
}

pub fn html_element(id: &str) -> Result<HtmlElement> {
    element(id)?
        .dyn_into::<HtmlElement>()
        .map_err(|element| anyhow!("Error converting {:#?} to HtmlElement", element))
}

pub fn create_html_image_element() -> Result<HtmlImageElement> {
    HtmlImageElement::new()
        .map_err(|err| anyhow!("Could not create image element : {:#?}", err))
}

pub fn create_audio_element(source: &str) -> Result<HtmlAudioElement> {
    HtmlAudioElement::new_with_src(source)
        .map_err(|err| anyhow!("Could not create audio element for {} : {:#?}", source, err))
}

/// Full viewport size, the canvas is stretched to cover it
pub fn viewport_size() -> Result<Size> {
    let window = window()?;
    let width = window
        .inner_width()
        .map_err(|err| anyhow!("Could not read inner width : {:#?}", err))?
        .as_f64()
        .ok_or_else(|| anyhow!("Inner width is not a number"))?;
    let height = window
        .inner_height()
        .map_err(|err| anyhow!("Could not read inner height : {:#?}", err))?
        .as_f64()
        .ok_or_else(|| anyhow!("Inner height is not a number"))?;
    Ok(Size { width, height })
}

/// Milliseconds on the same clock requestAnimationFrame reports
pub fn now() -> Result<f64> {
    Ok(window()?
        .performance()
        .ok_or_else(|| anyhow!("Performance object not found"))?
        .now())
}

// ==================== Closures & scheduling ====================
pub fn closure_once<F, A, R>(f: F) -> Closure<F::FnMut>
where
    F: 'static + WasmClosureFnOnce<A, R>,
{
    Closure::once(f)
}

pub fn create_raf_closure(f: impl FnMut(f64) + 'static) -> LoopClosure {
    Closure::new(f)
}

pub fn request_animation_frame(callback: &LoopClosure) -> Result<i32> {
    window()?
        .request_animation_frame(callback.as_ref().unchecked_ref())
        .map_err(|err| anyhow!("Cannot request animation frame {:#?}", err))
}

pub fn spawn_local<F>(future: F)
where
    F: Future<Output = ()> + 'static,
{
    wasm_bindgen_futures::spawn_local(future);
}

/// Runs `callback` every `timeout_ms`, for the lifetime of the page
pub fn set_interval(timeout_ms: i32, callback: impl FnMut() + 'static) -> Result<i32> {
    let closure = Closure::<dyn FnMut()>::new(callback);
    let handle = window()?
        .set_interval_with_callback_and_timeout_and_arguments_0(
            closure.as_ref().unchecked_ref(),
            timeout_ms,
        )
        .map_err(|err| anyhow!("Cannot set interval {:#?}", err))?;
    closure.forget();
    Ok(handle)
}

pub fn set_timeout(timeout_ms: i32, callback: impl FnOnce() + 'static) -> Result<i32> {
    let callback = Closure::once_into_js(callback);
    window()?
        .set_timeout_with_callback_and_timeout_and_arguments_0(callback.unchecked_ref(), timeout_ms)
        .map_err(|err| anyhow!("Cannot set timeout {:#?}", err))
}

/// Runs `callback` once the page `load` event has fired, right away if it
/// already has
pub fn on_page_load(callback: impl FnOnce() + 'static) -> Result<()> {
    if document()?.ready_state() == "complete" {
        callback();
        return Ok(());
    }
    let listener = Closure::once_into_js(move |_event: web_sys::Event| callback());
    window()?
        .add_event_listener_with_callback("load", listener.unchecked_ref())
        .map_err(|err| anyhow!("Cannot listen for load {:#?}", err))
}

// ==================== Events ====================
/// Attach `handler` to `event` on `target`; the listener lives as long as the page
pub fn add_event_listener<E>(
    target: &EventTarget,
    event: &str,
    handler: impl FnMut(E) + 'static,
) -> Result<()>
where
    E: FromWasmAbi + 'static,
{
    let closure = Closure::<dyn FnMut(E)>::new(handler);
    target
        .add_event_listener_with_callback(event, closure.as_ref().unchecked_ref())
        .map_err(|err| anyhow!("Cannot listen for {} : {:#?}", event, err))?;
    closure.forget();
    Ok(())
}

/// Dragging a finger over the page must not scroll it. The listener has to be
/// non-passive or preventDefault is ignored.
pub fn prevent_touch_scroll() -> Result<()> {
    let options = AddEventListenerOptions::new();
    options.set_passive(false);
    let closure = Closure::<dyn FnMut(web_sys::TouchEvent)>::new(|event: web_sys::TouchEvent| {
        event.prevent_default();
    });
    document()?
        .add_event_listener_with_callback_and_add_event_listener_options(
            "touchmove",
            closure.as_ref().unchecked_ref(),
            &options,
        )
        .map_err(|err| anyhow!("Cannot suppress touch scrolling {:#?}", err))?;
    closure.forget();
    Ok(())
}

// ==================== Page ====================
/// Blocking modal, returns once the user dismisses it
pub fn alert(message: &str) -> Result<()> {
    window()?
        .alert_with_message(message)
        .map_err(|err| anyhow!("Cannot show alert {:#?}", err))
}

pub fn reload() -> Result<()> {
    window()?
        .location()
        .reload()
        .map_err(|err| anyhow!("Cannot reload page {:#?}", err))
}

// ==================== Fetch ====================
pub async fn fetch_json<T>(json_path: &str) -> Result<T>
where
    T: DeserializeOwned,
{
    let resp_value = fetch_with_str(json_path).await?;
    let resp: Response = resp_value
        .dyn_into()
        .map_err(|element| anyhow!("error converting [{:#?}] to Response", element))?;
    if !resp.ok() {
        return Err(anyhow!("{} returned status {}", json_path, resp.status()));
    }
    let json = resp
        .json()
        .map_err(|err| anyhow!("Could not get JSON from response [{:#?}]", err))?;

    let json_value = JsFuture::from(json)
        .await
        .map_err(|err| anyhow!("error fetching [{:#?}]", err))?;

    serde_wasm_bindgen::from_value(json_value)
        .map_err(|err| anyhow!("error converting response : {:#?}", err))
}

async fn fetch_with_str(resource: &str) -> Result<JsValue> {
    let resp = window()?.fetch_with_str(resource);

    JsFuture::from(resp)
        .await
        .map_err(|err| anyhow!("error fetching : {:#?}", err))
}
