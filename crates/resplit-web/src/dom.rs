#![forbid(unsafe_code)]

//! Browser host, exported via wasm-bindgen.
//!
//! `document.body.style` is read and written through reflection. Listener
//! changes cannot be made from here without owning JS closures, so they are
//! queued as [`HostCommand`]s; the JS side drains them after every call and
//! applies them with `addEventListener`/`removeEventListener` (the
//! `pointerup` listener with `{ once: true }`).

use std::cell::RefCell;

use js_sys::{Array, Reflect};
use resplit_core::event::{KeyEvent, PointerButton, PointerEvent};
use resplit_core::geometry::Size;
use wasm_bindgen::prelude::*;

use crate::config::SplitViewConfig;
use crate::drag::{CancelReason, DragEffect};
use crate::page::{HostCommand, PageHold, PageHost};
use crate::view::SplitView;

/// Bound on queued host commands; older entries are dropped first.
const MAX_PENDING_COMMANDS: usize = 256;

fn body_style() -> Option<JsValue> {
    let body = web_sys::window()?.document()?.body()?;
    Reflect::get(body.as_ref(), &JsValue::from_str("style")).ok()
}

fn read_style(property: &str) -> String {
    body_style()
        .and_then(|style| Reflect::get(&style, &JsValue::from_str(property)).ok())
        .and_then(|value| value.as_string())
        .unwrap_or_default()
}

fn write_style(property: &str, value: &str) {
    if let Some(style) = body_style() {
        let _ = Reflect::set(
            &style,
            &JsValue::from_str(property),
            &JsValue::from_str(value),
        );
    }
}

thread_local! {
    /// Every `DomPage` shares `document.body`, so they share one hold.
    static BODY_HOLD: RefCell<Option<PageHold>> = const { RefCell::new(None) };
}

/// [`PageHost`] backed by the live document.
#[derive(Debug, Default)]
pub struct DomPage {
    pending: Vec<HostCommand>,
}

impl DomPage {
    fn queue(&mut self, command: HostCommand) {
        if self.pending.len() >= MAX_PENDING_COMMANDS {
            let overflow = self.pending.len() - MAX_PENDING_COMMANDS + 1;
            self.pending.drain(..overflow);
        }
        self.pending.push(command);
    }

    fn drain(&mut self) -> Vec<HostCommand> {
        std::mem::take(&mut self.pending)
    }
}

impl PageHost for DomPage {
    fn cursor(&self) -> String {
        read_style("cursor")
    }

    fn set_cursor(&mut self, value: &str) {
        write_style("cursor", value);
    }

    fn user_select(&self) -> String {
        read_style("userSelect")
    }

    fn set_user_select(&mut self, value: &str) {
        write_style("userSelect", value);
    }

    fn install_drag_listeners(&mut self) {
        self.queue(HostCommand::InstallDragListeners);
    }

    fn remove_drag_listeners(&mut self) {
        self.queue(HostCommand::RemoveDragListeners);
    }

    fn drag_hold(&self) -> Option<PageHold> {
        BODY_HOLD.with(|hold| hold.borrow().clone())
    }

    fn set_drag_hold(&mut self, hold: Option<PageHold>) {
        BODY_HOLD.with(|slot| *slot.borrow_mut() = hold);
    }
}

fn measured(width: f64, height: f64) -> Option<Size> {
    let size = Size::new(width, height);
    (!size.is_empty()).then_some(size)
}

/// Split view driven by DOM events. Region contents stay in the DOM; this
/// object only decides their sizes.
#[wasm_bindgen]
pub struct WebSplitView {
    view: SplitView<(), (), DomPage>,
}

#[wasm_bindgen]
impl WebSplitView {
    /// Build from a JSON config (see `SplitViewConfig`); `undefined` uses the
    /// stacked-panels defaults.
    #[wasm_bindgen(constructor)]
    pub fn new(config_json: Option<String>) -> Result<WebSplitView, JsValue> {
        let config = match config_json {
            Some(json) => SplitViewConfig::from_json(&json)
                .map_err(|err| JsValue::from_str(&err.to_string()))?,
            None => SplitViewConfig::default(),
        };
        Ok(Self {
            view: SplitView::new((), (), config, DomPage::default()),
        })
    }

    /// Returns `true` if the host should call `preventDefault()`.
    #[wasm_bindgen(js_name = pointerDown)]
    pub fn pointer_down(&mut self, pointer_id: u32, button: i16, x: f64, y: f64) -> bool {
        let event = PointerEvent::new(x, y)
            .with_pointer_id(pointer_id)
            .with_button(PointerButton::from_dom(button));
        self.view.pointer_down(&event).prevent_default
    }

    /// Returns `true` if the host should call `preventDefault()`, which is
    /// the case for every move belonging to the active drag.
    #[wasm_bindgen(js_name = pointerMove)]
    pub fn pointer_move(
        &mut self,
        pointer_id: u32,
        x: f64,
        y: f64,
        container_width: f64,
        container_height: f64,
    ) -> bool {
        let event = PointerEvent::new(x, y).with_pointer_id(pointer_id);
        self.view
            .pointer_move(&event, measured(container_width, container_height))
            .prevent_default
    }

    /// Returns `true` if this up ended the drag.
    #[wasm_bindgen(js_name = pointerUp)]
    pub fn pointer_up(&mut self, pointer_id: u32, x: f64, y: f64) -> bool {
        let event = PointerEvent::new(x, y).with_pointer_id(pointer_id);
        matches!(self.view.pointer_up(&event).effect, DragEffect::Ended)
    }

    #[wasm_bindgen(js_name = lostPointerCapture)]
    pub fn lost_pointer_capture(&mut self) -> bool {
        self.cancel(CancelReason::LostPointerCapture)
    }

    pub fn blur(&mut self) -> bool {
        self.cancel(CancelReason::Blur)
    }

    #[wasm_bindgen(js_name = visibilityHidden)]
    pub fn visibility_hidden(&mut self) -> bool {
        self.cancel(CancelReason::VisibilityHidden)
    }

    /// Returns `true` if the host should call `preventDefault()`.
    #[wasm_bindgen(js_name = keyDown)]
    pub fn key_down(
        &mut self,
        key: &str,
        shift: bool,
        alt: bool,
        ctrl: bool,
        meta: bool,
        repeat: bool,
    ) -> bool {
        let event = KeyEvent::from_dom(key, shift, alt, ctrl, meta, repeat);
        self.view.key_down(&event).prevent_default
    }

    #[wasm_bindgen(js_name = setCollapsed)]
    pub fn set_collapsed(&mut self, collapsed: bool) {
        let _ = self.view.set_collapsed(collapsed);
    }

    #[wasm_bindgen(js_name = isDragging)]
    pub fn is_dragging(&self) -> bool {
        self.view.is_dragging()
    }

    /// Stored extent value (a ratio or a pixel count).
    pub fn extent(&self) -> f64 {
        self.view.extent().value()
    }

    /// Frame for the given container size as JSON. A zero size renders from
    /// the stored extent alone.
    #[wasm_bindgen(js_name = frameJson)]
    pub fn frame_json(
        &self,
        container_width: f64,
        container_height: f64,
    ) -> Result<String, JsValue> {
        let frame = self.view.frame(measured(container_width, container_height));
        serde_json::to_string(&frame.snapshot()).map_err(|err| JsValue::from_str(&err.to_string()))
    }

    /// Drain queued listener commands as JSON strings.
    #[wasm_bindgen(js_name = drainHostCommands)]
    pub fn drain_host_commands(&mut self) -> Array {
        let arr = Array::new();
        for command in self.view.host_mut().drain() {
            if let Ok(json) = serde_json::to_string(&command) {
                arr.push(&JsValue::from_str(&json));
            }
        }
        arr
    }

    /// Release any active drag and restore the page. Call before dropping
    /// the JS wrapper.
    pub fn destroy(&mut self) {
        self.view.teardown();
    }
}

impl WebSplitView {
    fn cancel(&mut self, reason: CancelReason) -> bool {
        !self.view.cancel(reason).is_ignored()
    }
}
