//! WebAssembly start hook and the helpers exported to page scripts.
//!
//! The helpers are reachable two ways: as ES module exports
//! (`import { showToast } from ...`) and on `window.TaskManager` for classic
//! `<script>` tags, e.g. `TaskManager.Storage.get("filters", {})`.

use std::rc::Rc;

use wasm_bindgen::prelude::*;

use crate::browser::{BrowserDom, LocalStore, describe, local_offset};
use crate::controller;
use crate::debounce::Debounced;
use crate::format::format_date;
use crate::globals::{Export, GLOBAL_NAME, STORAGE_NAMESPACE};
use crate::storage::Storage;
use crate::toast::{self, Severity};

#[wasm_bindgen(inline_js = "export function collect_args(inner) { return function (...args) { inner(args); }; }")]
extern "C" {
    /// Wrap `inner(args: Array)` as a variadic JS function.
    fn collect_args(inner: &JsValue) -> js_sys::Function;
}

#[wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();
    if let Err(err) = console_log::init_with_level(log::Level::Info) {
        log::debug!("console logger not installed: {err}");
    }

    let Some(dom) = BrowserDom::new() else {
        return;
    };
    if let Err(err) = publish_globals(dom.window()) {
        log::error!("could not publish {GLOBAL_NAME}: {}", describe(&err));
    }

    let dom = Rc::new(dom);
    if dom.document().ready_state() != "loading" {
        run(&dom);
        return;
    }

    let dom_for_ready = Rc::clone(&dom);
    let on_ready = Closure::once_into_js(move || run(&dom_for_ready));
    if let Err(err) = dom
        .document()
        .add_event_listener_with_callback("DOMContentLoaded", on_ready.unchecked_ref())
    {
        log::error!("could not wait for DOMContentLoaded: {}", describe(&err));
    }
}

fn run(dom: &Rc<BrowserDom>) {
    controller::initialize(dom, &Rc::new(LocalStore));
}

/// Attach `window.TaskManager` with the same helpers the module exports.
fn publish_globals(window: &web_sys::Window) -> Result<(), JsValue> {
    let global = js_sys::Object::new();
    let storage = js_sys::Object::new();
    for export in Export::ALL {
        let target = if export.namespace().is_some() { &storage } else { &global };
        js_sys::Reflect::set(target, &JsValue::from_str(export.name()), &export_function(export))?;
    }
    js_sys::Reflect::set(&global, &JsValue::from_str(STORAGE_NAMESPACE), &storage)?;
    js_sys::Reflect::set(window, &JsValue::from_str(GLOBAL_NAME), &global)?;
    Ok(())
}

fn export_function(export: Export) -> JsValue {
    match export {
        Export::ShowToast => Closure::<dyn Fn(String, Option<String>)>::new(|message: String, kind: Option<String>| {
            show_toast(&message, kind);
        })
        .into_js_value(),
        Export::FormatDate => {
            Closure::<dyn Fn(String) -> String>::new(|input: String| format_date_js(&input)).into_js_value()
        }
        Export::Debounce => Closure::<dyn Fn(js_sys::Function, u32) -> Result<js_sys::Function, JsValue>>::new(
            |func: js_sys::Function, wait: u32| debounce(func, wait),
        )
        .into_js_value(),
        Export::StorageGet => Closure::<dyn Fn(String, JsValue) -> JsValue>::new(|key: String, default: JsValue| {
            storage_get(&key, default)
        })
        .into_js_value(),
        Export::StorageSet => {
            Closure::<dyn Fn(String, JsValue) -> bool>::new(|key: String, value: JsValue| storage_set(&key, value))
                .into_js_value()
        }
        Export::StorageRemove => {
            Closure::<dyn Fn(String) -> bool>::new(|key: String| storage_remove(&key)).into_js_value()
        }
    }
}

/// Show a toast. `kind` is one of `info`, `warning`, `success`, `danger`.
#[wasm_bindgen(js_name = showToast)]
pub fn show_toast(message: &str, kind: Option<String>) {
    let Some(dom) = BrowserDom::new() else {
        return;
    };
    let severity = kind.as_deref().map_or(Severity::Info, Severity::parse);
    let lifetime_ms = controller::load_config(&dom).toast_lifetime_ms;
    toast::show(&Rc::new(dom), message, severity, lifetime_ms);
}

/// Format a date string as `Mar 7, 2025` in local time, or `Invalid Date`.
#[wasm_bindgen(js_name = formatDate)]
pub fn format_date_js(input: &str) -> String {
    format_date(input, local_offset()).unwrap_or_else(|| "Invalid Date".to_owned())
}

/// Wrap `func` so bursts of calls within `wait` ms collapse into one trailing call.
#[wasm_bindgen]
pub fn debounce(func: js_sys::Function, wait: u32) -> Result<js_sys::Function, JsValue> {
    let dom = BrowserDom::new().ok_or_else(|| JsValue::from_str("debounce needs a window"))?;
    let debounced = Debounced::new(Rc::new(dom), wait, move |args: js_sys::Array| {
        if let Err(err) = func.apply(&JsValue::NULL, &args) {
            log::error!("debounced function threw: {}", describe(&err));
        }
    });
    let inner = Closure::<dyn FnMut(js_sys::Array)>::new(move |args: js_sys::Array| debounced.call(args)).into_js_value();
    Ok(collect_args(&inner))
}

/// Read a JSON value, or `default` (null when omitted) if missing or unreadable.
#[wasm_bindgen(js_name = storageGet)]
pub fn storage_get(key: &str, default: JsValue) -> JsValue {
    let default = if default.is_undefined() { JsValue::NULL } else { default };
    let Some(value) = Storage::new(LocalStore).get::<Option<serde_json::Value>>(key, None) else {
        return default;
    };
    match js_sys::JSON::parse(&value.to_string()) {
        Ok(parsed) => parsed,
        Err(err) => {
            log::error!("error decoding storage key {key:?}: {}", describe(&err));
            default
        }
    }
}

/// Store any JSON-serializable value. Returns whether the write landed.
#[wasm_bindgen(js_name = storageSet)]
pub fn storage_set(key: &str, value: JsValue) -> bool {
    let text = match js_sys::JSON::stringify(&value) {
        Ok(text) => text.as_string(),
        Err(err) => {
            log::error!("error encoding storage key {key:?}: {}", describe(&err));
            return false;
        }
    };
    let Some(text) = text else {
        log::error!("error encoding storage key {key:?}: value is not serializable");
        return false;
    };
    match serde_json::from_str::<serde_json::Value>(&text) {
        Ok(json) => Storage::new(LocalStore).set(key, &json),
        Err(err) => {
            log::error!("error encoding storage key {key:?}: {err}");
            false
        }
    }
}

/// Delete a stored value. Returns whether the removal landed.
#[wasm_bindgen(js_name = storageRemove)]
pub fn storage_remove(key: &str) -> bool {
    Storage::new(LocalStore).remove(key)
}
