//! `web-sys` adapters for the live document and `localStorage`.
//!
//! Every DOM call that can throw is funneled through [`check`], which logs the
//! exception and hands back `None`; callers then skip whatever depended on it.

use gloo_timers::callback::Timeout;
use time::{Date, Month, OffsetDateTime, UtcOffset};
use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{
    Document, Element, Event, HtmlElement, HtmlFormElement, HtmlInputElement, IntersectionObserver,
    IntersectionObserverEntry, IntersectionObserverInit, NodeList, Window,
};

use crate::dom::{EventControl, EventKind, IntersectionOptions, Listener, PageDom, Target, Timers};
use crate::error::StorageError;
use crate::storage::KeyValueStore;

/// Human-readable text for a thrown JS value.
pub fn describe(err: &JsValue) -> String {
    if let Some(error) = err.dyn_ref::<js_sys::Error>() {
        return String::from(error.message());
    }
    err.as_string().unwrap_or_else(|| format!("{err:?}"))
}

fn check<T>(context: &str, result: Result<T, JsValue>) -> Option<T> {
    match result {
        Ok(value) => Some(value),
        Err(err) => {
            log::warn!("{context} failed: {}", describe(&err));
            None
        }
    }
}

fn elements(list: &NodeList) -> Vec<Element> {
    (0..list.length())
        .filter_map(|i| list.get(i))
        .filter_map(|node| node.dyn_ref::<Element>().cloned())
        .collect()
}

fn local_today() -> Result<Date, String> {
    let now = js_sys::Date::new_0();
    let year = i32::try_from(now.get_full_year()).map_err(|e| e.to_string())?;
    let month = u8::try_from(now.get_month() + 1).map_err(|e| e.to_string())?;
    let month = Month::try_from(month).map_err(|e| e.to_string())?;
    let day = u8::try_from(now.get_date()).map_err(|e| e.to_string())?;
    Date::from_calendar_date(year, month, day).map_err(|e| e.to_string())
}

/// The client's current UTC offset.
#[must_use]
pub fn local_offset() -> UtcOffset {
    // getTimezoneOffset is UTC minus local, in minutes.
    let minutes = js_sys::Date::new_0().get_timezone_offset();
    #[allow(clippy::cast_possible_truncation)]
    let seconds = (-minutes * 60.0).round() as i32;
    match UtcOffset::from_whole_seconds(seconds) {
        Ok(offset) => offset,
        Err(err) => {
            log::warn!("local offset unavailable: {err}");
            UtcOffset::UTC
        }
    }
}

struct BrowserEvent(Event);

impl EventControl for BrowserEvent {
    fn prevent_default(&self) {
        self.0.prevent_default();
    }

    fn stop_propagation(&self) {
        self.0.stop_propagation();
    }
}

/// The current window's document.
pub struct BrowserDom {
    window: Window,
    document: Document,
}

impl BrowserDom {
    /// `None` outside a window context (workers, SSR).
    #[must_use]
    pub fn new() -> Option<Self> {
        let window = web_sys::window()?;
        let document = window.document()?;
        Some(Self { window, document })
    }

    #[must_use]
    pub fn window(&self) -> &Window {
        &self.window
    }

    #[must_use]
    pub fn document(&self) -> &Document {
        &self.document
    }
}

impl Timers for BrowserDom {
    fn set_timeout(&self, delay_ms: u32, callback: Box<dyn FnOnce()>) {
        Timeout::new(delay_ms, callback).forget();
    }
}

impl PageDom for BrowserDom {
    type Node = Element;

    fn find(&self, target: Target<'_>) -> Option<Element> {
        check("querySelector", self.document.query_selector(&target.css())).flatten()
    }

    fn find_all(&self, target: Target<'_>) -> Vec<Element> {
        check("querySelectorAll", self.document.query_selector_all(&target.css()))
            .map(|list| elements(&list))
            .unwrap_or_default()
    }

    fn find_within(&self, scope: &Element, target: Target<'_>) -> Option<Element> {
        check("querySelector", scope.query_selector(&target.css())).flatten()
    }

    fn closest(&self, node: &Element, target: Target<'_>) -> Option<Element> {
        check("closest", node.closest(&target.css())).flatten()
    }

    fn root(&self) -> Option<Element> {
        self.document.document_element()
    }

    fn body(&self) -> Option<Element> {
        self.document.body().map(Element::from)
    }

    fn attribute(&self, node: &Element, name: &str) -> Option<String> {
        node.get_attribute(name)
    }

    fn set_attribute(&self, node: &Element, name: &str, value: &str) {
        check("setAttribute", node.set_attribute(name, value));
    }

    fn set_class_name(&self, node: &Element, class_name: &str) {
        node.set_class_name(class_name);
    }

    fn add_class(&self, node: &Element, class: &str) {
        check("classList.add", node.class_list().add_1(class));
    }

    fn remove_class(&self, node: &Element, class: &str) {
        check("classList.remove", node.class_list().remove_1(class));
    }

    fn set_style(&self, node: &Element, property: &str, value: &str) {
        let Some(element) = node.dyn_ref::<HtmlElement>() else {
            return;
        };
        let style = element.style();
        if value.is_empty() {
            check("style.removeProperty", style.remove_property(property));
        } else {
            check("style.setProperty", style.set_property(property, value));
        }
    }

    fn set_inner_html(&self, node: &Element, html: &str) {
        node.set_inner_html(html);
    }

    fn set_text(&self, node: &Element, text: &str) {
        node.set_text_content(Some(text));
    }

    fn value(&self, node: &Element) -> String {
        node.dyn_ref::<HtmlInputElement>()
            .map(HtmlInputElement::value)
            .unwrap_or_default()
    }

    fn set_custom_validity(&self, node: &Element, message: &str) {
        if let Some(input) = node.dyn_ref::<HtmlInputElement>() {
            input.set_custom_validity(message);
        }
    }

    fn check_validity(&self, form: &Element) -> bool {
        form.dyn_ref::<HtmlFormElement>()
            .is_none_or(HtmlFormElement::check_validity)
    }

    fn click(&self, node: &Element) {
        if let Some(element) = node.dyn_ref::<HtmlElement>() {
            element.click();
        }
    }

    fn create_element(&self, tag: &str) -> Option<Element> {
        check("createElement", self.document.create_element(tag))
    }

    fn append_child(&self, parent: &Element, child: &Element) {
        check("appendChild", parent.append_child(child));
    }

    fn remove(&self, node: &Element) {
        node.remove();
    }

    fn listen(&self, node: &Element, kind: EventKind, mut listener: Listener) {
        let closure = Closure::<dyn FnMut(Event)>::new(move |event: Event| {
            let event = BrowserEvent(event);
            let control: &dyn EventControl = &event;
            listener(control);
        });
        let registered = check(
            "addEventListener",
            node.add_event_listener_with_callback(kind.dom_name(), closure.as_ref().unchecked_ref()),
        );
        if registered.is_some() {
            // Handlers live as long as the page.
            closure.forget();
        }
    }

    fn observe_intersection(
        &self,
        targets: &[Element],
        options: IntersectionOptions,
        mut on_enter: Box<dyn FnMut(&Element)>,
    ) {
        let callback = Closure::<dyn FnMut(js_sys::Array, IntersectionObserver)>::new(
            move |entries: js_sys::Array, _observer: IntersectionObserver| {
                for entry in entries.iter() {
                    let Some(entry) = entry.dyn_ref::<IntersectionObserverEntry>() else {
                        continue;
                    };
                    if entry.is_intersecting() {
                        on_enter(&entry.target());
                    }
                }
            },
        );

        let init = IntersectionObserverInit::new();
        init.set_threshold(&JsValue::from_f64(options.threshold));
        init.set_root_margin(options.root_margin);
        let Some(observer) = check(
            "IntersectionObserver",
            IntersectionObserver::new_with_options(callback.as_ref().unchecked_ref(), &init),
        ) else {
            return;
        };
        for target in targets {
            observer.observe(target);
        }
        callback.forget();
    }

    fn pathname(&self) -> String {
        check("location.pathname", self.window.location().pathname()).unwrap_or_default()
    }

    fn confirm(&self, message: &str) -> bool {
        check("confirm", self.window.confirm_with_message(message)).unwrap_or(false)
    }

    fn today(&self) -> Date {
        match local_today() {
            Ok(date) => date,
            Err(err) => {
                log::warn!("local date unavailable: {err}");
                OffsetDateTime::UNIX_EPOCH.date()
            }
        }
    }
}

/// `window.localStorage`.
#[derive(Debug, Default, Clone, Copy)]
pub struct LocalStore;

impl LocalStore {
    fn storage() -> Result<web_sys::Storage, StorageError> {
        let window = web_sys::window().ok_or(StorageError::Unavailable)?;
        match window.local_storage() {
            Ok(Some(storage)) => Ok(storage),
            Ok(None) => Err(StorageError::Unavailable),
            Err(err) => Err(StorageError::Access(describe(&err))),
        }
    }
}

impl KeyValueStore for LocalStore {
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError> {
        Self::storage()?
            .get_item(key)
            .map_err(|err| StorageError::Access(describe(&err)))
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError> {
        Self::storage()?
            .set_item(key, value)
            .map_err(|err| StorageError::Access(describe(&err)))
    }

    fn remove_item(&self, key: &str) -> Result<(), StorageError> {
        Self::storage()?
            .remove_item(key)
            .map_err(|err| StorageError::Access(describe(&err)))
    }
}
