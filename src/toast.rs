//! Transient toast notifications.
//!
//! Toasts live in a single page-level container that is created on first use
//! and reused afterwards. Each toast hides itself after its lifetime (or when
//! its close button is clicked) and its node is removed once the fade ends.

use std::cell::Cell;
use std::rc::Rc;

use crate::consts::{TOAST_CONTAINER_CLASS, TOAST_CONTAINER_ID, TOAST_FADE_MS, TOAST_Z_INDEX};
use crate::dom::{EventControl, EventKind, PageDom, Target};

/// Visual severity of a toast.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Severity {
    #[default]
    Info,
    Warning,
    Success,
    Danger,
}

impl Severity {
    /// Lenient parse; `error` is treated as danger and anything unknown as info.
    #[must_use]
    pub fn parse(raw: &str) -> Self {
        match raw.trim().to_ascii_lowercase().as_str() {
            "warning" => Self::Warning,
            "success" => Self::Success,
            "danger" | "error" => Self::Danger,
            _ => Self::Info,
        }
    }

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Info => "info",
            Self::Warning => "warning",
            Self::Success => "success",
            Self::Danger => "danger",
        }
    }

    fn class_name(self) -> String {
        format!("toast align-items-center text-white bg-{} border-0 fade show", self.as_str())
    }
}

/// Render `message` as a toast that hides after `lifetime_ms`.
///
/// Returns the toast node, or `None` when the page has nowhere to put it.
pub fn show<D: PageDom + 'static>(dom: &Rc<D>, message: &str, severity: Severity, lifetime_ms: u32) -> Option<D::Node> {
    let container = container(dom.as_ref())?;

    let toast = dom.create_element("div")?;
    dom.set_class_name(&toast, &severity.class_name());
    dom.set_attribute(&toast, "role", "alert");
    dom.set_attribute(&toast, "aria-live", "assertive");
    dom.set_attribute(&toast, "aria-atomic", "true");

    let row = dom.create_element("div")?;
    dom.set_class_name(&row, "d-flex");

    let body = dom.create_element("div")?;
    dom.set_class_name(&body, "toast-body");
    dom.set_text(&body, message);

    let close = dom.create_element("button")?;
    dom.set_attribute(&close, "type", "button");
    dom.set_attribute(&close, "aria-label", "Close");
    dom.set_class_name(&close, "btn-close btn-close-white me-2 m-auto");

    dom.append_child(&row, &body);
    dom.append_child(&row, &close);
    dom.append_child(&toast, &row);
    dom.append_child(&container, &toast);

    let dismissed = Rc::new(Cell::new(false));
    let on_close = {
        let dom = Rc::clone(dom);
        let toast = toast.clone();
        let dismissed = Rc::clone(&dismissed);
        Box::new(move |_: &dyn EventControl| dismiss(&dom, &toast, &dismissed))
    };
    dom.listen(&close, EventKind::Click, on_close);

    let expire = {
        let dom = Rc::clone(dom);
        let toast = toast.clone();
        Box::new(move || dismiss(&dom, &toast, &dismissed))
    };
    dom.set_timeout(lifetime_ms, expire);

    log::debug!("toast shown ({})", severity.as_str());
    Some(toast)
}

/// The shared toast container, created and attached to `<body>` on first use.
fn container<D: PageDom>(dom: &D) -> Option<D::Node> {
    if let Some(existing) = dom.find(Target::Id(TOAST_CONTAINER_ID)) {
        return Some(existing);
    }
    let Some(body) = dom.body() else {
        log::warn!("no <body>; toast dropped");
        return None;
    };
    let container = dom.create_element("div")?;
    dom.set_attribute(&container, "id", TOAST_CONTAINER_ID);
    dom.set_class_name(&container, TOAST_CONTAINER_CLASS);
    dom.set_style(&container, "z-index", TOAST_Z_INDEX);
    dom.append_child(&body, &container);
    Some(container)
}

fn dismiss<D: PageDom + 'static>(dom: &Rc<D>, toast: &D::Node, dismissed: &Cell<bool>) {
    if dismissed.replace(true) {
        return;
    }
    dom.remove_class(toast, "show");
    let dom_for_timer = Rc::clone(dom);
    let toast = toast.clone();
    dom.set_timeout(TOAST_FADE_MS, Box::new(move || dom_for_timer.remove(&toast)));
}

#[cfg(test)]
#[path = "toast_test.rs"]
mod toast_test;
