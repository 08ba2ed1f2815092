//! Page abstraction consumed by every behavior group.
//!
//! DESIGN
//! ======
//! Behavior code never touches `web_sys` directly. It talks to a [`PageDom`],
//! which the browser adapter implements over the live document and tests
//! implement in memory. Element lookups use typed [`Target`]s rather than raw
//! selector strings so both implementations agree on what a target means.

use time::Date;

use crate::consts::WIRED_GROUPS_ATTRIBUTE;

/// Something on the page a behavior wants to find.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Target<'a> {
    Id(&'a str),
    Class(&'a str),
    Tag(&'a str),
    /// `<a>` whose `href` contains the fragment.
    AnchorHrefContains(&'a str),
    /// `<form>` whose `action` contains the fragment.
    FormActionContains(&'a str),
    /// `<input>` with the exact `name`.
    InputNamed(&'a str),
    /// `<tr>` inside a `<tbody>`.
    TableBodyRow,
}

impl Target<'_> {
    /// CSS selector equivalent of this target.
    #[must_use]
    pub fn css(&self) -> String {
        match self {
            Self::Id(id) => format!("#{id}"),
            Self::Class(class) => format!(".{class}"),
            Self::Tag(tag) => (*tag).to_owned(),
            Self::AnchorHrefContains(fragment) => format!("a[href*=\"{fragment}\"]"),
            Self::FormActionContains(fragment) => format!("form[action*=\"{fragment}\"]"),
            Self::InputNamed(name) => format!("input[name=\"{name}\"]"),
            Self::TableBodyRow => "tbody tr".to_owned(),
        }
    }
}

/// DOM events behaviors listen for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    Click,
    Submit,
    Input,
    Change,
    MouseEnter,
    MouseLeave,
}

impl EventKind {
    /// Event type name as passed to `addEventListener`.
    #[must_use]
    pub fn dom_name(self) -> &'static str {
        match self {
            Self::Click => "click",
            Self::Submit => "submit",
            Self::Input => "input",
            Self::Change => "change",
            Self::MouseEnter => "mouseenter",
            Self::MouseLeave => "mouseleave",
        }
    }
}

/// Handle a listener uses to steer the event it is handling.
pub trait EventControl {
    fn prevent_default(&self);
    fn stop_propagation(&self);
}

pub type Listener = Box<dyn FnMut(&dyn EventControl)>;

/// Viewport intersection settings for [`PageDom::observe_intersection`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IntersectionOptions {
    pub threshold: f64,
    pub root_margin: &'static str,
}

/// Fire-once deferred callbacks.
pub trait Timers {
    fn set_timeout(&self, delay_ms: u32, callback: Box<dyn FnOnce()>);
}

/// The page document as seen by behavior groups.
///
/// Mutations report nothing back: an adapter that fails to apply one logs it
/// and carries on, so a broken element degrades to an inactive feature.
pub trait PageDom: Timers {
    type Node: Clone + 'static;

    // --- Lookup ---

    fn find(&self, target: Target<'_>) -> Option<Self::Node>;
    fn find_all(&self, target: Target<'_>) -> Vec<Self::Node>;
    fn find_within(&self, scope: &Self::Node, target: Target<'_>) -> Option<Self::Node>;
    fn closest(&self, node: &Self::Node, target: Target<'_>) -> Option<Self::Node>;
    /// The `<html>` element.
    fn root(&self) -> Option<Self::Node>;
    fn body(&self) -> Option<Self::Node>;

    // --- Attributes, classes, styles, content ---

    fn attribute(&self, node: &Self::Node, name: &str) -> Option<String>;
    fn set_attribute(&self, node: &Self::Node, name: &str, value: &str);
    fn set_class_name(&self, node: &Self::Node, class_name: &str);
    fn add_class(&self, node: &Self::Node, class: &str);
    fn remove_class(&self, node: &Self::Node, class: &str);
    /// Set an inline style property; an empty value clears it.
    fn set_style(&self, node: &Self::Node, property: &str, value: &str);
    fn set_inner_html(&self, node: &Self::Node, html: &str);
    fn set_text(&self, node: &Self::Node, text: &str);

    // --- Forms ---

    fn value(&self, node: &Self::Node) -> String;
    fn set_custom_validity(&self, node: &Self::Node, message: &str);
    fn check_validity(&self, form: &Self::Node) -> bool;

    // --- Structure ---

    fn click(&self, node: &Self::Node);
    fn create_element(&self, tag: &str) -> Option<Self::Node>;
    fn append_child(&self, parent: &Self::Node, child: &Self::Node);
    fn remove(&self, node: &Self::Node);

    // --- Events ---

    fn listen(&self, node: &Self::Node, kind: EventKind, listener: Listener);
    /// Call `on_enter` each time a target enters the viewport.
    fn observe_intersection(
        &self,
        targets: &[Self::Node],
        options: IntersectionOptions,
        on_enter: Box<dyn FnMut(&Self::Node)>,
    );

    // --- Environment ---

    fn pathname(&self) -> String;
    /// Blocking yes/no prompt.
    fn confirm(&self, message: &str) -> bool;
    /// Today's date in the client's local time zone.
    fn today(&self) -> Date;
}

/// Mark `group` as wired on the root element.
///
/// Returns `false` if it already was; callers then skip wiring so repeated
/// initialization never stacks listeners or timers.
pub fn claim_group<D: PageDom>(dom: &D, group: &str) -> bool {
    let Some(root) = dom.root() else {
        return true;
    };
    let wired = dom.attribute(&root, WIRED_GROUPS_ATTRIBUTE).unwrap_or_default();
    if wired.split_whitespace().any(|g| g == group) {
        log::debug!("{group}: already wired");
        return false;
    }
    let next = if wired.is_empty() { group.to_owned() } else { format!("{wired} {group}") };
    dom.set_attribute(&root, WIRED_GROUPS_ATTRIBUTE, &next);
    true
}

#[cfg(test)]
#[path = "dom_test.rs"]
mod dom_test;
