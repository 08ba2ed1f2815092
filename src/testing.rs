//! In-memory page used by behavior tests.
//!
//! Nodes are indices into an arena. Listeners, timers and intersection
//! callbacks are recorded and only run when a test dispatches an event,
//! advances the clock, or reveals a node.

use std::cell::{Cell, RefCell};
use std::collections::BTreeMap;
use std::rc::Rc;

use time::{Date, Month};

use crate::dom::{EventControl, EventKind, IntersectionOptions, Listener, PageDom, Target, Timers};

pub(crate) type NodeId = usize;

const ROOT: NodeId = 0;
const BODY: NodeId = 1;

#[derive(Debug, Clone)]
struct FakeNode {
    tag: String,
    attrs: BTreeMap<String, String>,
    classes: Vec<String>,
    styles: BTreeMap<String, String>,
    inner_html: String,
    text: String,
    value: String,
    custom_validity: String,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
    removed: bool,
    clicks: usize,
}

impl FakeNode {
    fn new(tag: &str) -> Self {
        Self {
            tag: tag.to_owned(),
            attrs: BTreeMap::new(),
            classes: Vec::new(),
            styles: BTreeMap::new(),
            inner_html: String::new(),
            text: String::new(),
            value: String::new(),
            custom_validity: String::new(),
            parent: None,
            children: Vec::new(),
            removed: false,
            clicks: 0,
        }
    }
}

struct PendingTimer {
    due_ms: u64,
    seq: u64,
    callback: Box<dyn FnOnce()>,
}

type SharedListener = Rc<RefCell<Listener>>;
type IntersectCallback = Rc<RefCell<Box<dyn FnMut(&NodeId)>>>;

/// What happened to a dispatched event.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Dispatch {
    pub default_prevented: bool,
    pub propagation_stopped: bool,
}

#[derive(Default)]
struct FakeEvent {
    default_prevented: Cell<bool>,
    propagation_stopped: Cell<bool>,
}

impl EventControl for FakeEvent {
    fn prevent_default(&self) {
        self.default_prevented.set(true);
    }

    fn stop_propagation(&self) {
        self.propagation_stopped.set(true);
    }
}

pub(crate) struct FakeDom {
    nodes: RefCell<Vec<FakeNode>>,
    listeners: RefCell<Vec<(NodeId, EventKind, SharedListener)>>,
    timers: RefCell<Vec<PendingTimer>>,
    now_ms: Cell<u64>,
    timer_seq: Cell<u64>,
    observers: RefCell<Vec<(Vec<NodeId>, IntersectionOptions, IntersectCallback)>>,
    pathname: RefCell<String>,
    confirm_answer: Cell<bool>,
    prompts: RefCell<Vec<String>>,
    today: Cell<Date>,
}

impl FakeDom {
    /// An empty `<html><body></body></html>` page at `/`, dated 2025-06-15.
    pub(crate) fn new() -> Self {
        let mut root = FakeNode::new("html");
        root.children.push(BODY);
        let mut body = FakeNode::new("body");
        body.parent = Some(ROOT);
        Self {
            nodes: RefCell::new(vec![root, body]),
            listeners: RefCell::new(Vec::new()),
            timers: RefCell::new(Vec::new()),
            now_ms: Cell::new(0),
            timer_seq: Cell::new(0),
            observers: RefCell::new(Vec::new()),
            pathname: RefCell::new("/".to_owned()),
            confirm_answer: Cell::new(true),
            prompts: RefCell::new(Vec::new()),
            today: Cell::new(date(2025, Month::June, 15)),
        }
    }

    pub(crate) fn shared() -> Rc<Self> {
        Rc::new(Self::new())
    }

    pub(crate) fn body_id(&self) -> NodeId {
        BODY
    }

    pub(crate) fn root_id(&self) -> NodeId {
        ROOT
    }

    // --- Building ---

    /// Append a `<tag>` under `parent` with the given attributes.
    /// A `class` attribute also populates the class list.
    pub(crate) fn add(&self, parent: NodeId, tag: &str, attrs: &[(&str, &str)]) -> NodeId {
        let mut node = FakeNode::new(tag);
        for (name, value) in attrs {
            if *name == "class" {
                node.classes = value.split_whitespace().map(str::to_owned).collect();
            }
            node.attrs.insert((*name).to_owned(), (*value).to_owned());
        }
        node.parent = Some(parent);
        let mut nodes = self.nodes.borrow_mut();
        let id = nodes.len();
        nodes.push(node);
        nodes[parent].children.push(id);
        id
    }

    pub(crate) fn set_pathname(&self, path: &str) {
        *self.pathname.borrow_mut() = path.to_owned();
    }

    pub(crate) fn set_today(&self, today: Date) {
        self.today.set(today);
    }

    pub(crate) fn answer_confirm(&self, answer: bool) {
        self.confirm_answer.set(answer);
    }

    pub(crate) fn type_value(&self, node: NodeId, value: &str) {
        self.nodes.borrow_mut()[node].value = value.to_owned();
    }

    // --- Driving ---

    /// Run every listener registered for `kind` on `node`.
    pub(crate) fn dispatch(&self, node: NodeId, kind: EventKind) -> Dispatch {
        let matching: Vec<SharedListener> = self
            .listeners
            .borrow()
            .iter()
            .filter(|(target, k, _)| *target == node && *k == kind)
            .map(|(_, _, listener)| Rc::clone(listener))
            .collect();
        let event = FakeEvent::default();
        let control: &dyn EventControl = &event;
        for listener in matching {
            (&mut *listener.borrow_mut())(control);
        }
        Dispatch {
            default_prevented: event.default_prevented.get(),
            propagation_stopped: event.propagation_stopped.get(),
        }
    }

    /// Move the clock forward, firing due timers in order.
    pub(crate) fn advance(&self, ms: u64) {
        let target = self.now_ms.get() + ms;
        loop {
            let next = {
                let mut timers = self.timers.borrow_mut();
                let position = timers
                    .iter()
                    .enumerate()
                    .filter(|(_, t)| t.due_ms <= target)
                    .min_by_key(|(_, t)| (t.due_ms, t.seq))
                    .map(|(i, _)| i);
                position.map(|i| timers.remove(i))
            };
            let Some(timer) = next else {
                break;
            };
            self.now_ms.set(timer.due_ms);
            (timer.callback)();
        }
        self.now_ms.set(target);
    }

    pub(crate) fn pending_timers(&self) -> usize {
        self.timers.borrow().len()
    }

    /// Simulate `node` scrolling into view.
    pub(crate) fn reveal(&self, node: NodeId) {
        let callbacks: Vec<IntersectCallback> = self
            .observers
            .borrow()
            .iter()
            .filter(|(targets, _, _)| targets.contains(&node))
            .map(|(_, _, callback)| Rc::clone(callback))
            .collect();
        for callback in callbacks {
            (&mut *callback.borrow_mut())(&node);
        }
    }

    // --- Inspecting ---

    pub(crate) fn style(&self, node: NodeId, property: &str) -> Option<String> {
        self.nodes.borrow()[node].styles.get(property).cloned()
    }

    pub(crate) fn has_class(&self, node: NodeId, class: &str) -> bool {
        self.nodes.borrow()[node].classes.iter().any(|c| c == class)
    }

    pub(crate) fn class_name(&self, node: NodeId) -> String {
        self.nodes.borrow()[node].classes.join(" ")
    }

    pub(crate) fn attr(&self, node: NodeId, name: &str) -> Option<String> {
        self.nodes.borrow()[node].attrs.get(name).cloned()
    }

    pub(crate) fn inner_html(&self, node: NodeId) -> String {
        self.nodes.borrow()[node].inner_html.clone()
    }

    pub(crate) fn text(&self, node: NodeId) -> String {
        self.nodes.borrow()[node].text.clone()
    }

    pub(crate) fn custom_validity(&self, node: NodeId) -> String {
        self.nodes.borrow()[node].custom_validity.clone()
    }

    pub(crate) fn children(&self, node: NodeId) -> Vec<NodeId> {
        self.nodes.borrow()[node].children.clone()
    }

    pub(crate) fn is_attached(&self, node: NodeId) -> bool {
        !self.nodes.borrow()[node].removed
    }

    pub(crate) fn clicks(&self, node: NodeId) -> usize {
        self.nodes.borrow()[node].clicks
    }

    pub(crate) fn prompts(&self) -> Vec<String> {
        self.prompts.borrow().clone()
    }

    pub(crate) fn listener_count(&self) -> usize {
        self.listeners.borrow().len()
    }

    pub(crate) fn observed(&self) -> Vec<(Vec<NodeId>, IntersectionOptions)> {
        self.observers
            .borrow()
            .iter()
            .map(|(targets, options, _)| (targets.clone(), *options))
            .collect()
    }

    // --- Matching ---

    fn matches(&self, nodes: &[FakeNode], id: NodeId, target: Target<'_>) -> bool {
        let node = &nodes[id];
        let attr_contains = |name: &str, fragment: &str| node.attrs.get(name).is_some_and(|v| v.contains(fragment));
        match target {
            Target::Id(wanted) => node.attrs.get("id").is_some_and(|v| v == wanted),
            Target::Class(class) => node.classes.iter().any(|c| c == class),
            Target::Tag(tag) => node.tag == tag,
            Target::AnchorHrefContains(fragment) => node.tag == "a" && attr_contains("href", fragment),
            Target::FormActionContains(fragment) => node.tag == "form" && attr_contains("action", fragment),
            Target::InputNamed(name) => node.tag == "input" && node.attrs.get("name").is_some_and(|v| v == name),
            Target::TableBodyRow => node.tag == "tr" && self.has_ancestor_tag(nodes, id, "tbody"),
        }
    }

    fn has_ancestor_tag(&self, nodes: &[FakeNode], id: NodeId, tag: &str) -> bool {
        let mut cursor = nodes[id].parent;
        while let Some(current) = cursor {
            if nodes[current].tag == tag {
                return true;
            }
            cursor = nodes[current].parent;
        }
        false
    }

    fn is_descendant(nodes: &[FakeNode], id: NodeId, ancestor: NodeId) -> bool {
        let mut cursor = nodes[id].parent;
        while let Some(current) = cursor {
            if current == ancestor {
                return true;
            }
            cursor = nodes[current].parent;
        }
        false
    }

    fn live(nodes: &[FakeNode]) -> impl Iterator<Item = NodeId> + '_ {
        (0..nodes.len()).filter(move |id| !nodes[*id].removed)
    }
}

impl Timers for FakeDom {
    fn set_timeout(&self, delay_ms: u32, callback: Box<dyn FnOnce()>) {
        let seq = self.timer_seq.get();
        self.timer_seq.set(seq + 1);
        self.timers.borrow_mut().push(PendingTimer {
            due_ms: self.now_ms.get() + u64::from(delay_ms),
            seq,
            callback,
        });
    }
}

impl PageDom for FakeDom {
    type Node = NodeId;

    fn find(&self, target: Target<'_>) -> Option<NodeId> {
        self.find_all(target).into_iter().next()
    }

    fn find_all(&self, target: Target<'_>) -> Vec<NodeId> {
        let nodes = self.nodes.borrow();
        Self::live(&nodes)
            .filter(|id| self.matches(&nodes, *id, target))
            .collect()
    }

    fn find_within(&self, scope: &NodeId, target: Target<'_>) -> Option<NodeId> {
        let nodes = self.nodes.borrow();
        Self::live(&nodes).find(|id| Self::is_descendant(&nodes, *id, *scope) && self.matches(&nodes, *id, target))
    }

    fn closest(&self, node: &NodeId, target: Target<'_>) -> Option<NodeId> {
        let nodes = self.nodes.borrow();
        let mut cursor = Some(*node);
        while let Some(current) = cursor {
            if self.matches(&nodes, current, target) {
                return Some(current);
            }
            cursor = nodes[current].parent;
        }
        None
    }

    fn root(&self) -> Option<NodeId> {
        Some(ROOT)
    }

    fn body(&self) -> Option<NodeId> {
        Some(BODY)
    }

    fn attribute(&self, node: &NodeId, name: &str) -> Option<String> {
        self.attr(*node, name)
    }

    fn set_attribute(&self, node: &NodeId, name: &str, value: &str) {
        self.nodes.borrow_mut()[*node]
            .attrs
            .insert(name.to_owned(), value.to_owned());
    }

    fn set_class_name(&self, node: &NodeId, class_name: &str) {
        let mut nodes = self.nodes.borrow_mut();
        nodes[*node].classes = class_name.split_whitespace().map(str::to_owned).collect();
        nodes[*node].attrs.insert("class".to_owned(), class_name.to_owned());
    }

    fn add_class(&self, node: &NodeId, class: &str) {
        let mut nodes = self.nodes.borrow_mut();
        if !nodes[*node].classes.iter().any(|c| c == class) {
            nodes[*node].classes.push(class.to_owned());
        }
    }

    fn remove_class(&self, node: &NodeId, class: &str) {
        self.nodes.borrow_mut()[*node].classes.retain(|c| c != class);
    }

    fn set_style(&self, node: &NodeId, property: &str, value: &str) {
        let mut nodes = self.nodes.borrow_mut();
        if value.is_empty() {
            nodes[*node].styles.remove(property);
        } else {
            nodes[*node].styles.insert(property.to_owned(), value.to_owned());
        }
    }

    fn set_inner_html(&self, node: &NodeId, html: &str) {
        self.nodes.borrow_mut()[*node].inner_html = html.to_owned();
    }

    fn set_text(&self, node: &NodeId, text: &str) {
        self.nodes.borrow_mut()[*node].text = text.to_owned();
    }

    fn value(&self, node: &NodeId) -> String {
        self.nodes.borrow()[*node].value.clone()
    }

    fn set_custom_validity(&self, node: &NodeId, message: &str) {
        self.nodes.borrow_mut()[*node].custom_validity = message.to_owned();
    }

    /// A form is valid when no descendant carries a custom validity message
    /// and every `required` input has a value.
    fn check_validity(&self, form: &NodeId) -> bool {
        let nodes = self.nodes.borrow();
        Self::live(&nodes)
            .filter(|id| Self::is_descendant(&nodes, *id, *form))
            .all(|id| {
                let node = &nodes[id];
                let missing = node.attrs.contains_key("required") && node.value.is_empty();
                node.custom_validity.is_empty() && !missing
            })
    }

    fn click(&self, node: &NodeId) {
        self.nodes.borrow_mut()[*node].clicks += 1;
        self.dispatch(*node, EventKind::Click);
    }

    fn create_element(&self, tag: &str) -> Option<NodeId> {
        let mut nodes = self.nodes.borrow_mut();
        nodes.push(FakeNode::new(tag));
        Some(nodes.len() - 1)
    }

    fn append_child(&self, parent: &NodeId, child: &NodeId) {
        let mut nodes = self.nodes.borrow_mut();
        nodes[*child].parent = Some(*parent);
        nodes[*parent].children.push(*child);
    }

    fn remove(&self, node: &NodeId) {
        let mut nodes = self.nodes.borrow_mut();
        nodes[*node].removed = true;
        if let Some(parent) = nodes[*node].parent.take() {
            nodes[parent].children.retain(|c| c != node);
        }
    }

    fn listen(&self, node: &NodeId, kind: EventKind, listener: Listener) {
        self.listeners
            .borrow_mut()
            .push((*node, kind, Rc::new(RefCell::new(listener))));
    }

    fn observe_intersection(
        &self,
        targets: &[NodeId],
        options: IntersectionOptions,
        on_enter: Box<dyn FnMut(&NodeId)>,
    ) {
        self.observers
            .borrow_mut()
            .push((targets.to_vec(), options, Rc::new(RefCell::new(on_enter))));
    }

    fn pathname(&self) -> String {
        self.pathname.borrow().clone()
    }

    fn confirm(&self, message: &str) -> bool {
        self.prompts.borrow_mut().push(message.to_owned());
        self.confirm_answer.get()
    }

    fn today(&self) -> Date {
        self.today.get()
    }
}

/// Calendar date helper for tests.
pub(crate) fn date(year: i32, month: Month, day: u8) -> Date {
    match Date::from_calendar_date(year, month, day) {
        Ok(d) => d,
        Err(err) => panic!("invalid test date {year}-{month}-{day}: {err}"),
    }
}
