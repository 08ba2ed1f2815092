//! Entrance Animator: staggered row fade-in and scroll-revealed cards.
//!
//! The plans are pure values computed from an element's position; applying
//! them to the page is a thin layer of style writes and timers.

use std::rc::Rc;

use crate::config::BehaviorConfig;
use crate::consts::{CARD_CLASS, CARD_ROOT_MARGIN, CARD_VISIBLE_THRESHOLD};
use crate::dom::{IntersectionOptions, PageDom, Target, claim_group};

/// Inline opacity/transform pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Frame {
    pub opacity: &'static str,
    pub transform: &'static str,
}

/// Invisible and pushed 20px down.
pub const HIDDEN: Frame = Frame { opacity: "0", transform: "translateY(20px)" };

/// Visible and in place.
pub const SETTLED: Frame = Frame { opacity: "1", transform: "translateY(0)" };

pub const ROW_TRANSITION: &str = "opacity 0.4s ease, transform 0.4s ease";
pub const CARD_TRANSITION: &str = "opacity 0.6s ease, transform 0.6s ease";

pub const CARD_OPTIONS: IntersectionOptions =
    IntersectionOptions { threshold: CARD_VISIBLE_THRESHOLD, root_margin: CARD_ROOT_MARGIN };

/// How one element enters the page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Entrance {
    pub initial: Frame,
    pub target: Frame,
    /// Transition installed up front, before any movement.
    pub initial_transition: Option<&'static str>,
    /// Transition installed together with the target frame.
    pub target_transition: Option<&'static str>,
    pub delay_ms: u32,
}

/// Row `index` settles `index * stagger_ms` after load.
#[must_use]
pub fn row_entrance(index: usize, stagger_ms: u32) -> Entrance {
    let index = u32::try_from(index).unwrap_or(u32::MAX);
    Entrance {
        initial: HIDDEN,
        target: SETTLED,
        initial_transition: None,
        target_transition: Some(ROW_TRANSITION),
        delay_ms: index.saturating_mul(stagger_ms),
    }
}

/// Cards settle when they scroll into view, not on a timer.
#[must_use]
pub fn card_entrance() -> Entrance {
    Entrance {
        initial: HIDDEN,
        target: SETTLED,
        initial_transition: Some(CARD_TRANSITION),
        target_transition: None,
        delay_ms: 0,
    }
}

pub fn apply_frame<D: PageDom>(dom: &D, node: &D::Node, frame: Frame) {
    dom.set_style(node, "opacity", frame.opacity);
    dom.set_style(node, "transform", frame.transform);
}

pub fn initialize<D: PageDom + 'static>(dom: &Rc<D>, config: &BehaviorConfig) {
    if !claim_group(dom.as_ref(), "entrance") {
        return;
    }
    let rows = stage_rows(dom, config.row_stagger_ms);
    let cards = watch_cards(dom);
    log::debug!("entrance: {rows} rows staged, {cards} cards watched");
}

fn stage_rows<D: PageDom + 'static>(dom: &Rc<D>, stagger_ms: u32) -> usize {
    let rows = dom.find_all(Target::TableBodyRow);
    for (index, row) in rows.iter().enumerate() {
        let plan = row_entrance(index, stagger_ms);
        apply_frame(dom.as_ref(), row, plan.initial);

        let dom_for_timer = Rc::clone(dom);
        let row = row.clone();
        dom.set_timeout(
            plan.delay_ms,
            Box::new(move || {
                if let Some(transition) = plan.target_transition {
                    dom_for_timer.set_style(&row, "transition", transition);
                }
                apply_frame(dom_for_timer.as_ref(), &row, plan.target);
            }),
        );
    }
    rows.len()
}

fn watch_cards<D: PageDom + 'static>(dom: &Rc<D>) -> usize {
    let cards = dom.find_all(Target::Class(CARD_CLASS));
    if cards.is_empty() {
        return 0;
    }

    let plan = card_entrance();
    for card in &cards {
        apply_frame(dom.as_ref(), card, plan.initial);
        if let Some(transition) = plan.initial_transition {
            dom.set_style(card, "transition", transition);
        }
    }

    let dom_for_reveal = Rc::clone(dom);
    dom.observe_intersection(
        &cards,
        CARD_OPTIONS,
        Box::new(move |card: &D::Node| apply_frame(dom_for_reveal.as_ref(), card, plan.target)),
    );
    cards.len()
}

#[cfg(test)]
#[path = "entrance_test.rs"]
mod entrance_test;
