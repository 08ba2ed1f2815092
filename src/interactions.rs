//! Interaction Handlers for task rows, action links and flash banners.
//!
//! Only elements present when the page loads are wired; rows added later get
//! no handlers.

use std::rc::Rc;

use crate::config::BehaviorConfig;
use crate::consts::{
    ALERT_CLASS, CLOSE_BUTTON_CLASS, COMPLETE_ANIMATION_CLASS, DELETE_CONFIRMATION, DELETE_HREF_FRAGMENT,
    DISABLED_CLASS, ROW_HOVER_REST, ROW_HOVER_SHIFT, ROW_HOVER_TRANSITION, SPINNER_HTML, TOGGLE_HREF_FRAGMENT,
};
use crate::dom::{EventControl, EventKind, PageDom, Target, claim_group};

pub fn initialize<D: PageDom + 'static>(dom: &Rc<D>, config: &BehaviorConfig) {
    if !claim_group(dom.as_ref(), "interactions") {
        return;
    }
    let toggles = wire_toggle_links(dom);
    let deletes = wire_delete_links(dom);
    let alerts = schedule_flash_dismissal(dom, config.flash_dismiss_ms);
    let rows = wire_row_hover(dom);
    log::debug!("interactions: {toggles} toggle links, {deletes} delete links, {alerts} alerts, {rows} rows");
}

/// Completion feedback on toggle links. The link is only styled as disabled;
/// the click still navigates.
fn wire_toggle_links<D: PageDom + 'static>(dom: &Rc<D>) -> usize {
    let links = dom.find_all(Target::AnchorHrefContains(TOGGLE_HREF_FRAGMENT));
    for link in &links {
        let dom_for_click = Rc::clone(dom);
        let target = link.clone();
        dom.listen(
            link,
            EventKind::Click,
            Box::new(move |_: &dyn EventControl| {
                let Some(row) = dom_for_click.closest(&target, Target::Tag("tr")) else {
                    return;
                };
                dom_for_click.add_class(&row, COMPLETE_ANIMATION_CLASS);
                dom_for_click.set_inner_html(&target, SPINNER_HTML);
                dom_for_click.add_class(&target, DISABLED_CLASS);
            }),
        );
    }
    links.len()
}

/// Delete links navigate only after the user confirms.
fn wire_delete_links<D: PageDom + 'static>(dom: &Rc<D>) -> usize {
    let links = dom.find_all(Target::AnchorHrefContains(DELETE_HREF_FRAGMENT));
    for link in &links {
        let dom_for_click = Rc::clone(dom);
        dom.listen(
            link,
            EventKind::Click,
            Box::new(move |event: &dyn EventControl| {
                if !dom_for_click.confirm(DELETE_CONFIRMATION) {
                    event.prevent_default();
                }
            }),
        );
    }
    links.len()
}

/// Close every flash banner `delay_ms` after load through its own close button.
fn schedule_flash_dismissal<D: PageDom + 'static>(dom: &Rc<D>, delay_ms: u32) -> usize {
    let alerts = dom.find_all(Target::Class(ALERT_CLASS));
    for alert in &alerts {
        let dom_for_timer = Rc::clone(dom);
        let alert = alert.clone();
        dom.set_timeout(
            delay_ms,
            Box::new(move || {
                if let Some(close) = dom_for_timer.find_within(&alert, Target::Class(CLOSE_BUTTON_CLASS)) {
                    dom_for_timer.click(&close);
                }
            }),
        );
    }
    alerts.len()
}

fn wire_row_hover<D: PageDom + 'static>(dom: &Rc<D>) -> usize {
    let rows = dom.find_all(Target::TableBodyRow);
    for row in &rows {
        let dom_for_enter = Rc::clone(dom);
        let target = row.clone();
        dom.listen(
            row,
            EventKind::MouseEnter,
            Box::new(move |_: &dyn EventControl| {
                dom_for_enter.set_style(&target, "transform", ROW_HOVER_SHIFT);
                dom_for_enter.set_style(&target, "transition", ROW_HOVER_TRANSITION);
            }),
        );

        let dom_for_leave = Rc::clone(dom);
        let target = row.clone();
        dom.listen(
            row,
            EventKind::MouseLeave,
            Box::new(move |_: &dyn EventControl| {
                dom_for_leave.set_style(&target, "transform", ROW_HOVER_REST);
            }),
        );
    }
    rows.len()
}

#[cfg(test)]
#[path = "interactions_test.rs"]
mod interactions_test;
