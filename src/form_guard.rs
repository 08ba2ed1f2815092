//! Form Guard: client-side validation on top of native constraints.
//!
//! Three independent rules:
//! - forms marked `needs-validation` refuse to submit while invalid and are
//!   flagged `was-validated` either way,
//! - the registration form's confirmation field is invalid while it differs
//!   from the password,
//! - due-date inputs on add pages refuse past dates in the picker and warn
//!   (without blocking) when a past date is typed anyway.
//!
//! A rule whose elements are missing is skipped.

use std::rc::Rc;

use time::Date;

use crate::config::BehaviorConfig;
use crate::consts::{
    ADD_PAGE_FRAGMENT, CONFIRM_PASSWORD_FIELD, DUE_DATE_FIELD, NEEDS_VALIDATION_CLASS, PASSWORD_FIELD,
    PASSWORD_MISMATCH, PAST_DUE_DATE_WARNING, REGISTER_ACTION_FRAGMENT, WAS_VALIDATED_CLASS,
};
use crate::dom::{EventControl, EventKind, PageDom, Target, claim_group};
use crate::format::{iso_date, parse_date};
use crate::toast::{self, Severity};

/// Custom validity message for the confirmation field; empty when the passwords agree.
#[must_use]
pub fn password_mismatch_message(password: &str, confirmation: &str) -> &'static str {
    if password == confirmation { "" } else { PASSWORD_MISMATCH }
}

/// Whether `pathname` is a task-creation page.
#[must_use]
pub fn is_add_page(pathname: &str) -> bool {
    pathname.contains(ADD_PAGE_FRAGMENT)
}

/// Whether a due-date value lies strictly before `today`. Unparsable values never warn.
#[must_use]
pub fn is_past_due(value: &str, today: Date) -> bool {
    parse_date(value).is_some_and(|selected| selected < today)
}

pub fn initialize<D: PageDom + 'static>(dom: &Rc<D>, config: &BehaviorConfig) {
    if !claim_group(dom.as_ref(), "form-guard") {
        return;
    }
    let forms = guard_submissions(dom);
    let passwords = guard_password_confirmation(dom);
    let due_dates = guard_due_dates(dom, config);
    log::debug!("form guard: {forms} forms, password check {passwords}, {due_dates} due-date inputs");
}

fn guard_submissions<D: PageDom + 'static>(dom: &Rc<D>) -> usize {
    let forms = dom.find_all(Target::Class(NEEDS_VALIDATION_CLASS));
    for form in &forms {
        let dom_for_submit = Rc::clone(dom);
        let target = form.clone();
        dom.listen(
            form,
            EventKind::Submit,
            Box::new(move |event: &dyn EventControl| {
                if !dom_for_submit.check_validity(&target) {
                    event.prevent_default();
                    event.stop_propagation();
                }
                dom_for_submit.add_class(&target, WAS_VALIDATED_CLASS);
            }),
        );
    }
    forms.len()
}

fn guard_password_confirmation<D: PageDom + 'static>(dom: &Rc<D>) -> bool {
    let Some(form) = dom.find(Target::FormActionContains(REGISTER_ACTION_FRAGMENT)) else {
        return false;
    };
    let (Some(password), Some(confirmation)) = (
        dom.find_within(&form, Target::InputNamed(PASSWORD_FIELD)),
        dom.find_within(&form, Target::InputNamed(CONFIRM_PASSWORD_FIELD)),
    ) else {
        return false;
    };

    for field in [&password, &confirmation] {
        let dom_for_input = Rc::clone(dom);
        let password = password.clone();
        let confirmation = confirmation.clone();
        dom.listen(
            field,
            EventKind::Input,
            Box::new(move |_: &dyn EventControl| {
                let message = password_mismatch_message(
                    &dom_for_input.value(&password),
                    &dom_for_input.value(&confirmation),
                );
                dom_for_input.set_custom_validity(&confirmation, message);
            }),
        );
    }
    true
}

fn guard_due_dates<D: PageDom + 'static>(dom: &Rc<D>, config: &BehaviorConfig) -> usize {
    let inputs = dom.find_all(Target::InputNamed(DUE_DATE_FIELD));
    if inputs.is_empty() {
        return 0;
    }

    if is_add_page(&dom.pathname()) {
        let min = iso_date(dom.today());
        for input in &inputs {
            dom.set_attribute(input, "min", &min);
        }
    }

    for input in &inputs {
        let dom_for_change = Rc::clone(dom);
        let target = input.clone();
        let lifetime_ms = config.toast_lifetime_ms;
        dom.listen(
            input,
            EventKind::Change,
            Box::new(move |_: &dyn EventControl| {
                let value = dom_for_change.value(&target);
                if is_past_due(&value, dom_for_change.today()) && is_add_page(&dom_for_change.pathname()) {
                    toast::show(&dom_for_change, PAST_DUE_DATE_WARNING, Severity::Warning, lifetime_ms);
                }
            }),
        );
    }
    inputs.len()
}

#[cfg(test)]
#[path = "form_guard_test.rs"]
mod form_guard_test;
