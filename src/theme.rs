//! Theme Manager: persisted light/dark preference.
//!
//! Reads the stored preference once, mirrors it onto the root element's
//! `data-bs-theme` attribute and the toggle icon, and flips it on every click
//! of the toggle control. Storage is best-effort; the page keeps working with
//! the in-page attribute when writes fail.

use std::rc::Rc;

use crate::config::BehaviorConfig;
use crate::consts::{THEME_ATTRIBUTE, THEME_ICON_ID, THEME_STORAGE_KEY, THEME_TOGGLE_ID, THEME_TRANSITION};
use crate::dom::{EventControl, EventKind, PageDom, Target, claim_group};
use crate::storage::{KeyValueStore, read_raw, write_raw};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    /// Anything other than `dark` reads as light.
    #[must_use]
    pub fn parse(raw: Option<&str>) -> Self {
        match raw {
            Some("dark") => Self::Dark,
            _ => Self::Light,
        }
    }

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Light => "light",
            Self::Dark => "dark",
        }
    }

    #[must_use]
    pub fn toggled(self) -> Self {
        match self {
            Self::Light => Self::Dark,
            Self::Dark => Self::Light,
        }
    }

    /// Icon class advertising the opposite theme: a sun while dark, a moon while light.
    #[must_use]
    pub fn icon_class(self) -> &'static str {
        match self {
            Self::Light => "bi bi-moon-fill",
            Self::Dark => "bi bi-sun-fill",
        }
    }
}

/// Load the persisted theme, defaulting to light when absent or unreadable.
#[must_use]
pub fn read_preference(store: &dyn KeyValueStore, key: &str) -> Theme {
    Theme::parse(read_raw(store, key).as_deref())
}

/// Mirror `theme` onto the root attribute and the icon, if present.
pub fn apply<D: PageDom>(dom: &D, theme: Theme) {
    if let Some(root) = dom.root() {
        dom.set_attribute(&root, THEME_ATTRIBUTE, theme.as_str());
    }
    if let Some(icon) = dom.find(Target::Id(THEME_ICON_ID)) {
        dom.set_class_name(&icon, theme.icon_class());
    }
}

/// The theme currently on the root element.
#[must_use]
pub fn current<D: PageDom>(dom: &D) -> Theme {
    let raw = dom.root().and_then(|root| dom.attribute(&root, THEME_ATTRIBUTE));
    Theme::parse(raw.as_deref())
}

/// Flip the applied theme, persist it and run the page transition.
pub fn toggle<D: PageDom + 'static>(dom: &Rc<D>, store: &dyn KeyValueStore, config: &BehaviorConfig) -> Theme {
    let next = current(dom.as_ref()).toggled();
    apply(dom.as_ref(), next);
    if !write_raw(store, THEME_STORAGE_KEY, next.as_str()) {
        log::warn!("theme {} applied but not persisted", next.as_str());
    }

    if let Some(body) = dom.body() {
        dom.set_style(&body, "transition", THEME_TRANSITION);
        let dom_for_timer = Rc::clone(dom);
        dom.set_timeout(
            config.theme_transition_ms,
            Box::new(move || dom_for_timer.set_style(&body, "transition", "")),
        );
    }
    next
}

/// Apply the stored theme and wire the toggle control.
///
/// Does nothing when the page has no toggle control.
pub fn initialize<D, S>(dom: &Rc<D>, store: &Rc<S>, config: &BehaviorConfig)
where
    D: PageDom + 'static,
    S: KeyValueStore + 'static,
{
    if !claim_group(dom.as_ref(), "theme") {
        return;
    }
    let Some(control) = dom.find(Target::Id(THEME_TOGGLE_ID)) else {
        log::debug!("theme: no toggle control");
        return;
    };

    let theme = read_preference(store, THEME_STORAGE_KEY);
    apply(dom.as_ref(), theme);

    let dom_for_click = Rc::clone(dom);
    let store = Rc::clone(store);
    let config = *config;
    dom.listen(
        &control,
        EventKind::Click,
        Box::new(move |_: &dyn EventControl| {
            toggle(&dom_for_click, &store, &config);
        }),
    );
    log::debug!("theme: applied {}", theme.as_str());
}

#[cfg(test)]
#[path = "theme_test.rs"]
mod theme_test;
