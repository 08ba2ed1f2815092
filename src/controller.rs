//! Page Behavior Controller: one-shot wiring of every behavior group.

use std::rc::Rc;

use crate::config::BehaviorConfig;
use crate::dom::PageDom;
use crate::storage::KeyValueStore;
use crate::{entrance, form_guard, interactions, theme};

/// Resolve the configuration advertised on the root element.
///
/// A malformed attribute is logged and the built-in defaults are used instead.
#[must_use]
pub fn load_config<D: PageDom>(dom: &D) -> BehaviorConfig {
    let Some(root) = dom.root() else {
        return BehaviorConfig::default();
    };
    match BehaviorConfig::from_attributes(|name| dom.attribute(&root, name)) {
        Ok(config) => config,
        Err(err) => {
            log::warn!("ignoring page behavior config: {err}");
            BehaviorConfig::default()
        }
    }
}

/// Wire theme, form, interaction and entrance behaviors onto the page.
///
/// Call once after the document has loaded. Returns the config in effect.
pub fn initialize<D, S>(dom: &Rc<D>, store: &Rc<S>) -> BehaviorConfig
where
    D: PageDom + 'static,
    S: KeyValueStore + 'static,
{
    let config = load_config(dom.as_ref());
    theme::initialize(dom, store, &config);
    form_guard::initialize(dom, &config);
    interactions::initialize(dom, &config);
    entrance::initialize(dom, &config);
    log::info!("page behaviors ready");
    config
}

#[cfg(test)]
#[path = "controller_test.rs"]
mod controller_test;
