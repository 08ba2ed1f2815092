//! Client-side behavior layer for the server-rendered task manager pages.
//!
//! This crate is compiled to WebAssembly and loaded by every page. Once the
//! document has loaded it wires four independent behavior groups onto the
//! markup the server rendered: the theme toggle, form validation, row and link
//! interactions, and entrance animations. It also exports a few helpers
//! (toasts, date formatting, debounce, JSON storage) for other page scripts.
//!
//! ## Module layout
//!
//! | Module | Role |
//! |--------|------|
//! | [`controller`] | One-shot initialization of every behavior group |
//! | [`theme`] | Persisted light/dark theme and its toggle |
//! | [`form_guard`] | Submit blocking, password confirmation, due-date checks |
//! | [`interactions`] | Toggle/delete links, flash auto-dismiss, row hover |
//! | [`entrance`] | Staggered row and scroll-revealed card animations |
//! | [`toast`] | Self-removing toast notifications |
//! | [`storage`] | Key-value store abstraction and JSON wrapper |
//! | [`dom`] | Page abstraction every behavior is written against |
//! | [`debounce`] | Trailing-edge debounce over page timers |
//! | [`format`] | Date parsing and display |
//! | [`globals`] | Names published on `window.TaskManager` |
//! | [`config`] | Tunables read from the root element |
//! | [`consts`] | Selectors, class names, messages and default timings |
//! | `browser` | `web-sys` implementations of [`dom::PageDom`] and [`storage::KeyValueStore`] (feature `hydrate`) |
//! | `bindings` | Start hook and JavaScript exports (feature `hydrate`) |

pub mod config;
pub mod consts;
pub mod controller;
pub mod debounce;
pub mod dom;
pub mod entrance;
pub mod error;
pub mod form_guard;
pub mod format;
pub mod globals;
pub mod interactions;
pub mod storage;
pub mod theme;
pub mod toast;

#[cfg(feature = "hydrate")]
pub mod bindings;
#[cfg(feature = "hydrate")]
pub mod browser;

#[cfg(test)]
pub(crate) mod testing;
