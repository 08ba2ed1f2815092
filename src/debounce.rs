//! Trailing-edge debounce over fire-once timers.
//!
//! Every call schedules a fresh timer and bumps a generation counter. When a
//! timer fires it only invokes the wrapped function if no newer call has been
//! made since it was scheduled, so a burst of calls collapses into one call
//! carrying the last arguments.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use crate::dom::Timers;

struct Shared<A> {
    generation: Cell<u64>,
    pending: RefCell<Option<A>>,
    func: RefCell<Box<dyn FnMut(A)>>,
}

/// A debounced wrapper around `FnMut(A)`.
pub struct Debounced<A, T: ?Sized> {
    shared: Rc<Shared<A>>,
    timers: Rc<T>,
    wait_ms: u32,
}

impl<A: 'static, T: Timers + ?Sized + 'static> Debounced<A, T> {
    pub fn new(timers: Rc<T>, wait_ms: u32, func: impl FnMut(A) + 'static) -> Self {
        Self {
            shared: Rc::new(Shared {
                generation: Cell::new(0),
                pending: RefCell::new(None),
                func: RefCell::new(Box::new(func)),
            }),
            timers,
            wait_ms,
        }
    }

    /// Record `args` and restart the quiet-period timer.
    pub fn call(&self, args: A) {
        let generation = self.shared.generation.get().wrapping_add(1);
        self.shared.generation.set(generation);
        *self.shared.pending.borrow_mut() = Some(args);

        let shared = Rc::clone(&self.shared);
        self.timers.set_timeout(
            self.wait_ms,
            Box::new(move || {
                if shared.generation.get() != generation {
                    return;
                }
                let args = shared.pending.borrow_mut().take();
                if let Some(args) = args {
                    (&mut *shared.func.borrow_mut())(args);
                }
            }),
        );
    }
}

#[cfg(test)]
#[path = "debounce_test.rs"]
mod debounce_test;
