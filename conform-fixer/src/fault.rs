//! Per-job fault boundary.
//!
//! [`catch`] runs one job and turns a panic into [`JobError::Panicked`], with
//! the panic message and a backtrace captured at the panic site. The process
//! panic hook is wrapped once: inside [`catch`] it records into a thread-local
//! and stays quiet, everywhere else it defers to the previous hook.

use std::any::Any;
use std::backtrace::Backtrace;
use std::cell::{Cell, RefCell};
use std::panic::{self, AssertUnwindSafe};
use std::sync::Once;

use crate::error::JobError;

thread_local! {
    static ACTIVE: Cell<bool> = const { Cell::new(false) };
    static CAPTURED: RefCell<Option<String>> = const { RefCell::new(None) };
}

static HOOK: Once = Once::new();

fn install_hook() {
    HOOK.call_once(|| {
        let previous = panic::take_hook();
        panic::set_hook(Box::new(move |info| {
            if ACTIVE.with(Cell::get) {
                let trace = Backtrace::force_capture().to_string();
                CAPTURED.with(|c| *c.borrow_mut() = Some(trace));
            } else {
                previous(info);
            }
        }));
    });
}

/// Run `f`, containing any panic it raises.
pub fn catch<T>(f: impl FnOnce() -> T) -> Result<T, JobError> {
    install_hook();
    ACTIVE.with(|a| a.set(true));
    let result = panic::catch_unwind(AssertUnwindSafe(f));
    ACTIVE.with(|a| a.set(false));

    result.map_err(|payload| {
        let backtrace = CAPTURED
            .with(|c| c.borrow_mut().take())
            .unwrap_or_default();
        JobError::Panicked {
            message: panic_message(payload.as_ref()),
            backtrace,
        }
    })
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&'static str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "non-string panic payload".to_string()
    }
}
