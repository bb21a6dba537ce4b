//! Blocking runtime for the `blocking` feature

use std::future::Future;

use once_cell::sync::Lazy;
use tokio::runtime::Runtime;

static RUNTIME: Lazy<Runtime> = Lazy::new(|| {
    tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .thread_name("restkit-blocking")
        .build()
        .expect("Can't start Tokio runtime")
});

/// Drive `future` to completion on the crate's runtime
///
/// # Panics
///
/// Panics when called from inside an async runtime, or if the runtime cannot
/// be started.
pub fn block_on<F: Future>(future: F) -> F::Output {
    RUNTIME.block_on(future)
}
