// Shared helpers for the integration tests.

#![allow(dead_code)]

use objc_bridge::Selector;
use std::sync::atomic::{AtomicUsize, Ordering};

static NAME_ID: AtomicUsize = AtomicUsize::new(0);

/// Returns a selector name no other test has used.
pub fn unique_name(prefix: &str) -> String {
    let id = NAME_ID.fetch_add(1, Ordering::SeqCst);
    format!("{prefix}_{id}:")
}

/// Registers a selector with a name no other test has used.
pub fn unique_selector(prefix: &str) -> Selector {
    Selector::register(&unique_name(prefix))
}

/// Names exercising the shapes selectors take in practice.
pub const SAMPLE_NAMES: &[&str] = &[
    "init",
    "alloc",
    "initWithFrame:",
    "performSelector:withObject:afterDelay:",
    "a:b:c:d:e:f:g:h:i:j:",
    "method_with_underscores",
    "method-WithDashes",
    "方法:",
    "method🚀rocket",
    "",
];

/// True when the in-process host runtime serves the primitives.
pub fn host_backend() -> bool {
    objc_bridge::active_backend() == objc_bridge::Backend::Host
}
