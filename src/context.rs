//! Application Context
//!
//! Shared handles provided via Leptos Context API.

use std::rc::Rc;

use leptos::prelude::*;

use crate::actions::TaskCache;
use crate::api::TaskStore;

/// App-wide handles provided via context.
///
/// The cache and store are single-threaded, so they live in local arena storage and
/// the context itself stays `Copy`.
#[derive(Clone, Copy)]
pub struct AppContext {
    cache: StoredValue<TaskCache, LocalStorage>,
    store: StoredValue<Rc<dyn TaskStore>, LocalStorage>,
}

impl AppContext {
    pub fn new(cache: TaskCache, store: Rc<dyn TaskStore>) -> Self {
        Self {
            cache: StoredValue::new_local(cache),
            store: StoredValue::new_local(store),
        }
    }

    /// Query cache shared by every view
    pub fn cache(&self) -> TaskCache {
        self.cache.get_value()
    }

    /// Remote task store
    pub fn store(&self) -> Rc<dyn TaskStore> {
        self.store.get_value()
    }

    /// Drop all cached queries when the view tree goes away
    pub fn teardown(&self) {
        let _ = self.cache.try_with_value(|cache| cache.clear());
    }
}
