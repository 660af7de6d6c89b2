//! Leptos binding for the query cache.

use futures::future::LocalBoxFuture;
use leptos::prelude::*;

use super::{CachedResult, QueryCache};
use crate::error::ClientResult;

/// Bind one cache entry to a signal for the lifetime of the current reactive owner.
///
/// The subscription is released when the owner is cleaned up (component unmount).
pub fn use_query<V, F>(cache: &QueryCache<V>, key: &'static str, fetch: F) -> ReadSignal<CachedResult<V>>
where
    V: Clone + Send + Sync + 'static,
    F: Fn() -> LocalBoxFuture<'static, ClientResult<V>> + 'static,
{
    let (result, set_result) = signal(cache.read(key, fetch));

    let subscription = cache.subscribe(key, move |snapshot: &CachedResult<V>| {
        set_result.set(snapshot.clone());
    });
    let subscription = StoredValue::new_local(Some(subscription));
    on_cleanup(move || {
        subscription.try_update_value(|held| {
            held.take();
        });
    });

    result
}

#[cfg(all(test, not(target_arch = "wasm32")))]
mod tests {
    use std::rc::Rc;

    use futures::future::FutureExt;
    use leptos::reactive::owner::Owner;
    use tokio::task::LocalSet;

    use super::*;

    #[tokio::test]
    async fn test_subscription_released_on_owner_cleanup() {
        LocalSet::new()
            .run_until(async {
                let cache = QueryCache::<u32>::new(Rc::new(|task: LocalBoxFuture<'static, ()>| {
                    tokio::task::spawn_local(task);
                }));
                let fetch = || async { Ok::<u32, crate::error::ClientError>(3) }.boxed_local();

                let owner = Owner::new();
                let result = owner.with(|| use_query(&cache, "todos", fetch));
                assert_eq!(cache.subscriber_count("todos"), 1);

                let settled = cache.settled("todos").await;
                assert_eq!(settled.value, Some(3));
                assert_eq!(result.get_untracked().value, Some(3));

                owner.cleanup();
                assert_eq!(cache.subscriber_count("todos"), 0);
            })
            .await;
    }
}
