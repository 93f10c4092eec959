// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

//! Get-or-create helpers available on every store.

use crate::{Error, Store};

/// Extension methods implemented for every [`Store`], including chains.
///
/// Neither method deduplicates concurrent callers: two callers that miss the
/// same key at the same time both run their generator and both write.
pub trait StoreExt<K, V>: Store<K, V> {
    /// Returns the value stored under `key`, creating it on a miss.
    ///
    /// On a miss, `generator` is called exactly once with the key, its result is
    /// written with `put` and then returned. On a hit the generator is not called.
    ///
    /// # Errors
    ///
    /// Returns an error if the lookup or the write fails.
    ///
    /// # Examples
    ///
    /// ```
    /// # #[cfg(feature = "test-util")]
    /// # fn main() {
    /// use strata_tier::{StoreExt, testing::MockStore};
    /// # futures::executor::block_on(async {
    ///
    /// let store = MockStore::<String, String>::new();
    /// let key = "greeting".to_string();
    ///
    /// let value = store.get_or_create(&key, |k| format!("hello from {k}")).await?;
    /// assert_eq!(value, "hello from greeting");
    /// assert!(store.contains_key(&key));
    /// # Ok::<(), strata_tier::Error>(())
    /// # }).unwrap();
    /// # }
    /// # #[cfg(not(feature = "test-util"))]
    /// # fn main() {}
    /// ```
    fn get_or_create<F>(&self, key: &K, generator: F) -> impl Future<Output = Result<V, Error>> + Send
    where
        F: FnOnce(&K) -> V + Send,
        V: Clone;

    /// Returns the value stored under `key`, creating it with a fallible,
    /// asynchronous generator on a miss.
    ///
    /// A generator error is returned unchanged and nothing is written.
    ///
    /// # Errors
    ///
    /// Returns an error if the lookup, the generator or the write fails.
    fn try_get_or_create<F, Fut>(&self, key: &K, generator: F) -> impl Future<Output = Result<V, Error>> + Send
    where
        F: FnOnce(&K) -> Fut + Send,
        Fut: Future<Output = Result<V, Error>> + Send,
        V: Clone;
}

impl<K, V, S> StoreExt<K, V> for S
where
    S: Store<K, V> + ?Sized,
    K: Sync,
    V: Send,
{
    fn get_or_create<F>(&self, key: &K, generator: F) -> impl Future<Output = Result<V, Error>> + Send
    where
        F: FnOnce(&K) -> V + Send,
        V: Clone,
    {
        async move {
            if let Some(value) = self.get(key).await? {
                return Ok(value);
            }
            let value = generator(key);
            self.put(key, value.clone()).await?;
            Ok(value)
        }
    }

    fn try_get_or_create<F, Fut>(&self, key: &K, generator: F) -> impl Future<Output = Result<V, Error>> + Send
    where
        F: FnOnce(&K) -> Fut + Send,
        Fut: Future<Output = Result<V, Error>> + Send,
        V: Clone,
    {
        async move {
            if let Some(value) = self.get(key).await? {
                return Ok(value);
            }
            let value = generator(key).await?;
            self.put(key, value.clone()).await?;
            Ok(value)
        }
    }
}
