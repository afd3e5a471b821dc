/// Read-through caching over [`Cache`](crate::db::Cache).
///
/// Returns the cached value for `$key` when present. Otherwise awaits
/// `$future`, queues the result for a background write with `$ttl` seconds to
/// live, and returns it. Evaluates to an `AppResult`, and cache read errors
/// are propagated with `?`.
///
/// ```rust,ignore
/// let attributes: AppResult<ItemAttributes> =
///     cached!(cache, CacheKey::for_image(&image), ATTRIBUTE_CACHE_TTL, self.call_api(&image));
/// ```
#[macro_export]
macro_rules! cached {
    ($cache:expr, $key:expr, $ttl:expr, $future:expr) => {{
        let key = $key;
        if let Some(cached) = $cache.get_from_cache(&key).await? {
            tracing::debug!(key = %key, "Cache hit");
            Ok(cached)
        } else {
            tracing::debug!(key = %key, "Cache miss");
            let value = $future.await?;
            $cache.set_in_background(&key, &value, $ttl);
            Ok(value)
        }
    }};
}
