use std::{borrow::Cow, marker::PhantomData, time::Duration};

use serde::{Serialize, de::DeserializeOwned};

use crate::{
    connection::CacheConnect,
    key::{CacheKey, CacheKeyArg1, CacheKeyAutoConstruct},
};

/// A cache key bound to a connection and a value type
pub struct CacheEntry<'cache, T> {
    cache: &'cache CacheConnect,
    key: Cow<'static, str>,
    _marker: PhantomData<T>,
}

impl<'cache, T> CacheEntry<'cache, T> {
    fn new(cache: &'cache CacheConnect, key: Cow<'static, str>) -> Self {
        Self {
            cache,
            key,
            _marker: PhantomData,
        }
    }

    pub fn key(&self) -> &str { &self.key }

    pub async fn try_get(&self) -> Option<T>
    where
        T: DeserializeOwned,
    {
        self.cache.get(&self.key).await
    }

    pub async fn set_with_expire(&self, value: &T, ttl: Duration)
    where
        T: Serialize + Sync,
    {
        self.cache.set_with_expire(&self.key, value, ttl).await
    }

    pub async fn remove(&self) { self.cache.del(&self.key).await }
}

pub trait CacheBind: CacheKey {
    type Value;

    fn bind_with_args<'cache>(
        &self, cache: &'cache CacheConnect, args: <Self as CacheKey>::Args<'_>,
    ) -> CacheEntry<'cache, Self::Value> {
        CacheEntry::new(cache, CacheKey::get_key_with_args(self, args))
    }

    fn bind_with<'cache>(
        &self, cache: &'cache CacheConnect,
        arg: <<Self as CacheKey>::Args<'_> as CacheKeyArg1>::Arg0,
    ) -> CacheEntry<'cache, Self::Value>
    where
        for<'r> <Self as CacheKey>::Args<'r>: CacheKeyArg1,
    {
        CacheBind::bind_with_args(
            self,
            cache,
            <<Self as CacheKey>::Args<'_> as CacheKeyArg1>::construct(arg),
        )
    }

    fn bind<'cache>(
        &self, cache: &'cache CacheConnect,
    ) -> CacheEntry<'cache, Self::Value>
    where
        for<'r> <Self as CacheKey>::Args<'r>: CacheKeyAutoConstruct,
    {
        CacheBind::bind_with_args(
            self,
            cache,
            CacheKeyAutoConstruct::construct(),
        )
    }
}
