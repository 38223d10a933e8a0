//! Cache-first offline support for the site's service worker.
//!
//! Install populates one named cache from a manifest, all or nothing. Fetches
//! are answered from any cache on an exact URL match and otherwise forward the
//! page's own request to the network, without writing the live response back.
//!
//! Platform access is split into three single-threaded async seams so the
//! same logic runs against the browser's Cache Storage and against
//! [`MemoryCacheStorage`].

use fnv::FnvHashMap;
use futures::future::join_all;
use serde::{Deserialize, Serialize};
use std::cell::RefCell;
use std::rc::Rc;
use thiserror::Error;

pub const DEFAULT_CACHE_NAME: &str = "axysite-cache-v1";

/// Assets the site needs to render offline.
pub const DEFAULT_ASSETS: &[&str] = &[
    "/REMAKE-of-AXYSITE/index.html",
    "/REMAKE-of-AXYSITE/games.html",
    "/REMAKE-of-AXYSITE/style.css",
    "/REMAKE-of-AXYSITE/main.bundle.js",
    "/REMAKE-of-AXYSITE/simulation_worker.bundle.js",
    "/REMAKE-of-AXYSITE/192.png",
    "/REMAKE-of-AXYSITE/512.png",
];

#[derive(Debug, Error)]
pub enum OfflineError {
    #[error("fetch {url} failed: {reason}")]
    Network { url: String, reason: String },

    #[error("fetch {url} returned HTTP {status}")]
    BadStatus { url: String, status: u16 },

    #[error("cache error: {0}")]
    Cache(String),

    #[error("invalid manifest: {0}")]
    Manifest(#[from] serde_json::Error),

    #[error("manifest has an empty cache name")]
    EmptyCacheName,
}

/// Which cache to fill and with what.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CacheManifest {
    pub cache_name: String,
    pub urls: Vec<String>,
}

impl Default for CacheManifest {
    fn default() -> Self {
        Self::new(DEFAULT_CACHE_NAME, DEFAULT_ASSETS.iter().copied())
    }
}

impl CacheManifest {
    pub fn new<'a>(cache_name: &str, urls: impl IntoIterator<Item = &'a str>) -> Self {
        Self {
            cache_name: cache_name.to_string(),
            urls: urls.into_iter().map(str::to_string).collect(),
        }
    }

    /// Parse `{"cacheName": "...", "urls": [...]}`.
    pub fn from_json(json: &str) -> Result<Self, OfflineError> {
        let manifest: CacheManifest = serde_json::from_str(json)?;
        if manifest.cache_name.trim().is_empty() {
            return Err(OfflineError::EmptyCacheName);
        }
        Ok(manifest)
    }
}

/// Minimal view of an HTTP response.
pub trait Fetched {
    fn status(&self) -> u16;

    fn is_ok(&self) -> bool {
        (200..300).contains(&self.status())
    }
}

/// Minimal view of the request a page issued.
pub trait Requested {
    fn url(&self) -> String;
}

#[allow(async_fn_in_trait)]
pub trait Network {
    type Request: Requested;
    type Response: Fetched;

    /// Plain GET of `url`, used to fill the cache.
    async fn fetch(&self, url: &str) -> Result<Self::Response, OfflineError>;

    /// Send the page's request unchanged, keeping its mode, credentials and
    /// headers.
    async fn forward(&self, request: &Self::Request) -> Result<Self::Response, OfflineError>;
}

/// One named cache.
#[allow(async_fn_in_trait)]
pub trait CacheStore {
    type Response;

    async fn put(&self, url: &str, response: Self::Response) -> Result<(), OfflineError>;
    async fn lookup(&self, url: &str) -> Result<Option<Self::Response>, OfflineError>;
    async fn delete(&self, url: &str) -> Result<(), OfflineError>;
}

/// The set of named caches available to the worker.
#[allow(async_fn_in_trait)]
pub trait CacheStorage {
    type Cache: CacheStore;

    /// Open a cache, creating it when absent.
    async fn open(&self, name: &str) -> Result<Self::Cache, OfflineError>;

    /// Exact-URL lookup across every cache, oldest first.
    async fn lookup(
        &self,
        url: &str,
    ) -> Result<Option<<Self::Cache as CacheStore>::Response>, OfflineError>;
}

/// Where a response came from.
#[derive(Clone, Debug, PartialEq)]
pub enum Served<R> {
    Cache(R),
    Network(R),
}

impl<R> Served<R> {
    pub fn into_inner(self) -> R {
        match self {
            Served::Cache(r) | Served::Network(r) => r,
        }
    }

    pub fn from_cache(&self) -> bool {
        matches!(self, Served::Cache(_))
    }
}

pub struct OfflineCache<C, N> {
    caches: C,
    network: N,
    manifest: CacheManifest,
}

impl<C, N> OfflineCache<C, N>
where
    C: CacheStorage,
    C::Cache: CacheStore<Response = N::Response>,
    N: Network,
{
    pub fn new(caches: C, network: N, manifest: CacheManifest) -> Self {
        Self {
            caches,
            network,
            manifest,
        }
    }

    /// Fetch every manifest URL concurrently and store them once all succeed.
    ///
    /// Any transport failure or non-2xx status fails the install before a
    /// single entry is written. A failed write removes the manifest's entries
    /// again. Returns the number of cached entries.
    pub async fn install(&self) -> Result<usize, OfflineError> {
        let cache = self.caches.open(&self.manifest.cache_name).await?;
        let responses = join_all(self.manifest.urls.iter().map(|url| self.fetch_ok(url)))
            .await
            .into_iter()
            .collect::<Result<Vec<_>, _>>()?;
        let count = responses.len();
        for (url, response) in self.manifest.urls.iter().zip(responses) {
            if let Err(e) = cache.put(url, response).await {
                self.roll_back(&cache).await;
                return Err(e);
            }
        }
        log::info!(
            "[sw] installed {} entries into {}",
            count,
            self.manifest.cache_name
        );
        Ok(count)
    }

    async fn roll_back(&self, cache: &C::Cache) {
        for url in &self.manifest.urls {
            if let Err(e) = cache.delete(url).await {
                log::warn!("[sw] could not remove {} after failed install: {}", url, e);
            }
        }
    }

    /// Serve the request from cache by exact URL, falling back to forwarding
    /// it uncached.
    pub async fn respond(
        &self,
        request: &N::Request,
    ) -> Result<Served<N::Response>, OfflineError> {
        let url = request.url();
        match self.caches.lookup(&url).await {
            Ok(Some(hit)) => return Ok(Served::Cache(hit)),
            Ok(None) => {}
            Err(e) => log::warn!("[sw] cache lookup for {} failed: {}", url, e),
        }
        self.network.forward(request).await.map(Served::Network)
    }

    async fn fetch_ok(&self, url: &str) -> Result<N::Response, OfflineError> {
        let response = self.network.fetch(url).await?;
        if !response.is_ok() {
            return Err(OfflineError::BadStatus {
                url: url.to_string(),
                status: response.status(),
            });
        }
        Ok(response)
    }
}

/// A single in-memory cache. Clones share entries.
pub struct MemoryCache<R> {
    entries: Rc<RefCell<FnvHashMap<String, R>>>,
}

impl<R> Clone for MemoryCache<R> {
    fn clone(&self) -> Self {
        Self {
            entries: self.entries.clone(),
        }
    }
}

impl<R: Clone> MemoryCache<R> {
    fn new() -> Self {
        Self {
            entries: Rc::new(RefCell::new(FnvHashMap::default())),
        }
    }

    pub fn len(&self) -> usize {
        self.entries.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.borrow().is_empty()
    }

    pub fn get(&self, url: &str) -> Option<R> {
        self.entries.borrow().get(url).cloned()
    }
}

impl<R: Clone> CacheStore for MemoryCache<R> {
    type Response = R;

    async fn put(&self, url: &str, response: R) -> Result<(), OfflineError> {
        self.entries.borrow_mut().insert(url.to_string(), response);
        Ok(())
    }

    async fn lookup(&self, url: &str) -> Result<Option<R>, OfflineError> {
        Ok(self.get(url))
    }

    async fn delete(&self, url: &str) -> Result<(), OfflineError> {
        self.entries.borrow_mut().remove(url);
        Ok(())
    }
}

/// In-memory stand-in for the browser's Cache Storage. Clones share caches.
pub struct MemoryCacheStorage<R> {
    caches: Rc<RefCell<Vec<(String, MemoryCache<R>)>>>,
}

impl<R> Clone for MemoryCacheStorage<R> {
    fn clone(&self) -> Self {
        Self {
            caches: self.caches.clone(),
        }
    }
}

impl<R: Clone> Default for MemoryCacheStorage<R> {
    fn default() -> Self {
        Self {
            caches: Rc::new(RefCell::new(Vec::new())),
        }
    }
}

impl<R: Clone> MemoryCacheStorage<R> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Names of the caches opened so far, in creation order.
    pub fn names(&self) -> Vec<String> {
        self.caches.borrow().iter().map(|(n, _)| n.clone()).collect()
    }

    pub fn cache(&self, name: &str) -> Option<MemoryCache<R>> {
        self.caches
            .borrow()
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, c)| c.clone())
    }
}

impl<R: Clone> CacheStorage for MemoryCacheStorage<R> {
    type Cache = MemoryCache<R>;

    async fn open(&self, name: &str) -> Result<MemoryCache<R>, OfflineError> {
        if let Some(existing) = self.cache(name) {
            return Ok(existing);
        }
        let cache = MemoryCache::new();
        self.caches
            .borrow_mut()
            .push((name.to_string(), cache.clone()));
        Ok(cache)
    }

    async fn lookup(&self, url: &str) -> Result<Option<R>, OfflineError> {
        Ok(self.caches.borrow().iter().find_map(|(_, c)| c.get(url)))
    }
}
