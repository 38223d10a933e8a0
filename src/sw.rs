//! Service-worker entry points. The worker script forwards its `install`,
//! `activate` and `fetch` events to the exported handlers below.

use crate::core::offline::{
    CacheManifest, CacheStorage, CacheStore, Fetched, Network, OfflineCache, OfflineError,
    Requested,
};
use std::cell::RefCell;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::{future_to_promise, JsFuture};
use web_sys as web;

thread_local! {
    static MANIFEST: RefCell<CacheManifest> = RefCell::new(CacheManifest::default());
}

fn scope() -> Result<web::ServiceWorkerGlobalScope, JsValue> {
    js_sys::global()
        .dyn_into::<web::ServiceWorkerGlobalScope>()
        .map_err(|_| JsValue::from_str("not running in a service worker"))
}

fn cache_err(e: JsValue) -> OfflineError {
    OfflineError::Cache(format!("{:?}", e))
}

impl Fetched for web::Response {
    fn status(&self) -> u16 {
        web::Response::status(self)
    }
}

impl Requested for web::Request {
    fn url(&self) -> String {
        web::Request::url(self)
    }
}

pub struct WebNetwork {
    scope: web::ServiceWorkerGlobalScope,
}

async fn settle(url: &str, pending: js_sys::Promise) -> Result<web::Response, OfflineError> {
    let network_err = |e: JsValue| OfflineError::Network {
        url: url.to_string(),
        reason: format!("{:?}", e),
    };
    JsFuture::from(pending)
        .await
        .map_err(network_err)?
        .dyn_into::<web::Response>()
        .map_err(network_err)
}

impl Network for WebNetwork {
    type Request = web::Request;
    type Response = web::Response;

    async fn fetch(&self, url: &str) -> Result<web::Response, OfflineError> {
        settle(url, self.scope.fetch_with_str(url)).await
    }

    async fn forward(&self, request: &web::Request) -> Result<web::Response, OfflineError> {
        settle(&request.url(), self.scope.fetch_with_request(request)).await
    }
}

pub struct WebCache {
    inner: web::Cache,
}

impl CacheStore for WebCache {
    type Response = web::Response;

    async fn put(&self, url: &str, response: web::Response) -> Result<(), OfflineError> {
        JsFuture::from(self.inner.put_with_str(url, &response))
            .await
            .map(|_| ())
            .map_err(cache_err)
    }

    async fn lookup(&self, url: &str) -> Result<Option<web::Response>, OfflineError> {
        let hit = JsFuture::from(self.inner.match_with_str(url))
            .await
            .map_err(cache_err)?;
        Ok(hit.dyn_into::<web::Response>().ok())
    }

    async fn delete(&self, url: &str) -> Result<(), OfflineError> {
        JsFuture::from(self.inner.delete_with_str(url))
            .await
            .map(|_| ())
            .map_err(cache_err)
    }
}

pub struct WebCacheStorage {
    inner: web::CacheStorage,
}

impl CacheStorage for WebCacheStorage {
    type Cache = WebCache;

    async fn open(&self, name: &str) -> Result<WebCache, OfflineError> {
        let cache = JsFuture::from(self.inner.open(name))
            .await
            .map_err(cache_err)?
            .dyn_into::<web::Cache>()
            .map_err(cache_err)?;
        Ok(WebCache { inner: cache })
    }

    async fn lookup(&self, url: &str) -> Result<Option<web::Response>, OfflineError> {
        let hit = JsFuture::from(self.inner.match_with_str(url))
            .await
            .map_err(cache_err)?;
        Ok(hit.dyn_into::<web::Response>().ok())
    }
}

type WebOfflineCache = OfflineCache<WebCacheStorage, WebNetwork>;

fn offline_cache(scope: &web::ServiceWorkerGlobalScope) -> Result<WebOfflineCache, JsValue> {
    let caches = scope.caches()?;
    let manifest = MANIFEST.with(|m| m.borrow().clone());
    Ok(OfflineCache::new(
        WebCacheStorage { inner: caches },
        WebNetwork {
            scope: scope.clone(),
        },
        manifest,
    ))
}

fn to_js(e: OfflineError) -> JsValue {
    JsValue::from_str(&e.to_string())
}

/// Replace the built-in manifest with `{"cacheName": ..., "urls": [...]}`.
#[wasm_bindgen]
pub fn sw_configure(manifest_json: &str) -> Result<(), JsValue> {
    let manifest = CacheManifest::from_json(manifest_json).map_err(to_js)?;
    log::info!(
        "[sw] manifest {} with {} urls",
        manifest.cache_name,
        manifest.urls.len()
    );
    MANIFEST.with(|m| *m.borrow_mut() = manifest);
    Ok(())
}

#[wasm_bindgen]
pub fn sw_install(event: web::ExtendableEvent) -> Result<(), JsValue> {
    let scope = scope()?;
    let worker = offline_cache(&scope)?;
    let done = future_to_promise(async move {
        match worker.install().await {
            Ok(count) => Ok(JsValue::from(count as u32)),
            Err(e) => {
                log::error!("[sw] install failed: {}", e);
                Err(to_js(e))
            }
        }
    });
    event.wait_until(&done)?;
    _ = scope.skip_waiting()?;
    Ok(())
}

/// Take control of already-open pages without waiting for a reload.
///
/// Caches left behind by earlier cache names are not removed.
#[wasm_bindgen]
pub fn sw_activate(event: web::ExtendableEvent) -> Result<(), JsValue> {
    let scope = scope()?;
    event.wait_until(&scope.clients().claim())
}

#[wasm_bindgen]
pub fn sw_fetch(event: web::FetchEvent) -> Result<(), JsValue> {
    let scope = scope()?;
    let request = event.request();
    if request.method() != "GET" {
        // Cache Storage only ever matches GET requests.
        return event.respond_with(&scope.fetch_with_request(&request));
    }
    let worker = offline_cache(&scope)?;
    let response = future_to_promise(async move {
        match worker.respond(&request).await {
            Ok(served) => {
                let source = if served.from_cache() { "cache" } else { "network" };
                log::debug!("[sw] {} from {}", request.url(), source);
                Ok(served.into_inner().into())
            }
            Err(e) => Err(to_js(e)),
        }
    });
    event.respond_with(&response)
}
