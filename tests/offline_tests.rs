// Host-side tests for the service worker's cache logic, using in-memory
// caches and a scripted network.

use futures::executor::block_on;
use site_web::core::offline::*;
use std::cell::RefCell;
use std::collections::{HashMap, HashSet};
use std::rc::Rc;

#[derive(Clone, Debug, PartialEq)]
struct Resp {
    url: String,
    status: u16,
}

impl Fetched for Resp {
    fn status(&self) -> u16 {
        self.status
    }
}

/// A page request: the URL plus the fetch mode the page asked for.
#[derive(Clone, Debug, PartialEq)]
struct Req {
    url: String,
    mode: &'static str,
}

impl Requested for Req {
    fn url(&self) -> String {
        self.url.clone()
    }
}

fn get(url: &str) -> Req {
    Req {
        url: url.to_string(),
        mode: "cors",
    }
}

#[derive(Clone, Default)]
struct StubNetwork {
    statuses: HashMap<String, u16>,
    unreachable: HashSet<String>,
    calls: Rc<RefCell<Vec<String>>>,
    forwarded: Rc<RefCell<Vec<Req>>>,
}

impl StubNetwork {
    fn with_status(mut self, url: &str, status: u16) -> Self {
        self.statuses.insert(url.to_string(), status);
        self
    }

    fn unreachable(mut self, url: &str) -> Self {
        self.unreachable.insert(url.to_string());
        self
    }
}

impl Network for StubNetwork {
    type Request = Req;
    type Response = Resp;

    async fn fetch(&self, url: &str) -> Result<Resp, OfflineError> {
        self.calls.borrow_mut().push(url.to_string());
        if self.unreachable.contains(url) {
            return Err(OfflineError::Network {
                url: url.to_string(),
                reason: "offline".to_string(),
            });
        }
        Ok(Resp {
            url: url.to_string(),
            status: self.statuses.get(url).copied().unwrap_or(200),
        })
    }

    async fn forward(&self, request: &Req) -> Result<Resp, OfflineError> {
        self.forwarded.borrow_mut().push(request.clone());
        self.fetch(&request.url).await
    }
}

/// Cache storage that can be told to fail a write for one URL, or every
/// lookup.
#[derive(Clone, Default)]
struct FaultyStorage {
    inner: MemoryCacheStorage<Resp>,
    failing_put: Option<String>,
    failing_lookup: bool,
}

struct FaultyCache {
    inner: MemoryCache<Resp>,
    failing_put: Option<String>,
}

impl CacheStore for FaultyCache {
    type Response = Resp;

    async fn put(&self, url: &str, response: Resp) -> Result<(), OfflineError> {
        if self.failing_put.as_deref() == Some(url) {
            return Err(OfflineError::Cache("quota exceeded".to_string()));
        }
        self.inner.put(url, response).await
    }

    async fn lookup(&self, url: &str) -> Result<Option<Resp>, OfflineError> {
        self.inner.lookup(url).await
    }

    async fn delete(&self, url: &str) -> Result<(), OfflineError> {
        self.inner.delete(url).await
    }
}

impl CacheStorage for FaultyStorage {
    type Cache = FaultyCache;

    async fn open(&self, name: &str) -> Result<FaultyCache, OfflineError> {
        Ok(FaultyCache {
            inner: self.inner.open(name).await?,
            failing_put: self.failing_put.clone(),
        })
    }

    async fn lookup(&self, url: &str) -> Result<Option<Resp>, OfflineError> {
        if self.failing_lookup {
            return Err(OfflineError::Cache("storage unavailable".to_string()));
        }
        self.inner.lookup(url).await
    }
}

fn manifest() -> CacheManifest {
    CacheManifest::new("site-v1", ["/a.html", "/b.css"])
}

fn setup(
    network: StubNetwork,
) -> (
    OfflineCache<MemoryCacheStorage<Resp>, StubNetwork>,
    MemoryCacheStorage<Resp>,
    Rc<RefCell<Vec<String>>>,
) {
    let caches = MemoryCacheStorage::new();
    let calls = network.calls.clone();
    let worker = OfflineCache::new(caches.clone(), network, manifest());
    (worker, caches, calls)
}

#[test]
fn install_caches_every_manifest_entry() {
    let (worker, caches, calls) = setup(StubNetwork::default());
    assert_eq!(block_on(worker.install()).unwrap(), 2);
    let cache = caches.cache("site-v1").expect("cache created");
    assert_eq!(cache.len(), 2);
    assert_eq!(cache.get("/b.css").unwrap().url, "/b.css");
    assert_eq!(calls.borrow().len(), 2);
}

#[test]
fn install_fails_without_caching_anything_when_one_asset_404s() {
    let (worker, caches, _) = setup(StubNetwork::default().with_status("/b.css", 404));
    let err = block_on(worker.install()).unwrap_err();
    assert!(
        matches!(err, OfflineError::BadStatus { ref url, status: 404 } if url == "/b.css"),
        "{err}"
    );
    let cache = caches.cache("site-v1").expect("cache opened before fetching");
    assert!(cache.is_empty());
    assert_eq!(block_on(caches.lookup("/a.html")).unwrap(), None);
}

#[test]
fn install_fails_when_an_asset_is_unreachable() {
    let (worker, caches, _) = setup(StubNetwork::default().unreachable("/a.html"));
    assert!(matches!(
        block_on(worker.install()),
        Err(OfflineError::Network { .. })
    ));
    assert!(caches.cache("site-v1").unwrap().is_empty());
}

#[test]
fn installed_asset_is_served_from_cache_without_network() {
    let (worker, _, calls) = setup(StubNetwork::default());
    block_on(worker.install()).unwrap();
    calls.borrow_mut().clear();

    let served = block_on(worker.respond(&get("/a.html"))).unwrap();
    assert!(served.from_cache());
    assert_eq!(served.into_inner().url, "/a.html");
    assert!(calls.borrow().is_empty());
}

#[test]
fn cache_miss_falls_back_to_network_without_write_back() {
    let (worker, caches, calls) = setup(StubNetwork::default().with_status("/missing", 404));
    block_on(worker.install()).unwrap();
    calls.borrow_mut().clear();

    let first = block_on(worker.respond(&get("/missing"))).unwrap();
    assert_eq!(
        first,
        Served::Network(Resp {
            url: "/missing".to_string(),
            status: 404
        })
    );
    assert_eq!(caches.cache("site-v1").unwrap().len(), 2);

    let second = block_on(worker.respond(&get("/missing"))).unwrap();
    assert!(!second.from_cache());
    assert_eq!(calls.borrow().len(), 2);
}

#[test]
fn cache_miss_forwards_the_page_request_unchanged() {
    let network = StubNetwork::default();
    let forwarded = network.forwarded.clone();
    let worker = OfflineCache::new(MemoryCacheStorage::new(), network, manifest());
    let request = Req {
        url: "https://cdn.example/x.png".to_string(),
        mode: "no-cors",
    };
    let served = block_on(worker.respond(&request)).unwrap();
    assert!(!served.from_cache());
    assert_eq!(*forwarded.borrow(), vec![request]);
}

#[test]
fn cached_hit_is_not_forwarded() {
    let network = StubNetwork::default();
    let forwarded = network.forwarded.clone();
    let (worker, _, _) = setup(network);
    block_on(worker.install()).unwrap();
    assert!(block_on(worker.respond(&get("/b.css"))).unwrap().from_cache());
    assert!(forwarded.borrow().is_empty());
}

#[test]
fn failed_cache_write_leaves_no_manifest_entries() {
    let caches = FaultyStorage {
        failing_put: Some("/b.css".to_string()),
        ..FaultyStorage::default()
    };
    let network = StubNetwork::default();
    let forwarded = network.forwarded.clone();
    let worker = OfflineCache::new(caches.clone(), network, manifest());

    let err = block_on(worker.install()).unwrap_err();
    assert!(matches!(err, OfflineError::Cache(_)), "{err}");
    assert!(caches.inner.cache("site-v1").unwrap().is_empty());

    let served = block_on(worker.respond(&get("/a.html"))).unwrap();
    assert!(!served.from_cache());
    assert_eq!(forwarded.borrow().len(), 1);
}

#[test]
fn failed_cache_lookup_falls_back_to_network() {
    let caches = FaultyStorage {
        failing_lookup: true,
        ..FaultyStorage::default()
    };
    let network = StubNetwork::default();
    let forwarded = network.forwarded.clone();
    let worker = OfflineCache::new(caches, network, manifest());
    block_on(worker.install()).unwrap();

    let served = block_on(worker.respond(&get("/a.html"))).unwrap();
    assert_eq!(
        served,
        Served::Network(Resp {
            url: "/a.html".to_string(),
            status: 200
        })
    );
    assert_eq!(*forwarded.borrow(), vec![get("/a.html")]);
}

#[test]
fn network_failure_on_cache_miss_propagates() {
    let (worker, _, _) = setup(StubNetwork::default().unreachable("/x.js"));
    let err = block_on(worker.respond(&get("/x.js"))).unwrap_err();
    assert!(matches!(err, OfflineError::Network { ref url, .. } if url == "/x.js"));
}

#[test]
fn earlier_caches_are_left_in_place_and_still_match() {
    let caches = MemoryCacheStorage::new();
    let old = block_on(caches.open("site-v0")).unwrap();
    block_on(old.put(
        "/legacy.js",
        Resp {
            url: "/legacy.js".to_string(),
            status: 200,
        },
    ))
    .unwrap();

    let network = StubNetwork::default();
    let calls = network.calls.clone();
    let worker = OfflineCache::new(caches.clone(), network, manifest());
    block_on(worker.install()).unwrap();
    calls.borrow_mut().clear();

    assert_eq!(caches.names(), vec!["site-v0".to_string(), "site-v1".to_string()]);
    assert!(block_on(worker.respond(&get("/legacy.js"))).unwrap().from_cache());
    assert!(calls.borrow().is_empty());
}

#[test]
fn reinstall_reuses_the_named_cache() {
    let (worker, caches, _) = setup(StubNetwork::default());
    block_on(worker.install()).unwrap();
    block_on(worker.install()).unwrap();
    assert_eq!(caches.names().len(), 1);
    assert_eq!(caches.cache("site-v1").unwrap().len(), 2);
}

#[test]
fn default_manifest_lists_site_assets() {
    let m = CacheManifest::default();
    assert_eq!(m.cache_name, DEFAULT_CACHE_NAME);
    assert_eq!(m.urls.len(), 7);
    assert!(m.urls.iter().all(|u| u.starts_with('/')));
    assert_eq!(m.urls[0], "/REMAKE-of-AXYSITE/index.html");
}

#[test]
fn manifest_parses_from_json() {
    let m = CacheManifest::from_json(r#"{"cacheName":"games-v2","urls":["/games.html"]}"#)
        .unwrap();
    assert_eq!(m, CacheManifest::new("games-v2", ["/games.html"]));

    assert!(matches!(
        CacheManifest::from_json(r#"{"cacheName":"  ","urls":[]}"#),
        Err(OfflineError::EmptyCacheName)
    ));
    assert!(matches!(
        CacheManifest::from_json(r#"{"urls":[]}"#),
        Err(OfflineError::Manifest(_))
    ));
}

#[test]
fn only_2xx_statuses_count_as_ok() {
    let ok = |status| {
        Resp {
            url: String::new(),
            status,
        }
        .is_ok()
    };
    assert!(ok(200));
    assert!(ok(204));
    assert!(!ok(304));
    assert!(!ok(404));
    assert!(!ok(500));
}
