use async_trait::async_trait;
use thiserror::Error;

/// Name of the cache this build serves from. Bump it to evict old assets.
pub const CACHE_VERSION: &str = "ct-cache-v2";

/// Assets fetched into the cache on install. Nothing else is ever cached.
///
/// The script and wasm names are the unhashed build outputs; `Trunk.toml`
/// must keep `filehash = false`, or install fails on the first missing asset.
pub const ASSETS: &[&str] = &[
    "/",
    "/index.html",
    "/style.css",
    "/calorie-tracker.js",
    "/calorie-tracker_bg.wasm",
    "/settings",
];

#[derive(Debug, Error)]
pub enum OfflineError {
    #[error("Cache error: {0}")]
    Cache(String),

    #[error("Network error: {0}")]
    Network(String),

    #[error("{0} is not available")]
    Unavailable(&'static str),
}

/// The worker's persistent cache storage.
#[async_trait(?Send)]
pub trait CacheStorage {
    type Request;
    type Response;

    /// Fetch every URL and store the responses under `cache_name`.
    async fn add_all(&self, cache_name: &str, urls: &[String]) -> Result<(), OfflineError>;

    async fn keys(&self) -> Result<Vec<String>, OfflineError>;

    async fn delete(&self, cache_name: &str) -> Result<bool, OfflineError>;

    /// Cached response for `request` from any cache, if one exists.
    async fn lookup(&self, request: &Self::Request)
        -> Result<Option<Self::Response>, OfflineError>;
}

#[async_trait(?Send)]
pub trait Network {
    type Request;
    type Response;

    async fn fetch(&self, request: &Self::Request) -> Result<Self::Response, OfflineError>;
}

/// Lifecycle controls of the worker itself.
#[async_trait(?Send)]
pub trait WorkerScope {
    /// Become active without waiting for old pages to close.
    async fn skip_waiting(&self) -> Result<(), OfflineError>;

    /// Take control of every open page.
    async fn claim_clients(&self) -> Result<(), OfflineError>;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CachePolicy {
    pub version: String,
    pub assets: Vec<String>,
}

impl Default for CachePolicy {
    fn default() -> Self {
        Self {
            version: CACHE_VERSION.to_string(),
            assets: ASSETS.iter().map(|a| a.to_string()).collect(),
        }
    }
}

/// Cache-first, read-through shim. Network responses are never written back.
pub struct OfflineCache<C, N, W> {
    policy: CachePolicy,
    caches: C,
    network: N,
    scope: W,
}

impl<C, N, W> OfflineCache<C, N, W>
where
    C: CacheStorage,
    N: Network<Request = C::Request, Response = C::Response>,
    W: WorkerScope,
{
    pub fn new(policy: CachePolicy, caches: C, network: N, scope: W) -> Self {
        Self {
            policy,
            caches,
            network,
            scope,
        }
    }

    pub fn caches(&self) -> &C {
        &self.caches
    }

    pub async fn install(&self) -> Result<(), OfflineError> {
        self.scope.skip_waiting().await?;
        self.caches
            .add_all(&self.policy.version, &self.policy.assets)
            .await?;
        log::info!(
            "Installed {} assets into {}",
            self.policy.assets.len(),
            self.policy.version
        );
        Ok(())
    }

    /// Delete every cache but the current version, then claim open pages.
    /// Returns the names of the evicted caches.
    pub async fn activate(&self) -> Result<Vec<String>, OfflineError> {
        let mut evicted = Vec::new();
        for name in self.caches.keys().await? {
            if name != self.policy.version && self.caches.delete(&name).await? {
                log::info!("Evicted stale cache {}", name);
                evicted.push(name);
            }
        }
        self.scope.claim_clients().await?;
        Ok(evicted)
    }

    pub async fn fetch(&self, request: &C::Request) -> Result<C::Response, OfflineError> {
        if let Some(cached) = self.caches.lookup(request).await? {
            return Ok(cached);
        }
        self.network.fetch(request).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::{Cell, RefCell};
    use std::collections::{BTreeMap, HashMap};
    use std::rc::Rc;

    /// Files the network can serve. Empty means offline.
    #[derive(Clone, Default)]
    struct Origin {
        files: Rc<RefCell<HashMap<String, String>>>,
    }

    impl Origin {
        fn serving(urls: &[&str]) -> Self {
            let origin = Origin::default();
            for url in urls {
                origin
                    .files
                    .borrow_mut()
                    .insert(url.to_string(), format!("body of {}", url));
            }
            origin
        }

        fn go_offline(&self) {
            self.files.borrow_mut().clear();
        }
    }

    #[async_trait(?Send)]
    impl Network for Origin {
        type Request = String;
        type Response = String;

        async fn fetch(&self, request: &String) -> Result<String, OfflineError> {
            self.files
                .borrow()
                .get(request)
                .cloned()
                .ok_or_else(|| OfflineError::Network(format!("failed to fetch {}", request)))
        }
    }

    struct MemoryCaches {
        origin: Origin,
        caches: RefCell<BTreeMap<String, HashMap<String, String>>>,
    }

    impl MemoryCaches {
        fn new(origin: Origin) -> Self {
            Self {
                origin,
                caches: RefCell::new(BTreeMap::new()),
            }
        }

        fn seed(&self, name: &str, url: &str, body: &str) {
            self.caches
                .borrow_mut()
                .entry(name.to_string())
                .or_default()
                .insert(url.to_string(), body.to_string());
        }
    }

    #[async_trait(?Send)]
    impl CacheStorage for MemoryCaches {
        type Request = String;
        type Response = String;

        async fn add_all(&self, cache_name: &str, urls: &[String]) -> Result<(), OfflineError> {
            let mut fetched = HashMap::new();
            for url in urls {
                let body = self
                    .origin
                    .fetch(url)
                    .await
                    .map_err(|e| OfflineError::Cache(e.to_string()))?;
                fetched.insert(url.clone(), body);
            }
            self.caches
                .borrow_mut()
                .entry(cache_name.to_string())
                .or_default()
                .extend(fetched);
            Ok(())
        }

        async fn keys(&self) -> Result<Vec<String>, OfflineError> {
            Ok(self.caches.borrow().keys().cloned().collect())
        }

        async fn delete(&self, cache_name: &str) -> Result<bool, OfflineError> {
            Ok(self.caches.borrow_mut().remove(cache_name).is_some())
        }

        async fn lookup(&self, request: &String) -> Result<Option<String>, OfflineError> {
            Ok(self
                .caches
                .borrow()
                .values()
                .find_map(|cache| cache.get(request).cloned()))
        }
    }

    #[derive(Clone, Default)]
    struct RecordingScope {
        skipped_waiting: Rc<Cell<bool>>,
        claimed: Rc<Cell<bool>>,
    }

    #[async_trait(?Send)]
    impl WorkerScope for RecordingScope {
        async fn skip_waiting(&self) -> Result<(), OfflineError> {
            self.skipped_waiting.set(true);
            Ok(())
        }

        async fn claim_clients(&self) -> Result<(), OfflineError> {
            self.claimed.set(true);
            Ok(())
        }
    }

    fn shim(origin: &Origin, scope: &RecordingScope) -> OfflineCache<MemoryCaches, Origin, RecordingScope> {
        OfflineCache::new(
            CachePolicy::default(),
            MemoryCaches::new(origin.clone()),
            origin.clone(),
            scope.clone(),
        )
    }

    #[test]
    fn test_build_keeps_allowlisted_names_unhashed() {
        let trunk = include_str!("../../Trunk.toml");
        assert!(trunk.lines().any(|l| l.trim() == "filehash = false"));
        assert!(ASSETS.contains(&"/calorie-tracker.js"));
        assert!(ASSETS.contains(&"/calorie-tracker_bg.wasm"));
    }

    #[tokio::test]
    async fn test_install_caches_allowlist_and_skips_waiting() {
        let origin = Origin::serving(ASSETS);
        let scope = RecordingScope::default();
        let shim = shim(&origin, &scope);

        shim.install().await.unwrap();

        assert!(scope.skipped_waiting.get());
        assert_eq!(shim.caches().keys().await.unwrap(), vec![CACHE_VERSION]);
        for asset in ASSETS {
            let cached = shim.caches().lookup(&asset.to_string()).await.unwrap();
            assert_eq!(cached, Some(format!("body of {}", asset)));
        }
    }

    #[tokio::test]
    async fn test_install_fails_when_an_asset_is_missing() {
        let origin = Origin::serving(&["/", "/index.html"]);
        let scope = RecordingScope::default();
        let shim = shim(&origin, &scope);

        assert!(matches!(shim.install().await, Err(OfflineError::Cache(_))));
        assert!(shim.caches().lookup(&"/".to_string()).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_activate_leaves_only_current_version() {
        let origin = Origin::serving(ASSETS);
        let scope = RecordingScope::default();
        let shim = shim(&origin, &scope);
        shim.caches().seed("ct-cache-v1", "/app.js", "old script");
        shim.caches().seed("ct-cache", "/style.css", "old style");

        shim.install().await.unwrap();
        let evicted = shim.activate().await.unwrap();

        assert_eq!(evicted, vec!["ct-cache", "ct-cache-v1"]);
        assert_eq!(shim.caches().keys().await.unwrap(), vec![CACHE_VERSION]);
        assert!(scope.claimed.get());
    }

    #[tokio::test]
    async fn test_listed_asset_served_offline() {
        let origin = Origin::serving(ASSETS);
        let scope = RecordingScope::default();
        let shim = shim(&origin, &scope);
        shim.install().await.unwrap();
        shim.activate().await.unwrap();

        origin.go_offline();

        let resp = shim.fetch(&"/style.css".to_string()).await.unwrap();
        assert_eq!(resp, "body of /style.css");
    }

    #[tokio::test]
    async fn test_unlisted_request_fails_offline() {
        let origin = Origin::serving(ASSETS);
        let scope = RecordingScope::default();
        let shim = shim(&origin, &scope);
        shim.install().await.unwrap();

        origin.go_offline();

        let result = shim.fetch(&"/api/entries/".to_string()).await;
        assert!(matches!(result, Err(OfflineError::Network(_))));
    }

    #[tokio::test]
    async fn test_cache_miss_is_not_written_back() {
        let mut urls: Vec<&str> = ASSETS.to_vec();
        urls.push("/api/entries/");
        let origin = Origin::serving(&urls);
        let scope = RecordingScope::default();
        let shim = shim(&origin, &scope);
        shim.install().await.unwrap();

        let resp = shim.fetch(&"/api/entries/".to_string()).await.unwrap();
        assert_eq!(resp, "body of /api/entries/");
        assert!(shim
            .caches()
            .lookup(&"/api/entries/".to_string())
            .await
            .unwrap()
            .is_none());
    }
}
