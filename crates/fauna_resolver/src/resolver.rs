//! Three-tier image resolution.

use crate::{FetchRequest, ImageTransport, ReqwestTransport};
use fauna_cache::{ImageCache, ImageCacheConfig};
use fauna_core::{Animal, ApiEndpoint, SourceKind, static_image};
use fauna_error::{FaunaResult, TransportError, TransportErrorKind};
use fauna_rate_limit::{CredentialsConfig, FaunaConfig, FetchGate, RetryPolicy};
use parking_lot::Mutex;
use rand::seq::SliceRandom;
use std::sync::atomic::{AtomicUsize, Ordering};
use tokio_retry2::{Retry, RetryError};
use tracing::{debug, info, warn};

/// Resolves animal categories to image URLs.
///
/// One resolver is built at startup and shared (by reference or `Arc`) by
/// every command and the daily scheduler, so its cache and fetch gate are
/// process-wide.
///
/// # Example
///
/// ```no_run
/// use fauna_rate_limit::FaunaConfig;
/// use fauna_resolver::Resolver;
///
/// # #[tokio::main]
/// # async fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let resolver = Resolver::from_config(&FaunaConfig::load()?)?;
/// let url = resolver.resolve("fox", None).await;
/// println!("{url}");
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct Resolver<T = ReqwestTransport> {
    transport: T,
    cache: Mutex<ImageCache>,
    gate: FetchGate,
    policy: RetryPolicy,
    credentials: CredentialsConfig,
    wildlife_enabled: bool,
    wildlife_base_url: String,
}

impl Resolver<ReqwestTransport> {
    /// Build a resolver that talks to the real APIs.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built.
    pub fn from_config(config: &FaunaConfig) -> FaunaResult<Self> {
        let transport = ReqwestTransport::from_config(&config.resolver)?;
        Ok(Self::with_transport(transport, config))
    }
}

impl<T: ImageTransport> Resolver<T> {
    /// Build a resolver over any transport.
    pub fn with_transport(transport: T, config: &FaunaConfig) -> Self {
        let resolver = &config.resolver;
        let cache = ImageCacheConfig::default()
            .with_cache_duration(resolver.cache_duration_secs)
            .with_max_size(resolver.cache_max_size);

        Self {
            transport,
            cache: Mutex::new(ImageCache::new(cache)),
            gate: FetchGate::from_config(resolver),
            policy: RetryPolicy::from_config(resolver),
            credentials: config.credentials.clone(),
            wildlife_enabled: resolver.wildlife_enabled,
            wildlife_base_url: resolver.wildlife_base_url.clone(),
        }
    }

    /// The transport in use.
    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// The shared fetch gate.
    pub fn gate(&self) -> &FetchGate {
        &self.gate
    }

    /// Where images for `category` come from under this configuration.
    pub fn source_for(&self, category: &str) -> SourceKind {
        SourceKind::for_category(category, self.wildlife_enabled)
    }

    /// Resolve `category` to an image URL.
    ///
    /// `credentials` overrides the configured API key for endpoints that take
    /// one; an empty string counts as absent. Never fails: every error falls
    /// through to the static pool.
    #[tracing::instrument(skip(self, credentials), fields(has_credentials = credentials.is_some()))]
    pub async fn resolve(&self, category: &str, credentials: Option<&str>) -> String {
        let key = normalize(category);

        let cached = self.cache.lock().get(&key);
        if let Some(url) = cached {
            debug!("Serving cached image");
            return url;
        }

        if let Some(request) = self.request_for(&key, credentials)
            && let Some(url) = self.fetch_live(&request).await
        {
            self.cache.lock().insert(&key, url.clone());
            return url;
        }

        self.static_fallback(&key)
    }

    /// A random image from the static pool, without any network call.
    pub fn static_fallback(&self, category: &str) -> String {
        let url = static_image(&normalize(category));
        debug!(url = %url, "Using static fallback");
        url
    }

    /// Pick one of the API-backed animals at random.
    pub fn random_api_category(&self) -> Animal {
        ApiEndpoint::all()
            .choose(&mut rand::thread_rng())
            .map(|endpoint| endpoint.animal())
            .unwrap_or(Animal::Cat)
    }

    /// Number of categories currently cached.
    pub fn cached_len(&self) -> usize {
        self.cache.lock().len()
    }

    /// Forget every cached image.
    pub fn clear_cache(&self) {
        self.cache.lock().clear();
    }

    fn request_for(&self, category: &str, credentials: Option<&str>) -> Option<FetchRequest> {
        match self.source_for(category) {
            SourceKind::Api(endpoint) => {
                let api_key = self.api_key(endpoint, credentials);
                Some(FetchRequest::new(category, endpoint.url()).with_api_key(api_key))
            }
            SourceKind::Wildlife => Some(FetchRequest::new(
                category,
                format!(
                    "{}?taxon_name={}&photos=true&quality_grade=research&per_page=1&order_by=random",
                    self.wildlife_base_url, category
                ),
            )),
            SourceKind::StaticOnly => None,
        }
    }

    fn api_key(&self, endpoint: ApiEndpoint, explicit: Option<&str>) -> Option<String> {
        if !endpoint.accepts_api_key() {
            return None;
        }
        if let Some(key) = explicit.filter(|k| !k.is_empty()) {
            return Some(key.to_string());
        }
        let configured = match endpoint {
            ApiEndpoint::Cat => &self.credentials.cat_api_key,
            ApiEndpoint::Dog => &self.credentials.dog_api_key,
            _ => return None,
        };
        configured.clone().filter(|k| !k.is_empty())
    }

    async fn fetch_live(&self, request: &FetchRequest) -> Option<String> {
        let _permit = match self.gate.acquire().await {
            Ok(permit) => permit,
            Err(e) => {
                warn!(error = %e, "Fetch gate unavailable");
                return None;
            }
        };

        let source = self.source_for(request.category());
        let attempts = AtomicUsize::new(0);
        let attempts = &attempts;
        let result = Retry::spawn(self.policy.strategy(), || async move {
            let attempt = attempts.fetch_add(1, Ordering::Relaxed) + 1;
            match self.attempt(request, source).await {
                Ok(url) => Ok(url),
                Err(err) if attempt >= *self.policy.attempts() => {
                    warn!(error = %err.kind, attempt, "Last fetch attempt failed");
                    Err(RetryError::Permanent(err))
                }
                Err(err) => {
                    let retry_after = self.policy.override_delay(&err.kind);
                    warn!(
                        error = %err.kind,
                        attempt,
                        network = err.kind.is_network(),
                        ?retry_after,
                        "Fetch attempt failed"
                    );
                    Err(RetryError::Transient { err, retry_after })
                }
            }
        })
        .await;

        match result {
            Ok(url) => {
                info!(url = %url, "Fetched live image");
                Some(url)
            }
            Err(e) => {
                warn!(
                    error = %e.kind,
                    attempts = *self.policy.attempts(),
                    "Live fetch exhausted, falling back"
                );
                None
            }
        }
    }

    async fn attempt(
        &self,
        request: &FetchRequest,
        source: SourceKind,
    ) -> Result<String, TransportError> {
        let response = self.transport.get(request).await?;

        match *response.status() {
            200 => {
                let body: serde_json::Value = serde_json::from_str(response.body())
                    .map_err(|e| TransportError::new(TransportErrorKind::Decode(e.to_string())))?;
                source.extract_image_url(&body).ok_or_else(|| {
                    TransportError::new(TransportErrorKind::Decode(
                        "response has no image url".to_string(),
                    ))
                })
            }
            429 => Err(TransportError::new(TransportErrorKind::RateLimited {
                retry_after: *response.retry_after(),
            })),
            status => Err(TransportError::new(TransportErrorKind::Status(status))),
        }
    }
}

fn normalize(category: &str) -> String {
    category.trim().to_lowercase()
}
