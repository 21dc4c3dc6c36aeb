/*!
 * # Rate Limiting Module
 *
 * Fixed-window rate limiter applied as a tower layer in front of the whole
 * router:
 *
 * - A blanket per-client limit (default 100 requests per hour)
 * - Path-prefix policies that replace the blanket limit for matching routes
 *   (the login endpoint ships with `5:60`)
 *
 * Clients are keyed by IP, honoring `X-Forwarded-For` / `X-Real-IP` so the
 * limiter works behind a reverse proxy. Counters live in a process-local
 * concurrent map; a path policy tracks its own window so traffic elsewhere
 * does not consume a route's stricter budget.
 */
use axum::{
    extract::Request,
    http::{Response, StatusCode},
};
use dashmap::DashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};
use thiserror::Error;
use tracing::warn;

/// Helper function to convert a number to a HeaderValue.
/// Numeric strings contain only ASCII digits, which are always valid header
/// values per RFC 7230.
fn num_to_header_value<T: ToString>(n: T) -> http::HeaderValue {
    http::HeaderValue::from_str(&n.to_string())
        .unwrap_or_else(|_| http::HeaderValue::from_static("0"))
}

#[derive(Debug, Clone)]
struct RateLimitEntry {
    count: u32,
    window_start: Instant,
}

impl RateLimitEntry {
    fn new() -> Self {
        Self {
            count: 0,
            window_start: Instant::now(),
        }
    }

    fn increment(&mut self, window_duration: Duration) {
        let now = Instant::now();
        if now.duration_since(self.window_start) >= window_duration {
            self.count = 1;
            self.window_start = now;
        } else {
            self.count += 1;
        }
    }

    fn time_until_reset(&self, window_duration: Duration) -> Duration {
        let elapsed = Instant::now().duration_since(self.window_start);
        window_duration.saturating_sub(elapsed)
    }
}

#[derive(Debug, Clone)]
pub struct RateLimitConfig {
    pub requests_per_window: u32,
    pub window_duration: Duration,
    pub enable_headers: bool,
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self {
            requests_per_window: 100,
            window_duration: Duration::from_secs(3600),
            enable_headers: true,
        }
    }
}

#[derive(Debug)]
pub struct RateLimitResult {
    pub allowed: bool,
    pub limit: u32,
    pub remaining: u32,
    pub reset_time: Duration,
}

/// Fixed-window counter store shared by the blanket limit and all policies.
#[derive(Clone)]
pub struct RateLimiter {
    entries: Arc<DashMap<String, RateLimitEntry>>,
    config: RateLimitConfig,
}

impl RateLimiter {
    pub fn new(config: RateLimitConfig) -> Self {
        Self {
            entries: Arc::new(DashMap::new()),
            config,
        }
    }

    pub fn check_rate_limit(&self, key: &str) -> RateLimitResult {
        self.check_with_config(key, &self.config)
    }

    fn check_with_config(&self, key: &str, config: &RateLimitConfig) -> RateLimitResult {
        let mut entry = self
            .entries
            .entry(key.to_string())
            .or_insert_with(RateLimitEntry::new);

        entry.increment(config.window_duration);

        let allowed = entry.count <= config.requests_per_window;
        let remaining = config.requests_per_window.saturating_sub(entry.count);
        let reset_time = entry.time_until_reset(config.window_duration);

        RateLimitResult {
            allowed,
            limit: config.requests_per_window,
            remaining,
            reset_time,
        }
    }

    /// Drop entries whose window has fully elapsed.
    pub fn cleanup_expired(&self) {
        let now = Instant::now();
        self.entries
            .retain(|_, entry| now.duration_since(entry.window_start) < self.config.window_duration);
    }
}

/// Per-path-prefix override of the blanket limit.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PathPolicy {
    pub prefix: String,
    pub requests_per_window: u32,
    pub window_duration: Duration,
}

/// Extracts the client key, preferring proxy-provided addresses.
pub fn extract_ip_key(request: &Request) -> String {
    if let Some(forwarded) = request.headers().get("x-forwarded-for") {
        if let Ok(forwarded_str) = forwarded.to_str() {
            if let Some(ip) = forwarded_str.split(',').next() {
                return format!("ip:{}", ip.trim());
            }
        }
    }

    if let Some(real_ip) = request.headers().get("x-real-ip") {
        if let Ok(ip_str) = real_ip.to_str() {
            return format!("ip:{}", ip_str);
        }
    }

    "ip:unknown".to_string()
}

// Layer implementation for tower
#[derive(Clone)]
pub struct RateLimitLayer {
    rate_limiter: RateLimiter,
    path_policies: Arc<Vec<PathPolicy>>,
}

impl RateLimitLayer {
    pub fn new(config: RateLimitConfig) -> Self {
        Self {
            rate_limiter: RateLimiter::new(config),
            path_policies: Arc::new(Vec::new()),
        }
    }

    pub fn with_policies(mut self, policies: Vec<PathPolicy>) -> Self {
        self.path_policies = Arc::new(policies);
        self
    }

    /// Handle to the shared limiter, for the periodic cleanup task.
    pub fn limiter(&self) -> RateLimiter {
        self.rate_limiter.clone()
    }
}

impl<S> tower::Layer<S> for RateLimitLayer {
    type Service = RateLimitService<S>;

    fn layer(&self, inner: S) -> Self::Service {
        RateLimitService {
            inner,
            rate_limiter: self.rate_limiter.clone(),
            path_policies: self.path_policies.clone(),
        }
    }
}

#[derive(Clone)]
pub struct RateLimitService<S> {
    inner: S,
    rate_limiter: RateLimiter,
    path_policies: Arc<Vec<PathPolicy>>,
}

impl<S> tower::Service<Request> for RateLimitService<S>
where
    S: tower::Service<Request, Response = Response<axum::body::Body>> + Clone + Send + 'static,
    S::Future: Send + 'static,
{
    type Response = Response<axum::body::Body>;
    type Error = S::Error;
    type Future = std::pin::Pin<
        Box<dyn std::future::Future<Output = Result<Self::Response, Self::Error>> + Send>,
    >;

    fn poll_ready(
        &mut self,
        cx: &mut std::task::Context<'_>,
    ) -> std::task::Poll<Result<(), Self::Error>> {
        self.inner.poll_ready(cx)
    }

    fn call(&mut self, request: Request) -> Self::Future {
        let rate_limiter = self.rate_limiter.clone();
        let mut inner = self.inner.clone();
        let policies = self.path_policies.clone();

        Box::pin(async move {
            // Liveness endpoints are never throttled
            let path = request.uri().path().to_string();
            if path == "/" || path.starts_with("/health") {
                return inner.call(request).await;
            }

            let client_key = extract_ip_key(&request);

            // A matching path policy replaces the blanket limit and gets its
            // own counter, scoped by prefix so unrelated traffic does not
            // burn the stricter budget.
            let matched = policies.iter().find(|p| path.starts_with(&p.prefix));
            let (key, effective) = match matched {
                Some(policy) => (
                    format!("{}:{}", client_key, policy.prefix),
                    RateLimitConfig {
                        requests_per_window: policy.requests_per_window,
                        window_duration: policy.window_duration,
                        enable_headers: rate_limiter.config.enable_headers,
                    },
                ),
                None => (client_key, rate_limiter.config.clone()),
            };

            let result = rate_limiter.check_with_config(&key, &effective);

            if !result.allowed {
                warn!("Rate limit exceeded for key: {}", key);

                let mut response = Response::new(axum::body::Body::from("Rate limit exceeded"));
                *response.status_mut() = StatusCode::TOO_MANY_REQUESTS;

                if effective.enable_headers {
                    let headers = response.headers_mut();
                    headers.insert("X-RateLimit-Limit", num_to_header_value(result.limit));
                    headers.insert("X-RateLimit-Remaining", num_to_header_value(0));
                    headers.insert(
                        "X-RateLimit-Reset",
                        num_to_header_value(result.reset_time.as_secs()),
                    );
                }

                return Ok(response);
            }

            let mut response = inner.call(request).await?;

            if effective.enable_headers {
                let headers = response.headers_mut();
                headers.insert("X-RateLimit-Limit", num_to_header_value(result.limit));
                headers.insert(
                    "X-RateLimit-Remaining",
                    num_to_header_value(result.remaining),
                );
                headers.insert(
                    "X-RateLimit-Reset",
                    num_to_header_value(result.reset_time.as_secs()),
                );
            }

            Ok(response)
        })
    }
}

/// Background cleanup task
pub async fn start_cleanup_task(rate_limiter: RateLimiter, interval: Duration) {
    let mut interval_timer = tokio::time::interval(interval);

    loop {
        interval_timer.tick().await;
        rate_limiter.cleanup_expired();
    }
}

/// Errors that can occur when parsing rate limit policy strings
#[derive(Debug, Error, PartialEq, Eq)]
pub enum PolicyParseError {
    #[error("Invalid policy format for '{spec}': expected 'prefix:limit:window_secs', got {parts} parts")]
    InvalidFormat { spec: String, parts: usize },
    #[error("Invalid number in policy '{spec}': {field}")]
    InvalidNumber { spec: String, field: &'static str },
}

/// Parse a single `prefix:limit:window_secs` policy spec.
pub fn parse_path_policy(spec: &str) -> Result<PathPolicy, PolicyParseError> {
    // Split from the right so the path prefix itself may contain ':'.
    let mut parts = spec.rsplitn(3, ':');
    let window = parts.next();
    let limit = parts.next();
    let prefix = parts.next();

    let (prefix, limit, window) = match (prefix, limit, window) {
        (Some(p), Some(l), Some(w)) if !p.is_empty() => (p, l, w),
        _ => {
            return Err(PolicyParseError::InvalidFormat {
                spec: spec.to_string(),
                parts: spec.split(':').count(),
            })
        }
    };

    let requests_per_window: u32 = limit.parse().map_err(|_| PolicyParseError::InvalidNumber {
        spec: spec.to_string(),
        field: "limit",
    })?;
    let window_secs: u64 = window.parse().map_err(|_| PolicyParseError::InvalidNumber {
        spec: spec.to_string(),
        field: "window_secs",
    })?;

    Ok(PathPolicy {
        prefix: prefix.to_string(),
        requests_per_window,
        window_duration: Duration::from_secs(window_secs),
    })
}

/// Parse a comma-separated policy list, logging and skipping invalid entries.
pub fn parse_path_policies(raw: Option<&str>) -> Vec<PathPolicy> {
    let mut policies = Vec::new();
    let Some(raw) = raw else {
        return policies;
    };

    for spec in raw.split(',').map(str::trim).filter(|s| !s.is_empty()) {
        match parse_path_policy(spec) {
            Ok(policy) => policies.push(policy),
            Err(err) => warn!("Ignoring rate limit policy: {}", err),
        }
    }

    policies
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_valid_policy() {
        let policy = parse_path_policy("/customers/login:5:60").unwrap();
        assert_eq!(policy.prefix, "/customers/login");
        assert_eq!(policy.requests_per_window, 5);
        assert_eq!(policy.window_duration, Duration::from_secs(60));
    }

    #[test]
    fn parse_rejects_garbage() {
        assert!(parse_path_policy("nope").is_err());
        assert!(parse_path_policy("/a:x:60").is_err());
        assert!(parse_path_policy("/a:5:y").is_err());
        assert!(parse_path_policy(":5:60").is_err());
    }

    #[test]
    fn parse_list_skips_invalid_entries() {
        let policies =
            parse_path_policies(Some("/customers/login:5:60, bad-entry ,/inventory:120:60"));
        assert_eq!(policies.len(), 2);
        assert_eq!(policies[0].prefix, "/customers/login");
        assert_eq!(policies[1].prefix, "/inventory");
    }

    #[test]
    fn parse_none_yields_empty() {
        assert!(parse_path_policies(None).is_empty());
    }

    #[test]
    fn limiter_denies_after_limit() {
        let limiter = RateLimiter::new(RateLimitConfig {
            requests_per_window: 3,
            window_duration: Duration::from_secs(60),
            enable_headers: true,
        });

        for i in 0..3 {
            let result = limiter.check_rate_limit("ip:1.2.3.4");
            assert!(result.allowed, "request {} should pass", i);
        }
        let denied = limiter.check_rate_limit("ip:1.2.3.4");
        assert!(!denied.allowed);
        assert_eq!(denied.remaining, 0);
    }

    #[test]
    fn limiter_tracks_keys_independently() {
        let limiter = RateLimiter::new(RateLimitConfig {
            requests_per_window: 1,
            window_duration: Duration::from_secs(60),
            enable_headers: true,
        });

        assert!(limiter.check_rate_limit("ip:a").allowed);
        assert!(!limiter.check_rate_limit("ip:a").allowed);
        assert!(limiter.check_rate_limit("ip:b").allowed);
    }

    #[test]
    fn window_resets_counter() {
        let limiter = RateLimiter::new(RateLimitConfig {
            requests_per_window: 1,
            window_duration: Duration::from_millis(10),
            enable_headers: true,
        });

        assert!(limiter.check_rate_limit("ip:a").allowed);
        assert!(!limiter.check_rate_limit("ip:a").allowed);
        std::thread::sleep(Duration::from_millis(20));
        assert!(limiter.check_rate_limit("ip:a").allowed);
    }
}
