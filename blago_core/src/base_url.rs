/// Fixed base URL used for local development and headless contexts.
pub const LOCAL_API_BASE_URL: &str = "http://localhost:8000/api/v1";

const API_PATH_PREFIX: &str = "/api/v1";

/// Hostname and origin of the page hosting the application, when one exists.
#[derive(Clone, Debug)]
pub struct Location {
    pub hostname: String,
    pub origin: String,
}

/// Ambient values the base-URL resolution reads.
///
/// Injected so the algorithm can be exercised with synthetic values; the
/// production impl is [`SystemEnv`].
pub trait RuntimeEnv {
    /// Location of the hosting page, or `None` in a headless context
    /// (build step, test harness, plain process).
    fn location(&self) -> Option<Location>;

    /// Explicit deployment override for the base URL.
    fn base_url_override(&self) -> Option<String>;
}

/// Process environment: no hosting page; the override comes from the
/// `BLAGO_API_BASE_URL` environment variable.
#[derive(Clone, Copy, Debug, Default)]
pub struct SystemEnv;

impl RuntimeEnv for SystemEnv {
    fn location(&self) -> Option<Location> {
        None
    }

    fn base_url_override(&self) -> Option<String> {
        std::env::var("BLAGO_API_BASE_URL").ok()
    }
}

/// Origin-plus-prefix every request path is appended to.
///
/// Never ends with a trailing slash. Resolve once at startup (see
/// [`resolve_base_url`]) and hand the result to `ApiClient`; it is not
/// recomputed per request, so every call in a session targets the same
/// backend even if the hosting page's location changes later.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct BaseUrl(String);

impl BaseUrl {
    pub fn new(value: impl Into<String>) -> Self {
        let value = value.into();
        Self(value.trim_end_matches('/').to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// `path` must start with `/`; it may carry a query string.
    pub fn join(&self, path: &str) -> String {
        format!("{}{}", self.0, path)
    }
}

impl std::fmt::Display for BaseUrl {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Pick the base URL for this process: the explicit override when present
/// and non-empty, otherwise [`default_base_url`].
pub fn resolve_base_url(env: &impl RuntimeEnv) -> BaseUrl {
    let default = default_base_url(env);
    match env.base_url_override().filter(|v| !v.is_empty()) {
        Some(value) => BaseUrl::new(value),
        None => default,
    }
}

/// Environment-derived default: the local-development URL in headless or
/// locally-hosted contexts, the page origin plus `/api/v1` otherwise.
pub fn default_base_url(env: &impl RuntimeEnv) -> BaseUrl {
    let Some(location) = env.location() else {
        return BaseUrl::new(LOCAL_API_BASE_URL);
    };
    if is_local_hostname(&location.hostname) {
        return BaseUrl::new(LOCAL_API_BASE_URL);
    }
    BaseUrl::new(format!(
        "{}{}",
        location.origin.trim_end_matches('/'),
        API_PATH_PREFIX
    ))
}

// Coarse string checks on purpose, not CIDR matching.
fn is_local_hostname(hostname: &str) -> bool {
    hostname == "localhost"
        || hostname == "127.0.0.1"
        || hostname.ends_with(".local")
        || hostname.starts_with("192.168.")
        || hostname.starts_with("10.")
}

#[cfg(test)]
mod tests {
    use super::*;

    struct FakeEnv {
        location: Option<Location>,
        base_url_override: Option<String>,
    }

    impl FakeEnv {
        fn headless() -> Self {
            Self {
                location: None,
                base_url_override: None,
            }
        }

        fn hosted(hostname: &str, origin: &str) -> Self {
            Self {
                location: Some(Location {
                    hostname: hostname.to_string(),
                    origin: origin.to_string(),
                }),
                base_url_override: None,
            }
        }

        fn with_override(mut self, value: &str) -> Self {
            self.base_url_override = Some(value.to_string());
            self
        }
    }

    impl RuntimeEnv for FakeEnv {
        fn location(&self) -> Option<Location> {
            self.location.clone()
        }

        fn base_url_override(&self) -> Option<String> {
            self.base_url_override.clone()
        }
    }

    #[test]
    fn headless_context_uses_local_default() {
        let url = resolve_base_url(&FakeEnv::headless());
        assert_eq!(url.as_str(), "http://localhost:8000/api/v1");
    }

    #[test]
    fn local_hostnames_use_local_default() {
        for hostname in [
            "localhost",
            "127.0.0.1",
            "dev.local",
            "192.168.1.10",
            "10.0.0.5",
        ] {
            let env = FakeEnv::hosted(hostname, "https://should-not-be-used.example");
            assert_eq!(
                resolve_base_url(&env).as_str(),
                "http://localhost:8000/api/v1",
                "hostname {hostname} should classify as local"
            );
        }
    }

    #[test]
    fn non_local_hostname_derives_from_origin() {
        let env = FakeEnv::hosted("app.example.com", "https://app.example.com");
        assert_eq!(
            resolve_base_url(&env).as_str(),
            "https://app.example.com/api/v1"
        );
    }

    #[test]
    fn localhost_lookalike_is_not_local() {
        let env = FakeEnv::hosted("localhost.example.com", "https://localhost.example.com");
        assert_eq!(
            resolve_base_url(&env).as_str(),
            "https://localhost.example.com/api/v1"
        );
    }

    #[test]
    fn origin_trailing_slash_is_stripped() {
        let env = FakeEnv::hosted("app.example.com", "https://app.example.com/");
        assert_eq!(
            resolve_base_url(&env).as_str(),
            "https://app.example.com/api/v1"
        );
    }

    #[test]
    fn override_wins_over_hosted_origin() {
        let env = FakeEnv::hosted("app.example.com", "https://app.example.com")
            .with_override("https://api.other.example/v2");
        assert_eq!(resolve_base_url(&env).as_str(), "https://api.other.example/v2");
    }

    #[test]
    fn override_wins_over_local_default() {
        let env = FakeEnv::headless().with_override("http://127.0.0.1:9000/api/v1");
        assert_eq!(
            resolve_base_url(&env).as_str(),
            "http://127.0.0.1:9000/api/v1"
        );
    }

    #[test]
    fn override_trailing_slash_is_stripped() {
        let env = FakeEnv::headless().with_override("https://api.other.example/v2/");
        assert_eq!(resolve_base_url(&env).as_str(), "https://api.other.example/v2");
    }

    #[test]
    fn empty_override_is_ignored() {
        let env = FakeEnv::headless().with_override("");
        assert_eq!(
            resolve_base_url(&env).as_str(),
            "http://localhost:8000/api/v1"
        );
    }

    #[test]
    fn base_url_strips_repeated_trailing_slashes() {
        assert_eq!(
            BaseUrl::new("https://app.example.com//").as_str(),
            "https://app.example.com"
        );
    }

    #[test]
    fn join_appends_path_verbatim() {
        let base = BaseUrl::new("https://app.example.com/api/v1");
        assert_eq!(
            base.join("/funds?page=2"),
            "https://app.example.com/api/v1/funds?page=2"
        );
    }
}
