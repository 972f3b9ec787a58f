use crate::base_url::BaseUrl;
use crate::debug::{DebugLevel, text_preview};
use crate::error::{ApiError, body_as_text, diagnostic_message};
use crate::transport::{BuiltRequest, ReqwestTransport, Transport, TransportResponse};
use bytes::Bytes;
use http::header::{CONTENT_TYPE, HeaderName};
use http::{HeaderMap, HeaderValue, Method, StatusCode};
use serde::de::DeserializeOwned;

const DEBUG_BODY_MAX_CHARS: usize = 32 * 1024;

/// Per-call configuration for [`ApiClient::request`].
///
/// Defaults: `GET`, no extra headers, no body. Caller headers are merged
/// on top of the client defaults; a same-name entry replaces the default.
#[derive(Clone, Debug, Default)]
pub struct RequestOptions {
    pub method: Method,
    pub headers: HeaderMap,
    /// Pre-encoded JSON payload for non-GET calls.
    pub body: Option<Bytes>,
}

impl RequestOptions {
    #[inline]
    pub fn method(mut self, method: Method) -> Self {
        self.method = method;
        self
    }

    #[inline]
    pub fn header(mut self, name: HeaderName, value: HeaderValue) -> Self {
        self.headers.insert(name, value);
        self
    }

    #[inline]
    pub fn body(mut self, body: Bytes) -> Self {
        self.body = Some(body);
        self
    }
}

#[derive(Clone)]
pub struct ApiClient<T: Transport = ReqwestTransport> {
    base_url: BaseUrl,
    transport: T,
    debug_level: DebugLevel,
}

impl ApiClient<ReqwestTransport> {
    pub fn new(base_url: BaseUrl) -> Self {
        Self::with_reqwest_client(base_url, reqwest::Client::new())
    }

    pub fn with_reqwest_client(base_url: BaseUrl, client: reqwest::Client) -> Self {
        Self::with_transport(base_url, ReqwestTransport::new(client))
    }
}

impl<T: Transport> ApiClient<T> {
    pub fn with_transport(base_url: BaseUrl, transport: T) -> Self {
        Self {
            base_url,
            transport,
            debug_level: DebugLevel::default(),
        }
    }

    #[inline]
    pub fn base_url(&self) -> &BaseUrl {
        &self.base_url
    }

    #[inline]
    pub fn transport(&self) -> &T {
        &self.transport
    }

    #[inline]
    pub fn debug_level(&self) -> DebugLevel {
        self.debug_level
    }

    #[inline]
    pub fn set_debug_level(&mut self, level: DebugLevel) {
        self.debug_level = level;
    }

    #[inline]
    pub fn with_debug_level(mut self, level: DebugLevel) -> Self {
        self.debug_level = level;
        self
    }

    /// Execute one HTTP call against `base_url + path`.
    ///
    /// `path` must start with `/` and may carry a query string. Exactly one
    /// transport send per call; no retries. On a 2xx response the body is
    /// decoded as JSON into `R`, except status 204 which yields `Ok(None)`
    /// without touching the body. On any other status the response is
    /// normalized into [`ApiError::Status`] carrying the backend's
    /// diagnostic text.
    pub async fn request<R>(
        &self,
        path: &str,
        options: RequestOptions,
    ) -> Result<Option<R>, ApiError>
    where
        R: DeserializeOwned,
    {
        let dbg = self.debug_level;
        let built = self.build_request(path, options)?;

        if dbg.is_verbose() {
            eprintln!("[blago_api:{}] -> {} {}", dbg, built.method, built.url);
        }
        if dbg.is_very_verbose() {
            eprintln!("[blago_api:{}] request headers:", dbg);
            for (k, v) in built.headers.iter() {
                eprintln!("  {}: {}", k, v.to_str().unwrap_or("<non-utf8>"));
            }
            if let Some(body) = built.body.as_ref() {
                eprintln!(
                    "[blago_api:{}] request body ({} bytes): {}",
                    dbg,
                    body.len(),
                    text_preview(body, DEBUG_BODY_MAX_CHARS)
                );
            }
        }

        let resp = self.transport.send(&built).await?;

        if !resp.status.is_success() {
            if dbg.is_verbose() {
                eprintln!(
                    "[blago_api:{}] <- {} {} (error)",
                    dbg,
                    resp.status.as_u16(),
                    built.url
                );
            }
            if dbg.is_very_verbose() {
                eprintln!(
                    "[blago_api:{}] response body preview: {}",
                    dbg,
                    body_as_text(&resp.headers, &resp.body)
                );
            }
            return Err(ApiError::Status {
                message: diagnostic_message(resp.status, &resp.body),
            });
        }

        if dbg.is_verbose() {
            eprintln!(
                "[blago_api:{}] <- {} {} (ok)",
                dbg,
                resp.status.as_u16(),
                built.url
            );
        }

        Self::decode_response(resp)
    }

    fn build_request(&self, path: &str, options: RequestOptions) -> Result<BuiltRequest, ApiError> {
        let url = url::Url::parse(&self.base_url.join(path))?;

        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        // Same-name caller entries replace the defaults.
        headers.extend(options.headers);

        Ok(BuiltRequest {
            method: options.method,
            url,
            headers,
            body: options.body,
        })
    }

    fn decode_response<R>(resp: TransportResponse) -> Result<Option<R>, ApiError>
    where
        R: DeserializeOwned,
    {
        if resp.status == StatusCode::NO_CONTENT {
            return Ok(None);
        }
        let decoded = serde_json::from_slice(&resp.body).map_err(|e| ApiError::Decode {
            source: e.into(),
            body: body_as_text(&resp.headers, &resp.body),
        })?;
        Ok(Some(decoded))
    }
}
