//! HTTP client wrapper used by every backend call.
//!
//! SYSTEM CONTEXT
//! ==============
//! One logical request goes through these stages, in order:
//!
//! 1. resolve `base_url + path`, add JSON headers, flag auth endpoints
//! 2. interceptor `on_request` (bearer token, loading counter)
//! 3. attempts: each one races the transport against the timeout; failures
//!    are retried per [`RetryPolicy`]
//! 4. normalize the final failure into one [`ApiError`]
//! 5. interceptor `on_response`, exactly once, even if the caller drops the
//!    future mid-flight
//!
//! Interceptors wrap the whole retry loop rather than each attempt, so a
//! retried request is one busy period and at most one session teardown.

#[cfg(test)]
#[path = "client_test.rs"]
mod client_test;

use std::rc::Rc;
use std::time::Duration;

use futures::future::{Either, select};
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;

use super::error::{ApiError, RequestFailure, normalize};
use super::http::{
    APPLICATION_JSON, HEADER_ACCEPT, HEADER_CONTENT_TYPE, HEADER_SKIP_LOADING, HttpRequest, HttpResponse, Method,
    Transport,
};
use super::interceptor::Interceptor;
use super::retry::{RetryPolicy, retry_with_backoff};
use crate::config::AppConfig;
use crate::util::timer::Timer;

/// Paths that authenticate rather than require authentication.
pub const AUTH_ENDPOINTS: [&str; 2] = ["/auth/login", "/auth/register"];

/// Per-call switches.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RequestOptions {
    /// Do not drive the global busy indicator (background polling).
    pub skip_loading: bool,
    /// Single attempt regardless of the configured retry count.
    pub no_retry: bool,
}

impl RequestOptions {
    #[must_use]
    pub fn background() -> Self {
        Self { skip_loading: true, ..Self::default() }
    }

    #[must_use]
    pub fn once() -> Self {
        Self { no_retry: true, ..Self::default() }
    }
}

#[derive(Clone)]
pub struct ApiClient {
    base_url: Rc<str>,
    timeout: Duration,
    retry: RetryPolicy,
    transport: Rc<dyn Transport>,
    timer: Rc<dyn Timer>,
    interceptors: Vec<Rc<dyn Interceptor>>,
}

impl ApiClient {
    #[must_use]
    pub fn new(config: &AppConfig, transport: Rc<dyn Transport>, timer: Rc<dyn Timer>) -> Self {
        Self {
            base_url: Rc::from(config.api_url.trim_end_matches('/')),
            timeout: config.api_timeout,
            retry: RetryPolicy::new(config.max_retry_attempts),
            transport,
            timer,
            interceptors: Vec::new(),
        }
    }

    /// Append an interceptor. Request phases run in registration order.
    #[must_use]
    pub fn with_interceptor(mut self, interceptor: Rc<dyn Interceptor>) -> Self {
        self.interceptors.push(interceptor);
        self
    }

    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    #[must_use]
    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Send one logical request and return the raw 2xx response.
    ///
    /// # Errors
    ///
    /// Returns the normalized failure once retries are exhausted or a
    /// non-retryable status is received.
    pub async fn request(
        &self,
        method: Method,
        path: &str,
        body: Option<Value>,
        options: RequestOptions,
    ) -> Result<HttpResponse, ApiError> {
        let mut request = self.build(method, path, body, options);
        for interceptor in &self.interceptors {
            interceptor.on_request(&mut request);
        }

        let mut guard = ResponsePhase { interceptors: &self.interceptors, request: &request, settled: false };

        let policy = if options.no_retry { RetryPolicy::none() } else { self.retry };
        let outcome = retry_with_backoff(policy, self.timer.as_ref(), RequestFailure::status, |attempt| {
            if attempt > 0 {
                log::debug!("{} {} attempt {}", method.as_str(), path, attempt + 1);
            }
            self.attempt(&request)
        })
        .await
        .map_err(normalize);

        guard.settle(&outcome);
        outcome
    }

    /// `GET` and decode the JSON body.
    ///
    /// # Errors
    ///
    /// Returns the normalized request failure, or an `Unknown` error when the
    /// body does not decode as `T`.
    pub async fn get<T: DeserializeOwned>(&self, path: &str, options: RequestOptions) -> Result<T, ApiError> {
        let resp = self.request(Method::Get, path, None, options).await?;
        decode(&resp)
    }

    /// # Errors
    ///
    /// See [`ApiClient::get`].
    pub async fn post<B: Serialize, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
        options: RequestOptions,
    ) -> Result<T, ApiError> {
        let resp = self.request(Method::Post, path, Some(encode(body)?), options).await?;
        decode(&resp)
    }

    /// # Errors
    ///
    /// See [`ApiClient::get`].
    pub async fn put<B: Serialize, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
        options: RequestOptions,
    ) -> Result<T, ApiError> {
        let resp = self.request(Method::Put, path, Some(encode(body)?), options).await?;
        decode(&resp)
    }

    /// # Errors
    ///
    /// See [`ApiClient::get`].
    pub async fn patch<B: Serialize, T: DeserializeOwned>(
        &self,
        path: &str,
        body: Option<&B>,
        options: RequestOptions,
    ) -> Result<T, ApiError> {
        let body = body.map(encode).transpose()?;
        let resp = self.request(Method::Patch, path, body, options).await?;
        decode(&resp)
    }

    /// # Errors
    ///
    /// See [`ApiClient::get`].
    pub async fn delete<T: DeserializeOwned>(&self, path: &str, options: RequestOptions) -> Result<T, ApiError> {
        let resp = self.request(Method::Delete, path, None, options).await?;
        decode(&resp)
    }

    fn build(&self, method: Method, path: &str, body: Option<Value>, options: RequestOptions) -> HttpRequest {
        let route = path.split('?').next().unwrap_or(path);
        let mut request = HttpRequest {
            method,
            path: path.to_owned(),
            url: format!("{}{}", self.base_url, path),
            headers: Vec::new(),
            body: body.map(|b| b.to_string()),
            is_auth_endpoint: AUTH_ENDPOINTS.contains(&route),
        };
        request.set_header(HEADER_CONTENT_TYPE, APPLICATION_JSON);
        request.set_header(HEADER_ACCEPT, APPLICATION_JSON);
        if options.skip_loading {
            request.set_header(HEADER_SKIP_LOADING, "true");
        }
        request
    }

    async fn attempt(&self, request: &HttpRequest) -> Result<HttpResponse, RequestFailure> {
        let send = self.transport.send(request.clone());
        let deadline = self.timer.sleep(self.timeout);
        match select(send, deadline).await {
            Either::Left((Ok(resp), _)) if resp.is_success() => Ok(resp),
            Either::Left((Ok(resp), _)) => Err(RequestFailure::Status { status: resp.status, body: resp.body }),
            Either::Left((Err(err), _)) => Err(err.into()),
            Either::Right(((), _)) => {
                log::warn!("{} {} timed out after {}ms", request.method.as_str(), request.path, self.timeout.as_millis());
                Err(RequestFailure::Timeout(self.timeout))
            }
        }
    }
}

/// Runs the response phase once. If the request future is dropped before it
/// settles, the interceptors see a cancellation instead.
struct ResponsePhase<'a> {
    interceptors: &'a [Rc<dyn Interceptor>],
    request: &'a HttpRequest,
    settled: bool,
}

impl ResponsePhase<'_> {
    fn settle(&mut self, outcome: &Result<HttpResponse, ApiError>) {
        if self.settled {
            return;
        }
        self.settled = true;
        for interceptor in self.interceptors {
            interceptor.on_response(self.request, outcome);
        }
    }
}

impl Drop for ResponsePhase<'_> {
    fn drop(&mut self) {
        if !self.settled {
            self.settle(&Err(normalize(RequestFailure::Cancelled)));
        }
    }
}

fn encode<B: Serialize>(body: &B) -> Result<Value, ApiError> {
    serde_json::to_value(body).map_err(|e| normalize(RequestFailure::Encode(e.to_string())))
}

/// Decode a 2xx body. An empty body decodes as JSON `null`, so endpoints that
/// answer `204` work with `T = ()` or `Option<_>`.
fn decode<T: DeserializeOwned>(resp: &HttpResponse) -> Result<T, ApiError> {
    let text = if resp.body.trim().is_empty() { "null" } else { resp.body.as_str() };
    serde_json::from_str(text).map_err(|e| normalize(RequestFailure::Decode(e.to_string())))
}
