// src/api/middleware/access_log.rs

use actix_web::{
    dev::{forward_ready, Service, ServiceRequest, ServiceResponse, Transform},
    http::header,
    Error,
};
use futures::future::{ready, LocalBoxFuture, Ready};
use log::info;
use std::borrow::Cow;
use std::fmt;

/// Log target for access lines, so they can be filtered with `RUST_LOG=access=...`.
pub const ACCESS_TARGET: &str = "access";

/// One access log line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccessRecord {
    pub method: String,
    pub path: String,
    pub host: String,
    pub remote: String,
    pub response_code: u16,
}

impl AccessRecord {
    fn from_request(req: &ServiceRequest) -> Self {
        AccessRecord {
            method: req.method().to_string(),
            path: req.path().to_string(),
            host: request_host(req),
            remote: req
                .peer_addr()
                .map(|addr| addr.to_string())
                .unwrap_or_else(|| "-".to_string()),
            response_code: 200,
        }
    }
}

// The Host header as sent by the client. Forwarding headers are ignored, an
// HTTP/2 request falls back to the URI authority.
fn request_host(req: &ServiceRequest) -> String {
    req.headers()
        .get(header::HOST)
        .and_then(|value| value.to_str().ok())
        .map(str::to_string)
        .or_else(|| req.uri().authority().map(|a| a.to_string()))
        .unwrap_or_else(|| "-".to_string())
}

/// Quotes a field value that would otherwise break the `key=value` layout.
fn field(value: &str) -> Cow<'_, str> {
    let plain = !value.is_empty()
        && value
            .chars()
            .all(|c| c.is_ascii_graphic() && c != '"' && c != '=' && c != '\\');
    if plain {
        Cow::Borrowed(value)
    } else {
        Cow::Owned(format!("{:?}", value))
    }
}

impl fmt::Display for AccessRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "type=access method={} path={} host={} remote={} response_code={} Received a request",
            field(&self.method),
            field(&self.path),
            field(&self.host),
            field(&self.remote),
            self.response_code
        )
    }
}

// Logs every request once its response status is known
pub struct AccessLog;

impl<S, B> Transform<S, ServiceRequest> for AccessLog
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type InitError = ();
    type Transform = AccessLogMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(AccessLogMiddleware { service }))
    }
}

pub struct AccessLogMiddleware<S> {
    service: S,
}

impl<S, B> Service<ServiceRequest> for AccessLogMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let mut record = AccessRecord::from_request(&req);
        let fut = self.service.call(req);

        Box::pin(async move {
            let result = fut.await;
            record.response_code = match &result {
                Ok(res) => res.status().as_u16(),
                Err(e) => e.as_response_error().status_code().as_u16(),
            };
            info!(target: ACCESS_TARGET, "{}", record);
            result
        })
    }
}
