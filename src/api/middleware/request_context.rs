//! Request metadata extraction for cache auditing

use std::convert::Infallible;
use std::net::SocketAddr;

use axum::{
    body::Body,
    extract::{ConnectInfo, FromRequestParts, OriginalUri},
    http::{header, request::Parts, HeaderMap, Request},
    middleware::Next,
    response::Response,
};

use crate::domain::context::{CallContext, CallerIdentity, RequestMeta};

/// Header carrying the authenticated user id, set by the fronting gateway
pub const USER_ID_HEADER: &str = "x-user-id";
/// Header carrying the authenticated user name
pub const USERNAME_HEADER: &str = "x-username";
/// Header carrying the department of the authenticated user
pub const DEPT_ID_HEADER: &str = "x-dept-id";

/// Call context of the current request
///
/// Never rejects; a request without a [`CallerIdentity`] extension yields
/// metadata with no caller.
#[derive(Debug, Clone)]
pub struct RequestContext(pub CallContext);

impl<S> FromRequestParts<S> for RequestContext
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        // nested routers strip their prefix from `parts.uri`
        let path = parts
            .extensions
            .get::<OriginalUri>()
            .map(|uri| uri.0.path().to_string())
            .unwrap_or_else(|| parts.uri.path().to_string());
        let mut meta = RequestMeta::new(parts.method.as_str(), path);

        if let Some(host) = host(parts) {
            meta = meta.with_host(host);
        }

        if let Some(ip) = client_ip(parts) {
            meta = meta.with_client_ip(ip);
        }

        if let Some(caller) = parts.extensions.get::<CallerIdentity>() {
            meta = meta.with_caller(caller.clone());
        }

        Ok(RequestContext(CallContext::for_request(meta)))
    }
}

fn header_str<'a>(headers: &'a HeaderMap, name: &str) -> Option<&'a str> {
    headers
        .get(name)
        .and_then(|v| v.to_str().ok())
        .map(str::trim)
        .filter(|v| !v.is_empty())
}

fn host(parts: &Parts) -> Option<String> {
    header_str(&parts.headers, header::HOST.as_str())
        .map(String::from)
        .or_else(|| parts.uri.authority().map(|a| a.to_string()))
}

/// First hop of `x-forwarded-for`, then `x-real-ip`, then the peer address
fn client_ip(parts: &Parts) -> Option<String> {
    if let Some(forwarded) = header_str(&parts.headers, "x-forwarded-for") {
        if let Some(first) = forwarded.split(',').map(str::trim).find(|s| !s.is_empty()) {
            return Some(first.to_string());
        }
    }

    if let Some(real_ip) = header_str(&parts.headers, "x-real-ip") {
        return Some(real_ip.to_string());
    }

    parts
        .extensions
        .get::<ConnectInfo<SocketAddr>>()
        .map(|ConnectInfo(addr)| addr.ip().to_string())
}

/// Installs a [`CallerIdentity`] from the identity headers of a trusted gateway
pub async fn caller_identity_middleware(mut request: Request<Body>, next: Next) -> Response {
    let headers = request.headers();

    if let Some(user_id) = header_str(headers, USER_ID_HEADER) {
        let mut caller = CallerIdentity::new(user_id);
        if let Some(username) = header_str(headers, USERNAME_HEADER) {
            caller = caller.with_username(username);
        }
        if let Some(dept_id) = header_str(headers, DEPT_ID_HEADER) {
            caller = caller.with_dept(dept_id);
        }

        request.extensions_mut().insert(caller);
    }

    next.run(request).await
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn extract(request: Request<()>) -> RequestMeta {
        let (mut parts, _) = request.into_parts();
        let RequestContext(ctx) = RequestContext::from_request_parts(&mut parts, &())
            .await
            .unwrap();
        ctx.request().cloned().unwrap()
    }

    #[tokio::test]
    async fn test_extracts_host_method_and_path() {
        let request = Request::builder()
            .method("DELETE")
            .uri("/admin/users/42/cache?x=1")
            .header("host", "admin.example.com")
            .body(())
            .unwrap();

        let meta = extract(request).await;
        assert_eq!(meta.method, "DELETE");
        assert_eq!(meta.path, "/admin/users/42/cache");
        assert_eq!(meta.host, "admin.example.com");
        assert!(meta.caller.is_none());
    }

    #[tokio::test]
    async fn test_client_ip_prefers_forwarded_for() {
        let request = Request::builder()
            .uri("/")
            .header("x-forwarded-for", "203.0.113.9, 10.0.0.1")
            .header("x-real-ip", "10.0.0.2")
            .body(())
            .unwrap();

        assert_eq!(extract(request).await.client_ip.as_deref(), Some("203.0.113.9"));
    }

    #[tokio::test]
    async fn test_client_ip_falls_back_to_peer_address() {
        let mut request = Request::builder().uri("/").body(()).unwrap();
        request
            .extensions_mut()
            .insert(ConnectInfo(SocketAddr::from(([192, 168, 1, 20], 50000))));

        assert_eq!(extract(request).await.client_ip.as_deref(), Some("192.168.1.20"));
    }

    #[tokio::test]
    async fn test_caller_identity_from_extension() {
        let mut request = Request::builder().uri("/").body(()).unwrap();
        request
            .extensions_mut()
            .insert(CallerIdentity::new("u-1").with_dept("d-1"));

        let meta = extract(request).await;
        assert_eq!(meta.user_id(), Some("u-1"));
        assert_eq!(meta.dept_id(), Some("d-1"));
    }
}
