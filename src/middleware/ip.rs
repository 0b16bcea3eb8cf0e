use axum::http::HeaderMap;
use std::net::IpAddr;

/// Resolves the rate limiting key for a request.
///
/// Proxy headers are client-controlled, so they are only consulted when
/// `trust_proxy_headers` is set (deployments behind a reverse proxy). Otherwise
/// the socket peer address is used.
pub fn client_ip(headers: &HeaderMap, peer: Option<IpAddr>, trust_proxy_headers: bool) -> IpAddr {
    if trust_proxy_headers {
        return extract_ip_from_headers(headers, peer);
    }
    peer.unwrap_or(IpAddr::from([127, 0, 0, 1]))
}

/// Resolves the client address used as the rate limiting key.
///
/// Order: first `X-Forwarded-For` entry, `X-Real-IP`, the socket peer address,
/// then loopback.
pub fn extract_ip_from_headers(headers: &HeaderMap, fallback: Option<IpAddr>) -> IpAddr {
    if let Some(h) = headers.get("x-forwarded-for").and_then(|hv| hv.to_str().ok()) {
        if let Some(first) = h.split(',').next() {
            if let Ok(ip) = first.trim().parse::<IpAddr>() {
                return ip;
            }
        }
    }
    if let Some(h) = headers.get("x-real-ip").and_then(|hv| hv.to_str().ok()) {
        if let Ok(ip) = h.trim().parse::<IpAddr>() {
            return ip;
        }
    }
    if let Some(ip) = fallback {
        return ip;
    }
    IpAddr::from([127, 0, 0, 1])
}
