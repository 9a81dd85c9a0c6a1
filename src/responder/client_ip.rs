//! Client IP resolution.
//!
//! Sources, first match wins:
//! 1. platform header (CDN-reported client IP)
//! 2. X-Forwarded-For chain from a trusted proxy
//! 3. the directly observed IP: the peer address, or X-Real-IP from a trusted proxy
//! 4. raw X-Forwarded-For plus the peer address
//!
//! (3) is set whenever the connection info is known, so (4) only applies to
//! requests built without it. There nobody vouches for the header, so the peer
//! address is appended unless it is loopback and the header yielded IPs.

use crate::http::headers::X_FORWARDED_FOR;
use crate::http::request::{split_forwarded_for, IncomingRequest};

pub fn resolve_client_ips(req: &IncomingRequest) -> Vec<String> {
    if let Some(ip) = &req.platform_ip {
        return vec![ip.clone()];
    }
    if !req.proxy_ips.is_empty() {
        return req.proxy_ips.clone();
    }
    if let Some(ip) = &req.ip {
        return vec![ip.clone()];
    }

    let mut ips = req
        .headers
        .get(X_FORWARDED_FOR)
        .and_then(|h| h.to_str().ok())
        .map(split_forwarded_for)
        .unwrap_or_default();

    if let Some(remote) = req.remote_addr {
        if ips.is_empty() || !remote.is_loopback() {
            ips.push(remote.to_string());
        }
    }
    ips
}
