//! Guards medical text out of debug logs.
//!
//! Referral text is protected health information. Log statements that would
//! print document content go through [`loggable`], which substitutes a
//! length-only placeholder unless `DOCPORT_ALLOW_DEBUG_PHI=true` is set.

use lazy_static::lazy_static;

lazy_static! {
    /// Read once: whether document content may appear in debug logs.
    static ref PHI_DEBUG_ALLOWED: bool = {
        std::env::var("DOCPORT_ALLOW_DEBUG_PHI")
            .map(|s| s.eq_ignore_ascii_case("true"))
            .unwrap_or(false)
    };
}

/// Replaces `s` with a placeholder that only reveals its length.
pub fn redact_phi(s: &str) -> String {
    const MAX_LEN: usize = 8;
    let len = s.chars().count();
    if len <= MAX_LEN {
        "[REDACTED]".to_string()
    } else {
        format!("[REDACTED: {} chars]", len)
    }
}

/// Returns `s` itself when PHI logging is allowed, a placeholder otherwise.
pub fn loggable(s: &str) -> String {
    if *PHI_DEBUG_ALLOWED {
        s.to_string()
    } else {
        redact_phi(s)
    }
}
