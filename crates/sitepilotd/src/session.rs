//! Per-session language preference.
//!
//! Injected into the app state rather than held globally. Entries live for
//! the process lifetime; a write for a session replaces the previous value.

use axum::http::HeaderMap;
use sitepilot_common::Language;
use std::collections::HashMap;
use std::net::SocketAddr;
use tokio::sync::RwLock;

/// Header carrying an explicit client session id
pub const SESSION_HEADER: &str = "x-session-id";

/// Fallback id when neither header nor peer address is known
pub const ANONYMOUS_SESSION: &str = "anonymous";

#[derive(Debug, Default)]
pub struct SessionLanguages {
    inner: RwLock<HashMap<String, Language>>,
}

impl SessionLanguages {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn get(&self, session: &str) -> Option<Language> {
        self.inner.read().await.get(session).copied()
    }

    /// Language for the session, English when never set
    pub async fn get_or_default(&self, session: &str) -> Language {
        self.get(session).await.unwrap_or_default()
    }

    pub async fn set(&self, session: &str, language: Language) {
        self.inner.write().await.insert(session.to_string(), language);
    }

    /// Number of sessions with a stored language
    pub async fn len(&self) -> usize {
        self.inner.read().await.len()
    }
}

/// Session id from the `x-session-id` header, else the peer IP
pub fn session_id(headers: &HeaderMap, peer: Option<SocketAddr>) -> String {
    headers
        .get(SESSION_HEADER)
        .and_then(|v| v.to_str().ok())
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
        .or_else(|| peer.map(|addr| addr.ip().to_string()))
        .unwrap_or_else(|| ANONYMOUS_SESSION.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    #[tokio::test]
    async fn test_unknown_session_defaults_to_english() {
        let store = SessionLanguages::new();
        assert_eq!(store.get("a").await, None);
        assert_eq!(store.get_or_default("a").await, Language::En);
    }

    #[tokio::test]
    async fn test_last_write_wins_per_session() {
        let store = SessionLanguages::new();
        store.set("a", Language::Ar).await;
        store.set("b", Language::En).await;
        store.set("a", Language::En).await;
        store.set("b", Language::Ar).await;
        assert_eq!(store.get("a").await, Some(Language::En));
        assert_eq!(store.get("b").await, Some(Language::Ar));
        assert_eq!(store.len().await, 2);
    }

    #[test]
    fn test_session_id_sources() {
        let peer: SocketAddr = "10.0.0.7:5555".parse().unwrap();
        let mut headers = HeaderMap::new();
        assert_eq!(session_id(&headers, None), ANONYMOUS_SESSION);
        assert_eq!(session_id(&headers, Some(peer)), "10.0.0.7");

        headers.insert(SESSION_HEADER, HeaderValue::from_static("abc"));
        assert_eq!(session_id(&headers, Some(peer)), "abc");

        headers.insert(SESSION_HEADER, HeaderValue::from_static("  "));
        assert_eq!(session_id(&headers, Some(peer)), "10.0.0.7");
    }
}
