//! One-time notices carried across the post/redirect/get cycle.
//!
//! The notice rides in a cookie set on the redirect and cleared by the
//! page that displays it.

use axum::http::header::COOKIE;
use axum::http::HeaderMap;
use portmonitor_core::MappingOutcome;
use serde::{Deserialize, Serialize};

/// Cookie holding a pending notice.
pub const COOKIE_NAME: &str = "portmonitor_notice";

/// `Set-Cookie` value that discards the pending notice.
pub const CLEAR_COOKIE: &str = "portmonitor_notice=; Path=/; Max-Age=0; HttpOnly; SameSite=Lax";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NoticeKind {
    Success,
    Error,
}

impl NoticeKind {
    /// CSS class of the banner.
    pub fn css_class(&self) -> &'static str {
        match self {
            NoticeKind::Success => "success",
            NoticeKind::Error => "error",
        }
    }
}

/// A message shown once at the top of the dashboard.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notice {
    pub kind: NoticeKind,
    pub message: String,
}

impl Notice {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Success,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Error,
            message: message.into(),
        }
    }

    /// `Set-Cookie` value carrying this notice.
    pub fn to_cookie(&self) -> serde_json::Result<String> {
        let payload = hex::encode(serde_json::to_vec(self)?);
        Ok(format!("{}={}; Path=/; HttpOnly; SameSite=Lax", COOKIE_NAME, payload))
    }

    /// Read the pending notice from request headers.
    ///
    /// A cookie that does not decode is ignored.
    pub fn from_headers(headers: &HeaderMap) -> Option<Self> {
        headers
            .get_all(COOKIE)
            .iter()
            .filter_map(|value| value.to_str().ok())
            .flat_map(|value| value.split(';'))
            .filter_map(|pair| pair.trim().split_once('='))
            .find(|(name, _)| *name == COOKIE_NAME)
            .and_then(|(_, payload)| hex::decode(payload).ok())
            .and_then(|bytes| serde_json::from_slice(&bytes).ok())
    }
}

impl From<&MappingOutcome> for Notice {
    fn from(outcome: &MappingOutcome) -> Self {
        if outcome.is_success() {
            Notice::success(outcome.message())
        } else {
            Notice::error(outcome.message())
        }
    }
}
