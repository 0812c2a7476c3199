//! Notification request value object

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

/// Opaque identifier assigned by the router when a request is posted.
///
/// Backed by a random UUID so identifiers never collide across router
/// instances that share the same host notification service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NotificationId(Uuid);

impl NotificationId {
    /// Generate a fresh identifier
    pub fn generate() -> Self {
        Self(Uuid::new_v4())
    }
}

impl fmt::Display for NotificationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for NotificationId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(s.trim()).map(Self)
    }
}

/// Notification icon types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NotificationIcon {
    #[default]
    Info,
    Success,
    Warning,
    Error,
}

impl NotificationIcon {
    /// Get the freedesktop icon name
    pub const fn icon_name(&self) -> &'static str {
        match self {
            Self::Info => "dialog-information",
            Self::Success => "dialog-ok",
            Self::Warning => "dialog-warning",
            Self::Error => "dialog-error",
        }
    }
}

/// A notification to show.
///
/// Immutable once built: the builder methods consume `self`.
/// `identifier` is the caller's own tag and is never used to match
/// backend callbacks; the router assigns a [`NotificationId`] for that.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NotificationRequest {
    title: String,
    subtitle: Option<String>,
    body: Option<String>,
    identifier: Option<String>,
    #[serde(default)]
    icon: NotificationIcon,
    #[serde(default)]
    payload: Value,
}

impl NotificationRequest {
    /// Create a request with only a title
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            subtitle: None,
            body: None,
            identifier: None,
            icon: NotificationIcon::default(),
            payload: Value::Null,
        }
    }

    pub fn with_subtitle(mut self, subtitle: impl Into<String>) -> Self {
        self.subtitle = Some(subtitle.into());
        self
    }

    pub fn with_body(mut self, body: impl Into<String>) -> Self {
        self.body = Some(body.into());
        self
    }

    pub fn with_identifier(mut self, identifier: impl Into<String>) -> Self {
        self.identifier = Some(identifier.into());
        self
    }

    pub fn with_icon(mut self, icon: NotificationIcon) -> Self {
        self.icon = icon;
        self
    }

    /// Attach arbitrary application data, handed back on activation
    pub fn with_payload(mut self, payload: Value) -> Self {
        self.payload = payload;
        self
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn subtitle(&self) -> Option<&str> {
        self.subtitle.as_deref()
    }

    pub fn body(&self) -> Option<&str> {
        self.body.as_deref()
    }

    pub fn identifier(&self) -> Option<&str> {
        self.identifier.as_deref()
    }

    pub fn icon(&self) -> NotificationIcon {
        self.icon
    }

    pub fn payload(&self) -> &Value {
        &self.payload
    }

    /// Body text for backends that have no separate subtitle field.
    ///
    /// Subtitle and body are joined by a newline when both are present.
    pub fn display_body(&self) -> String {
        match (self.subtitle.as_deref(), self.body.as_deref()) {
            (Some(subtitle), Some(body)) => format!("{}\n{}", subtitle, body),
            (Some(text), None) | (None, Some(text)) => text.to_string(),
            (None, None) => String::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn builder_sets_fields() {
        let request = NotificationRequest::new("Build finished")
            .with_subtitle("notify-router")
            .with_body("All tests passed")
            .with_identifier("build-42")
            .with_icon(NotificationIcon::Success)
            .with_payload(json!({"job": 42}));

        assert_eq!(request.title(), "Build finished");
        assert_eq!(request.subtitle(), Some("notify-router"));
        assert_eq!(request.body(), Some("All tests passed"));
        assert_eq!(request.identifier(), Some("build-42"));
        assert_eq!(request.icon(), NotificationIcon::Success);
        assert_eq!(request.payload()["job"], 42);
    }

    #[test]
    fn new_request_has_defaults() {
        let request = NotificationRequest::new("Hello");
        assert!(request.subtitle().is_none());
        assert!(request.body().is_none());
        assert_eq!(request.icon(), NotificationIcon::Info);
        assert!(request.payload().is_null());
    }

    #[test]
    fn display_body_joins_subtitle_and_body() {
        let request = NotificationRequest::new("t").with_subtitle("sub").with_body("body");
        assert_eq!(request.display_body(), "sub\nbody");

        let only_body = NotificationRequest::new("t").with_body("body");
        assert_eq!(only_body.display_body(), "body");

        let only_subtitle = NotificationRequest::new("t").with_subtitle("sub");
        assert_eq!(only_subtitle.display_body(), "sub");

        assert_eq!(NotificationRequest::new("t").display_body(), "");
    }

    #[test]
    fn generated_ids_are_unique() {
        let a = NotificationId::generate();
        let b = NotificationId::generate();
        assert_ne!(a, b);
    }

    #[test]
    fn id_parses_from_display() {
        let id = NotificationId::generate();
        let parsed: NotificationId = id.to_string().parse().unwrap();
        assert_eq!(parsed, id);
    }

    #[test]
    fn id_rejects_garbage() {
        assert!("not-an-id".parse::<NotificationId>().is_err());
    }

    #[test]
    fn icon_names() {
        assert_eq!(NotificationIcon::Info.icon_name(), "dialog-information");
        assert_eq!(NotificationIcon::Error.icon_name(), "dialog-error");
    }
}
