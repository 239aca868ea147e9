//! Decoded webhook payload.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{WebhookError, WebhookResult};
use crate::event::WebhookEvent;

/// Value of the top-level `entity` field on every webhook.
pub const EVENT_ENTITY: &str = "event";

/// Wrapper around a resource snapshot inside `payload`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EntityWrapper {
    /// The resource snapshot (payment, order, refund, ...).
    pub entity: Value,
}

/// A decoded Razorpay webhook body.
///
/// `event` is kept as the raw string so that events this crate does not know
/// yet still decode and reach the dispatcher, which rejects them with their
/// literal name.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WebhookPayload {
    /// Always `"event"`.
    #[serde(default = "default_entity")]
    pub entity: String,
    /// Merchant account the event belongs to.
    pub account_id: String,
    /// Event type string, e.g. `payment.captured`.
    pub event: String,
    /// Domain tags present in `payload`.
    #[serde(default)]
    pub contains: Vec<String>,
    /// Resource snapshots keyed by domain tag.
    #[serde(default)]
    pub payload: HashMap<String, EntityWrapper>,
    /// Unix timestamp, seconds.
    pub created_at: i64,
}

fn default_entity() -> String {
    EVENT_ENTITY.to_string()
}

impl WebhookPayload {
    /// Creates a payload with no resource snapshots.
    pub fn new(account_id: impl Into<String>, event: impl Into<String>, created_at: i64) -> Self {
        Self {
            entity: default_entity(),
            account_id: account_id.into(),
            event: event.into(),
            contains: Vec::new(),
            payload: HashMap::new(),
            created_at,
        }
    }

    /// Adds a resource snapshot under `tag` and records it in `contains`.
    pub fn with_entity(mut self, tag: impl Into<String>, entity: Value) -> Self {
        let tag = tag.into();
        if !self.contains.contains(&tag) {
            self.contains.push(tag.clone());
        }
        self.payload.insert(tag, EntityWrapper { entity });
        self
    }

    /// Decodes a payload from raw JSON bytes.
    pub fn from_slice(body: &[u8]) -> WebhookResult<Self> {
        Ok(serde_json::from_slice(body)?)
    }

    /// Decodes a payload from a JSON value.
    pub fn from_value(value: Value) -> WebhookResult<Self> {
        Ok(serde_json::from_value(value)?)
    }

    /// Resolves the event string against the known enumeration.
    pub fn event_type(&self) -> WebhookResult<WebhookEvent> {
        self.event.parse()
    }

    /// Returns the resource snapshot for a domain tag.
    pub fn entity(&self, tag: &str) -> Option<&Value> {
        self.payload.get(tag).map(|wrapper| &wrapper.entity)
    }

    /// Deserializes the resource snapshot for a domain tag.
    pub fn entity_as<T: for<'de> Deserialize<'de>>(&self, tag: &str) -> WebhookResult<T> {
        let entity = self
            .entity(tag)
            .ok_or_else(|| WebhookError::InvalidPayload(format!("no `{tag}` entity in payload")))?;
        Ok(serde_json::from_value(entity.clone())?)
    }

    /// Checks whether `contains` lists a domain tag.
    pub fn has_entity(&self, tag: &str) -> bool {
        self.contains.iter().any(|t| t == tag)
    }

    /// `created_at` as a UTC timestamp.
    pub fn created_at_utc(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp(self.created_at, 0)
    }
}
