//! Encoding of client-side events for the trigger headers.
//!
//! Two shapes exist on the wire:
//!
//! ```text
//! X-Trigger: saved,refreshList
//! X-Trigger: {"showMessage":{"level":"info","message":"Saved"}}
//! ```
//!
//! The value is encoded when the [`TriggerEvents`] is built, so a payload
//! that cannot be serialized fails there and not while the response is being
//! written.

use serde::Serialize;
use serde_json::{Map, Value};

use super::error::HxError;

/// One or more events to fire on the client.
#[derive(Debug, Clone, PartialEq)]
pub struct TriggerEvents {
    kind: TriggerKind,
    encoded: String,
}

#[derive(Debug, Clone, PartialEq)]
enum TriggerKind {
    Names(Vec<String>),
    Context(Map<String, Value>),
}

impl TriggerEvents {
    /// A single event without details.
    pub fn name(event: impl Into<String>) -> Self {
        Self::names([event])
    }

    /// Events without details, fired in the given order.
    ///
    /// Names are joined with `,` as-is: no escaping, duplicates kept.
    pub fn names<I, S>(events: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let names: Vec<String> = events.into_iter().map(Into::into).collect();
        let encoded = names.join(",");
        Self {
            kind: TriggerKind::Names(names),
            encoded,
        }
    }

    /// Events carrying JSON details, keyed by event name.
    ///
    /// ```
    /// use hxkit::htmx::TriggerEvents;
    /// use serde_json::json;
    ///
    /// let events = TriggerEvents::with_context([
    ///     ("showMessage", json!({"level": "info", "message": "Here is a message"})),
    /// ]);
    /// assert_eq!(
    ///     events.header_value(),
    ///     r#"{"showMessage":{"level":"info","message":"Here is a message"}}"#
    /// );
    /// ```
    ///
    /// # Panics
    ///
    /// Panics if a payload cannot be serialized. Callers are expected to pass
    /// only serializable data; use [`TriggerEvents::try_with_context`] to
    /// handle the failure instead.
    pub fn with_context<I, K, V>(events: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Serialize,
    {
        match Self::try_with_context(events) {
            Ok(events) => events,
            Err(e) => panic!("{e}"),
        }
    }

    /// Fallible form of [`TriggerEvents::with_context`].
    pub fn try_with_context<I, K, V>(events: I) -> Result<Self, HxError>
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Serialize,
    {
        let mut context = Map::new();
        for (name, payload) in events {
            context.insert(name.into(), serde_json::to_value(payload)?);
        }
        let encoded = serde_json::to_string(&context)?;
        Ok(Self {
            kind: TriggerKind::Context(context),
            encoded,
        })
    }

    /// The encoded header value.
    pub fn header_value(&self) -> &str {
        &self.encoded
    }

    /// Names of the events, in encoding order.
    pub fn event_names(&self) -> Vec<&str> {
        match &self.kind {
            TriggerKind::Names(names) => names.iter().map(String::as_str).collect(),
            TriggerKind::Context(context) => context.keys().map(String::as_str).collect(),
        }
    }
}
