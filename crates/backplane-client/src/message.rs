//! Backplane message shapes
//!
//! The client never inspects `payload`. Metadata fields are all optional
//! because the server fills some of them in (`messageURL`, `source`,
//! `expire`) and a publisher omits them. Unknown fields survive a
//! deserialize/serialize cycle through `extra`.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

/// A bus message.
///
/// Metadata the server sends with an unexpected type is left in `extra`
/// under its original key instead of failing the whole page. A body that
/// is not a JSON object becomes the `payload` of an otherwise empty message.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct Message {
    #[serde(rename = "messageURL", skip_serializing_if = "Option::is_none")]
    pub message_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub message_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bus: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub channel: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sticky: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expire: Option<String>,
    pub payload: Value,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Message {
    fn from_value(value: Value) -> Self {
        let mut extra = match value {
            Value::Object(map) => map,
            other => {
                return Self {
                    payload: other,
                    ..Self::default()
                };
            }
        };

        Self {
            message_url: take_string(&mut extra, "messageURL"),
            source: take_string(&mut extra, "source"),
            message_type: take_string(&mut extra, "type"),
            bus: take_string(&mut extra, "bus"),
            channel: take_string(&mut extra, "channel"),
            sticky: take_sticky(&mut extra),
            expire: take_string(&mut extra, "expire"),
            payload: extra.remove("payload").unwrap_or(Value::Null),
            extra,
        }
    }
}

impl<'de> Deserialize<'de> for Message {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        Value::deserialize(deserializer).map(Self::from_value)
    }
}

/// One page of a message poll.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct MessageWrapper {
    /// Absolute URL to poll for the next page
    #[serde(rename = "nextURL")]
    pub next_url: String,
    #[serde(default)]
    pub messages: Vec<Message>,
    /// Whether the server has more messages ready right now
    #[serde(rename = "moreMessages", default)]
    pub more_messages: bool,
}

/// Remove `key` if it holds a string. Any other non-null value stays put.
fn take_string(extra: &mut Map<String, Value>, key: &str) -> Option<String> {
    match extra.remove(key)? {
        Value::String(s) => Some(s),
        Value::Null => None,
        other => {
            extra.insert(key.to_owned(), other);
            None
        }
    }
}

/// Servers disagree on whether `sticky` is `false` or `"false"`.
fn take_sticky(extra: &mut Map<String, Value>) -> Option<bool> {
    match extra.remove("sticky")? {
        Value::Bool(b) => Some(b),
        Value::String(s) if s == "true" => Some(true),
        Value::String(s) if s == "false" => Some(false),
        Value::Null => None,
        other => {
            extra.insert("sticky".to_owned(), other);
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::MESSAGES_JSON;
    use serde_json::json;

    #[test]
    fn parses_message_page() {
        let page: MessageWrapper = serde_json::from_str(MESSAGES_JSON).unwrap();
        assert_eq!(page.messages.len(), 2);
        assert!(!page.more_messages);
        assert!(page.next_url.ends_with("since=2013-01-06T19:55:40.524Z-z2lbJUnkZt"));

        let first = &page.messages[0];
        assert_eq!(first.message_type.as_deref(), Some("test"));
        assert_eq!(first.bus.as_deref(), Some("foo"));
        assert_eq!(first.sticky, Some(false));
        assert_eq!(first.payload, json!("bar"));
        assert!(first.extra.is_empty());
    }

    #[test]
    fn sticky_accepts_bool_and_string() {
        let m: Message = serde_json::from_value(json!({"sticky": true})).unwrap();
        assert_eq!(m.sticky, Some(true));
        let m: Message = serde_json::from_value(json!({"sticky": "true"})).unwrap();
        assert_eq!(m.sticky, Some(true));
        let m: Message = serde_json::from_value(json!({"sticky": null})).unwrap();
        assert_eq!(m.sticky, None);

        let m: Message = serde_json::from_value(json!({"sticky": "maybe"})).unwrap();
        assert_eq!(m.sticky, None);
        assert_eq!(m.extra.get("sticky"), Some(&json!("maybe")));
    }

    #[test]
    fn ill_typed_metadata_stays_in_extra() {
        let m: Message = serde_json::from_value(json!({
            "bus": 42,
            "channel": "c1",
            "expire": 1357500000,
            "payload": "a"
        }))
        .unwrap();
        assert_eq!(m.bus, None);
        assert_eq!(m.expire, None);
        assert_eq!(m.channel.as_deref(), Some("c1"));
        assert_eq!(m.extra.get("bus"), Some(&json!(42)));
        assert_eq!(m.extra.get("expire"), Some(&json!(1357500000)));

        let value = serde_json::to_value(&m).unwrap();
        assert_eq!(value["bus"], json!(42));
        assert_eq!(value["expire"], json!(1357500000));
    }

    #[test]
    fn page_with_odd_metadata_keeps_cursor() {
        let page: MessageWrapper = serde_json::from_value(json!({
            "nextURL": "https://bp.example.com/v2/messages?since=X",
            "messages": [
                {"payload": "a", "expire": 1357500000},
                {"payload": "b", "sticky": "no"}
            ],
            "moreMessages": false
        }))
        .unwrap();
        assert_eq!(page.next_url, "https://bp.example.com/v2/messages?since=X");
        assert_eq!(page.messages.len(), 2);
        assert_eq!(page.messages[0].payload, json!("a"));
        assert_eq!(page.messages[1].payload, json!("b"));
        assert_eq!(page.messages[1].extra.get("sticky"), Some(&json!("no")));
    }

    #[test]
    fn non_object_body_becomes_payload() {
        let m: Message = serde_json::from_str(r#"["x", 1]"#).unwrap();
        assert_eq!(m.payload, json!(["x", 1]));
        assert!(m.extra.is_empty());
        assert_eq!(m.bus, None);

        let m: Message = serde_json::from_str("null").unwrap();
        assert_eq!(m, Message::default());
    }

    #[test]
    fn outgoing_message_omits_unset_metadata() {
        let message = Message {
            message_type: Some("test".into()),
            bus: Some("bus".into()),
            channel: Some("channel".into()),
            sticky: Some(false),
            payload: json!("bar"),
            ..Message::default()
        };
        let value = serde_json::to_value(&message).unwrap();
        assert_eq!(
            value,
            json!({"type":"test","bus":"bus","channel":"channel","sticky":false,"payload":"bar"})
        );
    }

    #[test]
    fn unknown_fields_are_kept() {
        let m: Message =
            serde_json::from_value(json!({"payload": {"k": 1}, "priority": "high"})).unwrap();
        assert_eq!(m.extra.get("priority"), Some(&json!("high")));
        assert_eq!(serde_json::to_value(&m).unwrap()["priority"], json!("high"));
    }

    #[test]
    fn empty_page_defaults() {
        let page: MessageWrapper =
            serde_json::from_str(r#"{"nextURL":"https://bp.example.com/v2/messages?since=x"}"#)
                .unwrap();
        assert!(page.messages.is_empty());
        assert!(!page.more_messages);
    }
}
