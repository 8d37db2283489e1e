//! Activation record reported by alerter

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize};
use tracing::debug;

use crate::domain::error::{DecodeError, InvalidActivationKindError};

/// What dismissed the notification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ActivationKind {
    #[serde(rename = "closed")]
    Closed,
    #[serde(rename = "timeout")]
    Timeout,
    #[serde(rename = "contentsClicked")]
    ContentsClicked,
    #[serde(rename = "actionClicked")]
    ActionClicked,
    #[serde(rename = "replied")]
    Replied,
}

impl ActivationKind {
    /// Tag used by alerter
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Closed => "closed",
            Self::Timeout => "timeout",
            Self::ContentsClicked => "contentsClicked",
            Self::ActionClicked => "actionClicked",
            Self::Replied => "replied",
        }
    }
}

impl FromStr for ActivationKind {
    type Err = InvalidActivationKindError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "closed" => Ok(Self::Closed),
            "timeout" => Ok(Self::Timeout),
            "contentsClicked" => Ok(Self::ContentsClicked),
            "actionClicked" => Ok(Self::ActionClicked),
            "replied" => Ok(Self::Replied),
            _ => Err(InvalidActivationKindError {
                input: s.to_string(),
            }),
        }
    }
}

impl fmt::Display for ActivationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// How the user (or the OS) interacted with a notification.
///
/// The default value, with every field empty, stands for "no structured
/// feedback": alerter printed nothing or something unreadable.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActivationRecord {
    /// What kind of event dismissed the alert
    #[serde(
        rename = "activationType",
        default,
        deserialize_with = "known_kind",
        skip_serializing_if = "Option::is_none"
    )]
    pub kind: Option<ActivationKind>,
    /// When it happened
    #[serde(rename = "activationAt", default)]
    pub at: String,
    /// Clicked action label or reply text
    #[serde(rename = "activationValue", default)]
    pub value: String,
    /// When the notification was displayed
    #[serde(rename = "deliveredAt", default)]
    pub delivered_at: String,
    /// Position of the clicked action
    #[serde(rename = "activationValueIndex", default)]
    pub value_index: String,
}

/// Unknown or empty tags map to `None` instead of failing the whole record
fn known_kind<'de, D>(deserializer: D) -> Result<Option<ActivationKind>, D::Error>
where
    D: Deserializer<'de>,
{
    let tag = Option::<String>::deserialize(deserializer)?;
    Ok(tag.and_then(|t| t.parse().ok()))
}

impl ActivationRecord {
    /// Decode alerter output, falling back to the empty record when the
    /// output is missing or malformed.
    pub fn decode(raw: &[u8]) -> Self {
        match Self::try_decode(raw) {
            Ok(record) => record,
            Err(e) => {
                debug!(error = %e, "ignoring unreadable alerter output");
                Self::default()
            }
        }
    }

    /// Decode alerter output, reporting malformed JSON.
    ///
    /// Empty output is not an error: it decodes to the empty record.
    pub fn try_decode(raw: &[u8]) -> Result<Self, DecodeError> {
        if raw.iter().all(u8::is_ascii_whitespace) {
            return Ok(Self::default());
        }
        Ok(serde_json::from_slice(raw)?)
    }

    /// Whether alerter reported nothing
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Clicked action index, if alerter reported a numeric one
    pub fn action_index(&self) -> Option<usize> {
        self.value_index.trim().parse().ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_output_is_empty_record() {
        let record = ActivationRecord::decode(b"");
        assert!(record.is_empty());
        assert!(record.kind.is_none());
        assert_eq!(record.at, "");
        assert_eq!(record.value, "");
        assert_eq!(record.delivered_at, "");
        assert_eq!(record.value_index, "");
    }

    #[test]
    fn whitespace_output_is_empty_record() {
        assert!(ActivationRecord::decode(b"\n  \n").is_empty());
        assert!(ActivationRecord::try_decode(b"\n").unwrap().is_empty());
    }

    #[test]
    fn decodes_all_fields() {
        let raw = br#"{
            "activationType": "replied",
            "activationAt": "2024-01-02 10:00:05 +0000",
            "activationValue": "v1.2 Falcon",
            "deliveredAt": "2024-01-02 10:00:00 +0000",
            "activationValueIndex": "3"
        }"#;
        let record = ActivationRecord::decode(raw);
        assert_eq!(record.kind, Some(ActivationKind::Replied));
        assert_eq!(record.at, "2024-01-02 10:00:05 +0000");
        assert_eq!(record.value, "v1.2 Falcon");
        assert_eq!(record.delivered_at, "2024-01-02 10:00:00 +0000");
        assert_eq!(record.value_index, "3");
        assert_eq!(record.action_index(), Some(3));
    }

    #[test]
    fn decodes_partial_action_clicked() {
        let raw =
            br#"{"activationType":"actionClicked","activationValue":"Now","activationValueIndex":"0"}"#;
        let record = ActivationRecord::decode(raw);
        assert_eq!(record.kind, Some(ActivationKind::ActionClicked));
        assert_eq!(record.value, "Now");
        assert_eq!(record.value_index, "0");
        assert_eq!(record.at, "");
    }

    #[test]
    fn malformed_output_is_empty_record() {
        assert!(ActivationRecord::decode(b"not json at all").is_empty());
        assert!(ActivationRecord::decode(br#"{"activationType": "#).is_empty());
    }

    #[test]
    fn strict_decode_reports_malformed_output() {
        let err = ActivationRecord::try_decode(b"{oops").unwrap_err();
        assert!(err.to_string().contains("Malformed"));
    }

    #[test]
    fn unknown_kind_keeps_other_fields() {
        let raw = br#"{"activationType":"swiped","activationValue":"x"}"#;
        let record = ActivationRecord::decode(raw);
        assert!(record.kind.is_none());
        assert_eq!(record.value, "x");
    }

    #[test]
    fn serializes_with_alerter_field_names() {
        let record = ActivationRecord {
            kind: Some(ActivationKind::Timeout),
            delivered_at: "now".to_string(),
            ..Default::default()
        };
        let json = serde_json::to_string(&record).unwrap();
        assert!(json.contains(r#""activationType":"timeout""#));
        assert!(json.contains(r#""deliveredAt":"now""#));
        assert_eq!(ActivationRecord::decode(json.as_bytes()), record);
    }

    #[test]
    fn kind_parse_and_display() {
        for tag in ["closed", "timeout", "contentsClicked", "actionClicked", "replied"] {
            let kind: ActivationKind = tag.parse().unwrap();
            assert_eq!(kind.to_string(), tag);
        }
        assert!("Closed".parse::<ActivationKind>().is_err());
    }
}
