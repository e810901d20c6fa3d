//! Provider webhook events
//!
//! Deliveries are at-least-once and unordered. The raw body is parsed into a
//! [`ProviderEvent`] before any lookup happens, so malformed payloads are
//! rejected without touching the store.

use serde::Deserialize;
use serde_json::Value;
use thiserror::Error;

pub const ASSET_CREATED: &str = "video.asset.created";
pub const ASSET_READY: &str = "video.asset.ready";
pub const ASSET_ERRORED: &str = "video.asset.errored";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum EventParseError {
    #[error("Invalid webhook payload: {0}")]
    Json(String),

    #[error("Webhook event {0} has no data object")]
    MissingData(String),

    #[error("Invalid data for webhook event {kind}: {reason}")]
    InvalidData { kind: String, reason: String },
}

#[derive(Debug, Clone, PartialEq)]
pub enum ProviderEvent {
    AssetCreated {
        asset_id: String,
        upload_id: Option<String>,
    },
    AssetReady {
        asset_id: String,
        upload_id: Option<String>,
        duration: Option<f64>,
        playback_ids: Vec<String>,
    },
    AssetErrored {
        asset_id: String,
        upload_id: Option<String>,
        errors: Option<Value>,
    },
    /// Any event type this service does not act on
    Unrecognized { kind: String },
}

#[derive(Debug, Deserialize)]
struct Envelope {
    #[serde(rename = "type")]
    kind: String,
    #[serde(default)]
    data: Option<Value>,
}

#[derive(Debug, Deserialize)]
struct PlaybackIdData {
    #[serde(default)]
    id: Option<String>,
}

#[derive(Debug, Deserialize)]
struct AssetData {
    id: String,
    #[serde(default)]
    upload_id: Option<String>,
    #[serde(default)]
    duration: Option<f64>,
    /// May be absent, null, or hold entries without an id
    #[serde(default)]
    playback_ids: Option<Vec<PlaybackIdData>>,
    #[serde(default)]
    errors: Option<Value>,
}

impl ProviderEvent {
    /// Parse and validate a raw webhook body
    pub fn parse(body: &[u8]) -> Result<Self, EventParseError> {
        let envelope: Envelope =
            serde_json::from_slice(body).map_err(|e| EventParseError::Json(e.to_string()))?;

        if !matches!(
            envelope.kind.as_str(),
            ASSET_CREATED | ASSET_READY | ASSET_ERRORED
        ) {
            return Ok(ProviderEvent::Unrecognized {
                kind: envelope.kind,
            });
        }

        let data = envelope
            .data
            .ok_or_else(|| EventParseError::MissingData(envelope.kind.clone()))?;
        let invalid = |reason: String| EventParseError::InvalidData {
            kind: envelope.kind.clone(),
            reason,
        };
        let data: AssetData = serde_json::from_value(data).map_err(|e| invalid(e.to_string()))?;
        if data.id.trim().is_empty() {
            return Err(invalid("data.id is empty".to_string()));
        }

        let upload_id = data.upload_id.filter(|u| !u.trim().is_empty());

        Ok(match envelope.kind.as_str() {
            ASSET_CREATED => ProviderEvent::AssetCreated {
                asset_id: data.id,
                upload_id,
            },
            ASSET_READY => ProviderEvent::AssetReady {
                asset_id: data.id,
                upload_id,
                duration: data.duration,
                playback_ids: data
                    .playback_ids
                    .unwrap_or_default()
                    .into_iter()
                    .filter_map(|p| p.id)
                    .filter(|id| !id.is_empty())
                    .collect(),
            },
            _ => ProviderEvent::AssetErrored {
                asset_id: data.id,
                upload_id,
                errors: data.errors,
            },
        })
    }

    pub fn kind(&self) -> &str {
        match self {
            ProviderEvent::AssetCreated { .. } => ASSET_CREATED,
            ProviderEvent::AssetReady { .. } => ASSET_READY,
            ProviderEvent::AssetErrored { .. } => ASSET_ERRORED,
            ProviderEvent::Unrecognized { kind } => kind,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn parse(value: Value) -> Result<ProviderEvent, EventParseError> {
        ProviderEvent::parse(value.to_string().as_bytes())
    }

    #[test]
    fn test_asset_created() {
        let event = parse(json!({
            "type": "video.asset.created",
            "environment": { "name": "Production" },
            "data": { "id": "asset_1", "upload_id": "up_1", "status": "preparing" }
        }))
        .unwrap();

        assert_eq!(
            event,
            ProviderEvent::AssetCreated {
                asset_id: "asset_1".to_string(),
                upload_id: Some("up_1".to_string()),
            }
        );
        assert_eq!(event.kind(), ASSET_CREATED);
    }

    #[test]
    fn test_asset_ready_tolerates_sparse_playback_ids() {
        let event = parse(json!({
            "type": "video.asset.ready",
            "data": { "id": "asset_1", "playback_ids": null }
        }))
        .unwrap();
        assert!(matches!(
            event,
            ProviderEvent::AssetReady { ref playback_ids, .. } if playback_ids.is_empty()
        ));

        let event = parse(json!({
            "type": "video.asset.ready",
            "data": {
                "id": "asset_1",
                "playback_ids": [{ "policy": "public" }, { "id": null }, { "id": "pb_2" }]
            }
        }))
        .unwrap();
        assert!(matches!(
            event,
            ProviderEvent::AssetReady { ref playback_ids, .. } if *playback_ids == vec!["pb_2".to_string()]
        ));
    }

    #[test]
    fn test_asset_ready_keeps_playback_order() {
        let event = parse(json!({
            "type": "video.asset.ready",
            "data": {
                "id": "asset_1",
                "duration": 42.5,
                "playback_ids": [{ "id": "pb_1", "policy": "public" }, { "id": "pb_2" }]
            }
        }))
        .unwrap();

        assert_eq!(
            event,
            ProviderEvent::AssetReady {
                asset_id: "asset_1".to_string(),
                upload_id: None,
                duration: Some(42.5),
                playback_ids: vec!["pb_1".to_string(), "pb_2".to_string()],
            }
        );
    }

    #[test]
    fn test_asset_errored_carries_errors() {
        let event = parse(json!({
            "type": "video.asset.errored",
            "data": {
                "id": "asset_1",
                "upload_id": "",
                "errors": { "type": "invalid_input", "messages": ["bad file"] }
            }
        }))
        .unwrap();

        match event {
            ProviderEvent::AssetErrored {
                upload_id, errors, ..
            } => {
                assert_eq!(upload_id, None);
                assert_eq!(errors.unwrap()["messages"][0], "bad file");
            }
            other => panic!("unexpected event {:?}", other),
        }
    }

    #[test]
    fn test_unknown_type_is_not_an_error() {
        let event = parse(json!({ "type": "video.upload.created", "data": { "id": "up_1" } }))
            .unwrap();
        assert_eq!(
            event,
            ProviderEvent::Unrecognized {
                kind: "video.upload.created".to_string()
            }
        );

        // Unrecognized kinds are accepted even without data
        assert!(parse(json!({ "type": "video.live_stream.idle" })).is_ok());
    }

    #[test]
    fn test_malformed_payloads() {
        assert!(matches!(
            ProviderEvent::parse(b"not json"),
            Err(EventParseError::Json(_))
        ));
        assert!(matches!(
            parse(json!({ "data": { "id": "asset_1" } })),
            Err(EventParseError::Json(_))
        ));
        assert!(matches!(
            parse(json!({ "type": "video.asset.ready" })),
            Err(EventParseError::MissingData(_))
        ));
        assert!(matches!(
            parse(json!({ "type": "video.asset.ready", "data": { "duration": 1.0 } })),
            Err(EventParseError::InvalidData { .. })
        ));
        assert!(matches!(
            parse(json!({ "type": "video.asset.created", "data": { "id": " " } })),
            Err(EventParseError::InvalidData { .. })
        ));
        assert!(matches!(
            parse(json!({ "type": "video.asset.ready", "data": { "id": "a", "duration": "long" } })),
            Err(EventParseError::InvalidData { .. })
        ));
    }
}
