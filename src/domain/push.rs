//! Push notification payloads
//!
//! The payload schema belongs to the notification service; the shell only needs
//! enough of it to know which room to open.

use serde::{Deserialize, Serialize};

use crate::domain::intent::{NavigationIntent, Params};
use crate::domain::route::RouteName;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PushPayload {
    #[serde(default)]
    pub rid: Option<String>,
    #[serde(default, rename = "type")]
    pub room_type: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub host: Option<String>,
}

impl PushPayload {
    /// Decodes a raw JSON payload, yielding None for anything unreadable
    pub fn from_json(raw: &str) -> Option<Self> {
        match serde_json::from_str(raw) {
            Ok(payload) => Some(payload),
            Err(err) => {
                tracing::warn!(error = %err, "discarding undecodable push payload");
                None
            }
        }
    }

    /// Navigation target of the notification
    ///
    /// # Returns
    /// None when the payload does not name a room
    pub fn to_intent(&self) -> Option<NavigationIntent> {
        let rid = self.rid.as_deref().map(str::trim).filter(|rid| !rid.is_empty())?;

        let mut params = Params::new();
        params.insert("rid".to_string(), rid.to_string());
        let optional = [
            ("t", &self.room_type),
            ("name", &self.name),
            ("host", &self.host),
        ];
        for (key, value) in optional {
            if let Some(value) = value {
                params.insert(key.to_string(), value.clone());
            }
        }

        Some(NavigationIntent::navigate_with(RouteName::RoomView, params))
    }
}
