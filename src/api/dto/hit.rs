//! DTOs for the hit recording endpoint.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use serde_with::{DefaultOnNull, serde_as};
use validator::{Validate, ValidationError};

use crate::domain::entities::Hit;
use crate::utils::timestamp;

/// Request body of `POST /hit`.
///
/// Missing or `null` string fields deserialize as empty strings, so a
/// missing `app` or `uri` is reported by the validator.
#[serde_as]
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct HitRequest {
    #[serde(default)]
    #[serde_as(deserialize_as = "DefaultOnNull")]
    #[validate(custom(function = "not_blank", message = "App must not be blank"))]
    pub app: String,

    #[serde(default)]
    #[serde_as(deserialize_as = "DefaultOnNull")]
    #[validate(custom(function = "not_blank", message = "Uri must not be blank"))]
    pub uri: String,

    /// Visitor address. Opaque: any text is accepted.
    #[serde(default)]
    #[serde_as(deserialize_as = "DefaultOnNull")]
    pub ip: String,

    #[serde(
        default,
        with = "timestamp::option",
        skip_serializing_if = "Option::is_none"
    )]
    pub timestamp: Option<NaiveDateTime>,
}

/// Response body of `POST /hit`: the stored record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HitResponse {
    pub id: i64,
    pub app: String,
    pub uri: String,
    pub ip: String,
    #[serde(with = "timestamp")]
    pub timestamp: NaiveDateTime,
}

impl From<Hit> for HitResponse {
    fn from(hit: Hit) -> Self {
        Self {
            id: hit.id,
            app: hit.app,
            uri: hit.uri,
            ip: hit.ip,
            timestamp: hit.timestamp,
        }
    }
}

fn not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new("blank"));
    }
    Ok(())
}
