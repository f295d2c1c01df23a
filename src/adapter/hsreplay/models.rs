//! Replay Service Wire Models

use serde::Deserialize;

use crate::domain::entities::upload_result::UploadError;
use crate::domain::repositories::upload_repository::StagedUpload;

/// Response to the phase 1 upload request
#[derive(Debug, Deserialize)]
pub struct UploadRequestResponse {
    pub put_url: Option<String>,
    pub shortid: Option<String>,
}

impl UploadRequestResponse {
    /// Decode the phase 1 response body
    ///
    /// Only a JSON object is accepted. serde would otherwise read an array positionally.
    pub fn from_value(value: serde_json::Value) -> Result<Self, UploadError> {
        if !value.is_object() {
            return Err(UploadError::ProtocolFailure(format!(
                "upload response is not an object: {}",
                value
            )));
        }

        serde_json::from_value(value).map_err(|e| {
            UploadError::ProtocolFailure(format!("unexpected upload response: {}", e))
        })
    }

    /// Both `put_url` and `shortid` are required to continue
    pub fn into_staged(self) -> Result<StagedUpload, UploadError> {
        let put_url = self.put_url.filter(|s| !s.is_empty());
        let shortid = self.shortid.filter(|s| !s.is_empty());

        let missing = |fields: &str| {
            UploadError::ProtocolFailure(format!("upload response is missing {}", fields))
        };

        match (put_url, shortid) {
            (Some(put_url), Some(shortid)) => Ok(StagedUpload::new(shortid, put_url)),
            (None, None) => Err(missing("put_url and shortid")),
            (None, Some(_)) => Err(missing("put_url")),
            (Some(_), None) => Err(missing("shortid")),
        }
    }
}
