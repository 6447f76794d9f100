use serde::{Deserialize, Serialize};
use crate::models::domain::Profile;

/// Envelope of the feed-fetch endpoint
///
/// Older deployments return the list under `data`, newer ones under `feed`.
/// Both are accepted, `feed` wins when both are present.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeedResponse {
    #[serde(default)]
    pub feed: Option<Vec<Profile>>,
    #[serde(default)]
    pub data: Option<Vec<Profile>>,
}

impl FeedResponse {
    /// Unwrap whichever envelope field is populated
    pub fn into_profiles(self) -> Vec<Profile> {
        self.feed.or(self.data).unwrap_or_default()
    }
}

/// Body returned by the decision endpoint, only inspected for logging
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActionResponse {
    #[serde(default)]
    pub message: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_feed_envelope_prefers_feed_field() {
        let json = r#"{"feed": [{"_id": "a"}], "data": [{"_id": "b"}, {"_id": "c"}]}"#;
        let response: FeedResponse = serde_json::from_str(json).unwrap();
        let profiles = response.into_profiles();
        assert_eq!(profiles.len(), 1);
        assert_eq!(profiles[0].id, "a");
    }

    #[test]
    fn test_feed_envelope_data_fallback() {
        let json = r#"{"data": [{"_id": "b"}]}"#;
        let response: FeedResponse = serde_json::from_str(json).unwrap();
        assert_eq!(response.into_profiles().len(), 1);
    }

    #[test]
    fn test_feed_envelope_empty() {
        let response: FeedResponse = serde_json::from_str("{}").unwrap();
        assert!(response.into_profiles().is_empty());
    }
}
