//! User profile payloads

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// The current user's profile as returned by the profile provider.
///
/// Only the property collection is modelled; every other field is kept
/// verbatim in `extra` so cached profiles round-trip unchanged.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct UserProfile {
    /// Key/value property collection
    #[serde(
        rename = "UserProfileProperties",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub user_profile_properties: Option<Vec<ProfileProperty>>,

    /// Remaining top-level fields (AccountName, DisplayName, ...)
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl UserProfile {
    /// Creates a profile holding only the given properties.
    pub fn with_properties<I, K, V>(properties: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            user_profile_properties: Some(
                properties
                    .into_iter()
                    .map(|(key, value)| ProfileProperty::new(key, value))
                    .collect(),
            ),
            extra: Map::new(),
        }
    }

    /// Finds a property by key, ignoring case.
    ///
    /// Returns `None` for the outer option when the profile has no property
    /// collection at all.
    pub fn property(&self, key: &str) -> Option<Option<&ProfileProperty>> {
        let wanted = key.to_lowercase();
        self.user_profile_properties.as_ref().map(|properties| {
            properties
                .iter()
                .find(|property| property.key.to_lowercase() == wanted)
        })
    }
}

/// One entry of `UserProfileProperties`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProfileProperty {
    #[serde(rename = "Key")]
    pub key: String,
    #[serde(rename = "Value", default)]
    pub value: String,
    #[serde(rename = "ValueType", default, skip_serializing_if = "Option::is_none")]
    pub value_type: Option<String>,
}

impl ProfileProperty {
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
            value_type: Some("Edm.String".to_string()),
        }
    }
}

/// Identity of the signed-in user, used for profile writes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CurrentUser {
    #[serde(rename = "LoginName")]
    pub login_name: String,
    #[serde(rename = "Title", default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(rename = "Email", default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_profile_parses_provider_payload() {
        let payload = json!({
            "AccountName": "i:0#.f|membership|a@b.com",
            "DisplayName": "A B",
            "UserProfileProperties": [
                {"Key": "WorkEmail", "Value": "a@b.com", "ValueType": "Edm.String"},
                {"Key": "Department", "Value": "Ops", "ValueType": "Edm.String"}
            ]
        });

        let profile: UserProfile = serde_json::from_value(payload.clone()).unwrap();
        assert_eq!(profile.extra["DisplayName"], "A B");
        assert_eq!(profile.user_profile_properties.as_ref().unwrap().len(), 2);

        // Unknown fields survive a round trip
        assert_eq!(serde_json::to_value(&profile).unwrap(), payload);
    }

    #[test]
    fn test_property_lookup_ignores_case() {
        let profile = UserProfile::with_properties([("WorkEmail", "a@b.com")]);

        let found = profile.property("workemail").flatten().unwrap();
        assert_eq!(found.value, "a@b.com");
        assert!(profile.property("Missing").unwrap().is_none());
    }

    #[test]
    fn test_property_lookup_without_collection() {
        let profile: UserProfile = serde_json::from_value(json!({"DisplayName": "A"})).unwrap();
        assert!(profile.property("WorkEmail").is_none());
    }

    #[test]
    fn test_property_missing_value_defaults() {
        let property: Result<ProfileProperty, _> =
            serde_json::from_value(json!({"Key": "Empty"}));
        assert_eq!(property.unwrap().value, "");
    }
}
