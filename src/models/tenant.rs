//! Tenant property payloads

use serde::{Deserialize, Serialize};

/// A tenant-wide storage entity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct TenantProperty {
    #[serde(default)]
    pub comment: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    pub value: String,
}

impl TenantProperty {
    pub fn new(value: impl Into<String>) -> Self {
        Self {
            comment: None,
            description: None,
            value: value.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_tenant_property_wire_names() {
        let property: TenantProperty = serde_json::from_value(json!({
            "Comment": null,
            "Description": "Help desk URL",
            "Value": "https://help.example.com"
        }))
        .unwrap();

        assert_eq!(property.description.as_deref(), Some("Help desk URL"));
        assert_eq!(property.value, "https://help.example.com");
        assert!(property.comment.is_none());
    }

    #[test]
    fn test_tenant_property_requires_value() {
        let result: Result<TenantProperty, _> = serde_json::from_value(json!({"Comment": "x"}));
        assert!(result.is_err());
    }
}
