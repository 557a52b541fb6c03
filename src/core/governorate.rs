//! Governorates (electoral regions).

use serde::{Deserialize, Serialize};

/// An electoral region.
///
/// The backend names regions in English, Arabic or both; at least one name is
/// required by the schema.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Governorate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    #[serde(
        rename = "nameArabic",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub name_arabic: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub candidates_count: Option<u64>,
}

impl Governorate {
    /// Best available name, preferring English.
    pub fn display_name(&self) -> &str {
        self.name
            .as_deref()
            .or(self.name_arabic.as_deref())
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_display_name_prefers_english() {
        let gov: Governorate =
            serde_json::from_value(json!({ "name": "Basra", "nameArabic": "البصرة" })).unwrap();
        assert_eq!(gov.display_name(), "Basra");

        let gov: Governorate = serde_json::from_value(json!({ "nameArabic": "البصرة" })).unwrap();
        assert_eq!(gov.display_name(), "البصرة");
    }

    #[test]
    fn test_absent_fields_are_not_serialized() {
        let gov: Governorate = serde_json::from_value(json!({ "name": "Erbil" })).unwrap();
        assert_eq!(serde_json::to_value(&gov).unwrap(), json!({ "name": "Erbil" }));
    }
}
