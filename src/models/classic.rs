use serde::Deserialize;
use serde_json::{Map, Value};

use crate::models::ApiModel;

/// Entry of the category listing.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct ClassicCategoriesItem {
    pub id: Option<i64>,
    pub name: Option<String>,
}

impl ApiModel for ClassicCategoriesItem {}

#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct ClassicCategory {
    pub id: Option<i64>,
    pub name: Option<String>,
    pub priority: Option<i64>,
}

impl ApiModel for ClassicCategory {
    const ROOT_KEY: Option<&'static str> = Some("category");
}

/// Entry of the computer listing; `basic` subset fields are only present when requested.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct ClassicComputersItem {
    pub id: i64,
    pub name: String,
    pub managed: Option<bool>,
    pub serial_number: Option<String>,
    pub udid: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl ApiModel for ClassicComputersItem {}

#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct ClassicComputer {
    pub general: Option<ClassicComputerGeneral>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct ClassicComputerGeneral {
    pub id: Option<i64>,
    pub name: Option<String>,
    pub serial_number: Option<String>,
    pub udid: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl ApiModel for ClassicComputer {
    const ROOT_KEY: Option<&'static str> = Some("computer");
}

/// Computer group. The listing only fills `id`, `name` and `is_smart`.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct ClassicComputerGroup {
    pub id: Option<i64>,
    pub name: Option<String>,
    pub is_smart: Option<bool>,
    #[serde(default)]
    pub computers: Vec<ClassicComputerGroupMember>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl ApiModel for ClassicComputerGroup {
    const ROOT_KEY: Option<&'static str> = Some("computer_group");
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct ClassicComputerGroupMember {
    pub id: Option<i64>,
    pub name: Option<String>,
    pub serial_number: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct ClassicAdvancedComputerSearchesItem {
    pub id: Option<i64>,
    pub name: Option<String>,
}

impl ApiModel for ClassicAdvancedComputerSearchesItem {}

/// Advanced search with its results; `computers` is recalculated on every read.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct ClassicAdvancedComputerSearch {
    pub id: Option<i64>,
    pub name: Option<String>,
    #[serde(default)]
    pub computers: Vec<Map<String, Value>>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl ApiModel for ClassicAdvancedComputerSearch {
    const ROOT_KEY: Option<&'static str> = Some("advanced_computer_search");
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct ClassicPackageItem {
    pub id: Option<i64>,
    pub name: Option<String>,
}

impl ApiModel for ClassicPackageItem {}

#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct ClassicPackage {
    pub id: Option<i64>,
    pub name: Option<String>,
    pub filename: Option<String>,
    pub category: Option<String>,
    pub priority: Option<i64>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl ApiModel for ClassicPackage {
    const ROOT_KEY: Option<&'static str> = Some("package");
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn root_key_is_unwrapped() {
        let category = ClassicCategory::parse(json!({"category": {"id": 4, "name": "Apps", "priority": 9}})).unwrap();
        assert_eq!(category.id, Some(4));
        assert_eq!(category.priority, Some(9));
    }

    #[test]
    fn missing_root_key_fails() {
        assert!(ClassicCategory::parse(json!({"id": 4})).is_err());
    }

    #[test]
    fn group_members_are_parsed() {
        let group = ClassicComputerGroup::parse(json!({
            "computer_group": {
                "id": 3, "name": "Lab", "is_smart": false,
                "computers": [{"id": 1, "name": "mac-1", "serial_number": "C02A"}],
                "criteria": []
            }
        }))
        .unwrap();
        assert_eq!(group.is_smart, Some(false));
        assert_eq!(group.computers[0].serial_number.as_deref(), Some("C02A"));
        assert!(group.extra.contains_key("criteria"));
    }

    #[test]
    fn unknown_fields_land_in_extra() {
        let computer = ClassicComputer::parse(json!({
            "computer": {"general": {"id": 1, "name": "mac", "mac_address": "aa"}, "hardware": {"model": "x"}}
        }))
        .unwrap();
        let general = computer.general.unwrap();
        assert_eq!(general.name.as_deref(), Some("mac"));
        assert_eq!(general.extra["mac_address"], "aa");
        assert!(computer.extra.contains_key("hardware"));
    }
}
