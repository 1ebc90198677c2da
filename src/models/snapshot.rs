//! Tournament snapshot: the root document consumed by one render cycle.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::warn;

use super::{CompletedGroup, CurrentGroup, Region};

/// Complete data for one render cycle. Never mutated after load.
///
/// Each section is independent; an absent section makes its renderer a
/// no-op.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Snapshot {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub regions: Option<Vec<Region>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub completed_groups: Option<Vec<CompletedGroup>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub current_group: Option<CurrentGroup>,
}

impl Snapshot {
    /// Parse a response body.
    ///
    /// Only a body that is not JSON at all is an error. Sections are decoded
    /// one by one and a section with the wrong shape is dropped with a
    /// warning, leaving the others intact. Within the list sections each
    /// record is decoded on its own, so one bad record is skipped instead of
    /// the whole list.
    pub fn from_json_str(body: &str) -> Result<Self, serde_json::Error> {
        let value: Value = serde_json::from_str(body)?;
        Ok(Self::from_value(value))
    }

    /// Build a snapshot from an already-parsed JSON value.
    pub fn from_value(value: Value) -> Self {
        let Value::Object(mut root) = value else {
            warn!("Snapshot root is not an object; all sections absent");
            return Self::default();
        };

        Self {
            regions: take_records(&mut root, "regions"),
            completed_groups: take_records(&mut root, "completedGroups"),
            current_group: take_section(&mut root, "currentGroup"),
        }
    }

    /// True when no section is present.
    pub fn is_empty(&self) -> bool {
        self.regions.is_none() && self.completed_groups.is_none() && self.current_group.is_none()
    }
}

fn take_section<T: DeserializeOwned>(root: &mut Map<String, Value>, key: &str) -> Option<T> {
    match root.remove(key) {
        None | Some(Value::Null) => None,
        Some(value) => match serde_json::from_value(value) {
            Ok(section) => Some(section),
            Err(e) => {
                warn!("Ignoring malformed `{}` section: {}", key, e);
                None
            }
        },
    }
}

fn take_records<T: DeserializeOwned>(
    root: &mut Map<String, Value>,
    key: &str,
) -> Option<Vec<T>> {
    let records: Vec<Value> = take_section(root, key)?;
    let total = records.len();

    let decoded: Vec<T> = records
        .into_iter()
        .enumerate()
        .filter_map(|(i, record)| match serde_json::from_value(record) {
            Ok(r) => Some(r),
            Err(e) => {
                warn!("Skipping malformed `{}` record {}: {}", key, i, e);
                None
            }
        })
        .collect();

    if decoded.len() < total {
        warn!(
            "Kept {}/{} `{}` records",
            decoded.len(),
            total,
            key
        );
    }
    Some(decoded)
}

#[cfg(test)]
mod tests {
    use super::*;

    const FULL: &str = r#"{
        "regions": [
            {"name": "North", "battleScore": 12, "totalBattles": 3, "wins": 2, "secondPlaces": 0, "thirdPlaces": 1},
            {"name": "South", "battleScore": 8, "totalBattles": 3, "wins": 0, "secondPlaces": 2, "thirdPlaces": 0}
        ],
        "completedGroups": [
            {"name": "Group A", "first": "North", "second": "South", "third": "East", "date": "2024-03-05"}
        ],
        "currentGroup": {
            "name": "Group B", "status": "active", "regions": ["North", "West"], "startDate": "2024-03-12"
        }
    }"#;

    #[test]
    fn test_full_snapshot() {
        let snapshot = Snapshot::from_json_str(FULL).unwrap();

        assert_eq!(snapshot.regions.as_ref().unwrap().len(), 2);
        assert_eq!(snapshot.completed_groups.as_ref().unwrap()[0].first, "North");
        assert_eq!(snapshot.current_group.as_ref().unwrap().name, "Group B");
        assert!(!snapshot.is_empty());
    }

    #[test]
    fn test_missing_sections_are_absent() {
        let snapshot = Snapshot::from_json_str(r#"{"regions": []}"#).unwrap();

        assert_eq!(snapshot.regions, Some(vec![]));
        assert!(snapshot.completed_groups.is_none());
        assert!(snapshot.current_group.is_none());
    }

    #[test]
    fn test_null_section_is_absent() {
        let snapshot = Snapshot::from_json_str(r#"{"currentGroup": null}"#).unwrap();
        assert!(snapshot.is_empty());
    }

    #[test]
    fn test_malformed_section_does_not_blank_others() {
        let body = r#"{
            "regions": "not a list",
            "completedGroups": [
                {"name": "Group A", "first": "N", "second": "S", "third": "E", "date": "2024-01-01"}
            ]
        }"#;

        let snapshot = Snapshot::from_json_str(body).unwrap();
        assert!(snapshot.regions.is_none());
        assert_eq!(snapshot.completed_groups.unwrap().len(), 1);
    }

    #[test]
    fn test_bad_records_are_skipped_individually() {
        let body = r#"{
            "regions": [
                {"name": "A", "battleScore": 10},
                {"battleScore": 20},
                {"name": "C", "battleScore": 5}
            ],
            "completedGroups": [
                {"name": "Group 1", "first": "A", "second": "C", "third": "B", "date": "2024-01-01"},
                {"name": "Group 2", "first": "C", "second": "A", "third": "B"}
            ]
        }"#;

        let snapshot = Snapshot::from_json_str(body).unwrap();

        let names: Vec<String> = snapshot
            .regions
            .unwrap()
            .into_iter()
            .map(|r| r.name)
            .collect();
        assert_eq!(names, vec!["A", "C"]);

        let groups = snapshot.completed_groups.unwrap();
        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0].name, "Group 1");
    }

    #[test]
    fn test_all_records_bad_leaves_empty_list() {
        let snapshot = Snapshot::from_json_str(r#"{"regions": [1, "two", null]}"#).unwrap();
        assert_eq!(snapshot.regions, Some(vec![]));
    }

    #[test]
    fn test_non_object_root() {
        let snapshot = Snapshot::from_json_str("[1, 2, 3]").unwrap();
        assert!(snapshot.is_empty());
    }

    #[test]
    fn test_invalid_json_is_error() {
        assert!(Snapshot::from_json_str("<html>oops</html>").is_err());
        assert!(Snapshot::from_json_str("").is_err());
    }

    #[test]
    fn test_serialization_uses_wire_names() {
        let snapshot = Snapshot::from_json_str(FULL).unwrap();
        let json = serde_json::to_string(&snapshot).unwrap();

        assert!(json.contains("\"completedGroups\""));
        assert!(json.contains("\"battleScore\""));
        assert!(json.contains("\"startDate\""));

        let reparsed = Snapshot::from_json_str(&json).unwrap();
        assert_eq!(reparsed, snapshot);
    }
}
