use std::sync::OnceLock;

use serde_json::{Map, Value};

use crate::error::{CoreError, Result};

const BUILTIN_DATASET: &str = include_str!("../data/region_timezones.json");

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegionTimezoneIndex {
    entries: Vec<RegionEntry>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct RegionEntry {
    region: String,
    timezones: Vec<String>,
}

impl RegionTimezoneIndex {
    pub fn builtin() -> &'static RegionTimezoneIndex {
        static BUILTIN: OnceLock<RegionTimezoneIndex> = OnceLock::new();
        BUILTIN.get_or_init(|| {
            Self::from_json(BUILTIN_DATASET).expect("embedded region timezone dataset is valid")
        })
    }

    pub fn from_json(raw: &str) -> Result<Self> {
        let map: Map<String, Value> =
            serde_json::from_str(raw).map_err(|err| CoreError::InvalidDataset(err.to_string()))?;

        let mut entries = Vec::with_capacity(map.len());
        for (region, value) in map {
            if !is_region_code(&region) {
                return Err(CoreError::InvalidDataset(format!(
                    "invalid region code: {}",
                    region
                )));
            }
            let timezones: Vec<String> = serde_json::from_value(value).map_err(|err| {
                CoreError::InvalidDataset(format!("region {}: {}", region, err))
            })?;
            entries.push(RegionEntry { region, timezones });
        }

        Ok(Self { entries })
    }

    /// Resolves a timezone to the region that lists it.
    ///
    /// A missing or blank timezone means "no region constraint" and yields
    /// `Ok(None)`. Matching is exact and case-sensitive.
    pub fn region_for(&self, timezone: Option<&str>) -> Result<Option<&str>> {
        let timezone = match timezone {
            Some(value) if !value.trim().is_empty() => value,
            _ => return Ok(None),
        };

        self.entries
            .iter()
            .find(|entry| entry.timezones.iter().any(|tz| tz == timezone))
            .map(|entry| Some(entry.region.as_str()))
            .ok_or_else(|| CoreError::InvalidTimezone {
                parameter: "timezone",
                timezone: timezone.to_string(),
            })
    }

    pub fn timezones_for(&self, region: &str) -> Option<&[String]> {
        self.entries
            .iter()
            .find(|entry| entry.region == region)
            .map(|entry| entry.timezones.as_slice())
    }

    pub fn contains_timezone(&self, timezone: &str) -> bool {
        self.entries
            .iter()
            .any(|entry| entry.timezones.iter().any(|tz| tz == timezone))
    }

    pub fn all_timezones(&self) -> Vec<&str> {
        self.entries
            .iter()
            .flat_map(|entry| entry.timezones.iter().map(String::as_str))
            .collect()
    }
}

pub fn is_region_code(value: &str) -> bool {
    value.len() == 2 && value.bytes().all(|b| b.is_ascii_uppercase())
}

#[cfg(test)]
mod tests {
    use super::{is_region_code, RegionTimezoneIndex};
    use crate::error::CoreError;

    #[test]
    fn region_for_resolves_single_timezone_regions() {
        let index = RegionTimezoneIndex::builtin();
        assert_eq!(index.region_for(Some("Asia/Riyadh")).unwrap(), Some("SA"));
        assert_eq!(index.region_for(Some("Asia/Dubai")).unwrap(), Some("AE"));
    }

    #[test]
    fn region_for_resolves_secondary_timezones() {
        let index = RegionTimezoneIndex::builtin();
        assert_eq!(
            index.region_for(Some("America/Indiana/Knox")).unwrap(),
            Some("US")
        );
        assert_eq!(
            index.region_for(Some("Antarctica/Macquarie")).unwrap(),
            Some("AU")
        );
    }

    #[test]
    fn region_for_treats_blank_as_unconstrained() {
        let index = RegionTimezoneIndex::builtin();
        assert_eq!(index.region_for(None).unwrap(), None);
        assert_eq!(index.region_for(Some("")).unwrap(), None);
        assert_eq!(index.region_for(Some("   ")).unwrap(), None);
    }

    #[test]
    fn region_for_rejects_unknown_timezone() {
        let index = RegionTimezoneIndex::builtin();
        let err = index.region_for(Some("invalidTZ")).unwrap_err();
        assert_eq!(
            err,
            CoreError::InvalidTimezone {
                parameter: "timezone",
                timezone: "invalidTZ".to_string(),
            }
        );
        assert!(err.to_string().contains("parameter: timezone"));
    }

    #[test]
    fn region_for_is_case_sensitive() {
        let index = RegionTimezoneIndex::builtin();
        assert!(index.region_for(Some("asia/riyadh")).is_err());
    }

    #[test]
    fn from_json_keeps_dataset_order() {
        let index = RegionTimezoneIndex::from_json(
            r#"{"ZZ": ["Etc/Two", "Etc/One"], "AA": ["Etc/Three"]}"#,
        )
        .unwrap();
        assert_eq!(index.region_for(Some("Etc/One")).unwrap(), Some("ZZ"));
        assert_eq!(index.timezones_for("AA").unwrap(), ["Etc/Three"]);
        assert_eq!(
            index.all_timezones(),
            vec!["Etc/Two", "Etc/One", "Etc/Three"]
        );
    }

    #[test]
    fn from_json_first_region_wins_for_shared_timezone() {
        let index =
            RegionTimezoneIndex::from_json(r#"{"BB": ["Etc/Shared"], "AA": ["Etc/Shared"]}"#)
                .unwrap();
        assert_eq!(index.region_for(Some("Etc/Shared")).unwrap(), Some("BB"));
    }

    #[test]
    fn from_json_rejects_bad_region_codes() {
        let err = RegionTimezoneIndex::from_json(r#"{"usa": ["America/New_York"]}"#).unwrap_err();
        assert!(matches!(err, CoreError::InvalidDataset(_)));
    }

    #[test]
    fn from_json_rejects_non_string_timezones() {
        let err = RegionTimezoneIndex::from_json(r#"{"US": [1, 2]}"#).unwrap_err();
        assert!(matches!(err, CoreError::InvalidDataset(_)));
    }

    #[test]
    fn timezones_for_returns_region_list() {
        let index = RegionTimezoneIndex::builtin();
        assert_eq!(
            index.timezones_for("CL").unwrap(),
            ["America/Punta_Arenas", "America/Santiago", "Pacific/Easter"]
        );
        assert!(index.timezones_for("XX").is_none());
    }

    #[test]
    fn region_code_shape() {
        assert!(is_region_code("SA"));
        assert!(!is_region_code("sa"));
        assert!(!is_region_code("SAU"));
        assert!(!is_region_code(""));
    }
}
