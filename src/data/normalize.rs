use serde_json::Value as JsonValue;

use super::model::{BranchStat, Dataset, Institution, YearStats};

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Normalize the raw source mapping (institution key → record) into a
/// [`Dataset`].
///
/// Total and pure: malformed records are dropped or their fields treated as
/// unreported, never an error and never a default of 0. Source key order is
/// preserved (serde_json is built with `preserve_order`).
pub fn normalize(raw: &JsonValue) -> Dataset {
    let Some(map) = raw.as_object() else {
        log::warn!("dataset root is not an object; producing empty dataset");
        return Dataset::default();
    };

    let mut institutions = Vec::with_capacity(map.len());
    for (key, record) in map {
        match normalize_institution(key, record) {
            Some(inst) => institutions.push(inst),
            None => log::warn!("institution {key:?} is not an object; dropped"),
        }
    }
    Dataset::from_institutions(institutions)
}

// ---------------------------------------------------------------------------
// Per-record normalization
// ---------------------------------------------------------------------------

fn normalize_institution(key: &str, record: &JsonValue) -> Option<Institution> {
    let obj = record.as_object()?;

    let name = obj
        .get("name")
        .and_then(JsonValue::as_str)
        .filter(|s| !s.is_empty())
        .unwrap_or(key)
        .to_string();

    Some(Institution {
        key: key.to_string(),
        name,
        photo: obj
            .get("photo")
            .and_then(JsonValue::as_str)
            .map(str::to_string),
        nirf_rank: obj.get("nirfRank").and_then(JsonValue::as_u64),
        qs_world_ranking: obj.get("qsWorldRanking").and_then(JsonValue::as_u64),
        // Current-year arrays sit directly on the record.
        current: YearStats {
            ug: branch_array(obj.get("UG"), key, "UG"),
            pg: branch_array(obj.get("PG"), key, "PG"),
        },
        one_year_back: year_back(obj.get("oneYearbackStats"), key, "oneYearbackStats"),
        two_year_back: year_back(obj.get("twoYearbackStats"), key, "twoYearbackStats"),
    })
}

/// An entirely absent year-back section stays absent ("no historical data"),
/// distinct from a present section with empty arrays.
fn year_back(section: Option<&JsonValue>, key: &str, label: &str) -> Option<YearStats> {
    let section = section?;
    let Some(obj) = section.as_object() else {
        log::debug!("{key}: {label} is not an object; treated as absent");
        return None;
    };
    Some(YearStats {
        ug: branch_array(obj.get("UG"), key, label),
        pg: branch_array(obj.get("PG"), key, label),
    })
}

/// Filter a raw branch array down to entries with a non-empty string
/// `branch`. Anything else (wrong type, missing field, non-array input) is
/// dropped, so the output is never longer than the input.
fn branch_array(raw: Option<&JsonValue>, key: &str, context: &str) -> Vec<BranchStat> {
    let Some(entries) = raw.and_then(JsonValue::as_array) else {
        return Vec::new();
    };

    let mut out = Vec::with_capacity(entries.len());
    for entry in entries {
        match branch_stat(entry) {
            Some(stat) => out.push(stat),
            None => log::debug!("{key}/{context}: entry without string branch dropped"),
        }
    }
    out
}

fn branch_stat(entry: &JsonValue) -> Option<BranchStat> {
    let obj = entry.as_object()?;
    let branch = obj
        .get("branch")
        .and_then(JsonValue::as_str)
        .filter(|s| !s.is_empty())?
        .to_string();

    let placement_percentage = number(obj.get("placementPercentage"));
    if let Some(pct) = placement_percentage {
        if !(0.0..=100.0).contains(&pct) {
            log::warn!("branch {branch:?}: placementPercentage {pct} outside [0,100]");
        }
    }

    Some(BranchStat {
        branch,
        highest_package: number(obj.get("highestPackage")),
        lowest_package: number(obj.get("lowestPackage")),
        median_package: number(obj.get("medianPackage")),
        average_package: number(obj.get("averagePackage")),
        placement_percentage,
        registered_students: count(obj.get("registeredStudent")),
        placed_students: count(obj.get("placedStudent")),
    })
}

// -- Field coercion: keep if it is a number of the declared shape, else
//    unreported. Never 0, never an error. --

fn number(value: Option<&JsonValue>) -> Option<f64> {
    value.and_then(JsonValue::as_f64)
}

fn count(value: Option<&JsonValue>) -> Option<u64> {
    value.and_then(JsonValue::as_u64)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::{Degree, YearOffset};
    use serde_json::json;

    #[test]
    fn drops_entries_without_string_branch() {
        let raw = json!({
            "iitb": {
                "name": "IIT Bombay",
                "UG": [
                    { "branch": "CSE", "medianPackage": 30 },
                    { "branch": 42, "medianPackage": 10 },
                    { "medianPackage": 5 },
                    { "branch": "", "medianPackage": 5 },
                    "not even an object"
                ],
                "PG": []
            }
        });
        let ds = normalize(&raw);
        let ug = ds.get("iitb").unwrap().stats_for(YearOffset::Current, Degree::Ug);
        assert_eq!(ug.len(), 1);
        assert_eq!(ug[0].branch, "CSE");
    }

    #[test]
    fn non_numeric_fields_become_absent_not_zero() {
        let raw = json!({
            "x": {
                "name": "X",
                "UG": [{
                    "branch": "ECE",
                    "highestPackage": "unknown",
                    "medianPackage": null,
                    "averagePackage": 12.5,
                    "registeredStudent": 90.5,
                    "placedStudent": 80
                }],
                "PG": []
            }
        });
        let ds = normalize(&raw);
        let stat = &ds.get("x").unwrap().current.ug[0];
        assert_eq!(stat.highest_package, None);
        assert_eq!(stat.median_package, None);
        assert_eq!(stat.average_package, Some(12.5));
        // Fractional count is not a valid integer, treated as unreported.
        assert_eq!(stat.registered_students, None);
        assert_eq!(stat.placed_students, Some(80));
    }

    #[test]
    fn absent_year_back_stays_absent() {
        let raw = json!({
            "a": { "name": "A", "UG": [], "PG": [] },
            "b": {
                "name": "B",
                "UG": [], "PG": [],
                "oneYearbackStats": { "UG": [], "PG": [] }
            }
        });
        let ds = normalize(&raw);
        assert!(ds.get("a").unwrap().one_year_back.is_none());
        // Present-but-empty is a YearStats with empty arrays, not None.
        let b = ds.get("b").unwrap();
        assert!(b.one_year_back.is_some());
        assert!(b.one_year_back.as_ref().unwrap().ug.is_empty());
        assert!(b.two_year_back.is_none());
    }

    #[test]
    fn name_defaults_to_key() {
        let raw = json!({ "nit_trichy": { "UG": [], "PG": [] } });
        let ds = normalize(&raw);
        assert_eq!(ds.get("nit_trichy").unwrap().name, "nit_trichy");
    }

    #[test]
    fn malformed_root_and_records_yield_no_rows() {
        assert!(normalize(&json!([1, 2, 3])).is_empty());
        assert!(normalize(&json!("nope")).is_empty());
        let ds = normalize(&json!({ "a": 17, "b": { "name": "B" } }));
        assert_eq!(ds.len(), 1);
        assert!(ds.get("b").is_some());
    }

    #[test]
    fn renormalizing_clean_output_is_identity() {
        let raw = json!({
            "iitb": {
                "name": "IIT Bombay",
                "nirfRank": 3,
                "UG": [
                    { "branch": "CSE", "medianPackage": 30, "placementPercentage": 95 },
                    { "branch": "bogus" , "highestPackage": "n/a" }
                ],
                "PG": [{ "branch": "M.Tech CSE" }],
                "twoYearbackStats": {
                    "UG": [{ "branch": "CSE", "medianPackage": 24 }],
                    "PG": []
                }
            }
        });
        let once = normalize(&raw);
        let twice = normalize(&once.to_raw());
        assert_eq!(once, twice);
    }
}
