use serde::Serialize;

use super::model::{BranchStat, Dataset, Degree, SortDirection, SortKey, YearOffset};

// ---------------------------------------------------------------------------
// Query parameters and result rows
// ---------------------------------------------------------------------------

/// One listing selection: which slice of the dataset to show and how to
/// order it. Unset optionals mean "no filter" / "dataset order".
#[derive(Debug, Clone, PartialEq)]
pub struct QueryParams {
    pub degree: Degree,
    pub year_offset: YearOffset,
    /// Case-insensitive substring match on the institution name, applied at
    /// the institution level: an institution contributes all of its branch
    /// rows or none.
    pub name_filter: Option<String>,
    pub sort_key: Option<SortKey>,
    pub sort_direction: SortDirection,
}

impl QueryParams {
    pub fn new(degree: Degree, year_offset: YearOffset) -> Self {
        QueryParams {
            degree,
            year_offset,
            name_filter: None,
            sort_key: None,
            sort_direction: SortDirection::default(),
        }
    }
}

/// A branch row carrying its institution's display name.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QueryRow {
    #[serde(rename = "institutionName")]
    pub institution_name: String,
    #[serde(flatten)]
    pub stat: BranchStat,
}

// ---------------------------------------------------------------------------
// Query execution
// ---------------------------------------------------------------------------

/// Produce the ordered row set for one selection. Never errors: institutions
/// without data for the offset contribute nothing, and an empty result is
/// the caller's "no data available" state.
pub fn query(dataset: &Dataset, params: &QueryParams) -> Vec<QueryRow> {
    let needle = params
        .name_filter
        .as_deref()
        .map(str::to_lowercase)
        .filter(|s| !s.is_empty());

    let mut rows: Vec<QueryRow> = Vec::new();
    for inst in dataset {
        if let Some(needle) = &needle {
            if !inst.name.to_lowercase().contains(needle) {
                continue;
            }
        }
        for stat in inst.stats_for(params.year_offset, params.degree) {
            rows.push(QueryRow {
                institution_name: inst.name.clone(),
                stat: stat.clone(),
            });
        }
    }

    if let Some(key) = params.sort_key {
        sort_rows(&mut rows, key, params.sort_direction);
    }
    rows
}

/// Stable sort with unreported values ordered as −∞: they lead an ascending
/// listing and trail a descending one. Ties keep their emission order.
fn sort_rows(rows: &mut [QueryRow], key: SortKey, direction: SortDirection) {
    rows.sort_by(|a, b| {
        let va = a.stat.metric(key).unwrap_or(f64::NEG_INFINITY);
        let vb = b.stat.metric(key).unwrap_or(f64::NEG_INFINITY);
        match direction {
            SortDirection::Ascending => va.total_cmp(&vb),
            SortDirection::Descending => vb.total_cmp(&va),
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::normalize::normalize;
    use serde_json::json;

    fn sample() -> Dataset {
        normalize(&json!({
            "iitb": {
                "name": "IIT Bombay",
                "UG": [
                    { "branch": "CSE", "medianPackage": 30, "placementPercentage": 95 },
                    { "branch": "ECE", "medianPackage": 22 }
                ],
                "PG": [],
                "oneYearbackStats": {
                    "UG": [{ "branch": "CSE", "medianPackage": 27 }],
                    "PG": []
                }
            },
            "nitt": {
                "name": "NIT Trichy",
                "UG": [
                    { "branch": "CSE", "medianPackage": 18 },
                    { "branch": "Mechanical" }
                ],
                "PG": []
            }
        }))
    }

    #[test]
    fn unsorted_query_preserves_dataset_then_branch_order() {
        let rows = query(&sample(), &QueryParams::new(Degree::Ug, YearOffset::Current));
        let got: Vec<(&str, &str)> = rows
            .iter()
            .map(|r| (r.institution_name.as_str(), r.stat.branch.as_str()))
            .collect();
        assert_eq!(
            got,
            vec![
                ("IIT Bombay", "CSE"),
                ("IIT Bombay", "ECE"),
                ("NIT Trichy", "CSE"),
                ("NIT Trichy", "Mechanical"),
            ]
        );
    }

    #[test]
    fn single_row_scenario_carries_all_fields() {
        let ds = normalize(&json!({
            "iitb": {
                "name": "IIT Bombay",
                "UG": [{ "branch": "CSE", "medianPackage": 30, "placementPercentage": 95 }],
                "PG": []
            }
        }));
        let rows = query(&ds, &QueryParams::new(Degree::Ug, YearOffset::Current));
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].institution_name, "IIT Bombay");
        assert_eq!(rows[0].stat.branch, "CSE");
        assert_eq!(rows[0].stat.median_package, Some(30.0));
        assert_eq!(rows[0].stat.placement_percentage, Some(95.0));

        // Same dataset, PG: valid empty result, not an error.
        assert!(query(&ds, &QueryParams::new(Degree::Pg, YearOffset::Current)).is_empty());
        // Absent year-back section: absence, not error.
        assert!(query(&ds, &QueryParams::new(Degree::Ug, YearOffset::OneBack)).is_empty());
    }

    #[test]
    fn name_filter_is_institution_level_and_case_insensitive() {
        let mut params = QueryParams::new(Degree::Ug, YearOffset::Current);
        params.name_filter = Some("trichy".to_string());
        let rows = query(&sample(), &params);
        // Both NIT Trichy rows survive, including the one without packages.
        assert_eq!(rows.len(), 2);
        assert!(rows.iter().all(|r| r.institution_name == "NIT Trichy"));

        params.name_filter = Some("zzz".to_string());
        assert!(query(&sample(), &params).is_empty());

        // Empty filter string means no filtering.
        params.name_filter = Some(String::new());
        assert_eq!(query(&sample(), &params).len(), 4);
    }

    #[test]
    fn sort_descending_puts_absent_last() {
        let mut params = QueryParams::new(Degree::Ug, YearOffset::Current);
        params.sort_key = Some(SortKey::MedianPackage);
        params.sort_direction = SortDirection::Descending;
        let rows = query(&sample(), &params);
        let branches: Vec<&str> = rows.iter().map(|r| r.stat.branch.as_str()).collect();
        assert_eq!(branches, vec!["CSE", "ECE", "CSE", "Mechanical"]);
        assert_eq!(rows[0].stat.median_package, Some(30.0));
        assert_eq!(rows[3].stat.median_package, None);
    }

    #[test]
    fn sort_ascending_puts_absent_first() {
        let mut params = QueryParams::new(Degree::Ug, YearOffset::Current);
        params.sort_key = Some(SortKey::MedianPackage);
        let rows = query(&sample(), &params);
        assert_eq!(rows[0].stat.branch, "Mechanical");
        assert_eq!(rows[0].stat.median_package, None);
        assert_eq!(rows[3].stat.median_package, Some(30.0));
    }

    #[test]
    fn equal_keys_keep_emission_order() {
        let ds = normalize(&json!({
            "a": { "name": "A", "UG": [
                { "branch": "one", "medianPackage": 10 },
                { "branch": "two", "medianPackage": 10 }
            ], "PG": [] },
            "b": { "name": "B", "UG": [
                { "branch": "three", "medianPackage": 10 }
            ], "PG": [] }
        }));
        let mut params = QueryParams::new(Degree::Ug, YearOffset::Current);
        params.sort_key = Some(SortKey::MedianPackage);
        for direction in [SortDirection::Ascending, SortDirection::Descending] {
            params.sort_direction = direction;
            let rows = query(&ds, &params);
            let branches: Vec<&str> = rows.iter().map(|r| r.stat.branch.as_str()).collect();
            assert_eq!(branches, vec!["one", "two", "three"]);
        }
    }

    #[test]
    fn unfiltered_query_is_the_union_of_branch_arrays() {
        let ds = sample();
        let rows = query(&ds, &QueryParams::new(Degree::Ug, YearOffset::Current));
        let expected: usize = ds
            .iter()
            .map(|i| i.stats_for(YearOffset::Current, Degree::Ug).len())
            .sum();
        assert_eq!(rows.len(), expected);
    }
}
