use super::model::{plot_value, Degree, Institution, YearOffset};

// ---------------------------------------------------------------------------
// Per-branch trend series
// ---------------------------------------------------------------------------

/// One plottable point of a placement trend. Unreported metrics are already
/// converted to 0.0 here – this output feeds a bar chart, which needs a
/// number for every bar. Tables use the "NA" conversion instead.
#[derive(Debug, Clone, PartialEq)]
pub struct TrendPoint {
    pub label: YearOffset,
    pub highest: f64,
    pub median: f64,
    pub lowest: f64,
}

/// Chronological highest/median/lowest series for one branch of one
/// institution: two-years-back, one-year-back, current.
///
/// An offset contributes a point only when the institution has stats for it
/// and the degree array contains an exact (case-sensitive) `branch` match;
/// anything else is skipped, so the output has 1–3 points and is never
/// padded. No match anywhere yields an empty series ("no trend data").
pub fn trend(institution: &Institution, degree: Degree, branch: &str) -> Vec<TrendPoint> {
    let mut points = Vec::with_capacity(YearOffset::CHRONOLOGICAL.len());
    for offset in YearOffset::CHRONOLOGICAL {
        let stats = institution.stats_for(offset, degree);
        if let Some(stat) = stats.iter().find(|s| s.branch == branch) {
            points.push(TrendPoint {
                label: offset,
                highest: plot_value(stat.highest_package),
                median: plot_value(stat.median_package),
                lowest: plot_value(stat.lowest_package),
            });
        }
    }
    points
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::normalize::normalize;
    use serde_json::json;

    fn institution() -> Institution {
        let ds = normalize(&json!({
            "iitb": {
                "name": "IIT Bombay",
                "UG": [{
                    "branch": "CSE",
                    "highestPackage": 120, "medianPackage": 30, "lowestPackage": 8
                }],
                "PG": [],
                "oneYearbackStats": {
                    "UG": [{ "branch": "CSE", "highestPackage": 100, "medianPackage": 27 }],
                    "PG": []
                },
                "twoYearbackStats": {
                    "UG": [{ "branch": "ECE", "medianPackage": 15 }],
                    "PG": []
                }
            }
        }));
        ds.get("iitb").unwrap().clone()
    }

    #[test]
    fn points_are_chronological_and_unpadded() {
        let points = trend(&institution(), Degree::Ug, "CSE");
        // Two-years-back has no CSE row, so only two points remain.
        let labels: Vec<YearOffset> = points.iter().map(|p| p.label).collect();
        assert_eq!(labels, vec![YearOffset::OneBack, YearOffset::Current]);
        assert_eq!(points[1].highest, 120.0);
        assert_eq!(points[1].median, 30.0);
    }

    #[test]
    fn unreported_metrics_plot_as_zero() {
        let points = trend(&institution(), Degree::Ug, "CSE");
        // One-year-back CSE has no lowestPackage; the chart gets 0.0, no
        // synthesized fallback from the current year.
        assert_eq!(points[0].lowest, 0.0);
        assert_eq!(points[0].median, 27.0);
    }

    #[test]
    fn branch_match_is_exact_and_case_sensitive() {
        let inst = institution();
        assert!(trend(&inst, Degree::Ug, "cse").is_empty());
        assert!(trend(&inst, Degree::Ug, "CS").is_empty());
        assert!(trend(&inst, Degree::Pg, "CSE").is_empty());
    }

    #[test]
    fn single_offset_match_yields_single_point() {
        let points = trend(&institution(), Degree::Ug, "ECE");
        assert_eq!(points.len(), 1);
        assert_eq!(points[0].label, YearOffset::TwoBack);
        assert_eq!(points[0].median, 15.0);
        assert_eq!(points[0].highest, 0.0);
    }
}
