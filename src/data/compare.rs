use serde::Serialize;

use super::model::{Dataset, Degree, YearOffset};

// ---------------------------------------------------------------------------
// Cross-institution comparison rows
// ---------------------------------------------------------------------------

/// One line of the side-by-side comparison table: the three headline metrics
/// for one (institution, branch) pair.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ComparisonRow {
    #[serde(rename = "institutionName")]
    pub institution_name: String,
    pub branch: String,
    #[serde(rename = "medianPackage")]
    pub median_package: Option<f64>,
    #[serde(rename = "averagePackage")]
    pub average_package: Option<f64>,
    #[serde(rename = "placementPercentage")]
    pub placement_percentage: Option<f64>,
}

/// Flatten every institution's (degree, year) branch array into one global
/// list, institution order and per-institution branch order preserved.
///
/// No filtering happens here beyond the degree/year selection; narrowing to
/// particular institutions or branches is the caller's job (e.g. a query
/// pass first). Institutions without the offset contribute nothing.
pub fn compare(dataset: &Dataset, degree: Degree, year_offset: YearOffset) -> Vec<ComparisonRow> {
    let mut rows = Vec::new();
    for inst in dataset {
        for stat in inst.stats_for(year_offset, degree) {
            rows.push(ComparisonRow {
                institution_name: inst.name.clone(),
                branch: stat.branch.clone(),
                median_package: stat.median_package,
                average_package: stat.average_package,
                placement_percentage: stat.placement_percentage,
            });
        }
    }
    rows
}
