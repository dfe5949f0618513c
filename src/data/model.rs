use std::collections::BTreeMap;
use std::fmt;

use serde::Serialize;

// ---------------------------------------------------------------------------
// Selection enums – degree tier, year offset, sort
// ---------------------------------------------------------------------------

/// Program tier: undergraduate or postgraduate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Degree {
    Ug,
    Pg,
}

impl Degree {
    /// The field name used in the source dataset ("UG" / "PG").
    pub fn as_str(self) -> &'static str {
        match self {
            Degree::Ug => "UG",
            Degree::Pg => "PG",
        }
    }
}

impl fmt::Display for Degree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Which year's statistics to read. Declared in chronological order so the
/// derived `Ord` matches the timeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum YearOffset {
    TwoBack,
    OneBack,
    Current,
}

impl YearOffset {
    /// All offsets, oldest first. Trend extraction iterates this.
    pub const CHRONOLOGICAL: [YearOffset; 3] =
        [YearOffset::TwoBack, YearOffset::OneBack, YearOffset::Current];

    /// Human-readable label ("2 Years Ago", "1 Year Ago", "Current").
    pub fn label(self) -> &'static str {
        match self {
            YearOffset::TwoBack => "2 Years Ago",
            YearOffset::OneBack => "1 Year Ago",
            YearOffset::Current => "Current",
        }
    }
}

impl fmt::Display for YearOffset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Column a query result can be sorted by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SortKey {
    MedianPackage,
    AveragePackage,
    PlacementPercentage,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
pub enum SortDirection {
    #[default]
    Ascending,
    Descending,
}

// ---------------------------------------------------------------------------
// BranchStat – one program's metrics for one (institution, degree, year)
// ---------------------------------------------------------------------------

/// Placement metrics for a single branch. Every numeric field is optional:
/// `None` means "not reported" and is rendered as "NA", never as 0.
/// Package figures are in LPA (lakhs per annum).
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct BranchStat {
    pub branch: String,
    #[serde(rename = "highestPackage", skip_serializing_if = "Option::is_none")]
    pub highest_package: Option<f64>,
    #[serde(rename = "lowestPackage", skip_serializing_if = "Option::is_none")]
    pub lowest_package: Option<f64>,
    #[serde(rename = "medianPackage", skip_serializing_if = "Option::is_none")]
    pub median_package: Option<f64>,
    #[serde(rename = "averagePackage", skip_serializing_if = "Option::is_none")]
    pub average_package: Option<f64>,
    #[serde(rename = "placementPercentage", skip_serializing_if = "Option::is_none")]
    pub placement_percentage: Option<f64>,
    #[serde(rename = "registeredStudent", skip_serializing_if = "Option::is_none")]
    pub registered_students: Option<u64>,
    #[serde(rename = "placedStudent", skip_serializing_if = "Option::is_none")]
    pub placed_students: Option<u64>,
}

impl BranchStat {
    /// Value of the given sort column, `None` when unreported.
    pub fn metric(&self, key: SortKey) -> Option<f64> {
        match key {
            SortKey::MedianPackage => self.median_package,
            SortKey::AveragePackage => self.average_package,
            SortKey::PlacementPercentage => self.placement_percentage,
        }
    }
}

// ---------------------------------------------------------------------------
// YearStats / Institution
// ---------------------------------------------------------------------------

/// The UG and PG branch arrays for one year offset.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct YearStats {
    #[serde(rename = "UG")]
    pub ug: Vec<BranchStat>,
    #[serde(rename = "PG")]
    pub pg: Vec<BranchStat>,
}

impl YearStats {
    /// The branch array for one degree tier.
    pub fn degree(&self, degree: Degree) -> &[BranchStat] {
        match degree {
            Degree::Ug => &self.ug,
            Degree::Pg => &self.pg,
        }
    }
}

/// One college/institute with current and (optional) historical stats.
///
/// In the source JSON the current-year UG/PG arrays sit directly on the
/// institution record; `flatten` keeps serialization in that shape.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Institution {
    /// Stable identifier – the key in the source mapping, not a field of it.
    #[serde(skip)]
    pub key: String,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub photo: Option<String>,
    #[serde(rename = "nirfRank", skip_serializing_if = "Option::is_none")]
    pub nirf_rank: Option<u64>,
    #[serde(rename = "qsWorldRanking", skip_serializing_if = "Option::is_none")]
    pub qs_world_ranking: Option<u64>,
    #[serde(flatten)]
    pub current: YearStats,
    /// `None` means the institution reported no one-year-back data at all –
    /// distinct from a present-but-empty branch array.
    #[serde(rename = "oneYearbackStats", skip_serializing_if = "Option::is_none")]
    pub one_year_back: Option<YearStats>,
    #[serde(rename = "twoYearbackStats", skip_serializing_if = "Option::is_none")]
    pub two_year_back: Option<YearStats>,
}

impl Institution {
    /// Stats for the requested year offset, `None` when the institution has
    /// no data for it. The current year is always present.
    pub fn year_stats(&self, offset: YearOffset) -> Option<&YearStats> {
        match offset {
            YearOffset::Current => Some(&self.current),
            YearOffset::OneBack => self.one_year_back.as_ref(),
            YearOffset::TwoBack => self.two_year_back.as_ref(),
        }
    }

    /// Branch array for one (year, degree) selection; empty slice when the
    /// offset is absent.
    pub fn stats_for(&self, offset: YearOffset, degree: Degree) -> &[BranchStat] {
        self.year_stats(offset)
            .map(|ys| ys.degree(degree))
            .unwrap_or(&[])
    }
}

// ---------------------------------------------------------------------------
// Dataset – the complete normalized collection
// ---------------------------------------------------------------------------

/// All institutions in source order, with a key → position index.
/// Immutable after construction; every query produces new derived rows.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Dataset {
    institutions: Vec<Institution>,
    index: BTreeMap<String, usize>,
}

impl Dataset {
    /// Build the key index from an ordered institution list. Keys are unique
    /// in the source mapping; should a duplicate slip in, the first
    /// occurrence wins and the rest are dropped.
    pub fn from_institutions(institutions: Vec<Institution>) -> Self {
        let mut index = BTreeMap::new();
        let mut kept = Vec::with_capacity(institutions.len());
        for inst in institutions {
            if index.contains_key(&inst.key) {
                log::warn!("duplicate institution key {:?} dropped", inst.key);
                continue;
            }
            index.insert(inst.key.clone(), kept.len());
            kept.push(inst);
        }
        Dataset {
            institutions: kept,
            index,
        }
    }

    /// Look up one institution by key. `None` is the "not found" state,
    /// distinct from an institution with no matching rows.
    pub fn get(&self, key: &str) -> Option<&Institution> {
        self.index.get(key).map(|&i| &self.institutions[i])
    }

    /// Institutions in source order.
    pub fn iter(&self) -> std::slice::Iter<'_, Institution> {
        self.institutions.iter()
    }

    /// Number of institutions.
    pub fn len(&self) -> usize {
        self.institutions.len()
    }

    /// Whether the dataset holds no institutions.
    pub fn is_empty(&self) -> bool {
        self.institutions.is_empty()
    }

    /// Re-serialize into the raw source shape (key → record mapping).
    /// Normalized data is already clean, so normalizing this output again
    /// yields an equal dataset.
    pub fn to_raw(&self) -> serde_json::Value {
        let mut map = serde_json::Map::new();
        for inst in &self.institutions {
            // Institution serializes plain data; failure is unreachable.
            let value = serde_json::to_value(inst).unwrap_or(serde_json::Value::Null);
            map.insert(inst.key.clone(), value);
        }
        serde_json::Value::Object(map)
    }
}

impl<'a> IntoIterator for &'a Dataset {
    type Item = &'a Institution;
    type IntoIter = std::slice::Iter<'a, Institution>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

// ---------------------------------------------------------------------------
// Absent-value conversions
// ---------------------------------------------------------------------------
//
// Two deliberately separate conversions: tables render absent as "NA",
// charts need a plottable number. They are never unified.

/// Table-boundary rendering: "NA" for absent, whole numbers without decimals,
/// everything else with two.
pub fn na_text(value: Option<f64>) -> String {
    match value {
        None => "NA".to_string(),
        Some(v) if v.fract() == 0.0 => format!("{v:.0}"),
        Some(v) => format!("{v:.2}"),
    }
}

/// Table-boundary rendering for counts.
pub fn na_count(value: Option<u64>) -> String {
    match value {
        None => "NA".to_string(),
        Some(v) => v.to_string(),
    }
}

/// Chart-boundary conversion: absent becomes a plottable 0.0.
pub fn plot_value(value: Option<f64>) -> f64 {
    value.unwrap_or(0.0)
}
