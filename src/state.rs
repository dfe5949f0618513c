use crate::data::model::{Dataset, Degree, SortDirection, SortKey, YearOffset};
use crate::data::query::{query, QueryParams, QueryRow};

// ---------------------------------------------------------------------------
// View/selection state
// ---------------------------------------------------------------------------

/// Selection state driving what subset of the loaded dataset is shown,
/// independent of any rendering. Derived rows are recomputed from the
/// immutable dataset on every change rather than mutated in place.
pub struct ViewState {
    /// Loaded dataset (None until a file is loaded).
    pub dataset: Option<Dataset>,

    pub degree: Degree,
    pub year_offset: YearOffset,

    /// Branch highlighted for the trend chart.
    pub selected_branch: Option<String>,

    pub sort_key: Option<SortKey>,
    pub sort_direction: SortDirection,

    /// Search text matched against institution names.
    pub search: String,

    /// Rows for the current selection (cached).
    pub rows: Vec<QueryRow>,

    /// Status / error message shown by the front end.
    pub status_message: Option<String>,
}

impl Default for ViewState {
    fn default() -> Self {
        Self {
            dataset: None,
            degree: Degree::Ug,
            year_offset: YearOffset::Current,
            selected_branch: None,
            sort_key: None,
            sort_direction: SortDirection::default(),
            search: String::new(),
            rows: Vec::new(),
            status_message: None,
        }
    }
}

impl ViewState {
    /// Ingest a newly loaded dataset: reset to UG/current, clear search and
    /// sort, select the first visible branch.
    pub fn set_dataset(&mut self, dataset: Dataset) {
        self.degree = Degree::Ug;
        self.year_offset = YearOffset::Current;
        self.sort_key = None;
        self.sort_direction = SortDirection::default();
        self.search.clear();
        self.status_message = None;
        self.dataset = Some(dataset);
        self.reset_branch_and_requery();
    }

    /// Change the degree tier; the previous branch selection and sort no
    /// longer apply.
    pub fn set_degree(&mut self, degree: Degree) {
        self.degree = degree;
        self.sort_key = None;
        self.reset_branch_and_requery();
    }

    /// Change the year offset; same reset rules as a degree change.
    pub fn set_year_offset(&mut self, offset: YearOffset) {
        self.year_offset = offset;
        self.sort_key = None;
        self.reset_branch_and_requery();
    }

    /// Update the search text and recompute.
    pub fn set_search(&mut self, search: impl Into<String>) {
        self.search = search.into();
        self.requery();
    }

    /// Clicking a sort column: the same key flips direction, a new key
    /// starts ascending.
    pub fn toggle_sort(&mut self, key: SortKey) {
        if self.sort_key == Some(key) {
            self.sort_direction = match self.sort_direction {
                SortDirection::Ascending => SortDirection::Descending,
                SortDirection::Descending => SortDirection::Ascending,
            };
        } else {
            self.sort_key = Some(key);
            self.sort_direction = SortDirection::Ascending;
        }
        self.requery();
    }

    /// Recompute the cached rows for the current selection.
    pub fn requery(&mut self) {
        let Some(ds) = &self.dataset else {
            self.rows.clear();
            return;
        };
        self.rows = query(ds, &self.params());
    }

    /// The current selection as query parameters.
    pub fn params(&self) -> QueryParams {
        QueryParams {
            degree: self.degree,
            year_offset: self.year_offset,
            name_filter: (!self.search.is_empty()).then(|| self.search.clone()),
            sort_key: self.sort_key,
            sort_direction: self.sort_direction,
        }
    }

    fn reset_branch_and_requery(&mut self) {
        self.requery();
        self.selected_branch = self.rows.first().map(|r| r.stat.branch.clone());
    }
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
                    { "branch": "CSE", "medianPackage": 30 },
                    { "branch": "ECE", "medianPackage": 22 }
                ],
                "PG": [{ "branch": "M.Tech CSE", "medianPackage": 20 }]
            }
        }))
    }

    #[test]
    fn set_dataset_selects_first_branch() {
        let mut state = ViewState::default();
        assert!(state.rows.is_empty());
        state.set_dataset(sample());
        assert_eq!(state.degree, Degree::Ug);
        assert_eq!(state.rows.len(), 2);
        assert_eq!(state.selected_branch.as_deref(), Some("CSE"));
    }

    #[test]
    fn degree_change_resets_branch_and_sort() {
        let mut state = ViewState::default();
        state.set_dataset(sample());
        state.toggle_sort(SortKey::MedianPackage);
        state.set_degree(Degree::Pg);
        assert_eq!(state.sort_key, None);
        assert_eq!(state.selected_branch.as_deref(), Some("M.Tech CSE"));
        assert_eq!(state.rows.len(), 1);
    }

    #[test]
    fn toggle_sort_flips_direction_on_repeat() {
        let mut state = ViewState::default();
        state.set_dataset(sample());

        state.toggle_sort(SortKey::MedianPackage);
        assert_eq!(state.sort_direction, SortDirection::Ascending);
        assert_eq!(state.rows[0].stat.branch, "ECE");

        state.toggle_sort(SortKey::MedianPackage);
        assert_eq!(state.sort_direction, SortDirection::Descending);
        assert_eq!(state.rows[0].stat.branch, "CSE");

        // A different key starts ascending again.
        state.toggle_sort(SortKey::AveragePackage);
        assert_eq!(state.sort_direction, SortDirection::Ascending);
    }

    #[test]
    fn search_narrows_rows() {
        let mut state = ViewState::default();
        state.set_dataset(sample());
        state.set_search("bombay");
        assert_eq!(state.rows.len(), 2);
        state.set_search("delhi");
        assert!(state.rows.is_empty());
        state.set_search("");
        assert_eq!(state.rows.len(), 2);
    }

    #[test]
    fn empty_year_back_yields_no_rows_without_dataset_loss() {
        let mut state = ViewState::default();
        state.set_dataset(sample());
        state.set_year_offset(YearOffset::OneBack);
        assert!(state.rows.is_empty());
        assert!(state.selected_branch.is_none());
        state.set_year_offset(YearOffset::Current);
        assert_eq!(state.rows.len(), 2);
    }
}
