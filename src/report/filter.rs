//! Year/month filtering for report views
//!
//! Every dashboard page filters its claim rows by the same two controls: a
//! year multi-select and a month multi-select, each carrying an "all"
//! sentinel that short-circuits the check. Filtering borrows rows from the
//! session's loaded dataset; nothing is copied or mutated.

use itertools::Itertools;

use crate::models::ClaimRecord;

/// A multi-select control value with an "all" sentinel
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selection<T> {
    /// Every value passes
    All,
    /// Only the listed values pass
    Only(Vec<T>),
}

impl<T: PartialEq> Selection<T> {
    /// Whether a value passes the selection
    ///
    /// An empty explicit selection means the user cleared the control, which
    /// reads as "no restriction", the same as [`Selection::All`].
    pub fn matches(&self, value: &T) -> bool {
        match self {
            Self::All => true,
            Self::Only(values) => values.is_empty() || values.contains(value),
        }
    }
}

impl<T> Default for Selection<T> {
    fn default() -> Self {
        Self::All
    }
}

/// The filter state of one report page
#[derive(Debug, Clone, Default)]
pub struct FilterSelection {
    /// Selected claim years
    pub years: Selection<i32>,
    /// Selected claim months (1..=12)
    pub months: Selection<u32>,
}

impl FilterSelection {
    /// Whether a claim row passes both controls
    pub fn matches<R: ClaimRecord>(&self, claim: &R) -> bool {
        self.years.matches(&claim.year()) && self.months.matches(&claim.month())
    }
}

/// Rows passing the selection, in dataset order
pub fn filter_claims<'a, R: ClaimRecord>(
    claims: &'a [R],
    selection: &FilterSelection,
) -> Vec<&'a R> {
    claims
        .iter()
        .filter(|claim| selection.matches(*claim))
        .collect()
}

/// Distinct claim years present in a dataset, ascending, for populating the
/// year control
pub fn distinct_years<R: ClaimRecord>(claims: &[R]) -> Vec<i32> {
    claims
        .iter()
        .map(ClaimRecord::year)
        .sorted_unstable()
        .dedup()
        .collect()
}
