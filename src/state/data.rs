/// Shared data structures for the application state
///
/// These structs represent the county tables as loaded from disk. They are
/// immutable once loaded and shared with the render pass behind an `Arc`.
use std::fmt;

use super::catalog::Subgroup;

/// The electoral race whose vote share is plotted
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Race {
    #[default]
    President,
    Senate,
}

impl Race {
    pub const ALL: [Race; 2] = [Race::President, Race::Senate];

    /// Column holding the two-way Democratic share
    pub fn vote_field(self) -> &'static str {
        match self {
            Race::President => "dem_twoway_pres",
            Race::Senate => "dem_twoway_sen",
        }
    }

    /// Column holding the pre-formatted share string
    pub fn vote_display_field(self) -> &'static str {
        match self {
            Race::President => "dem_twoway_pres_display",
            Race::Senate => "dem_twoway_sen_display",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Race::President => "President",
            Race::Senate => "Senate",
        }
    }
}

impl fmt::Display for Race {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// One county row of a race table
#[derive(Debug, Clone, PartialEq)]
pub struct CountyRecord {
    /// State display name (e.g., "California")
    pub state_name: String,
    /// State identifier used by the state picker (e.g., "CA")
    pub state: String,
    /// County display name (e.g., "Alameda County")
    pub county_name: String,
    /// Total county population
    pub pop_total: f64,
    /// Subgroup population shares, indexed by catalog position
    pub shares: Vec<f64>,
    /// Two-way Democratic vote share for the table's race
    pub vote_share: f64,
    /// Pre-formatted vote share (e.g., "61.2%")
    pub vote_share_display: String,
}

impl CountyRecord {
    /// Share of the county population in `subgroup`
    pub fn share(&self, subgroup: Subgroup) -> f64 {
        self.shares
            .get(subgroup.index())
            .copied()
            .unwrap_or(f64::NAN)
    }
}

/// All county records for one race
#[derive(Debug, Clone, PartialEq)]
pub struct RaceTable {
    pub race: Race,
    pub records: Vec<CountyRecord>,
}

impl RaceTable {
    /// Distinct state identifiers, in order of first appearance
    pub fn states(&self) -> Vec<String> {
        let mut seen = std::collections::HashSet::new();
        self.records
            .iter()
            .filter(|r| seen.insert(r.state.as_str()))
            .map(|r| r.state.clone())
            .collect()
    }
}

/// Both race tables, as produced by the loader
#[derive(Debug, Clone, PartialEq)]
pub struct Datasets {
    pub president: RaceTable,
    pub senate: RaceTable,
}

impl Datasets {
    /// The table backing `race`
    pub fn table(&self, race: Race) -> &RaceTable {
        match race {
            Race::President => &self.president,
            Race::Senate => &self.senate,
        }
    }

    /// States offered by the picker (taken from the president table)
    pub fn states(&self) -> Vec<String> {
        self.president.states()
    }
}
