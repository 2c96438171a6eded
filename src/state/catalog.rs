/// The fixed table of Asian American subgroups
///
/// Each entry pairs the name shown in the picker with the share column in
/// both datasets. The order here is the picker order, and the first entry
/// is the default selection.
use std::collections::HashSet;
use std::fmt;

use crate::error::{DashboardError, DashboardResult};

/// (display name, share field) pairs, in picker order
const SUBGROUPS: [(&str, &str); 25] = [
    ("Asian - Total", "pct_asian_total"),
    ("Asian - Other (specified)", "pct_asian_other_specified"),
    ("Asian - Other (not specified)", "pct_asian_other_not_specified"),
    ("Asian - Two or more races", "pct_asian_two_more"),
    ("Bangladeshi", "pct_asian_bangladeshi"),
    ("Bhutanese", "pct_asian_bhutanese"),
    ("Burmese", "pct_asian_burmese"),
    ("Cambodian", "pct_asian_cambodian"),
    ("Chinese", "pct_asian_chinese"),
    ("Filipino", "pct_asian_filipino"),
    ("Hmong", "pct_asian_hmong"),
    ("Indian", "pct_asian_indian"),
    ("Indonesian", "pct_asian_indonesian"),
    ("Japanese", "pct_asian_japanese"),
    ("Korean", "pct_asian_korean"),
    ("Laotian", "pct_asian_laotian"),
    ("Malaysian", "pct_asian_malaysian"),
    ("Mongolian", "pct_asian_mongolian"),
    ("Nepalese", "pct_asian_nepalese"),
    ("Okinawan", "pct_asian_okinawan"),
    ("Pakistani", "pct_asian_pakistani"),
    ("Sri Lankan", "pct_asian_sri_lankan"),
    ("Taiwanese", "pct_asian_taiwanese"),
    ("Thai", "pct_asian_thai"),
    ("Vietnamese", "pct_asian_vietnamese"),
];

/// A handle to one catalog entry.
///
/// Records store their shares in catalog order, so the index doubles as
/// the position of this subgroup's share in every record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Subgroup(usize);

impl Subgroup {
    /// All subgroups in picker order
    pub fn all() -> Vec<Subgroup> {
        (0..SUBGROUPS.len()).map(Subgroup).collect()
    }

    /// Number of catalog entries
    pub fn count() -> usize {
        SUBGROUPS.len()
    }

    /// Look a subgroup up by its display name
    pub fn by_name(name: &str) -> Option<Subgroup> {
        SUBGROUPS
            .iter()
            .position(|(display, _)| *display == name)
            .map(Subgroup)
    }

    /// Human-readable name, e.g. "Chinese"
    pub fn name(self) -> &'static str {
        SUBGROUPS[self.0].0
    }

    /// Share column in the datasets, e.g. "pct_asian_chinese"
    pub fn field(self) -> &'static str {
        SUBGROUPS[self.0].1
    }

    /// Position of this subgroup's share inside a record
    pub fn index(self) -> usize {
        self.0
    }
}

impl Default for Subgroup {
    fn default() -> Self {
        Subgroup(0)
    }
}

impl fmt::Display for Subgroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Check that no name and no field appears twice.
///
/// Called once at startup, before any dataset is read.
pub fn validate() -> DashboardResult<()> {
    validate_entries(&SUBGROUPS)
}

fn validate_entries(entries: &[(&str, &str)]) -> DashboardResult<()> {
    let mut names = HashSet::new();
    let mut fields = HashSet::new();
    for (name, field) in entries {
        if !names.insert(*name) {
            return Err(DashboardError::DuplicateSubgroup(name.to_string()));
        }
        if !fields.insert(*field) {
            return Err(DashboardError::DuplicateSubgroup(field.to_string()));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_is_valid() {
        assert!(validate().is_ok());
        assert_eq!(Subgroup::all().len(), Subgroup::count());
    }

    #[test]
    fn test_default_is_first_entry() {
        assert_eq!(Subgroup::default().name(), "Asian - Total");
        assert_eq!(Subgroup::all()[0], Subgroup::default());
    }

    #[test]
    fn test_lookup_by_name() {
        let chinese = Subgroup::by_name("Chinese").unwrap();
        assert_eq!(chinese.field(), "pct_asian_chinese");
        assert_eq!(chinese.to_string(), "Chinese");
        assert!(Subgroup::by_name("Klingon").is_none());
    }

    #[test]
    fn test_duplicates_rejected() {
        let dup_name = [("A", "pct_a"), ("A", "pct_b")];
        assert!(matches!(
            validate_entries(&dup_name),
            Err(DashboardError::DuplicateSubgroup(n)) if n == "A"
        ));

        let dup_field = [("A", "pct_a"), ("B", "pct_a")];
        assert!(matches!(
            validate_entries(&dup_field),
            Err(DashboardError::DuplicateSubgroup(f)) if f == "pct_a"
        ));
    }
}
