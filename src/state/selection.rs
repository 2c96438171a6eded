/// Control panel selection state
///
/// The values held by the four pickers and the apply-filter trigger. The
/// iced shell owns one `Selection` and mutates it from messages; the render
/// pass only reads it.
use std::collections::BTreeSet;
use std::fmt;

use super::catalog::Subgroup;
use super::data::Race;

/// Label of the aggregate state option
pub const US_OVERALL: &str = "US overall";

/// State picker value
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub enum StateChoice {
    /// Every county in the table
    #[default]
    Overall,
    /// Counties whose state identifier matches
    State(String),
}

impl StateChoice {
    /// Picker options: "US overall" followed by the dataset states
    pub fn options(states: &[String]) -> Vec<StateChoice> {
        std::iter::once(StateChoice::Overall)
            .chain(states.iter().cloned().map(StateChoice::State))
            .collect()
    }

    pub fn matches(&self, state: &str) -> bool {
        match self {
            StateChoice::Overall => true,
            StateChoice::State(s) => s == state,
        }
    }
}

impl fmt::Display for StateChoice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StateChoice::Overall => f.write_str(US_OVERALL),
            StateChoice::State(s) => f.write_str(s),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Selection {
    pub subgroup: Subgroup,
    pub state: StateChoice,
    pub race: Race,
    /// Counties ticked in the multi-select
    pub counties: BTreeSet<String>,
    /// True only for the cycle in which "Filter to selected counties" fired
    pub filter_applied: bool,
}

impl Selection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Switch state; the county options change, so ticked counties go away
    pub fn set_state(&mut self, state: StateChoice) {
        if self.state != state {
            self.counties.clear();
        }
        self.state = state;
    }

    pub fn toggle_county(&mut self, county: &str, checked: bool) {
        if checked {
            self.counties.insert(county.to_string());
        } else {
            self.counties.remove(county);
        }
    }

    /// Back to the startup defaults
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}
