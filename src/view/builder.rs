/// Derived view for one render cycle
///
/// `render` is a pure function of the current selection and the loaded
/// tables. The iced shell calls it after every message and draws whatever
/// comes back; nothing here is kept between cycles.
use std::collections::HashSet;

use iced::Color;
use log::debug;

use super::stats::{format_correlation, format_percent, padded_range, pearson};
use crate::color::LinearColorMapper;
use crate::state::catalog::Subgroup;
use crate::state::data::{Datasets, Race};
use crate::state::selection::{Selection, StateChoice};

pub const TITLE: &str = "2020 Asian American Vote Choice Trends";
pub const SOURCE_TEXT: &str = "Source: American Community Survey 2019, ";
/// Linked part of the footer, pointing at `SOURCE_LINK`
pub const SOURCE_CITATION: &str = "Amlani & Algara (2021)";
pub const SOURCE_LINK: &str =
    "https://www.sciencedirect.com/science/article/abs/pii/S0261379421001050?dgcid=author#b5";

/// Marker diameter in pixels
pub const POINT_SIZE: f32 = 10.0;
pub const FILL_ALPHA: f32 = 0.4;

/// One county after projection, with the derived subgroup percentage
#[derive(Debug, Clone, PartialEq)]
pub struct ViewRow {
    pub state_name: String,
    pub state: String,
    pub county_name: String,
    pub vote_share: f64,
    pub vote_share_display: String,
    pub pop_total: f64,
    pub share: f64,
    pub share_display: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ScatterPoint {
    pub x: f64,
    pub y: f64,
    pub color: Color,
    /// (label, value) lines shown on hover
    pub tooltip: Vec<(String, String)>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ScatterChart {
    pub points: Vec<ScatterPoint>,
    pub x_label: String,
    pub y_label: String,
    pub x_range: (f64, f64),
    pub y_range: (f64, f64),
    pub point_size: f32,
    pub fill_alpha: f32,
    pub outline: Color,
}

/// Everything the renderer needs for one frame
#[derive(Debug, Clone, PartialEq)]
pub struct ViewModel {
    pub title: &'static str,
    pub heading: String,
    /// `None` when the statistic is undefined
    pub correlation: Option<f64>,
    pub correlation_text: String,
    pub rows: Vec<ViewRow>,
    pub chart: ScatterChart,
    /// Options for the county multi-select
    pub county_options: Vec<String>,
    pub source_text: &'static str,
    pub source_citation: &'static str,
    pub source_link: &'static str,
}

/// Build the view for `selection` against `datasets`.
pub fn render(selection: &Selection, datasets: &Datasets) -> ViewModel {
    let subgroup = selection.subgroup;
    let race = selection.race;

    let mut rows = working_rows(datasets, race, subgroup, &selection.state);
    if selection.filter_applied {
        rows = filter_counties(rows, &selection.counties);
    }

    let xs: Vec<f64> = rows.iter().map(|r| r.share).collect();
    let ys: Vec<f64> = rows.iter().map(|r| r.vote_share).collect();
    let correlation = pearson(&xs, &ys);

    debug!(
        "render: {} / {} / {} -> {} rows, r = {:?}",
        subgroup, selection.state, race, rows.len(), correlation
    );

    ViewModel {
        title: TITLE,
        heading: format!(
            "{} county-level vote in {} for {}",
            subgroup, selection.state, race
        ),
        correlation,
        correlation_text: format_correlation(correlation),
        chart: build_chart(&rows, subgroup, race),
        county_options: county_options(datasets, &selection.state),
        rows,
        source_text: SOURCE_TEXT,
        source_citation: SOURCE_CITATION,
        source_link: SOURCE_LINK,
    }
}

/// Rows of the race table in the selected state, projected to the plotted
/// columns.
pub fn working_rows(
    datasets: &Datasets,
    race: Race,
    subgroup: Subgroup,
    state: &StateChoice,
) -> Vec<ViewRow> {
    datasets
        .table(race)
        .records
        .iter()
        .filter(|r| state.matches(&r.state))
        .map(|r| {
            let share = r.share(subgroup);
            ViewRow {
                state_name: r.state_name.clone(),
                state: r.state.clone(),
                county_name: r.county_name.clone(),
                vote_share: r.vote_share,
                vote_share_display: r.vote_share_display.clone(),
                pop_total: r.pop_total,
                share,
                share_display: format_percent(share),
            }
        })
        .collect()
}

/// Keep rows whose county is ticked. No ticks means no rows.
pub fn filter_counties(
    rows: Vec<ViewRow>,
    counties: &std::collections::BTreeSet<String>,
) -> Vec<ViewRow> {
    rows.into_iter()
        .filter(|r| counties.contains(&r.county_name))
        .collect()
}

/// Distinct county names of the state-filtered president table.
///
/// The president table is used whatever race is selected.
pub fn county_options(datasets: &Datasets, state: &StateChoice) -> Vec<String> {
    let mut seen = HashSet::new();
    datasets
        .president
        .records
        .iter()
        .filter(|r| state.matches(&r.state))
        .filter(|r| seen.insert(r.county_name.as_str()))
        .map(|r| r.county_name.clone())
        .collect()
}

fn build_chart(rows: &[ViewRow], subgroup: Subgroup, race: Race) -> ScatterChart {
    let mapper = LinearColorMapper::vote_share();
    let share_label = format!("% {}", subgroup);
    let vote_label = format!("Dem. Twoway Voteshare for {}", race);

    let points: Vec<ScatterPoint> = rows
        .iter()
        .filter(|r| r.share.is_finite() && r.vote_share.is_finite())
        .map(|r| ScatterPoint {
            x: r.share,
            y: r.vote_share,
            color: mapper.map(r.vote_share),
            tooltip: vec![
                ("County".to_string(), r.county_name.clone()),
                ("State".to_string(), r.state.clone()),
                (share_label.clone(), r.share_display.clone()),
                (vote_label.clone(), r.vote_share_display.clone()),
            ],
        })
        .collect();

    ScatterChart {
        x_range: padded_range(points.iter().map(|p| p.x)),
        y_range: padded_range(points.iter().map(|p| p.y)),
        points,
        x_label: format!("% of county {}", subgroup),
        y_label: format!("Dem. twoway voteshare for {}", race),
        point_size: POINT_SIZE,
        fill_alpha: FILL_ALPHA,
        outline: Color::BLACK,
    }
}
