/// Control panel (sidebar)
///
/// Subgroup, state and race pickers, the county multi-select and the
/// apply-filter button, in that order.
use iced::widget::{button, checkbox, column, pick_list, scrollable, text, text_input, Column};
use iced::{Element, Length, Pixels};
use iced_aw::Wrap;

use crate::state::catalog::Subgroup;
use crate::state::data::Race;
use crate::state::selection::{Selection, StateChoice};
use crate::Message;

/// Height of the scrollable county list
const COUNTY_LIST_HEIGHT: f32 = 240.0;

pub fn control_panel<'a>(
    selection: &'a Selection,
    states: &'a [StateChoice],
    county_options: &'a [String],
    county_search: &'a str,
) -> Element<'a, Message> {
    let subgroup = column![
        text("Asian Subgroup").size(20),
        text("Which Asian subgroup do you want to explore?").size(14),
        pick_list(Subgroup::all(), Some(selection.subgroup), Message::SubgroupSelected)
            .width(Length::Fill),
    ]
    .spacing(6);

    let state = column![
        text("State").size(20),
        text("Which state do you want displayed?").size(14),
        pick_list(states, Some(selection.state.clone()), Message::StateSelected)
            .width(Length::Fill),
    ]
    .spacing(6);

    let race = column![
        text("Electoral Race").size(20),
        pick_list(Race::ALL, Some(selection.race), Message::RaceSelected).width(Length::Fill),
    ]
    .spacing(6);

    let counties = column![
        text("Optional: Counties").size(20),
        text("Which set of counties do you want to filter to?").size(14),
        text_input("Search counties", county_search)
            .on_input(Message::CountySearchChanged)
            .padding(6),
        scrollable(county_checkboxes(selection, county_options, county_search))
            .height(Length::Fixed(COUNTY_LIST_HEIGHT)),
        text(format!("{} selected", selection.counties.len())).size(12),
        button("Filter to selected counties")
            .on_press(Message::ApplyCountyFilter)
            .padding(8),
    ]
    .spacing(6);

    Column::new()
        .push(subgroup)
        .push(state)
        .push(race)
        .push(counties)
        .spacing(24)
        .into()
}

/// Counties matching the search text; ticked ones always stay visible
fn county_checkboxes<'a>(
    selection: &'a Selection,
    county_options: &'a [String],
    county_search: &str,
) -> Element<'a, Message> {
    let needle = county_search.trim().to_lowercase();
    let visible = county_options.iter().filter(|c| {
        selection.counties.contains(*c) || needle.is_empty() || c.to_lowercase().contains(&needle)
    });

    let elements: Vec<Element<'a, Message>> = visible
        .map(|county| {
            let name = county.clone();
            checkbox(county.as_str(), selection.counties.contains(county))
                .on_toggle(move |checked| Message::CountyToggled(name.clone(), checked))
                .size(14)
                .text_size(13)
                .into()
        })
        .collect();

    Wrap::with_elements(elements)
        .spacing(Pixels(8.0))
        .line_spacing(Pixels(4.0))
        .into()
}
