use iced::widget::{
    button, canvas, column, container, rich_text, row, scrollable, span, text, text::Span, Column,
};
use iced::{Alignment, Element, Length, Size, Task, Theme};
use log::{error, info, warn};
use std::sync::Arc;

mod color;
mod dataset;
mod error;
mod state;
mod ui;
mod view;

use error::DashboardError;
use state::catalog::{self, Subgroup};
use state::data::{Datasets, Race};
use state::selection::{Selection, StateChoice};
use state::settings::Settings;
use view::{builder::TITLE, render, ViewModel};

/// Width of the control panel column
const SIDEBAR_WIDTH: f32 = 340.0;

/// Where the datasets are in their lifecycle
enum DataState {
    Loading,
    /// Load or startup validation failed; the message is shown to the user
    Failed(String),
    Ready {
        datasets: Arc<Datasets>,
        /// State picker options, "US overall" first
        states: Vec<StateChoice>,
        /// View for the current selection, rebuilt after every message
        view: ViewModel,
    },
}

/// Main application state
struct Explorer {
    settings: Settings,
    /// Current picker values
    selection: Selection,
    /// Text typed in the county search box
    county_search: String,
    data: DataState,
}

/// Application messages (events)
#[derive(Debug, Clone)]
pub enum Message {
    SubgroupSelected(Subgroup),
    StateSelected(StateChoice),
    RaceSelected(Race),
    /// A county checkbox changed
    CountyToggled(String, bool),
    CountySearchChanged(String),
    /// User clicked "Filter to selected counties"
    ApplyCountyFilter,
    /// User asked to read the CSV files again
    ReloadData,
    /// A link in the footer was clicked
    OpenLink(String),
    /// Background load completed
    DatasetsLoaded(Result<Arc<Datasets>, Arc<DashboardError>>),
}

impl Explorer {
    /// Create a new instance of the application
    fn new() -> (Self, Task<Message>) {
        let settings = Settings::load();
        let mut explorer = Explorer {
            settings,
            selection: Selection::new(),
            county_search: String::new(),
            data: DataState::Loading,
        };

        if let Err(e) = catalog::validate() {
            error!("❌ {e}");
            explorer.data = DataState::Failed(e.to_string());
            return (explorer, Task::none());
        }

        let task = explorer.start_load();
        (explorer, task)
    }

    fn start_load(&mut self) -> Task<Message> {
        info!(
            "📂 Loading {} and {}",
            self.settings.president_path().display(),
            self.settings.senate_path().display()
        );
        self.data = DataState::Loading;
        Task::perform(load(self.settings.clone()), Message::DatasetsLoaded)
    }

    /// Handle application messages and update state
    fn update(&mut self, message: Message) -> Task<Message> {
        // The county filter only holds for the interaction that applied it.
        // Typing in the search box is not a selection change.
        match message {
            Message::ApplyCountyFilter => self.selection.filter_applied = true,
            Message::CountySearchChanged(_) | Message::OpenLink(_) => {}
            _ => self.selection.filter_applied = false,
        }

        match message {
            Message::SubgroupSelected(subgroup) => self.selection.subgroup = subgroup,
            Message::StateSelected(state) => {
                if state != self.selection.state {
                    self.county_search.clear();
                }
                self.selection.set_state(state);
            }
            Message::RaceSelected(race) => self.selection.race = race,
            Message::CountyToggled(county, checked) => {
                self.selection.toggle_county(&county, checked);
            }
            Message::CountySearchChanged(search) => {
                self.county_search = search;
                return Task::none();
            }
            Message::ApplyCountyFilter => {}
            Message::ReloadData => return self.start_load(),
            Message::OpenLink(url) => {
                if let Err(e) = webbrowser::open(&url) {
                    warn!("⚠️  Could not open {url}: {e}");
                }
                return Task::none();
            }
            Message::DatasetsLoaded(Ok(datasets)) => {
                let states = StateChoice::options(&datasets.states());
                // Selections pointing at a state that is gone fall back to defaults
                if !states.contains(&self.selection.state) {
                    self.selection.reset();
                }
                let view = render(&self.selection, &datasets);
                self.data = DataState::Ready {
                    datasets,
                    states,
                    view,
                };
                return Task::none();
            }
            Message::DatasetsLoaded(Err(e)) => {
                error!("❌ Failed to load datasets: {e}");
                self.data = DataState::Failed(e.to_string());
                return Task::none();
            }
        }

        self.refresh();
        Task::none()
    }

    /// Rebuild the view model from the current selection
    fn refresh(&mut self) {
        if let DataState::Ready { datasets, view, .. } = &mut self.data {
            *view = render(&self.selection, datasets);
        }
    }

    /// Build the user interface
    fn view(&self) -> Element<Message> {
        match &self.data {
            DataState::Loading => centered(
                column![text(TITLE).size(32), text("Loading county data...").size(16)]
                    .spacing(16)
                    .align_x(Alignment::Center),
            ),
            DataState::Failed(message) => centered(
                column![
                    text(TITLE).size(32),
                    text("The county data could not be loaded.").size(18),
                    text(message.as_str()).size(14),
                    button("Reload data").on_press(Message::ReloadData).padding(10),
                ]
                .spacing(16)
                .align_x(Alignment::Center),
            ),
            DataState::Ready { states, view, .. } => self.dashboard(states, view),
        }
    }

    fn dashboard<'a>(&'a self, states: &'a [StateChoice], view: &'a ViewModel) -> Element<'a, Message> {
        let sidebar = container(scrollable(
            ui::panel::control_panel(
                &self.selection,
                states,
                &view.county_options,
                &self.county_search,
            ),
        ))
        .width(Length::Fixed(SIDEBAR_WIDTH))
        .height(Length::Fill)
        .padding(20);

        let chart = canvas(ui::scatter::ScatterPlot::new(view.chart.clone()))
            .width(Length::Fixed(self.settings.chart_width))
            .height(Length::Fixed(self.settings.chart_height));

        let main: Column<Message> = column![
            text(view.title).size(36),
            text(view.heading.as_str()).size(22),
            text(view.correlation_text.as_str()).size(16),
            text(county_summary(view)).size(12),
            chart,
            rich_text(source_spans(view)).size(13),
        ]
        .spacing(14)
        .padding(24);

        row![sidebar, scrollable(main).width(Length::Fill)].into()
    }

    /// Set the application theme
    fn theme(&self) -> Theme {
        Theme::Dark
    }
}

/// "N counties shown, population P"
fn county_summary(view: &ViewModel) -> String {
    let population: f64 = view
        .rows
        .iter()
        .map(|r| r.pop_total)
        .filter(|p| p.is_finite())
        .sum();
    format!(
        "{} counties shown, total population {:.0}",
        view.rows.len(),
        population
    )
}

/// Footer citation, with the paper title clickable
fn source_spans(view: &ViewModel) -> [Span<'static, Message>; 2] {
    [
        span(view.source_text),
        span(view.source_citation)
            .link(Message::OpenLink(view.source_link.to_string()))
            .underline(true),
    ]
}

fn centered<'a>(content: impl Into<Element<'a, Message>>) -> Element<'a, Message> {
    container(content)
        .width(Length::Fill)
        .height(Length::Fill)
        .center_x(Length::Fill)
        .center_y(Length::Fill)
        .into()
}

/// Load both tables in the background, wrapped for the message channel
async fn load(settings: Settings) -> Result<Arc<Datasets>, Arc<DashboardError>> {
    dataset::loader::load_datasets(settings)
        .await
        .map(Arc::new)
        .map_err(Arc::new)
}

fn main() -> iced::Result {
    env_logger::init();

    iced::application(TITLE, Explorer::update, Explorer::view)
        .theme(Explorer::theme)
        .window_size(Size::new(1240.0, 860.0))
        .centered()
        .run_with(Explorer::new)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::data::{CountyRecord, RaceTable};
    use crate::view::stats::format_percent;

    fn datasets() -> Arc<Datasets> {
        let record = |state: &str, county: &str, share: f64| CountyRecord {
            state_name: format!("{state} name"),
            state: state.to_string(),
            county_name: county.to_string(),
            pop_total: 100.0,
            shares: vec![share; Subgroup::count()],
            vote_share: 0.3 + share,
            vote_share_display: format_percent(0.3 + share),
        };
        let records = vec![
            record("CA", "Alameda County", 0.3),
            record("CA", "Kern County", 0.05),
            record("WA", "King County", 0.2),
        ];
        Arc::new(Datasets {
            president: RaceTable {
                race: Race::President,
                records: records.clone(),
            },
            senate: RaceTable {
                race: Race::Senate,
                records,
            },
        })
    }

    fn ready_explorer() -> Explorer {
        let mut explorer = Explorer {
            settings: Settings::default(),
            selection: Selection::new(),
            county_search: String::new(),
            data: DataState::Loading,
        };
        let _ = explorer.update(Message::DatasetsLoaded(Ok(datasets())));
        explorer
    }

    fn row_count(explorer: &Explorer) -> usize {
        match &explorer.data {
            DataState::Ready { view, .. } => view.rows.len(),
            _ => panic!("datasets not loaded"),
        }
    }

    #[test]
    fn test_loaded_datasets_render_defaults() {
        let explorer = ready_explorer();
        match &explorer.data {
            DataState::Ready { states, view, .. } => {
                assert_eq!(states.len(), 3);
                assert_eq!(states[0], StateChoice::Overall);
                assert_eq!(
                    view.heading,
                    "Asian - Total county-level vote in US overall for President"
                );
                assert_eq!(view.rows.len(), 3);
            }
            _ => panic!("datasets not loaded"),
        }
    }

    #[test]
    fn test_filter_resets_on_next_interaction() {
        let mut explorer = ready_explorer();
        let _ = explorer.update(Message::CountyToggled("King County".to_string(), true));
        assert_eq!(row_count(&explorer), 3);

        let _ = explorer.update(Message::ApplyCountyFilter);
        assert_eq!(row_count(&explorer), 1);

        // Searching does not drop the filter, changing race does
        let _ = explorer.update(Message::CountySearchChanged("Ki".to_string()));
        assert_eq!(row_count(&explorer), 1);
        let _ = explorer.update(Message::RaceSelected(Race::Senate));
        assert_eq!(row_count(&explorer), 3);
        assert!(explorer.selection.counties.contains("King County"));
    }

    #[test]
    fn test_footer_citation_is_a_link() {
        let explorer = ready_explorer();
        let DataState::Ready { view, .. } = &explorer.data else {
            panic!("datasets not loaded");
        };
        let [source, citation] = source_spans(view);
        assert_eq!(source.text, "Source: American Community Survey 2019, ");
        assert!(source.link.is_none());
        assert_eq!(citation.text, "Amlani & Algara (2021)");
        assert!(matches!(
            citation.link,
            Some(Message::OpenLink(url)) if url == view.source_link
        ));
    }

    #[test]
    fn test_state_change_narrows_rows() {
        let mut explorer = ready_explorer();
        let _ = explorer.update(Message::StateSelected(StateChoice::State("CA".to_string())));
        assert_eq!(row_count(&explorer), 2);
    }

    #[test]
    fn test_load_failure_is_shown() {
        let mut explorer = ready_explorer();
        let err = DashboardError::MissingColumn {
            file: "aa_sen_2020_df.csv".to_string(),
            column: "dem_twoway_sen".to_string(),
        };
        let _ = explorer.update(Message::DatasetsLoaded(Err(Arc::new(err))));
        match &explorer.data {
            DataState::Failed(message) => assert!(message.contains("dem_twoway_sen")),
            _ => panic!("expected failure state"),
        }
    }
}
