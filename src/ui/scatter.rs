/// Scatter plot canvas
/// Draws subgroup share (x) against two-way vote share (y) with percent
/// axes, and shows the tooltip of the point under the cursor.
use iced::alignment;
use iced::mouse::{self, Cursor};
use iced::widget::canvas::{self, Frame, Path, Program, Stroke};
use iced::{Color, Pixels, Point, Rectangle, Renderer, Size, Theme, Vector};

use crate::view::builder::ScatterChart;
use crate::view::stats::{format_axis_percent, nice_ticks};
use crate::Message;

const MARGIN_LEFT: f32 = 64.0;
const MARGIN_RIGHT: f32 = 24.0;
const MARGIN_TOP: f32 = 32.0;
const MARGIN_BOTTOM: f32 = 52.0;

const LABEL_SIZE: f32 = 13.0;
const TICK_SIZE: f32 = 11.0;
const TOOLTIP_SIZE: f32 = 12.0;
/// Rough glyph width used to size the tooltip box
const CHAR_WIDTH: f32 = 6.8;

const AXIS_COLOR: Color = Color {
    r: 0.35,
    g: 0.35,
    b: 0.35,
    a: 1.0,
};
const GRID_COLOR: Color = Color {
    r: 0.9,
    g: 0.9,
    b: 0.9,
    a: 1.0,
};

pub struct ScatterPlot {
    pub chart: ScatterChart,
}

impl ScatterPlot {
    pub fn new(chart: ScatterChart) -> Self {
        Self { chart }
    }

    /// Index of the point closest to `cursor` within hover reach, if any
    fn point_under(&self, area: &PlotArea, cursor: Point) -> Option<usize> {
        let reach = self.chart.point_size / 2.0 + 3.0;
        self.chart
            .points
            .iter()
            .enumerate()
            .map(|(i, p)| (i, area.to_screen(p.x, p.y).distance(cursor)))
            .filter(|(_, d)| *d <= reach)
            .min_by(|a, b| a.1.total_cmp(&b.1))
            .map(|(i, _)| i)
    }

    fn draw_axes(&self, frame: &mut Frame, area: &PlotArea) {
        let (x0, x1) = self.chart.x_range;
        let (y0, y1) = self.chart.y_range;

        for x in nice_ticks(x0, x1, 8) {
            let sx = area.to_screen(x, y0).x;
            frame.stroke(
                &Path::line(Point::new(sx, area.top), Point::new(sx, area.bottom())),
                Stroke::default().with_color(GRID_COLOR).with_width(1.0),
            );
            frame.fill_text(canvas::Text {
                content: format_axis_percent(x),
                position: Point::new(sx, area.bottom() + 6.0),
                color: AXIS_COLOR,
                size: Pixels(TICK_SIZE),
                horizontal_alignment: alignment::Horizontal::Center,
                vertical_alignment: alignment::Vertical::Top,
                ..canvas::Text::default()
            });
        }

        for y in nice_ticks(y0, y1, 6) {
            let sy = area.to_screen(x0, y).y;
            frame.stroke(
                &Path::line(Point::new(area.left, sy), Point::new(area.right(), sy)),
                Stroke::default().with_color(GRID_COLOR).with_width(1.0),
            );
            frame.fill_text(canvas::Text {
                content: format_axis_percent(y),
                position: Point::new(area.left - 6.0, sy),
                color: AXIS_COLOR,
                size: Pixels(TICK_SIZE),
                horizontal_alignment: alignment::Horizontal::Right,
                vertical_alignment: alignment::Vertical::Center,
                ..canvas::Text::default()
            });
        }

        // Axis lines along the bottom and left edges
        let axis = Stroke::default().with_color(AXIS_COLOR).with_width(1.0);
        frame.stroke(
            &Path::line(
                Point::new(area.left, area.bottom()),
                Point::new(area.right(), area.bottom()),
            ),
            axis.clone(),
        );
        frame.stroke(
            &Path::line(Point::new(area.left, area.top), Point::new(area.left, area.bottom())),
            axis,
        );

        frame.fill_text(canvas::Text {
            content: self.chart.x_label.clone(),
            position: Point::new(area.left + area.width / 2.0, area.bottom() + 28.0),
            color: Color::BLACK,
            size: Pixels(LABEL_SIZE),
            horizontal_alignment: alignment::Horizontal::Center,
            vertical_alignment: alignment::Vertical::Top,
            ..canvas::Text::default()
        });
        // iced canvas text cannot be rotated, so the y label sits above the axis
        frame.fill_text(canvas::Text {
            content: self.chart.y_label.clone(),
            position: Point::new(area.left, area.top - 8.0),
            color: Color::BLACK,
            size: Pixels(LABEL_SIZE),
            horizontal_alignment: alignment::Horizontal::Left,
            vertical_alignment: alignment::Vertical::Bottom,
            ..canvas::Text::default()
        });
    }

    fn draw_points(&self, frame: &mut Frame, area: &PlotArea) {
        let radius = self.chart.point_size / 2.0;
        let outline = Stroke::default()
            .with_color(self.chart.outline)
            .with_width(1.0);

        for p in &self.chart.points {
            let circle = Path::circle(area.to_screen(p.x, p.y), radius);
            frame.fill(
                &circle,
                Color {
                    a: self.chart.fill_alpha,
                    ..p.color
                },
            );
            frame.stroke(&circle, outline.clone());
        }
    }

    fn draw_tooltip(&self, frame: &mut Frame, area: &PlotArea, bounds: Size, index: usize) {
        let Some(point) = self.chart.points.get(index) else {
            return;
        };
        let lines: Vec<String> = point
            .tooltip
            .iter()
            .map(|(label, value)| format!("{label}: {value}"))
            .collect();

        let line_height = TOOLTIP_SIZE * 1.4;
        let longest = lines.iter().map(|l| l.chars().count()).max().unwrap_or(0);
        let size = Size::new(
            longest as f32 * CHAR_WIDTH + 16.0,
            lines.len() as f32 * line_height + 12.0,
        );

        // Prefer below-right of the point, flip when it would leave the canvas
        let anchor = area.to_screen(point.x, point.y);
        let mut origin = anchor + Vector::new(12.0, 12.0);
        if origin.x + size.width > bounds.width {
            origin.x = (anchor.x - 12.0 - size.width).max(0.0);
        }
        if origin.y + size.height > bounds.height {
            origin.y = (anchor.y - 12.0 - size.height).max(0.0);
        }

        let highlight = Path::circle(anchor, self.chart.point_size / 2.0 + 2.0);
        frame.stroke(&highlight, Stroke::default().with_color(Color::BLACK).with_width(2.0));

        let panel = Path::rectangle(origin, size);
        frame.fill(&panel, Color::from_rgba(1.0, 1.0, 1.0, 0.96));
        frame.stroke(&panel, Stroke::default().with_color(AXIS_COLOR).with_width(1.0));

        for (i, line) in lines.into_iter().enumerate() {
            frame.fill_text(canvas::Text {
                content: line,
                position: Point::new(origin.x + 8.0, origin.y + 6.0 + i as f32 * line_height),
                color: Color::BLACK,
                size: Pixels(TOOLTIP_SIZE),
                ..canvas::Text::default()
            });
        }
    }
}

impl Program<Message> for ScatterPlot {
    type State = HoverState;

    fn update(
        &self,
        state: &mut Self::State,
        event: canvas::Event,
        bounds: Rectangle,
        cursor: Cursor,
    ) -> (canvas::event::Status, Option<Message>) {
        match event {
            canvas::Event::Mouse(mouse::Event::CursorMoved { .. }) => {
                let area = PlotArea::new(bounds.size(), &self.chart);
                state.hovered = cursor
                    .position_in(bounds)
                    .and_then(|p| self.point_under(&area, p));
            }
            canvas::Event::Mouse(mouse::Event::CursorLeft) => {
                state.hovered = None;
            }
            _ => {}
        }

        // Hovering is local to the canvas and never reaches the app state
        (canvas::event::Status::Ignored, None)
    }

    fn draw(
        &self,
        state: &Self::State,
        renderer: &Renderer,
        _theme: &Theme,
        bounds: Rectangle,
        _cursor: Cursor,
    ) -> Vec<canvas::Geometry> {
        let mut frame = Frame::new(renderer, bounds.size());
        frame.fill_rectangle(Point::ORIGIN, bounds.size(), Color::WHITE);

        let area = PlotArea::new(bounds.size(), &self.chart);
        if area.width <= 0.0 || area.height <= 0.0 {
            return vec![frame.into_geometry()];
        }

        self.draw_axes(&mut frame, &area);
        self.draw_points(&mut frame, &area);
        if let Some(index) = state.hovered {
            self.draw_tooltip(&mut frame, &area, bounds.size(), index);
        }

        vec![frame.into_geometry()]
    }

    fn mouse_interaction(
        &self,
        state: &Self::State,
        _bounds: Rectangle,
        _cursor: Cursor,
    ) -> mouse::Interaction {
        if state.hovered.is_some() {
            mouse::Interaction::Pointer
        } else {
            mouse::Interaction::default()
        }
    }
}

/// State for hover interactions
#[derive(Debug, Clone, Default)]
pub struct HoverState {
    pub hovered: Option<usize>,
}

/// Plotting rectangle inside the canvas plus the data ranges it shows
#[derive(Debug, Clone, Copy, PartialEq)]
struct PlotArea {
    left: f32,
    top: f32,
    width: f32,
    height: f32,
    x_range: (f64, f64),
    y_range: (f64, f64),
}

impl PlotArea {
    fn new(size: Size, chart: &ScatterChart) -> Self {
        Self {
            left: MARGIN_LEFT,
            top: MARGIN_TOP,
            width: size.width - MARGIN_LEFT - MARGIN_RIGHT,
            height: size.height - MARGIN_TOP - MARGIN_BOTTOM,
            x_range: chart.x_range,
            y_range: chart.y_range,
        }
    }

    fn right(&self) -> f32 {
        self.left + self.width
    }

    fn bottom(&self) -> f32 {
        self.top + self.height
    }

    /// Data coordinates → canvas coordinates (y grows downwards on screen)
    fn to_screen(&self, x: f64, y: f64) -> Point {
        let (x0, x1) = self.x_range;
        let (y0, y1) = self.y_range;
        let tx = ((x - x0) / (x1 - x0)) as f32;
        let ty = ((y - y0) / (y1 - y0)) as f32;
        Point::new(
            self.left + tx * self.width,
            self.top + (1.0 - ty) * self.height,
        )
    }
}
