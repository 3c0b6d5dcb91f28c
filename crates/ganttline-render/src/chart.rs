//! SVG chart renderer
//!
//! Draws a computed `ChartState` as one standalone SVG document:
//! - Header with month blocks over day cells
//! - Sidebar with activity, status, start, end and assignee columns and
//!   `+`/`−` toggles
//! - Day grid, today marker, bars with progress overlay, milestone diamonds
//! - Dashed dependency connectors ending in an arrowhead
//!
//! Timeline coordinates from the layout are used as-is inside a group
//! translated past the sidebar and header, so the renderer never re-derives
//! any position.

use ganttline_core::{non_blank, Avatar, DateLocale};
use ganttline_layout::{ChartLayout, ChartState, Geometry, RowLayout};
use svg::node::element::{
    Circle, Definitions, Group, Image, Line, Marker, Path, Polygon, Rectangle, Text,
};
use svg::Document;

use crate::connector::route_path;
use crate::tooltip::TooltipContent;
use crate::{RenderError, Renderer};

/// Colors used by the SVG renderer
#[derive(Clone, Debug, PartialEq)]
pub struct SvgTheme {
    pub background_color: String,
    pub text_color: String,
    pub muted_text_color: String,
    pub header_bg: String,
    pub border_color: String,
    pub grid_color: String,
    pub today_color: String,
    pub connector_color: String,
    pub connector_dash: String,
    pub connector_width: f64,
    pub bar_text_color: String,
    pub progress_overlay: String,
    pub error_color: String,
}

impl Default for SvgTheme {
    fn default() -> Self {
        Self::light()
    }
}

impl SvgTheme {
    pub fn light() -> Self {
        Self {
            background_color: "#ffffff".into(),
            text_color: "#212529".into(),
            muted_text_color: "#495057".into(),
            header_bg: "#f8f9fa".into(),
            border_color: "#dee2e6".into(),
            grid_color: "#f1f3f5".into(),
            today_color: "#e74c3c".into(),
            connector_color: "#999".into(),
            connector_dash: "4,4".into(),
            connector_width: 1.5,
            bar_text_color: "#ffffff".into(),
            progress_overlay: "rgba(255,255,255,0.3)".into(),
            error_color: "#ff0000".into(),
        }
    }

    pub fn dark() -> Self {
        Self {
            background_color: "#1a1a2e".into(),
            text_color: "#eaeaea".into(),
            muted_text_color: "#b0b0c0".into(),
            header_bg: "#16213e".into(),
            border_color: "#2d2d44".into(),
            grid_color: "#23233a".into(),
            today_color: "#ff6b6b".into(),
            connector_color: "#999".into(),
            connector_dash: "4,4".into(),
            connector_width: 1.5,
            bar_text_color: "#ffffff".into(),
            progress_overlay: "rgba(255,255,255,0.3)".into(),
            error_color: "#ff6b6b".into(),
        }
    }
}

/// SVG chart renderer configuration
#[derive(Clone, Debug)]
pub struct SvgRenderer {
    /// Width of the activity column (id, name, toggle)
    pub name_width: f64,
    /// Width of the status column
    pub status_width: f64,
    /// Width of each authored date column
    pub date_width: f64,
    /// Width of the assignee column
    pub assignee_width: f64,
    /// Height of the month band of the header
    pub month_band: f64,
    /// Height of the day band of the header
    pub day_band: f64,
    pub theme: SvgTheme,
    pub font_family: String,
    pub font_size: f64,
    /// Language of header titles, day labels and tooltips
    pub locale: DateLocale,
    pub show_sidebar: bool,
    pub show_dependencies: bool,
    /// Attach tooltip text to every row group
    pub tooltips: bool,
}

impl Default for SvgRenderer {
    fn default() -> Self {
        Self {
            name_width: 260.0,
            status_width: 110.0,
            date_width: 90.0,
            assignee_width: 150.0,
            month_band: 24.0,
            day_band: 24.0,
            theme: SvgTheme::light(),
            font_family: "system-ui, -apple-system, sans-serif".into(),
            font_size: 12.0,
            locale: DateLocale::Es,
            show_sidebar: true,
            show_dependencies: true,
            tooltips: true,
        }
    }
}

impl SvgRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Use dark theme
    pub fn dark_theme(mut self) -> Self {
        self.theme = SvgTheme::dark();
        self
    }

    pub fn locale(mut self, locale: DateLocale) -> Self {
        self.locale = locale;
        self
    }

    /// Draw the timeline only
    pub fn hide_sidebar(mut self) -> Self {
        self.show_sidebar = false;
        self
    }

    pub fn hide_dependencies(mut self) -> Self {
        self.show_dependencies = false;
        self
    }

    /// Omit tooltip text from the output
    pub fn static_chart(mut self) -> Self {
        self.tooltips = false;
        self
    }

    /// Left edge of each sidebar column
    fn column_offsets(&self) -> [f64; 5] {
        let status = self.name_width;
        let start = status + self.status_width;
        let end = start + self.date_width;
        let assignee = end + self.date_width;
        [0.0, status, start, end, assignee]
    }

    /// Total sidebar width, zero when hidden
    pub fn sidebar_width(&self) -> f64 {
        if self.show_sidebar {
            self.name_width + self.status_width + 2.0 * self.date_width + self.assignee_width
        } else {
            0.0
        }
    }

    pub fn header_height(&self) -> f64 {
        self.month_band + self.day_band
    }

    /// Single error view replacing the whole chart
    pub fn render_error(&self, message: &str) -> Result<String, RenderError> {
        let width = 600.0;
        let height = 60.0;
        let document = Document::new()
            .set("width", width)
            .set("height", height)
            .set("viewBox", format!("0 0 {width} {height}"))
            .set("xmlns", "http://www.w3.org/2000/svg")
            .set("class", "gantt-error")
            .add(
                Rectangle::new()
                    .set("width", "100%")
                    .set("height", "100%")
                    .set("fill", self.theme.background_color.as_str()),
            )
            .add(
                Text::new(message)
                    .set("x", 20)
                    .set("y", 35)
                    .set("font-family", self.font_family.as_str())
                    .set("font-size", self.font_size + 2.0)
                    .set("fill", self.theme.error_color.as_str()),
            );
        write_document(&document)
    }

    fn render_defs(&self) -> Definitions {
        let arrow = Path::new()
            .set("d", "M0,-5L10,0L0,5")
            .set("fill", self.theme.connector_color.as_str());
        let marker = Marker::new()
            .set("id", "arrowhead")
            .set("viewBox", "0 -5 10 10")
            .set("refX", 8)
            .set("refY", 0)
            .set("markerWidth", 6)
            .set("markerHeight", 6)
            .set("orient", "auto")
            .add(arrow);
        Definitions::new().add(marker)
    }

    fn render_header(&self, layout: &ChartLayout) -> Group {
        let sidebar = self.sidebar_width();
        let mut group = Group::new().set("class", "gantt-header");

        group = group.add(
            Rectangle::new()
                .set("x", 0)
                .set("y", 0)
                .set("width", sidebar + layout.timeline_width)
                .set("height", self.header_height())
                .set("fill", self.theme.header_bg.as_str()),
        );

        if self.show_sidebar {
            let titles = column_titles(self.locale);
            for (title, x) in titles.iter().zip(self.column_offsets()) {
                group = group.add(
                    self.text(*title, x + 8.0, self.header_height() - 8.0)
                        .set("font-weight", "bold"),
                );
            }
        }

        for block in &layout.header {
            let x = sidebar + block.left;
            group = group.add(
                Rectangle::new()
                    .set("x", x)
                    .set("y", 0)
                    .set("width", block.width)
                    .set("height", self.month_band)
                    .set("fill", "none")
                    .set("stroke", self.theme.border_color.as_str()),
            );
            group = group.add(
                self.text(block.label.as_str(), x + 6.0, self.month_band - 8.0)
                    .set("font-weight", "bold"),
            );

            for day in &block.days {
                group = group.add(
                    self.text(
                        day.label.as_str(),
                        sidebar + day.left + layout.day_width / 2.0,
                        self.header_height() - 8.0,
                    )
                    .set("font-size", self.font_size - 1.0)
                    .set("text-anchor", "middle")
                    .set("class", "gantt-day"),
                );
            }
        }

        group
    }

    fn render_grid(&self, layout: &ChartLayout) -> Group {
        let mut group = Group::new().set("class", "gantt-grid");

        for x in &layout.grid_lines {
            group = group.add(
                Line::new()
                    .set("x1", *x)
                    .set("y1", 0)
                    .set("x2", *x)
                    .set("y2", layout.total_height)
                    .set("stroke", self.theme.grid_color.as_str())
                    .set("stroke-width", 1),
            );
        }

        for row in 1..=layout.rows.len() {
            let y = row as f64 * layout.row_height;
            group = group.add(
                Line::new()
                    .set("x1", 0)
                    .set("y1", y)
                    .set("x2", layout.timeline_width)
                    .set("y2", y)
                    .set("stroke", self.theme.border_color.as_str())
                    .set("stroke-width", 1),
            );
        }

        group
    }

    fn render_today(&self, layout: &ChartLayout) -> Option<Line> {
        let x = layout.today_offset?;
        Some(
            Line::new()
                .set("class", "gantt-today")
                .set("x1", x)
                .set("y1", 0)
                .set("x2", x)
                .set("y2", layout.total_height)
                .set("stroke", self.theme.today_color.as_str())
                .set("stroke-width", 2),
        )
    }

    fn render_row(&self, row: &RowLayout) -> Group {
        let mut group = Group::new()
            .set("class", "gantt-row")
            .set("data-id", row.id.as_str());

        if self.tooltips {
            let tooltip = TooltipContent::for_row(row, self.locale);
            group = group.set("data-tooltip", tooltip.to_text(self.locale));
        }

        match row.geometry {
            Some(Geometry::Bar(bar)) => {
                let y = row.y + bar.top;
                let class = if bar.parent {
                    "gantt-bar gantt-parent"
                } else {
                    "gantt-bar"
                };
                group = group.add(
                    Rectangle::new()
                        .set("class", class)
                        .set("x", bar.left)
                        .set("y", y)
                        .set("width", bar.width)
                        .set("height", bar.height)
                        .set("rx", 4)
                        .set("ry", 4)
                        .set("fill", row.color.as_str()),
                );
                if bar.progress_width > 0.0 {
                    group = group.add(
                        Rectangle::new()
                            .set("class", "gantt-progress")
                            .set("x", bar.left)
                            .set("y", y)
                            .set("width", bar.progress_width)
                            .set("height", bar.height)
                            .set("rx", 4)
                            .set("ry", 4)
                            .set("fill", self.theme.progress_overlay.as_str()),
                    );
                }
                group = group.add(
                    self.text(
                        row.name.as_str(),
                        bar.left + 6.0,
                        y + bar.height / 2.0 + self.font_size / 3.0,
                    )
                    .set("fill", self.theme.bar_text_color.as_str()),
                );
            }
            Some(Geometry::Milestone(marker)) => {
                let half = marker.size / 2.0;
                let cx = marker.center_x;
                let cy = row.y + marker.top + half;
                group = group.add(
                    Polygon::new()
                        .set("class", "gantt-milestone")
                        .set(
                            "points",
                            format!(
                                "{},{} {},{} {},{} {},{}",
                                cx,
                                cy - half,
                                cx + half,
                                cy,
                                cx,
                                cy + half,
                                cx - half,
                                cy
                            ),
                        )
                        .set("fill", row.color.as_str()),
                );
                group = group.add(self.text(
                    row.name.as_str(),
                    cx + half + 6.0,
                    cy + self.font_size / 3.0,
                ));
            }
            None => {}
        }

        group
    }

    fn render_connectors(&self, state: &ChartState) -> Group {
        let mut group = Group::new().set("class", "gantt-connectors");
        for route in &state.routes {
            group = group.add(
                Path::new()
                    .set("d", route_path(route))
                    .set("fill", "none")
                    .set("stroke", self.theme.connector_color.as_str())
                    .set("stroke-width", self.theme.connector_width)
                    .set("stroke-dasharray", self.theme.connector_dash.as_str())
                    .set("marker-end", "url(#arrowhead)")
                    .set("data-from", route.from.as_str())
                    .set("data-to", route.to.as_str()),
            );
        }
        group
    }

    fn render_sidebar(&self, layout: &ChartLayout) -> Group {
        let mut group = Group::new().set("class", "gantt-sidebar");
        let width = self.sidebar_width();

        for row in &layout.rows {
            let baseline = row.y + layout.row_height / 2.0 + self.font_size / 3.0;
            let mut cells = Group::new()
                .set("class", "gantt-sidebar-row")
                .set("data-id", row.id.as_str());

            cells = cells.add(
                Line::new()
                    .set("x1", 0)
                    .set("y1", row.y + layout.row_height)
                    .set("x2", width)
                    .set("y2", row.y + layout.row_height)
                    .set("stroke", self.theme.border_color.as_str()),
            );

            // Name column: toggle glyph or spacer, then id and name
            let mut x = 8.0 + row.indent;
            if row.has_children {
                let glyph = if row.expanded { "−" } else { "+" };
                cells = cells.add(
                    self.text(glyph, x, baseline)
                        .set("class", "gantt-toggle")
                        .set("data-toggle", row.id.as_str())
                        .set("font-weight", "bold"),
                );
            }
            x += 20.0;
            cells = cells.add(
                self.text(row.id.as_str(), x, baseline)
                    .set("font-weight", "600")
                    .set("fill", self.theme.muted_text_color.as_str()),
            );
            let name_x = x + (row.id.chars().count() as f64 + 1.0) * self.font_size * 0.6;
            cells = cells.add(self.text(row.name.as_str(), name_x, baseline));

            let [_, status_x, start_x, end_x, assignee_x] = self.column_offsets();

            if let Some(status) = row.status {
                let cx = status_x + 12.0;
                cells = cells.add(
                    Circle::new()
                        .set("cx", cx)
                        .set("cy", row.y + layout.row_height / 2.0)
                        .set("r", 5)
                        .set("fill", status.color()),
                );
                cells = cells.add(self.text(status.as_str(), cx + 10.0, baseline));
            }

            cells = cells.add(
                self.text(row.start_label.as_str(), start_x + 8.0, baseline)
                    .set("class", "gantt-date"),
            );
            cells = cells.add(
                self.text(row.end_label.as_str(), end_x + 8.0, baseline)
                    .set("class", "gantt-date"),
            );

            // Avatar, then the role in bold and the name when it differs
            if let Some(avatar) = &row.avatar {
                let cx = assignee_x + 18.0;
                let cy = row.y + layout.row_height / 2.0;
                cells = cells.add(self.render_avatar(avatar, cx, cy, 10.0));

                let mut x = cx + 16.0;
                let role = non_blank(row.assignee_role.as_deref());
                if let Some(role) = role {
                    cells = cells.add(
                        self.text(role, x, baseline)
                            .set("class", "gantt-role")
                            .set("font-weight", "bold"),
                    );
                    x += (role.chars().count() as f64 + 1.0) * self.font_size * 0.6;
                }
                let name = non_blank(row.assignee_name.as_deref()).filter(|n| Some(*n) != role);
                if let Some(name) = name {
                    cells = cells.add(
                        self.text(name, x, baseline)
                            .set("class", "gantt-assignee"),
                    );
                }
            }

            group = group.add(cells);
        }

        group
    }

    fn render_avatar(&self, avatar: &Avatar, cx: f64, cy: f64, radius: f64) -> Group {
        let group = Group::new().set("class", "gantt-avatar");
        match avatar {
            Avatar::Image { src, alt } => group.add(
                Image::new()
                    .set("href", src.as_str())
                    .set("x", cx - radius)
                    .set("y", cy - radius)
                    .set("width", radius * 2.0)
                    .set("height", radius * 2.0)
                    .set("aria-label", alt.as_str()),
            ),
            Avatar::Initials { text, color } => group
                .add(
                    Circle::new()
                        .set("cx", cx)
                        .set("cy", cy)
                        .set("r", radius)
                        .set("fill", color.as_str()),
                )
                .add(
                    self.text(text.as_str(), cx, cy + 3.0)
                        .set("font-size", self.font_size - 3.0)
                        .set("text-anchor", "middle")
                        .set("fill", "#ffffff"),
                ),
        }
    }

    fn text(&self, content: &str, x: f64, y: f64) -> Text {
        Text::new(content)
            .set("x", x)
            .set("y", y)
            .set("font-family", self.font_family.as_str())
            .set("font-size", self.font_size)
            .set("fill", self.theme.text_color.as_str())
    }
}

impl Renderer for SvgRenderer {
    type Output = String;

    fn render(&self, state: &ChartState) -> Result<String, RenderError> {
        let layout = &state.layout;
        if layout.day_count == 0 {
            return Err(RenderError::InvalidData("timeline has no days".into()));
        }

        let sidebar = self.sidebar_width();
        let header = self.header_height();
        let width = sidebar + layout.timeline_width;
        let height = header + layout.total_height;

        let mut document = Document::new()
            .set("width", width)
            .set("height", height)
            .set("viewBox", format!("0 0 {width} {height}"))
            .set("xmlns", "http://www.w3.org/2000/svg")
            .set("class", "gantt")
            .set("aria-label", state.project_name.as_str())
            .set("data-zoom", layout.zoom)
            .add(self.render_defs())
            .add(
                Rectangle::new()
                    .set("width", "100%")
                    .set("height", "100%")
                    .set("fill", self.theme.background_color.as_str()),
            )
            .add(self.render_header(layout));

        let mut timeline = Group::new()
            .set("class", "gantt-timeline")
            .set("transform", format!("translate({sidebar},{header})"))
            .add(self.render_grid(layout));
        if let Some(today) = self.render_today(layout) {
            timeline = timeline.add(today);
        }
        for row in &layout.rows {
            timeline = timeline.add(self.render_row(row));
        }
        if self.show_dependencies {
            timeline = timeline.add(self.render_connectors(state));
        }
        document = document.add(timeline);

        if self.show_sidebar {
            document = document.add(
                self.render_sidebar(layout)
                    .set("transform", format!("translate(0,{header})")),
            );
        }

        tracing::debug!(
            rows = layout.rows.len(),
            routes = state.routes.len(),
            width,
            height,
            "svg render complete"
        );
        write_document(&document)
    }
}

fn column_titles(locale: DateLocale) -> [&'static str; 5] {
    match locale {
        DateLocale::Es => [
            "Actividad",
            "Estado",
            "Fecha-inicio",
            "Fecha-fin",
            "Asignado/Rol",
        ],
        DateLocale::En => [
            "Activity",
            "Status",
            "Start date",
            "End date",
            "Assignee/Role",
        ],
    }
}

fn write_document(document: &Document) -> Result<String, RenderError> {
    let mut output = Vec::new();
    svg::write(&mut output, document)
        .map_err(|e| RenderError::Format(format!("Failed to write SVG: {}", e)))?;
    String::from_utf8(output).map_err(|e| RenderError::Format(format!("Invalid UTF-8: {}", e)))
}
