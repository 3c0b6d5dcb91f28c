//! WebAssembly bindings for the ganttline chart widget
//!
//! The host page hands over a project document once, then drives the chart
//! with `toggleActivity`, `setZoom` and the zoom buttons. Every command runs a
//! full flatten → layout → route cycle and returns the new state directly, so
//! the page re-renders from the value it gets back.

mod logging;

use chrono::NaiveDate;
use serde::Serialize;
use wasm_bindgen::prelude::*;

use ganttline_core::dates::parse_local_date;
use ganttline_core::{DateLocale, Project};
use ganttline_layout::{ChartState, GanttChart, LayoutConfig, LayoutError};
use ganttline_render::{Renderer, SvgRenderer, TooltipContent};

/// Install the panic hook and console logging
#[wasm_bindgen(start)]
pub fn init() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
    logging::init(logging::DEFAULT_FILTER);
}

/// Install console logging with an `EnvFilter` directive, e.g. `ganttline_layout=debug`.
///
/// Returns `false` when logging was already installed.
#[wasm_bindgen(js_name = initLogging)]
pub fn init_logging(directive: &str) -> bool {
    logging::init(directive)
}

// ============================================================================
// Widget
// ============================================================================

/// Interactive Gantt chart bound to one project document
#[wasm_bindgen]
pub struct GanttWidget {
    chart: Option<GanttChart>,
    /// Used for every chart this widget lays out
    config: LayoutConfig,
    renderer: SvgRenderer,
    last_error: Option<String>,
}

#[wasm_bindgen]
impl GanttWidget {
    #[wasm_bindgen(constructor)]
    pub fn new() -> Self {
        Self {
            chart: None,
            config: LayoutConfig::default(),
            renderer: SvgRenderer::new(),
            last_error: None,
        }
    }

    /// Replace layout options with a (partial) camelCase config object.
    ///
    /// A loaded chart is laid out again with the new options.
    pub fn configure(&mut self, config: JsValue) -> JsValue {
        let result = serde_wasm_bindgen::from_value::<LayoutConfig>(config)
            .map_err(|e| e.to_string())
            .and_then(|config| self.configure_internal(config));
        self.respond(result)
    }

    /// Load a project document, with today taken from the local calendar
    pub fn load(&mut self, json: &str) -> JsValue {
        let result = self.load_internal(json, None);
        self.respond(result)
    }

    /// Load a project document with an explicit `YYYY-MM-DD` today
    #[wasm_bindgen(js_name = loadWithToday)]
    pub fn load_with_today(&mut self, json: &str, today: &str) -> JsValue {
        let result = parse_local_date(today)
            .map_err(|e| e.to_string())
            .and_then(|today| self.load_internal(json, Some(today)));
        self.respond(result)
    }

    #[wasm_bindgen(js_name = toggleActivity)]
    pub fn toggle_activity(&mut self, id: &str) -> JsValue {
        let result = self.toggle_internal(id);
        self.respond(result)
    }

    #[wasm_bindgen(js_name = setZoom)]
    pub fn set_zoom(&mut self, multiplier: f64) -> JsValue {
        let result = self.set_zoom_internal(multiplier);
        self.respond(result)
    }

    #[wasm_bindgen(js_name = zoomIn)]
    pub fn zoom_in(&mut self) -> JsValue {
        let result = self.zoom_internal(ZoomButton::In);
        self.respond(result)
    }

    #[wasm_bindgen(js_name = zoomOut)]
    pub fn zoom_out(&mut self) -> JsValue {
        let result = self.zoom_internal(ZoomButton::Out);
        self.respond(result)
    }

    #[wasm_bindgen(js_name = resetZoom)]
    pub fn reset_zoom(&mut self) -> JsValue {
        let result = self.zoom_internal(ZoomButton::Reset);
        self.respond(result)
    }

    /// Current zoom multiplier, 1 when nothing is loaded
    pub fn zoom(&self) -> f64 {
        self.chart.as_ref().map_or(1.0, GanttChart::zoom)
    }

    #[wasm_bindgen(js_name = hasChart)]
    pub fn has_chart(&self) -> bool {
        self.chart.is_some()
    }

    /// Current state as JSON, or an empty string when nothing is loaded
    #[wasm_bindgen(js_name = stateJson)]
    pub fn state_json(&self) -> String {
        self.chart
            .as_ref()
            .and_then(|chart| serde_json::to_string(chart.state()).ok())
            .unwrap_or_default()
    }

    /// The chart as SVG, or the error view when loading failed
    #[wasm_bindgen(js_name = renderSvg)]
    pub fn render_svg(&self) -> String {
        self.render_svg_internal().unwrap_or_else(|e| {
            tracing::error!(error = %e, "svg render failed");
            String::new()
        })
    }

    /// Error view with an arbitrary message
    #[wasm_bindgen(js_name = renderError)]
    pub fn render_error(&self, message: &str) -> String {
        self.renderer.render_error(message).unwrap_or_default()
    }

    /// Tooltip for a visible row, `null` when the row is not visible
    pub fn tooltip(&self, id: &str) -> JsValue {
        self.tooltip_internal(id)
            .and_then(|tip| serde_wasm_bindgen::to_value(&tip).ok())
            .unwrap_or(JsValue::NULL)
    }

    /// Tooltip for a visible row as plain text
    #[wasm_bindgen(js_name = tooltipText)]
    pub fn tooltip_text(&self, id: &str) -> Option<String> {
        self.tooltip_internal(id)
            .map(|tip| tip.to_text(self.renderer.locale))
    }

    #[wasm_bindgen(js_name = setDarkTheme)]
    pub fn set_dark_theme(&mut self, enabled: bool) {
        self.renderer = if enabled {
            self.renderer.clone().dark_theme()
        } else {
            SvgRenderer {
                theme: ganttline_render::SvgTheme::light(),
                ..self.renderer.clone()
            }
        };
    }

    /// `"es"` or `"en"`; a loaded chart is relabeled at once
    #[wasm_bindgen(js_name = setLocale)]
    pub fn set_locale(&mut self, locale: &str) -> JsValue {
        let result = self.set_locale_internal(locale);
        self.respond(result)
    }

    #[wasm_bindgen(js_name = lastError)]
    pub fn last_error(&self) -> Option<String> {
        self.last_error.clone()
    }
}

// Non-WASM methods for internal use and testing
impl GanttWidget {
    /// Apply new dimensions and locale, relaying out any loaded chart
    pub fn configure_internal(&mut self, config: LayoutConfig) -> Result<LayoutConfig, String> {
        config.validate().map_err(|e| e.to_string())?;
        if let Some(chart) = self.chart.as_mut() {
            chart
                .set_config(config.clone())
                .map_err(|e| e.to_string())?;
        }
        self.renderer.locale = config.locale;
        self.config = config;
        Ok(self.config.clone())
    }

    pub fn set_locale_internal(&mut self, locale: &str) -> Result<LayoutConfig, String> {
        let locale =
            parse_locale(locale).ok_or_else(|| format!("Unsupported locale '{locale}'"))?;
        let config = LayoutConfig {
            locale,
            ..self.config.clone()
        };
        self.configure_internal(config)
    }

    /// Parse and lay out a project document.
    ///
    /// On failure the previous chart is dropped so the page shows the error
    /// view instead of stale data.
    pub fn load_internal(
        &mut self,
        json: &str,
        today: Option<NaiveDate>,
    ) -> Result<ChartState, String> {
        let loaded = Project::from_json(json)
            .map_err(LayoutError::from)
            .and_then(|project| {
                let config = self.config.clone();
                match today {
                    Some(today) => GanttChart::with_today(project, config, today),
                    None => GanttChart::new(project, config),
                }
            });

        match loaded {
            Ok(chart) => {
                tracing::info!(
                    project = %chart.state().project_name,
                    rows = chart.state().layout.rows.len(),
                    "project loaded"
                );
                let state = chart.state().clone();
                self.chart = Some(chart);
                Ok(state)
            }
            Err(err) => {
                tracing::error!(error = %err, "failed to load project");
                self.chart = None;
                Err(err.to_string())
            }
        }
    }

    pub fn toggle_internal(&mut self, id: &str) -> Result<ChartState, String> {
        let chart = self.chart_mut()?;
        chart
            .toggle_activity(id)
            .cloned()
            .map_err(|e| e.to_string())
    }

    pub fn set_zoom_internal(&mut self, multiplier: f64) -> Result<ChartState, String> {
        let chart = self.chart_mut()?;
        chart
            .set_zoom(multiplier)
            .cloned()
            .map_err(|e| e.to_string())
    }

    pub fn zoom_internal(&mut self, button: ZoomButton) -> Result<ChartState, String> {
        let chart = self.chart_mut()?;
        let state = match button {
            ZoomButton::In => chart.zoom_in(),
            ZoomButton::Out => chart.zoom_out(),
            ZoomButton::Reset => chart.reset_zoom(),
        };
        state.cloned().map_err(|e| e.to_string())
    }

    pub fn render_svg_internal(&self) -> Result<String, String> {
        match &self.chart {
            Some(chart) => self
                .renderer
                .render(chart.state())
                .map_err(|e| e.to_string()),
            None => self
                .renderer
                .render_error(load_error_message(self.renderer.locale))
                .map_err(|e| e.to_string()),
        }
    }

    pub fn tooltip_internal(&self, id: &str) -> Option<TooltipContent> {
        let chart = self.chart.as_ref()?;
        chart
            .state()
            .layout
            .rows
            .iter()
            .find(|row| row.id == id)
            .map(|row| TooltipContent::for_row(row, self.renderer.locale))
    }

    fn chart_mut(&mut self) -> Result<&mut GanttChart, String> {
        self.chart
            .as_mut()
            .ok_or_else(|| "No project loaded".to_string())
    }

    fn respond<T: Serialize>(&mut self, result: Result<T, String>) -> JsValue {
        let payload = match result {
            Ok(data) => {
                self.last_error = None;
                WidgetResult {
                    success: true,
                    error: None,
                    data: Some(data),
                }
            }
            Err(e) => {
                self.last_error = Some(e.clone());
                WidgetResult {
                    success: false,
                    error: Some(e),
                    data: None,
                }
            }
        };
        serde_wasm_bindgen::to_value(&payload).unwrap_or(JsValue::NULL)
    }
}

impl Default for GanttWidget {
    fn default() -> Self {
        Self::new()
    }
}

/// Fixed-step zoom controls
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ZoomButton {
    In,
    Out,
    Reset,
}

#[derive(Serialize)]
struct WidgetResult<T> {
    success: bool,
    error: Option<String>,
    data: Option<T>,
}

fn parse_locale(value: &str) -> Option<DateLocale> {
    match value.trim().to_ascii_lowercase().as_str() {
        "es" => Some(DateLocale::Es),
        "en" => Some(DateLocale::En),
        _ => None,
    }
}

/// Message shown in place of the chart when the document cannot be loaded
pub fn load_error_message(locale: DateLocale) -> &'static str {
    match locale {
        DateLocale::Es => "Error al cargar los datos del proyecto.",
        DateLocale::En => "Failed to load the project data.",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ganttline_layout::Geometry;
    use pretty_assertions::assert_eq;

    const PROJECT: &str = r##"{
        "proyecto": "Widget",
        "fechaInicio": "2024-01-01",
        "fechaFin": "2024-01-10",
        "actividades": [
            {
                "id": "F1",
                "nombre": "Fase",
                "fechaInicio": "2024-01-01",
                "fechaFin": "2024-01-10",
                "color": "#2ecc71",
                "subactividades": [
                    {
                        "id": "T1",
                        "nombre": "Tarea",
                        "fechaInicio": "2024-01-02",
                        "fechaFin": "2024-01-04",
                        "color": "#3498db",
                        "progreso": 50,
                        "asignado": "Ana Gómez",
                        "rol": "Analista",
                        "descripcion": "Primera tarea"
                    }
                ]
            },
            {
                "id": "M1",
                "nombre": "Entrega",
                "fechaInicio": "2024-01-06",
                "fechaFin": "2024-01-06",
                "tipo": "hito",
                "color": "#e74c3c",
                "dependencias": ["T1"]
            }
        ]
    }"##;

    fn today() -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(2024, 1, 5)
    }

    fn loaded() -> GanttWidget {
        let mut widget = GanttWidget::new();
        widget.load_internal(PROJECT, today()).unwrap();
        widget
    }

    #[test]
    fn load_returns_initial_state() {
        let mut widget = GanttWidget::new();
        let state = widget.load_internal(PROJECT, today()).unwrap();
        assert!(widget.has_chart());
        assert_eq!(state.project_name, "Widget");
        assert_eq!(state.layout.rows.len(), 3);
        assert_eq!(state.routes.len(), 1);
        assert_eq!(state.layout.today_offset, Some(200.0));
    }

    #[test]
    fn bad_document_drops_chart_and_shows_error_view() {
        let mut widget = loaded();
        let err = widget.load_internal("{ not json", today()).unwrap_err();
        assert!(err.contains("Invalid project document"));
        assert!(!widget.has_chart());

        let svg = widget.render_svg_internal().unwrap();
        assert!(svg.contains("gantt-error"));
        assert!(svg.contains("Error al cargar los datos del proyecto."));
    }

    #[test]
    fn bad_leaf_date_fails_load() {
        let json = PROJECT.replace("2024-01-04", "2024-01-40");
        let err = GanttWidget::new().load_internal(&json, today()).unwrap_err();
        assert!(err.contains("T1"));
    }

    #[test]
    fn commands_without_chart_fail() {
        let mut widget = GanttWidget::new();
        assert_eq!(widget.toggle_internal("T1").unwrap_err(), "No project loaded");
        assert!(widget.set_zoom_internal(2.0).is_err());
        assert!(widget.zoom_internal(ZoomButton::In).is_err());
        assert_eq!(widget.zoom(), 1.0);
    }

    #[test]
    fn toggle_collapses_and_expands() {
        let mut widget = loaded();
        let collapsed = widget.toggle_internal("F1").unwrap();
        assert_eq!(collapsed.layout.rows.len(), 2);
        assert!(collapsed.routes.is_empty());
        assert!(matches!(
            collapsed.layout.rows[0].geometry,
            Some(Geometry::Bar(bar)) if bar.parent
        ));

        let expanded = widget.toggle_internal("F1").unwrap();
        assert_eq!(expanded.layout.rows.len(), 3);

        let unchanged = widget.toggle_internal("nope").unwrap();
        assert_eq!(unchanged, expanded);
    }

    #[test]
    fn zoom_commands() {
        let mut widget = loaded();
        let state = widget.set_zoom_internal(2.0).unwrap();
        assert_eq!(state.layout.day_width, 100.0);
        assert_eq!(widget.zoom(), 2.0);

        assert!(widget.set_zoom_internal(-1.0).is_err());
        assert_eq!(widget.zoom(), 2.0);

        widget.zoom_internal(ZoomButton::In).unwrap();
        assert_eq!(widget.zoom(), 2.2);
        widget.zoom_internal(ZoomButton::Reset).unwrap();
        assert_eq!(widget.zoom(), 1.0);
        widget.zoom_internal(ZoomButton::Out).unwrap();
        assert_eq!(widget.zoom(), 0.8);
    }

    #[test]
    fn renders_loaded_chart() {
        let widget = loaded();
        let svg = widget.render_svg_internal().unwrap();
        assert!(svg.contains("class=\"gantt\""));
        assert!(svg.contains("data-toggle=\"F1\""));
    }

    #[test]
    fn tooltip_for_visible_rows_only() {
        let mut widget = loaded();
        let tip = widget.tooltip_internal("T1").unwrap();
        assert_eq!(tip.role.as_deref(), Some("Analista"));
        assert_eq!(tip.description.as_deref(), Some("Primera tarea"));

        widget.toggle_internal("F1").unwrap();
        assert!(widget.tooltip_internal("T1").is_none());
    }

    #[test]
    fn locale_switch() {
        let mut widget = GanttWidget::new();
        assert!(widget.set_locale_internal("fr").is_err());
        assert!(widget.set_locale_internal("EN").is_ok());
        widget.load_internal(PROJECT, today()).unwrap();
        assert_eq!(
            widget.tooltip_text("M1").as_deref(),
            Some("Entrega\nStart: 06 Jan\nEnd: 06 Jan\nProgress: 0%")
        );
        assert!(widget.render_svg_internal().unwrap().contains("January 2024"));
    }

    #[test]
    fn locale_switch_relabels_loaded_chart() {
        let mut widget = loaded();
        widget.zoom_internal(ZoomButton::In).unwrap();
        assert!(widget.render_svg_internal().unwrap().contains("enero de 2024"));

        let config = widget.set_locale_internal("en").unwrap();
        assert_eq!(config.locale, DateLocale::En);

        let svg = widget.render_svg_internal().unwrap();
        assert!(svg.contains("January 2024"));
        assert!(svg.contains("Start date"));
        assert!(!svg.contains("enero de 2024"));
        assert!(!svg.contains("Fecha-inicio"));
        assert_eq!(widget.zoom(), 1.2);
    }

    #[test]
    fn configure_relays_out_loaded_chart() {
        let mut widget = loaded();
        let config = LayoutConfig::default().cell_width(20.0);
        widget.configure_internal(config).unwrap();
        assert_eq!(widget.set_zoom_internal(1.0).unwrap().layout.day_width, 20.0);

        let bad = LayoutConfig::default().cell_width(0.0);
        assert!(widget.configure_internal(bad).is_err());
        assert_eq!(widget.set_zoom_internal(1.0).unwrap().layout.day_width, 20.0);
    }

    #[test]
    fn state_json_uses_camel_case() {
        let widget = loaded();
        let json: serde_json::Value = serde_json::from_str(&widget.state_json()).unwrap();
        assert_eq!(json["layout"]["dayWidth"], 50.0);
        assert_eq!(GanttWidget::new().state_json(), "");
    }
}
