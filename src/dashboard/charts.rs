//! Dashboard chart specifications
//!
//! The charts carry mock data. Drawing is delegated to an injected
//! [`ChartRenderer`]; a chart is only rendered when its canvas exists.

use serde::Serialize;
use thiserror::Error;

pub const APPOINTMENTS_CANVAS: &str = "appointments-chart";
pub const DEPARTMENT_CANVAS: &str = "department-chart";
pub const REVENUE_CANVAS: &str = "revenue-chart";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ChartKind {
    Line,
    Doughnut,
    Bar,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LegendPosition {
    Top,
    Right,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Dataset {
    pub label: Option<String>,
    pub data: Vec<f64>,
    /// One color for the whole series, or one per data point
    pub colors: Vec<String>,
    pub fill: bool,
    pub tension: Option<f64>,
}

/// Everything a renderer needs to draw one chart
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartSpec {
    pub canvas_id: String,
    pub kind: ChartKind,
    pub labels: Vec<String>,
    pub datasets: Vec<Dataset>,
    pub responsive: bool,
    pub maintain_aspect_ratio: bool,
    pub begin_at_zero: bool,
    pub legend: Option<LegendPosition>,
    /// Prefix for y-axis tick labels, e.g. `$`
    pub tick_prefix: Option<String>,
}

impl ChartSpec {
    fn new(canvas_id: &str, kind: ChartKind, labels: &[&str], datasets: Vec<Dataset>) -> Self {
        Self {
            canvas_id: canvas_id.to_string(),
            kind,
            labels: labels.iter().map(|l| l.to_string()).collect(),
            datasets,
            responsive: true,
            maintain_aspect_ratio: false,
            begin_at_zero: false,
            legend: None,
            tick_prefix: None,
        }
    }

    /// y-axis tick label for a value
    pub fn tick_label(&self, value: f64) -> String {
        format!("{}{}", self.tick_prefix.as_deref().unwrap_or(""), value)
    }
}

const MONTHS: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

/// Monthly appointments, patients by department, revenue
pub fn default_charts() -> Vec<ChartSpec> {
    let mut appointments = ChartSpec::new(
        APPOINTMENTS_CANVAS,
        ChartKind::Line,
        &MONTHS,
        vec![Dataset {
            label: Some("Appointments".to_string()),
            data: vec![65.0, 59.0, 80.0, 81.0, 56.0, 55.0, 40.0, 45.0, 60.0, 70.0, 75.0, 90.0],
            colors: vec!["#1a73e8".to_string()],
            fill: false,
            tension: Some(0.1),
        }],
    );
    appointments.begin_at_zero = true;

    let mut departments = ChartSpec::new(
        DEPARTMENT_CANVAS,
        ChartKind::Doughnut,
        &["Cardiology", "Neurology", "Orthopedics", "Pediatrics", "Dermatology", "Other"],
        vec![Dataset {
            label: None,
            data: vec![25.0, 20.0, 15.0, 18.0, 12.0, 10.0],
            colors: ["#1a73e8", "#34a853", "#fbbc04", "#ea4335", "#9c27b0", "#607d8b"]
                .iter()
                .map(|c| c.to_string())
                .collect(),
            fill: true,
            tension: None,
        }],
    );
    departments.legend = Some(LegendPosition::Right);

    let mut revenue = ChartSpec::new(
        REVENUE_CANVAS,
        ChartKind::Bar,
        &MONTHS[..6],
        vec![Dataset {
            label: Some("Revenue".to_string()),
            data: vec![12000.0, 19000.0, 15000.0, 17000.0, 22000.0, 25000.0],
            colors: vec!["#34a853".to_string()],
            fill: true,
            tension: None,
        }],
    );
    revenue.begin_at_zero = true;
    revenue.tick_prefix = Some("$".to_string());

    vec![appointments, departments, revenue]
}

#[derive(Error, Debug)]
pub enum ChartError {
    #[error("Canvas not found: {0}")]
    CanvasMissing(String),

    #[error("Render failed: {0}")]
    Render(String),
}

/// Drawing backend supplied by the host (e.g. a Chart.js binding)
pub trait ChartRenderer {
    fn render(&mut self, spec: &ChartSpec) -> Result<(), ChartError>;
}

/// What happened to each chart
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ChartReport {
    pub rendered: Vec<String>,
    /// Canvas absent from the page
    pub skipped: Vec<String>,
    /// (canvas id, error message)
    pub failed: Vec<(String, String)>,
    pub renderer_missing: bool,
}

/// Render every chart whose canvas exists. A failing chart does not stop
/// the others.
pub fn init_charts(
    renderer: Option<&mut dyn ChartRenderer>,
    specs: &[ChartSpec],
    has_canvas: impl Fn(&str) -> bool,
) -> ChartReport {
    let Some(renderer) = renderer else {
        tracing::warn!("No chart renderer available, charts will not be rendered");
        return ChartReport {
            renderer_missing: true,
            ..ChartReport::default()
        };
    };

    let mut report = ChartReport::default();
    for spec in specs {
        if !has_canvas(&spec.canvas_id) {
            tracing::debug!(canvas = %spec.canvas_id, "Chart canvas absent, skipping");
            report.skipped.push(spec.canvas_id.clone());
            continue;
        }
        match renderer.render(spec) {
            Ok(()) => report.rendered.push(spec.canvas_id.clone()),
            Err(e) => {
                tracing::warn!(canvas = %spec.canvas_id, error = %e, "Chart failed to render");
                report.failed.push((spec.canvas_id.clone(), e.to_string()));
            }
        }
    }
    report
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct Recording {
        drawn: Vec<(String, ChartKind)>,
        fail_on: Option<&'static str>,
    }

    impl ChartRenderer for Recording {
        fn render(&mut self, spec: &ChartSpec) -> Result<(), ChartError> {
            if self.fail_on == Some(spec.canvas_id.as_str()) {
                return Err(ChartError::Render("context lost".into()));
            }
            self.drawn.push((spec.canvas_id.clone(), spec.kind));
            Ok(())
        }
    }

    #[test]
    fn test_default_charts() {
        let charts = default_charts();
        assert_eq!(charts.len(), 3);
        assert_eq!(charts[0].labels.len(), 12);
        assert_eq!(charts[0].datasets[0].data[11], 90.0);
        assert_eq!(charts[1].kind, ChartKind::Doughnut);
        assert_eq!(charts[1].datasets[0].data.iter().sum::<f64>(), 100.0);
        assert_eq!(charts[2].labels, vec!["Jan", "Feb", "Mar", "Apr", "May", "Jun"]);
        assert_eq!(charts[2].tick_label(12000.0), "$12000");
    }

    #[test]
    fn test_only_present_canvases() {
        let mut renderer = Recording::default();
        let report = init_charts(Some(&mut renderer), &default_charts(), |id| {
            id != DEPARTMENT_CANVAS
        });
        assert_eq!(report.rendered, vec![APPOINTMENTS_CANVAS, REVENUE_CANVAS]);
        assert_eq!(report.skipped, vec![DEPARTMENT_CANVAS]);
        assert_eq!(renderer.drawn[1].1, ChartKind::Bar);
    }

    #[test]
    fn test_failure_does_not_stop_others() {
        let mut renderer = Recording {
            fail_on: Some(APPOINTMENTS_CANVAS),
            ..Recording::default()
        };
        let report = init_charts(Some(&mut renderer), &default_charts(), |_| true);
        assert_eq!(report.failed.len(), 1);
        assert_eq!(report.rendered.len(), 2);
    }

    #[test]
    fn test_missing_renderer() {
        let report = init_charts(None, &default_charts(), |_| true);
        assert!(report.renderer_missing);
        assert!(report.rendered.is_empty());
    }
}
