use std::fmt::Write;

use serde::Serialize;

use crate::graph::LineId;
use crate::network::Network;
use crate::path::SearchStrategy;
use crate::routing::RoutePlan;
use crate::stations::StationId;

/// Presentation style for turning a [`RouteSummary`] into text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteRenderMode {
    /// Header, one numbered line per station, then the total.
    PlainText,
    /// Stations joined on a single line, then the total.
    Compact,
}

/// Endpoint within a planned route.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct RouteEndpoint {
    pub id: StationId,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

impl RouteEndpoint {
    fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or("<unknown>")
    }
}

/// Station visited along a planned route.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct RouteStep {
    pub index: usize,
    pub id: StationId,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Line taken to reach this station; absent for the start.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub line: Option<LineId>,
    /// Length of the leg ending at this station in kilometres.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub distance: Option<f64>,
}

impl RouteStep {
    fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or("<unknown>")
    }
}

/// Structured representation of a planned route that higher-level consumers can serialise.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct RouteSummary {
    pub strategy: SearchStrategy,
    pub hops: usize,
    pub total_distance: f64,
    pub start: RouteEndpoint,
    pub goal: RouteEndpoint,
    pub steps: Vec<RouteStep>,
}

impl RouteSummary {
    /// Convert a [`RoutePlan`] into a structured summary with resolved station names.
    pub fn from_plan(network: &Network, plan: &RoutePlan) -> Self {
        let name_of = |id: StationId| network.station_name(id).map(str::to_string);

        let steps = plan
            .steps()
            .iter()
            .enumerate()
            .map(|(index, &id)| {
                let arriving = index.checked_sub(1).and_then(|leg| plan.legs().get(leg));
                RouteStep {
                    index,
                    id,
                    name: name_of(id),
                    line: arriving.map(|leg| leg.line),
                    distance: arriving.map(|leg| leg.distance),
                }
            })
            .collect();

        Self {
            strategy: plan.strategy,
            hops: plan.hop_count(),
            total_distance: plan.distance(),
            start: RouteEndpoint {
                id: plan.start,
                name: name_of(plan.start),
            },
            goal: RouteEndpoint {
                id: plan.goal,
                name: name_of(plan.goal),
            },
            steps,
        }
    }

    /// Render the summary using the requested textual mode.
    pub fn render(&self, mode: RouteRenderMode) -> String {
        match mode {
            RouteRenderMode::PlainText => self.render_plain(),
            RouteRenderMode::Compact => self.render_compact(),
        }
    }

    fn header(&self) -> String {
        format!(
            "Route: {} -> {} ({} hops, strategy: {})",
            self.start.display_name(),
            self.goal.display_name(),
            self.hops,
            self.strategy
        )
    }

    fn render_plain(&self) -> String {
        let mut buffer = String::new();
        let _ = writeln!(buffer, "{}", self.header());
        for step in &self.steps {
            let _ = write!(
                buffer,
                "{:>3}: {} ({})",
                step.index,
                step.display_name(),
                step.id
            );
            if let (Some(line), Some(distance)) = (step.line, step.distance) {
                let _ = write!(buffer, " via line {line}, {distance:.2} km");
            }
            buffer.push('\n');
        }
        let _ = writeln!(buffer, "Total distance: {:.2} km", self.total_distance);
        buffer
    }

    fn render_compact(&self) -> String {
        let mut buffer = String::new();
        let _ = writeln!(buffer, "{}", self.header());
        let joined = self
            .steps
            .iter()
            .map(|step| format!("{} ({})", step.id, step.display_name()))
            .collect::<Vec<_>>()
            .join(", ");
        let _ = writeln!(buffer, "{joined}");
        let _ = writeln!(buffer, "Total distance: {:.2} km", self.total_distance);
        buffer
    }
}
