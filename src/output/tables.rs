use chrono::{DateTime, Utc};
use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::UTF8_FULL;
use comfy_table::{Cell, Color as TableColor, ContentArrangement, Table};

use efficient_gitlab::gitlab::types::{Job, Pipeline, PipelineVariable, ProjectPipeline, TriggerJob};

/// A domain type that can be laid out as one table row.
pub trait Tabular {
    fn header() -> Vec<&'static str>;
    fn row(&self) -> Vec<Cell>;
}

pub(super) fn render<T: Tabular>(items: &[T]) -> Table {
    let mut table = create_table();
    table.set_header(T::header());
    for item in items {
        table.add_row(item.row());
    }
    table
}

fn create_table() -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic);
    table
}

/// Pipelines and jobs share one status vocabulary.
fn status_cell(status: &str) -> Cell {
    let color = match status {
        "success" => TableColor::Green,
        "failed" => TableColor::Red,
        "running" | "pending" | "preparing" | "waiting_for_resource" | "canceling" => {
            TableColor::Yellow
        }
        "manual" | "scheduled" | "created" => TableColor::Cyan,
        _ => TableColor::DarkGrey,
    };
    Cell::new(status).fg(color)
}

fn duration_cell(seconds: Option<f64>) -> Cell {
    let Some(seconds) = seconds else {
        return Cell::new("-");
    };
    let minutes = seconds / 60.0;
    let text = format!("{minutes:.1}min");
    if minutes <= 10.0 {
        Cell::new(text).fg(TableColor::Green)
    } else if minutes <= 15.0 {
        Cell::new(text).fg(TableColor::Yellow)
    } else {
        Cell::new(text).fg(TableColor::Red)
    }
}

fn time_cell(at: &DateTime<Utc>) -> Cell {
    Cell::new(at.format("%Y-%m-%d %H:%M"))
}

fn short_sha(sha: &str) -> &str {
    sha.get(..8).unwrap_or(sha)
}

impl Tabular for ProjectPipeline {
    fn header() -> Vec<&'static str> {
        vec!["ID", "IID", "Ref", "SHA", "Status", "Source", "Updated"]
    }

    fn row(&self) -> Vec<Cell> {
        vec![
            Cell::new(self.id),
            Cell::new(self.iid),
            Cell::new(&self.ref_),
            Cell::new(short_sha(&self.sha)),
            status_cell(self.status.as_str()),
            Cell::new(self.source),
            time_cell(&self.updated_at),
        ]
    }
}

impl Tabular for Pipeline {
    fn header() -> Vec<&'static str> {
        vec!["ID", "Name", "Ref", "SHA", "Status", "User", "Started", "Duration"]
    }

    fn row(&self) -> Vec<Cell> {
        vec![
            Cell::new(self.id),
            Cell::new(self.name.as_deref().unwrap_or("-")),
            Cell::new(&self.ref_),
            Cell::new(short_sha(&self.sha)),
            status_cell(self.status.as_str()),
            Cell::new(&self.user.username),
            self.started_at.as_ref().map_or_else(|| Cell::new("-"), time_cell),
            duration_cell(self.duration),
        ]
    }
}

impl Tabular for PipelineVariable {
    fn header() -> Vec<&'static str> {
        vec!["Key", "Value", "Type"]
    }

    fn row(&self) -> Vec<Cell> {
        vec![
            Cell::new(&self.key),
            Cell::new(&self.value),
            Cell::new(self.variable_type.as_deref().unwrap_or("-")),
        ]
    }
}

impl Tabular for Job {
    fn header() -> Vec<&'static str> {
        vec!["ID", "Name", "Stage", "Status", "Pipeline", "Runner", "Duration"]
    }

    fn row(&self) -> Vec<Cell> {
        let runner = self
            .runner
            .as_ref()
            .map_or("-", |runner| runner.description.as_str());
        vec![
            Cell::new(self.id),
            Cell::new(&self.name),
            Cell::new(&self.stage),
            status_cell(self.status.as_str()),
            Cell::new(self.pipeline.id),
            Cell::new(runner),
            duration_cell(self.duration),
        ]
    }
}

impl Tabular for TriggerJob {
    fn header() -> Vec<&'static str> {
        vec!["ID", "Name", "Stage", "Status", "Downstream", "Downstream Status"]
    }

    fn row(&self) -> Vec<Cell> {
        vec![
            Cell::new(self.id),
            Cell::new(&self.name),
            Cell::new(&self.stage),
            status_cell(self.status.as_str()),
            Cell::new(self.downstream_pipeline.id),
            status_cell(self.downstream_pipeline.status.as_str()),
        ]
    }
}
