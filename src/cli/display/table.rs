//! Table builder wrapper around comfy-table for consistent list display.

use comfy_table::{presets, Cell, CellAlignment, ContentArrangement, Table};
use console::style;

use crate::cli::output::truncate;
use crate::domain::models::event::DeploymentEvent;

/// Create a standard list table with the given headers.
///
/// Uses the NOTHING preset (no borders) for a clean CLI aesthetic.
pub fn list_table(headers: &[&str]) -> Table {
    let mut table = Table::new();
    table
        .load_preset(presets::NOTHING)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(headers.iter().map(|h| {
            Cell::new(h.to_uppercase()).set_alignment(CellAlignment::Left)
        }));
    table
}

/// Render the table to string with a count header.
pub fn render_list(entity_name: &str, table: &Table, total: usize) -> String {
    if total == 0 {
        return format!("No {entity_name}s found.");
    }
    let noun = if total == 1 {
        entity_name.to_string()
    } else {
        format!("{entity_name}s")
    };
    format!("{} {noun}:\n{table}", style(total).bold())
}

/// One row per deployment event.
pub fn events_table(events: &[DeploymentEvent]) -> Table {
    let mut table = list_table(&["event", "deployment", "status", "previous", "timestamp"]);
    for event in events {
        table.add_row(vec![
            event.event.clone(),
            truncate(&event.deployment.id, 24),
            event.deployment.status.to_string(),
            event
                .previous_status
                .as_ref()
                .map_or_else(|| "-".to_string(), ToString::to_string),
            event.timestamp.clone(),
        ]);
    }
    table
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::models::deployment::{Deployment, DeploymentStatus};

    fn event(id: &str) -> DeploymentEvent {
        DeploymentEvent {
            event: "deployment.success".to_string(),
            deployment: Deployment::new(id, "success"),
            previous_status: Some(DeploymentStatus::Building),
            organization_id: "org".to_string(),
            project_id: "proj".to_string(),
            timestamp: "2024-01-01T00:00:00.000Z".to_string(),
        }
    }

    #[test]
    fn test_render_empty() {
        let table = events_table(&[]);
        assert_eq!(render_list("event", &table, 0), "No events found.");
    }

    #[test]
    fn test_events_table_rows() {
        let table = events_table(&[event("d1"), event("d2")]);
        let rendered = render_list("event", &table, 2);
        assert!(rendered.contains("events:"));
        assert!(rendered.contains("deployment.success"));
        assert!(rendered.contains("building"));
        assert!(rendered.contains("d2"));
    }
}
