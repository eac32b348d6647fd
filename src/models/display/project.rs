//! Project display model

use serde::Serialize;
use tabled::Tabled;

use crate::client::models::Project;
use crate::output::formatters::{format_active, opt_date, opt_hours};

/// Project row for table/JSON output.
#[derive(Debug, Clone, Tabled, Serialize)]
pub struct ProjectDisplay {
    #[tabled(rename = "ID")]
    pub id: i64,

    #[tabled(rename = "NAME")]
    pub name: String,

    #[tabled(rename = "CLIENT")]
    pub client_id: i64,

    #[tabled(rename = "START")]
    pub start_date: String,

    #[tabled(rename = "END")]
    pub end_date: String,

    #[tabled(rename = "ESTIMATE")]
    pub estimated_hours: String,

    #[tabled(rename = "BUDGET")]
    pub budget: String,

    #[tabled(rename = "STATUS")]
    pub status: String,
}

impl From<Project> for ProjectDisplay {
    fn from(project: Project) -> Self {
        let budget = project
            .budget
            .map(|b| format!("{:.2} {}", b, project.currency))
            .unwrap_or_else(|| "--".to_string());

        Self {
            id: project.id,
            name: project.name,
            client_id: project.client_id,
            start_date: opt_date(&project.start_date),
            end_date: opt_date(&project.end_date),
            estimated_hours: opt_hours(&project.estimated_hours),
            budget,
            status: format_active(project.is_active),
        }
    }
}
