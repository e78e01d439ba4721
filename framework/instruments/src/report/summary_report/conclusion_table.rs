use crosswind_summary_model::{SystemConclusion, SystemStatus};
use tabled::Tabled;

#[derive(Tabled)]
pub struct ConclusionRow {
    #[tabled(rename = "System")]
    pub system: String,
    #[tabled(rename = "Scenarios Run")]
    pub scenarios_run: usize,
    #[tabled(rename = "Global Avg Latency", display = "latency")]
    pub global_average: Option<f64>,
    #[tabled(rename = "Endpoints Failed", display = "failed_count")]
    pub failed: usize,
    #[tabled(rename = "Status")]
    pub status: SystemStatus,
}

impl From<&SystemConclusion> for ConclusionRow {
    fn from(conclusion: &SystemConclusion) -> Self {
        Self {
            system: conclusion.name.clone(),
            scenarios_run: conclusion.scenarios_run,
            global_average: conclusion.global_average,
            failed: conclusion.failed,
            status: conclusion.status,
        }
    }
}

#[derive(Tabled)]
pub struct FailureRow {
    #[tabled(rename = "System")]
    pub system: String,
    #[tabled(rename = "Scenario")]
    pub scenario: String,
    #[tabled(rename = "Error")]
    pub error: String,
}

fn latency(value: &Option<f64>) -> String {
    match value {
        Some(seconds) => format!("{seconds:.4}s"),
        None => "N/A".to_string(),
    }
}

fn failed_count(n: &usize) -> String {
    if *n == 0 {
        "-".to_string()
    } else {
        n.to_string()
    }
}
