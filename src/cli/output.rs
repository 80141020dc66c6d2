use serde::Serialize;

use crate::model::FilterMode;
use crate::ops::filter::VisibleTask;
use crate::ops::summary::Summary;

// ---------------------------------------------------------------------------
// JSON output structs
// ---------------------------------------------------------------------------

#[derive(Serialize)]
pub struct TaskJson {
    /// 1-based position under the filter used for the listing
    pub pos: usize,
    pub text: String,
    pub completed: bool,
}

#[derive(Serialize)]
pub struct ListJson {
    pub filter: FilterMode,
    pub tasks: Vec<TaskJson>,
    pub summary: Summary,
}

/// Result of a single mutating command
#[derive(Serialize)]
pub struct ChangeJson {
    pub action: &'static str,
    pub changed: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub task: Option<TaskJson>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cleared: Option<usize>,
    pub summary: Summary,
}

// ---------------------------------------------------------------------------
// Conversions
// ---------------------------------------------------------------------------

pub fn task_to_json(pos: usize, item: &VisibleTask<'_>) -> TaskJson {
    TaskJson {
        pos,
        text: item.task.text.clone(),
        completed: item.task.completed,
    }
}

pub fn list_to_json(filter: FilterMode, visible: &[VisibleTask<'_>], summary: Summary) -> ListJson {
    ListJson {
        filter,
        tasks: visible
            .iter()
            .enumerate()
            .map(|(i, item)| task_to_json(i + 1, item))
            .collect(),
        summary,
    }
}

// ---------------------------------------------------------------------------
// Human-readable formatting
// ---------------------------------------------------------------------------

/// Format one task as `<pos>. [x] text`, right-aligning positions to `width`
pub fn format_task_line(pos: usize, completed: bool, text: &str, width: usize) -> String {
    let check = if completed { 'x' } else { ' ' };
    format!("{:>width$}. [{}] {}", pos, check, text, width = width)
}

/// Summary line printed under a listing
pub fn format_summary(summary: &Summary) -> String {
    let mut line = summary.remaining_label();
    if summary.has_completed() {
        line.push_str(&format!(", {} completed", summary.completed));
    }
    line
}

/// Numbered listing plus summary line
pub fn format_list(filter: FilterMode, visible: &[VisibleTask<'_>], summary: &Summary) -> Vec<String> {
    let mut lines = Vec::new();
    if visible.is_empty() {
        lines.push(match filter {
            FilterMode::All => "no tasks".to_string(),
            other => format!("no {} tasks", other),
        });
    } else {
        let width = visible.len().to_string().len();
        for (i, item) in visible.iter().enumerate() {
            lines.push(format_task_line(
                i + 1,
                item.task.completed,
                &item.task.text,
                width,
            ));
        }
    }
    lines.push(String::new());
    lines.push(format_summary(summary));
    lines
}

/// Facts printed by `tk stats`
pub fn format_stats(summary: &Summary) -> Vec<String> {
    vec![
        format!("total:     {}", summary.total),
        format!("remaining: {}", summary.remaining),
        format!("completed: {}", summary.completed),
    ]
}
