use crate::domain::{
    bucket_totals, budget_label, flatten_context, format_duration, Category, Context, RowKind,
    Totals,
};
use chrono::{DateTime, Duration, Local};
use std::collections::HashSet;

/// Format percentage with 1 decimal place
fn format_percent(value: f64) -> String {
    format!("{:.1}%", value)
}

fn completion_percent(totals: &Totals) -> f64 {
    if totals.required > Duration::zero() {
        (totals.spent.num_seconds() as f64 / totals.required.num_seconds() as f64) * 100.0
    } else {
        0.0
    }
}

/// Render the whole tree as a markdown summary
pub fn generate_summary(context: &Context, now: DateTime<Local>) -> String {
    let mut report = String::new();

    // Header
    report.push_str(&format!("# Time Summary - {}\n\n", now.format("%Y-%m-%d %H:%M")));

    // Overview Section
    report.push_str("## Overview\n\n");
    report.push_str(&format!("- **Tasks:** {}\n", context.task_count()));
    report.push_str(&format!("- **Logs:** {}\n", context.logs.len()));
    for &category in Category::all() {
        let totals = bucket_totals(context, category);
        report.push_str(&format!(
            "- **{}:** {} spent of {} ({})\n",
            category.label(),
            format_duration(totals.spent),
            format_duration(totals.required),
            format_percent(completion_percent(&totals)),
        ));
    }
    report.push('\n');

    // Tree Section (remaining / required per row)
    report.push_str("## Tasks\n\n");
    for row in flatten_context(context, &HashSet::new()) {
        match row.kind {
            RowKind::Bucket(category) => {
                let totals = bucket_totals(context, category);
                report.push_str(&format!(
                    "### {} ({})\n\n",
                    category.label(),
                    budget_label(totals.remaining(), totals.required)
                ));
            }
            RowKind::Task(id) => {
                let Some(task) = context.task(id) else {
                    continue;
                };
                let indent = "  ".repeat(row.depth.saturating_sub(1));
                report.push_str(&format!(
                    "{}- {} ({})\n",
                    indent,
                    task.title,
                    budget_label(task.remaining(), task.total_required())
                ));
            }
        }
    }

    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{build_context, WindowPolicy};
    use crate::persistence::{RawDocument, RawLog, RawTask};
    use pretty_assertions::assert_eq;

    #[test]
    fn test_generate_summary() {
        let now = Local::now();
        let raw = RawDocument {
            tasks: vec![
                RawTask {
                    id: 1,
                    category: Category::Other,
                    title: "Thesis".to_string(),
                    time_required: 0,
                    created_at: now,
                    parent_id: None,
                },
                RawTask {
                    id: 2,
                    category: Category::Other,
                    title: "Chapter 1".to_string(),
                    time_required: 120,
                    created_at: now,
                    parent_id: Some(1),
                },
            ],
            logs: vec![RawLog {
                task_id: 2,
                duration: 30,
                created_at: now,
            }],
        };
        let ctx = build_context(&raw, &WindowPolicy::default(), now).unwrap();

        let report = generate_summary(&ctx, now);
        let tasks_section = report.split("## Tasks\n\n").nth(1).unwrap();
        assert_eq!(
            tasks_section,
            "### Daily (0m / 0m)\n\n\
             ### Weekly (0m / 0m)\n\n\
             ### Long Term (1h 30m / 2h)\n\n\
             - Thesis (1h 30m / 2h)\n  \
             - Chapter 1 (1h 30m / 2h)\n"
        );
        assert!(report.contains("- **Long Term:** 30m spent of 2h (25.0%)"));
        assert!(report.contains("- **Tasks:** 2"));
    }
}
