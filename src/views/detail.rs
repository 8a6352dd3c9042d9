//! Read-only detail screen for one record.

use crate::models::Record;

pub const DISPLAY_DATE: &str = "%d.%m.%Y";
pub const DISPLAY_TIMESTAMP: &str = "%d.%m.%Y %H:%M:%S";

/// One titled block of label/value rows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DetailSection {
    pub title: &'static str,
    pub rows: Vec<(&'static str, String)>,
}

pub fn status_label(active: bool) -> &'static str {
    if active {
        "Active"
    } else {
        "Inactive"
    }
}

/// Format an amount with comma thousands separators, keeping two decimals only when
/// there is a fractional part.
pub fn format_salary(amount: f64) -> String {
    let cents = (amount.abs() * 100.0).round() as u64;
    let whole = cents / 100;
    let fraction = cents % 100;

    let digits = whole.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    let sign = if amount < 0.0 && cents > 0 { "-" } else { "" };
    if fraction == 0 {
        format!("{}{}", sign, grouped)
    } else {
        format!("{}{}.{:02}", sign, grouped, fraction)
    }
}

/// Sections shown for a record: personal, job and, once persisted with timestamps,
/// system information.
pub fn detail_sections(record: &Record) -> Vec<DetailSection> {
    let mut sections = vec![
        DetailSection {
            title: "Personal",
            rows: vec![
                ("Name", record.full_name()),
                ("Email", record.email.clone()),
                ("Phone", record.phone.clone()),
                ("Status", status_label(record.active).to_string()),
            ],
        },
        DetailSection {
            title: "Job",
            rows: vec![
                ("Department", record.department.to_string()),
                ("Position", record.position.clone()),
                ("Salary", format_salary(record.salary)),
                ("Start date", record.start_date.format(DISPLAY_DATE).to_string()),
            ],
        },
    ];

    if let Some(created_at) = record.created_at {
        let mut rows = vec![(
            "Created",
            created_at.format(DISPLAY_TIMESTAMP).to_string(),
        )];
        if let Some(updated_at) = record.updated_at {
            rows.push(("Last updated", updated_at.format(DISPLAY_TIMESTAMP).to_string()));
        }
        sections.push(DetailSection {
            title: "System",
            rows,
        });
    }

    sections
}
