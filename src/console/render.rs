//! Plain-text rendering of the screens.

use std::fmt::Write;

use crate::errors::FormField;
use crate::store::Store;
use crate::views::{format_salary, status_label, DetailSection, FormView, ListView};

pub fn render_list(store: &Store, list: &ListView) -> String {
    let mut out = String::new();
    if store.is_loading() {
        out.push_str("Loading...\n");
        return out;
    }

    let filter = list.filter();
    let _ = writeln!(out, "Personnel ({})", list.visible_count(store));
    if !filter.is_default() {
        let _ = writeln!(
            out,
            "  filter: text={:?} department={} status={}",
            filter.text,
            filter.department.map_or("all", |d| d.as_str()),
            filter.status
        );
    }
    if let Some(error) = store.error() {
        let _ = writeln!(out, "  ! {}", error);
    }

    let visible = list.visible(store);
    if visible.is_empty() {
        out.push_str("  No records found\n");
        return out;
    }

    let _ = writeln!(
        out,
        "{:>5}  {:<24} {:<28} {:<22} {:<18} {:>12}  {}",
        "ID", "Name", "Email", "Department", "Position", "Salary", "Status"
    );
    for record in visible {
        let _ = writeln!(
            out,
            "{:>5}  {:<24} {:<28} {:<22} {:<18} {:>12}  {}",
            record.id,
            record.full_name(),
            record.email,
            record.department.as_str(),
            record.position,
            format_salary(record.salary),
            status_label(record.active)
        );
    }
    out
}

pub fn render_form(view: &FormView) -> String {
    let mut out = String::new();
    let title = match view.target() {
        Some(record) => format!("Edit record {}", record.id),
        None => "New record".to_string(),
    };
    let _ = writeln!(out, "{}", title);

    let form = view.form();
    for field in FormField::ALL {
        let _ = writeln!(out, "  {:<11} {}", field.label(), form.value(field));
        if let Some(message) = view.errors().get(field) {
            let _ = writeln!(out, "  {:<11} ^ {}", "", message);
        }
    }
    let _ = writeln!(out, "  {:<11} {}", "Active", if form.active { "yes" } else { "no" });

    if view.is_submitting() {
        out.push_str("  Submitting...\n");
    }
    out
}

pub fn render_detail(sections: &[DetailSection]) -> String {
    let mut out = String::new();
    for section in sections {
        let _ = writeln!(out, "{}", section.title);
        for (label, value) in &section.rows {
            let _ = writeln!(out, "  {:<12} {}", label, value);
        }
    }
    out.push_str("(edit | cancel)\n");
    out
}
