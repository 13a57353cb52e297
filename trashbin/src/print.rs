use chrono::{DateTime, Local, Utc};
use trashbin_core::{
    model::view, BatchReport, FailureSummary, Model, Permissions, Settings, TrashEntry,
};

const PERMISSION_CHARS: [(Permissions, char); 5] = [
    (Permissions::READ, 'r'),
    (Permissions::UPDATE, 'u'),
    (Permissions::CREATE, 'c'),
    (Permissions::DELETE, 'd'),
    (Permissions::SHARE, 's'),
];

pub fn listing(model: &Model, settings: &Settings) {
    for crumb in model.view.breadcrumbs() {
        tracing::trace!("breadcrumb {} -> {}", crumb.label, crumb.href(&settings.web_root));
    }

    let crumbs: Vec<_> = model
        .view
        .breadcrumbs()
        .iter()
        .map(|crumb| crumb.label.as_str())
        .collect();

    println!("{}", crumbs.join(" / "));

    if model.is_empty() {
        println!("No deleted files");
        return;
    }

    for entry in view::sorted(model.view.entries(), settings.sort) {
        println!("{}", row(entry));
    }
}

pub fn report(report: &BatchReport) {
    if !report.succeeded.is_empty() {
        let verb = match report.kind {
            trashbin_core::BatchKind::Delete => "deleted",
            trashbin_core::BatchKind::Restore => "restored",
        };

        println!("{} {} of {} entries", verb, report.succeeded.len(), report.requested.len());
    }
}

pub fn failures(summaries: &[FailureSummary]) {
    for summary in summaries {
        eprintln!("{}", summary);
    }
}

fn row(entry: &TrashEntry) -> String {
    let kind = if entry.is_directory() { 'd' } else { '-' };
    let size = entry.size.map(print_size).unwrap_or_else(|| "-".to_string());
    let name = if entry.display_name == entry.stored_name {
        entry.display_name.clone()
    } else {
        format!("{} ({})", entry.display_name, entry.stored_name)
    };

    format!(
        "{}{} {:>16} {:>8}  {}",
        kind,
        print_permissions(entry.permissions),
        print_time(entry.mtime),
        size,
        name
    )
}

fn print_permissions(permissions: Permissions) -> String {
    PERMISSION_CHARS
        .iter()
        .map(|(flag, c)| if permissions.contains(*flag) { *c } else { '-' })
        .collect()
}

fn print_time(millis: u64) -> String {
    i64::try_from(millis)
        .ok()
        .and_then(DateTime::<Utc>::from_timestamp_millis)
        .map(|time| time.with_timezone(&Local).format("%Y-%m-%d %H:%M").to_string())
        .unwrap_or_else(|| "-".to_string())
}

fn print_size(bytes: u64) -> String {
    const SUFFIXES: [&str; 5] = ["B", "K", "M", "G", "T"];
    let mut value = bytes as f64;
    let mut idx = 0usize;

    while value >= 1024.0 && idx < SUFFIXES.len() - 1 {
        value /= 1024.0;
        idx += 1;
    }

    if idx == 0 {
        format!("{:.0} {}", value, SUFFIXES[idx])
    } else {
        format!("{:.1} {}", value, SUFFIXES[idx])
    }
}
