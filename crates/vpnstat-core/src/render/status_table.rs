//! Bordered status table for a snapshot.
//!
//! ```text
//! +-- vpn status ---+
//! | Name   | Status |
//! +--------+--------+
//! | office | ON     |
//! | home   | OFF    |
//! +--------+--------+
//! ```

use crate::model::Snapshot;

/// Output for a snapshot with no entities
pub const EMPTY_TABLE_MESSAGE: &str = "No entities configured.";

const NAME_HEADER: &str = "Name";
const STATUS_HEADER: &str = "Status";

/// Render the full status table for `snapshot`
///
/// Every line, including the last, ends with `\n`. Column widths grow to fit
/// the longest name and never shrink below the header text. The title
/// `" <app_name> status "` is centred in the top border; when it is wider
/// than the table the border simply grows to hold it.
pub fn render_status_table(snapshot: &Snapshot, app_name: &str) -> String {
    if snapshot.is_empty() {
        return format!("{}\n", EMPTY_TABLE_MESSAGE);
    }

    let name_width = snapshot
        .names()
        .map(display_width)
        .chain(std::iter::once(display_width(NAME_HEADER)))
        .max()
        .unwrap_or(0);
    let status_width = display_width(STATUS_HEADER);
    let total_width = name_width + 3 + status_width + 3 + 1;

    let title = format!(" {} status ", app_name);
    let title_len = display_width(&title);
    let available = total_width - 2;
    let slack = available.saturating_sub(title_len);
    let left = slack / 2;
    let right = slack - left;

    let rule = format!(
        "+{}+{}+\n",
        "-".repeat(name_width + 2),
        "-".repeat(status_width + 2)
    );

    let mut out = String::new();
    out.push_str(&format!("+{}{}{}+\n", "-".repeat(left), title, "-".repeat(right)));
    out.push_str(&row(NAME_HEADER, STATUS_HEADER, name_width, status_width));
    out.push_str(&rule);
    for entity in snapshot {
        out.push_str(&row(
            &entity.name,
            entity.state.label(),
            name_width,
            status_width,
        ));
    }
    out.push_str(&rule);
    out
}

fn row(name: &str, status: &str, name_width: usize, status_width: usize) -> String {
    format!(
        "| {}{} | {}{} |\n",
        name,
        " ".repeat(name_width - display_width(name)),
        status,
        " ".repeat(status_width - display_width(status)),
    )
}

fn display_width(s: &str) -> usize {
    s.chars().count()
}
