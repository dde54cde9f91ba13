// Text rendering of a session snapshot

use crate::models::{DATE_FORMAT, Status};
use crate::session::{ItemView, Snapshot};
use colored::Colorize;

pub const HELP: &str = "\
Commands:
  add <text> [due:YYYY-MM-DD]   add an item (bare text works too)
  toggle <id>                   flip completion
  status <id> <status>          not-started | in-progress | completed
  delete <id>                   remove an item (alias: rm)
  tab <status>                  switch the visible tab
  sort <created|due>            change ordering
  show                          redraw
  quit                          leave the session";

/// Render the tab bar followed by one line per visible item
pub fn render(snapshot: &Snapshot) -> String {
    let mut out = tab_bar(snapshot);
    out.push('\n');

    if snapshot.items.is_empty() {
        out.push_str(&format!("  {}\n", "(no items)".dimmed()));
    }
    for item in &snapshot.items {
        out.push_str(&item_line(item));
        out.push('\n');
    }

    out
}

fn tab_bar(snapshot: &Snapshot) -> String {
    let tabs: Vec<String> = Status::ALL
        .iter()
        .map(|&status| {
            let label = format!("{} ({})", status.label(), snapshot.counts.get(status));
            if status == snapshot.tab {
                format!("[{}]", label).bold().to_string()
            } else {
                format!(" {} ", label)
            }
        })
        .collect();

    format!("{}  sort: {}", tabs.join(" "), snapshot.sort)
}

fn item_line(item: &ItemView) -> String {
    let checkbox = if item.completed { "[x]" } else { "[ ]" };
    let mut line = format!("  {} {:>3}  {}", checkbox, item.id.0, item.text);

    if let Some(due) = item.due_date {
        line.push_str(&format!("  due: {}", due.format(DATE_FORMAT)));
    }
    if item.overdue {
        line.push_str("  (overdue)");
        return line.red().to_string();
    }
    if item.completed {
        return line.dimmed().to_string();
    }

    line
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filter::SortKey;
    use crate::models::{TodoId, parse_due_date};
    use crate::store::TabCounts;

    fn snapshot(items: Vec<ItemView>) -> Snapshot {
        Snapshot {
            tab: Status::NotStarted,
            sort: SortKey::Created,
            counts: TabCounts {
                not_started: 2,
                in_progress: 0,
                completed: 1,
            },
            items,
        }
    }

    fn item(id: u64, text: &str, due: &str, overdue: bool) -> ItemView {
        ItemView {
            id: TodoId(id),
            text: text.to_string(),
            status: Status::NotStarted,
            completed: false,
            due_date: parse_due_date(due).unwrap(),
            overdue,
        }
    }

    #[test]
    fn test_render_plain() {
        colored::control::set_override(false);

        let out = render(&snapshot(vec![
            item(1, "Buy milk", "2024-12-31", true),
            item(3, "Call Bob", "", false),
        ]));
        let lines: Vec<&str> = out.lines().collect();

        assert_eq!(
            lines[0],
            "[Not started (2)]  In progress (0)   Completed (1)   sort: created"
        );
        assert_eq!(lines[1], "  [ ]   1  Buy milk  due: 2024-12-31  (overdue)");
        assert_eq!(lines[2], "  [ ]   3  Call Bob");
    }

    #[test]
    fn test_render_empty_view() {
        colored::control::set_override(false);

        let out = render(&snapshot(Vec::new()));
        assert!(out.contains("(no items)"));
    }

    #[test]
    fn test_completed_checkbox() {
        colored::control::set_override(false);

        let mut done = item(2, "Done", "", false);
        done.completed = true;
        done.status = Status::Completed;
        assert_eq!(item_line(&done), "  [x]   2  Done");
    }
}
