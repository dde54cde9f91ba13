// Line-oriented event surface over a TodoStore

use crate::filter::SortKey;
use crate::models::{Status, TodoId, TodoItem, parse_due_date};
use crate::store::{TabCounts, TodoStore, is_overdue_on, today};
use chrono::NaiveDate;
use eyre::{Result, eyre};
use serde::Serialize;
use std::str::FromStr;
use tracing::debug;

const DUE_PREFIX: &str = "due:";

/// One user interaction
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    Add { text: String, due_date: Option<NaiveDate> },
    Toggle(TodoId),
    SetStatus(TodoId, Status),
    Delete(TodoId),
    SelectTab(Status),
    SelectSort(SortKey),
    Show,
    Help,
    Quit,
}

impl FromStr for Event {
    type Err = eyre::Report;

    /// Parse one input line
    ///
    /// Lines that do not start with a keyword are added as item text, the same
    /// as pressing Enter in the text box.
    fn from_str(line: &str) -> Result<Self> {
        let trimmed = line.trim();
        let (keyword, rest) = match trimmed.split_once(char::is_whitespace) {
            Some((keyword, rest)) => (keyword, rest.trim()),
            None => (trimmed, ""),
        };

        match keyword.to_lowercase().as_str() {
            "add" => parse_add(rest),
            "toggle" | "check" => Ok(Event::Toggle(single_arg(rest, "toggle <id>")?.parse()?)),
            "status" => {
                let (id, status) = rest
                    .split_once(char::is_whitespace)
                    .ok_or_else(|| eyre!("Usage: status <id> <not-started|in-progress|completed>"))?;
                Ok(Event::SetStatus(id.parse()?, status.parse()?))
            }
            "delete" | "rm" => Ok(Event::Delete(single_arg(rest, "delete <id>")?.parse()?)),
            "tab" => Ok(Event::SelectTab(single_arg(rest, "tab <status>")?.parse()?)),
            "sort" => Ok(Event::SelectSort(single_arg(rest, "sort <created|due>")?.parse()?)),
            "show" | "" if rest.is_empty() => Ok(Event::Show),
            "help" | "?" if rest.is_empty() => Ok(Event::Help),
            "quit" | "exit" if rest.is_empty() => Ok(Event::Quit),
            _ => parse_add(trimmed),
        }
    }
}

fn single_arg<'a>(rest: &'a str, usage: &str) -> Result<&'a str> {
    let mut parts = rest.split_whitespace();
    match (parts.next(), parts.next()) {
        (Some(arg), None) => Ok(arg),
        _ => Err(eyre!("Usage: {}", usage)),
    }
}

/// `<text...> [due:YYYY-MM-DD]`; the due token may appear anywhere
///
/// Only the due token and the whitespace in front of it are removed, the rest
/// of the text is kept as typed.
fn parse_add(rest: &str) -> Result<Event> {
    let mut due_date = None;
    let mut due_span: Option<(usize, usize)> = None;
    let mut cursor = 0;

    for word in rest.split_whitespace() {
        let start = rest[cursor..].find(word).map_or(cursor, |pos| cursor + pos);
        let end = start + word.len();
        cursor = end;

        if let Some(date) = word.strip_prefix(DUE_PREFIX) {
            if due_span.is_some() {
                return Err(eyre!("Only one due date per item"));
            }
            due_date = parse_due_date(date)?;
            due_span = Some((start, end));
        }
    }

    let text = match due_span {
        Some((start, end)) => {
            let before = rest[..start].trim_end();
            let after = &rest[end..];
            if before.is_empty() {
                after.trim_start().to_string()
            } else {
                format!("{}{}", before, after)
            }
        }
        None => rest.to_string(),
    };

    Ok(Event::Add { text, due_date })
}

/// Result of applying an event
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// State may have changed; re-render
    Render,
    Help,
    Quit,
}

/// One item as presented in a view
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ItemView {
    pub id: TodoId,
    pub text: String,
    pub status: Status,
    pub completed: bool,
    pub due_date: Option<NaiveDate>,
    pub overdue: bool,
}

impl ItemView {
    fn new(item: &TodoItem, today: NaiveDate) -> Self {
        Self {
            id: item.id,
            text: item.text.clone(),
            status: item.status,
            completed: item.completed(),
            due_date: item.due_date,
            overdue: is_overdue_on(item.due_date, today),
        }
    }
}

/// Everything the rendering layer needs after an event
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Snapshot {
    pub tab: Status,
    pub sort: SortKey,
    pub counts: TabCounts,
    pub items: Vec<ItemView>,
}

impl Snapshot {
    pub fn capture(store: &TodoStore, today: NaiveDate) -> Self {
        let filter = store.filter();
        Self {
            tab: filter.status,
            sort: filter.sort_by,
            counts: store.counts(),
            items: store
                .current_view()
                .into_iter()
                .map(|item| ItemView::new(item, today))
                .collect(),
        }
    }
}

/// A single UI session: owns the store and turns events into mutations
#[derive(Debug, Default)]
pub struct Session {
    store: TodoStore,
}

impl Session {
    pub fn new(store: TodoStore) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &TodoStore {
        &self.store
    }

    pub fn apply(&mut self, event: Event) -> Outcome {
        debug!(?event, "apply: called");
        match event {
            Event::Add { text, due_date } => {
                self.store.add(&text, due_date);
            }
            Event::Toggle(id) => {
                self.store.toggle_completed(id);
            }
            Event::SetStatus(id, status) => {
                self.store.set_status(id, status);
            }
            Event::Delete(id) => {
                self.store.delete(id);
            }
            Event::SelectTab(status) => self.store.select_tab(status),
            Event::SelectSort(sort_by) => self.store.select_sort(sort_by),
            Event::Show => {}
            Event::Help => return Outcome::Help,
            Event::Quit => return Outcome::Quit,
        }
        Outcome::Render
    }

    /// Parse and apply one input line
    pub fn handle_line(&mut self, line: &str) -> Result<Outcome> {
        let event: Event = line.parse()?;
        Ok(self.apply(event))
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot::capture(&self.store, today())
    }
}
