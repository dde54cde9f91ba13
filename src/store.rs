// In-memory to-do store: ordered items plus the transient tab/sort selection

use crate::filter::{Filter, SortKey};
use crate::models::{Status, TodoId, TodoItem};
use chrono::{Local, NaiveDate};
use serde::Serialize;
use tracing::debug;

/// Number of items per status tab
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct TabCounts {
    pub not_started: usize,
    pub in_progress: usize,
    pub completed: usize,
}

impl TabCounts {
    pub fn get(&self, status: Status) -> usize {
        match status {
            Status::NotStarted => self.not_started,
            Status::InProgress => self.in_progress,
            Status::Completed => self.completed,
        }
    }

    pub fn total(&self) -> usize {
        self.not_started + self.in_progress + self.completed
    }
}

/// Owns the to-do list for one session
///
/// Stored order is insertion order. Views filter and sort a copy of the
/// references and never reorder the list itself. Unknown ids are ignored by
/// every mutation.
#[derive(Debug, Clone, Default)]
pub struct TodoStore {
    items: Vec<TodoItem>,
    next_id: u64,
    filter: Filter,
}

impl TodoStore {
    /// Create an empty store showing the NotStarted tab in creation order
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty store with an initial tab/sort selection
    pub fn with_filter(filter: Filter) -> Self {
        Self {
            filter,
            ..Self::default()
        }
    }

    // ========================================================================
    // Mutations
    // ========================================================================

    /// Append a new item
    ///
    /// Returns `None` without touching the list when `text` is blank. The text
    /// is stored as given; only the emptiness check trims it.
    pub fn add(&mut self, text: &str, due_date: Option<NaiveDate>) -> Option<&TodoItem> {
        if text.trim().is_empty() {
            debug!("add: blank text, ignoring");
            return None;
        }

        self.next_id += 1;
        let id = TodoId(self.next_id);
        debug!(%id, ?due_date, "add: appending item");

        self.items.push(TodoItem::new(id, text, due_date));
        self.items.last()
    }

    /// Flip completion of the item with `id`
    ///
    /// Switching off always lands on NotStarted, so an InProgress item does not
    /// return to InProgress after two toggles.
    ///
    /// Returns whether an item was found.
    pub fn toggle_completed(&mut self, id: TodoId) -> bool {
        match self.get_mut(id) {
            Some(item) => {
                item.toggle_completed();
                debug!(%id, status = %item.status, "toggle_completed: updated");
                true
            }
            None => {
                debug!(%id, "toggle_completed: unknown id, ignoring");
                false
            }
        }
    }

    /// Set the status of the item with `id`
    ///
    /// Returns whether an item was found.
    pub fn set_status(&mut self, id: TodoId, status: Status) -> bool {
        match self.get_mut(id) {
            Some(item) => {
                item.status = status;
                debug!(%id, %status, "set_status: updated");
                true
            }
            None => {
                debug!(%id, %status, "set_status: unknown id, ignoring");
                false
            }
        }
    }

    /// Remove the item with `id` for good
    ///
    /// Returns whether an item was removed.
    pub fn delete(&mut self, id: TodoId) -> bool {
        let before = self.items.len();
        self.items.retain(|item| item.id != id);
        let removed = self.items.len() < before;
        debug!(%id, removed, "delete: called");
        removed
    }

    // ========================================================================
    // Queries
    // ========================================================================

    pub fn get(&self, id: TodoId) -> Option<&TodoItem> {
        self.items.iter().find(|item| item.id == id)
    }

    fn get_mut(&mut self, id: TodoId) -> Option<&mut TodoItem> {
        self.items.iter_mut().find(|item| item.id == id)
    }

    /// All items in insertion order
    pub fn items(&self) -> &[TodoItem] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Items with `status`, ordered by `sort_by`
    pub fn view(&self, status: Status, sort_by: SortKey) -> Vec<&TodoItem> {
        Filter::new(status, sort_by).apply(&self.items)
    }

    /// Number of items with `status`
    pub fn count(&self, status: Status) -> usize {
        self.items.iter().filter(|item| item.status == status).count()
    }

    pub fn counts(&self) -> TabCounts {
        TabCounts {
            not_started: self.count(Status::NotStarted),
            in_progress: self.count(Status::InProgress),
            completed: self.count(Status::Completed),
        }
    }

    // ========================================================================
    // Tab and sort selection
    // ========================================================================

    pub fn filter(&self) -> Filter {
        self.filter
    }

    pub fn select_tab(&mut self, status: Status) {
        debug!(%status, "select_tab: called");
        self.filter.status = status;
    }

    pub fn select_sort(&mut self, sort_by: SortKey) {
        debug!(%sort_by, "select_sort: called");
        self.filter.sort_by = sort_by;
    }

    /// The view for the current tab and sort selection
    pub fn current_view(&self) -> Vec<&TodoItem> {
        self.filter.apply(&self.items)
    }
}

/// The current calendar day in local time
pub fn today() -> NaiveDate {
    Local::now().date_naive()
}

/// Whether `due_date` lies strictly before today
pub fn is_overdue(due_date: Option<NaiveDate>) -> bool {
    is_overdue_on(due_date, today())
}

/// Whether `due_date` lies strictly before `today`; no due date is never overdue
pub fn is_overdue_on(due_date: Option<NaiveDate>, today: NaiveDate) -> bool {
    due_date.is_some_and(|due| due < today)
}
