// View filtering and ordering for to-do items

use crate::models::{Status, TodoItem};
use eyre::{Result, eyre};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::str::FromStr;

/// Key a filtered view is ordered by
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortKey {
    /// Insertion order
    #[default]
    Created,
    /// Ascending due date, undated items last
    Due,
}

impl SortKey {
    pub fn as_str(self) -> &'static str {
        match self {
            SortKey::Created => "created",
            SortKey::Due => "due",
        }
    }

    /// Compare two items under this key
    ///
    /// Only meaningful with a stable sort: equal keys keep their relative order.
    pub fn compare(self, a: &TodoItem, b: &TodoItem) -> Ordering {
        match self {
            SortKey::Created => a.id.cmp(&b.id),
            SortKey::Due => match (a.due_date, b.due_date) {
                (Some(x), Some(y)) => x.cmp(&y),
                (Some(_), None) => Ordering::Less,
                (None, Some(_)) => Ordering::Greater,
                (None, None) => Ordering::Equal,
            },
        }
    }
}

impl std::fmt::Display for SortKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for SortKey {
    type Err = eyre::Report;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "created" | "createdat" | "created_at" | "created-at" => Ok(SortKey::Created),
            "due" | "duedate" | "due_date" | "due-date" => Ok(SortKey::Due),
            _ => Err(eyre!("Unknown sort key: {:?} (expected created or due)", s)),
        }
    }
}

/// The transient selection a view is derived from: active tab plus ordering
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Filter {
    pub status: Status,
    pub sort_by: SortKey,
}

impl Filter {
    pub fn new(status: Status, sort_by: SortKey) -> Self {
        Self { status, sort_by }
    }

    pub fn matches(&self, item: &TodoItem) -> bool {
        item.status == self.status
    }

    /// Select matching items and order them, leaving `items` untouched
    pub fn apply<'a>(&self, items: &'a [TodoItem]) -> Vec<&'a TodoItem> {
        let mut selected: Vec<&TodoItem> = items.iter().filter(|item| self.matches(item)).collect();
        // sort_by is stable, ties keep insertion order
        selected.sort_by(|a, b| self.sort_by.compare(a, b));
        selected
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{TodoId, parse_due_date};

    fn item(id: u64, status: Status, due: &str) -> TodoItem {
        let mut item = TodoItem::new(TodoId(id), format!("item {}", id), parse_due_date(due).unwrap());
        item.status = status;
        item
    }

    #[test]
    fn test_sort_key_from_str() {
        assert_eq!("created".parse::<SortKey>().unwrap(), SortKey::Created);
        assert_eq!("createdAt".parse::<SortKey>().unwrap(), SortKey::Created);
        assert_eq!("DUE".parse::<SortKey>().unwrap(), SortKey::Due);
        assert_eq!("dueDate".parse::<SortKey>().unwrap(), SortKey::Due);
        assert!("priority".parse::<SortKey>().is_err());
    }

    #[test]
    fn test_sort_key_display() {
        assert_eq!(SortKey::Created.to_string(), "created");
        assert_eq!(SortKey::Due.to_string(), "due");
    }

    #[test]
    fn test_filter_selects_status_only() {
        let items = vec![
            item(1, Status::NotStarted, ""),
            item(2, Status::Completed, ""),
            item(3, Status::InProgress, ""),
            item(4, Status::NotStarted, ""),
        ];

        let view = Filter::new(Status::NotStarted, SortKey::Created).apply(&items);
        let ids: Vec<u64> = view.iter().map(|i| i.id.0).collect();
        assert_eq!(ids, vec![1, 4]);

        let view = Filter::new(Status::InProgress, SortKey::Created).apply(&items);
        assert_eq!(view.len(), 1);
        assert_eq!(view[0].id, TodoId(3));
    }

    #[test]
    fn test_due_sort_puts_undated_last_and_is_stable() {
        let items = vec![
            item(1, Status::NotStarted, ""),
            item(2, Status::NotStarted, "2025-03-01"),
            item(3, Status::NotStarted, "2024-01-15"),
            item(4, Status::NotStarted, ""),
            item(5, Status::NotStarted, "2025-03-01"),
        ];

        let view = Filter::new(Status::NotStarted, SortKey::Due).apply(&items);
        let ids: Vec<u64> = view.iter().map(|i| i.id.0).collect();
        assert_eq!(ids, vec![3, 2, 5, 1, 4]);

        // Stored order is untouched
        let stored: Vec<u64> = items.iter().map(|i| i.id.0).collect();
        assert_eq!(stored, vec![1, 2, 3, 4, 5]);
    }

    #[test]
    fn test_empty_view() {
        let items = vec![item(1, Status::NotStarted, "")];
        let view = Filter::new(Status::Completed, SortKey::Due).apply(&items);
        assert!(view.is_empty());
    }
}
