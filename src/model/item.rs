// File: ./src/model/item.rs
use crate::error::{Error, Result};
use chrono::{Local, NaiveDate, NaiveDateTime};
use once_cell::sync::Lazy;
use regex::Regex;
use std::cmp::Ordering;

/// Case-insensitive truthy check against an explicit accepted set.
///
/// The service reports boolean-ish fields as free-form strings, and the
/// accepted vocabulary differs per entity (a quirk of the upstream API
/// clients this mirrors). Anything outside the set is false.
fn truthy(raw: &str, accepted: &[&str]) -> bool {
    accepted.contains(&raw.to_lowercase().as_str())
}

const MILESTONE_TRUE: &[&str] = &["true", "1", "yes"];
const TODO_LIST_TRUE: &[&str] = &["true", "yes", "y", "t"];

/// Project metadata fetched in one call: name, status, last-changed-on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectInfo {
    pub name: String,
    pub status: String,
    pub last_changed_on: NaiveDateTime,
}

/// Category a message was posted under, when the service reports one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostCategory {
    pub id: u64,
    pub name: String,
    pub kind: String,
}

/// A message (post) in a project's message archive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    pub id: u64,
    pub title: String,
    pub posted_on: NaiveDateTime,
    pub category: Option<PostCategory>,
    pub attachments_count: u32,
}

/// A comment on a message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Comment {
    pub id: u64,
    pub body: String,
    pub author_id: u64,
    pub posted_on: NaiveDateTime,
    pub post_id: Option<u64>,
    pub emailed_from: Option<String>,
    pub attachments_count: u32,
}

impl Comment {
    /// Chronological order. Consumers reverse for most-recent-first.
    pub fn compare(&self, other: &Self) -> Ordering {
        self.posted_on.cmp(&other.posted_on)
    }
}

/// A project milestone with a hard deadline.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Milestone {
    pub id: u64,
    pub title: String,
    pub deadline: NaiveDate,
    /// Raw completion flag as reported by the service; see [`Milestone::completed`].
    pub completed_raw: String,
    pub created_on: Option<NaiveDateTime>,
    pub creator_id: Option<u64>,
    pub project_id: Option<u64>,
    pub responsible_party_id: Option<u64>,
    pub responsible_party_type: Option<String>,
    pub wants_notification_raw: Option<String>,
}

impl Milestone {
    pub fn completed(&self) -> bool {
        truthy(&self.completed_raw, MILESTONE_TRUE)
    }

    pub fn wants_notification(&self) -> bool {
        self.wants_notification_raw
            .as_deref()
            .is_some_and(|raw| truthy(raw, MILESTONE_TRUE))
    }

    /// Deadline strictly before today.
    pub fn is_previous(&self) -> bool {
        self.deadline < Local::now().date_naive()
    }

    /// Deadline today or later. Partitions with `is_previous`: no overlap, no gap.
    pub fn is_upcoming(&self) -> bool {
        !self.is_previous()
    }

    /// Past deadline and still not completed.
    pub fn is_late(&self) -> bool {
        !self.completed() && self.is_previous()
    }

    /// Deadline order, earliest first.
    pub fn compare(&self, other: &Self) -> Ordering {
        self.deadline.cmp(&other.deadline)
    }
}

// The upstream naming convention embeds a single digit: "Sprint 3".
// Double-digit sprints do not match; see `ToDoList::sprint_number`.
static SPRINT_NUMBER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?:Sprint|sprint) ([0-9])").unwrap());

/// A to-do list; sprint and backlog lists are recognized by name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToDoList {
    pub id: u64,
    pub name: String,
    pub project_id: u64,
    /// Raw completion flag as reported by the service; see [`ToDoList::is_complete`].
    pub complete_raw: String,
    pub completed_count: u32,
    pub uncompleted_count: u32,
    pub description: Option<String>,
    pub milestone_id: Option<u64>,
    pub position: Option<u32>,
    pub private: Option<bool>,
    pub tracked: Option<bool>,
}

impl ToDoList {
    pub fn is_complete(&self) -> bool {
        truthy(&self.complete_raw, TODO_LIST_TRUE)
    }

    pub fn is_sprint(&self) -> bool {
        self.name.to_lowercase().contains("sprint")
    }

    pub fn is_backlog(&self) -> bool {
        self.name.to_lowercase().contains("backlog")
    }

    /// The single digit following the word "Sprint" in the list name.
    ///
    /// Only defined for sprint lists numbered 0-9; callers must guard with
    /// [`ToDoList::is_sprint`] first. The single-digit limit is inherited
    /// from the upstream naming convention and kept on purpose.
    pub fn sprint_number(&self) -> Result<u8> {
        SPRINT_NUMBER
            .captures(&self.name)
            .and_then(|caps| caps.get(1))
            .and_then(|m| m.as_str().parse::<u8>().ok())
            .ok_or_else(|| Error::SprintNumber(self.name.clone()))
    }

    /// Sprint lists order by sprint number; every other pairing falls back
    /// to lexicographic name order (including a sprint whose number cannot
    /// be extracted).
    pub fn compare(&self, other: &Self) -> Ordering {
        if self.is_sprint()
            && other.is_sprint()
            && let (Ok(a), Ok(b)) = (self.sprint_number(), other.sprint_number())
        {
            return a.cmp(&b);
        }
        self.name.cmp(&other.name)
    }
}
