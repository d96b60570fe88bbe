// The project aggregate: fetch-once collection slots plus the derived
// reporting views computed from them.
//
// Each base collection lives in a one-shot cell that is populated on first
// access and returned verbatim afterwards, so a Project is a snapshot of the
// service after the first full materialization of each slot. A failed fetch
// leaves its slot empty and the error propagates to the caller; the next
// access tries again. Derived views (backlogs, sprints, milestone filters)
// are recomputed from the cached slots on every call, never cached
// themselves. Single-threaded by design: the cells are unsynchronized.
use crate::client::ServiceConnection;
use crate::error::Result;
use crate::model::{parser, Comment, Message, Milestone, ProjectInfo, ToDoList};
use chrono::NaiveDateTime;
use once_cell::unsync::OnceCell;
use std::collections::HashMap;

/// Only the newest few messages feed the comment report.
const COMMENTED_MESSAGES: usize = 3;

pub struct Project<C: ServiceConnection> {
    pub id: u64,
    connection: C,
    info: OnceCell<ProjectInfo>,
    messages: OnceCell<Vec<Message>>,
    comments: OnceCell<Vec<Comment>>,
    milestones: OnceCell<Vec<Milestone>>,
    todo_lists: OnceCell<HashMap<String, ToDoList>>,
}

impl<C: ServiceConnection> Project<C> {
    pub fn new(id: u64, connection: C) -> Self {
        Self {
            id,
            connection,
            info: OnceCell::new(),
            messages: OnceCell::new(),
            comments: OnceCell::new(),
            milestones: OnceCell::new(),
            todo_lists: OnceCell::new(),
        }
    }

    pub fn connection(&self) -> &C {
        &self.connection
    }

    /// One loader for name / status / last-changed-on; whichever of the
    /// three is read first triggers the single metadata fetch.
    fn info(&self) -> Result<&ProjectInfo> {
        self.info.get_or_try_init(|| {
            let xml = self.connection.fetch_project(self.id)?;
            parser::parse_project_info(&xml)
        })
    }

    pub fn name(&self) -> Result<&str> {
        Ok(&self.info()?.name)
    }

    pub fn status(&self) -> Result<&str> {
        Ok(&self.info()?.status)
    }

    pub fn last_changed_on(&self) -> Result<NaiveDateTime> {
        Ok(self.info()?.last_changed_on)
    }

    /// The message archive in document order (newest first, per the service).
    pub fn messages(&self) -> Result<&[Message]> {
        let messages = self.messages.get_or_try_init(|| {
            let xml = self.connection.fetch_message_archive(self.id)?;
            parser::parse_messages(&xml)
        })?;
        Ok(messages)
    }

    /// Comments on the newest messages, most recent first.
    pub fn comments(&self) -> Result<&[Comment]> {
        let comments = self.comments.get_or_try_init(|| {
            let mut comments = Vec::new();
            for message in self.messages()?.iter().take(COMMENTED_MESSAGES) {
                let xml = self.connection.fetch_comments(message.id)?;
                comments.extend(parser::parse_comments(&xml)?);
            }
            comments.sort_by(|a, b| a.compare(b));
            comments.reverse();
            Ok::<_, crate::Error>(comments)
        })?;
        Ok(comments)
    }

    /// All milestones, most distant deadline first.
    pub fn milestones(&self) -> Result<&[Milestone]> {
        let milestones = self.milestones.get_or_try_init(|| {
            let xml = self.connection.fetch_milestones(self.id)?;
            let mut milestones = parser::parse_milestones(&xml)?;
            milestones.sort_by(|a, b| a.compare(b));
            milestones.reverse();
            Ok::<_, crate::Error>(milestones)
        })?;
        Ok(milestones)
    }

    pub fn late_milestones(&self) -> Result<Vec<&Milestone>> {
        Ok(self.milestones()?.iter().filter(|m| m.is_late()).collect())
    }

    pub fn upcoming_milestones(&self) -> Result<Vec<&Milestone>> {
        Ok(self.milestones()?.iter().filter(|m| m.is_upcoming()).collect())
    }

    pub fn previous_milestones(&self) -> Result<Vec<&Milestone>> {
        Ok(self.milestones()?.iter().filter(|m| m.is_previous()).collect())
    }

    /// To-do lists keyed by display name. When the service reports two lists
    /// under the same name the one parsed last wins; this is a known
    /// limitation of the name-keyed view, kept for compatibility.
    pub fn todo_lists(&self) -> Result<&HashMap<String, ToDoList>> {
        self.todo_lists.get_or_try_init(|| {
            let xml = self.connection.fetch_todo_lists(self.id)?;
            let mut lists = HashMap::new();
            for list in parser::parse_todo_lists(&xml)? {
                if let Some(previous) = lists.insert(list.name.clone(), list) {
                    log::warn!(
                        "duplicate to-do list name '{}'; keeping the later entry",
                        previous.name
                    );
                }
            }
            Ok(lists)
        })
    }

    /// The subset of to-do lists classified as backlogs, keyed by name.
    pub fn backlogs(&self) -> Result<HashMap<&str, &ToDoList>> {
        Ok(self
            .todo_lists()?
            .values()
            .filter(|l| l.is_backlog())
            .map(|l| (l.name.as_str(), l))
            .collect())
    }

    /// Total uncompleted items across every backlog list.
    pub fn backlogged_count(&self) -> Result<u32> {
        Ok(self
            .backlogs()?
            .values()
            .map(|l| l.uncompleted_count)
            .sum())
    }

    /// Sprint lists in ascending sprint order.
    pub fn sprints(&self) -> Result<Vec<&ToDoList>> {
        let mut sprints: Vec<&ToDoList> = self
            .todo_lists()?
            .values()
            .filter(|l| l.is_sprint())
            .collect();
        sprints.sort_by(|a, b| a.compare(b));
        Ok(sprints)
    }

    /// The lowest-numbered sprint that is not complete, if any.
    pub fn current_sprint(&self) -> Result<Option<&ToDoList>> {
        Ok(self
            .sprints()?
            .into_iter()
            .find(|s| !s.is_complete()))
    }

    /// Incomplete sprints numbered after the current one. Empty when every
    /// sprint is complete (there is nothing to come after).
    pub fn upcoming_sprints(&self) -> Result<Vec<&ToDoList>> {
        let Some(current) = self.current_sprint()? else {
            return Ok(Vec::new());
        };
        let current_number = current.sprint_number()?;
        let mut upcoming = Vec::new();
        for sprint in self.sprints()? {
            if !sprint.is_complete() && sprint.sprint_number()? > current_number {
                upcoming.push(sprint);
            }
        }
        Ok(upcoming)
    }
}
