// Rendering of the domain graph to plain JSON values for downstream
// reporting consumers.
//
// `limit_relations` caps every collection at its first N elements and is
// passed through unchanged to nested entities: it bounds fan-out per
// collection, not nesting depth. Scalars and derived booleans are always
// emitted in full.
use crate::client::ServiceConnection;
use crate::error::Result;
use crate::model::{Comment, Message, Milestone, PostCategory, ToDoList};
use crate::project::Project;
use chrono::{NaiveDate, NaiveDateTime};
use serde_json::{json, Map, Value};

fn fmt_datetime(dt: NaiveDateTime) -> String {
    dt.format("%Y-%m-%dT%H:%M:%S").to_string()
}

fn fmt_date(d: NaiveDate) -> String {
    d.format("%Y-%m-%d").to_string()
}

/// Conversion to a JSON-encodable structure, with an optional cap on the
/// number of elements emitted per nested collection.
pub trait ToStructured {
    fn to_structured(&self, limit_relations: Option<usize>) -> Value;

    fn to_json(&self, limit_relations: Option<usize>) -> String {
        self.to_structured(limit_relations).to_string()
    }
}

fn sequence<'a, T, I>(items: I, limit: Option<usize>) -> Value
where
    T: ToStructured + 'a,
    I: IntoIterator<Item = &'a T>,
{
    let iter = items.into_iter().map(|item| item.to_structured(limit));
    let values: Vec<Value> = match limit {
        Some(n) => iter.take(n).collect(),
        None => iter.collect(),
    };
    Value::Array(values)
}

// Name-keyed maps serialize with sorted keys so output is stable run to run.
fn named_map<'a, T, I>(entries: I, limit: Option<usize>) -> Value
where
    T: ToStructured + 'a,
    I: IntoIterator<Item = (&'a str, &'a T)>,
{
    let mut entries: Vec<(&str, &T)> = entries.into_iter().collect();
    entries.sort_by_key(|(name, _)| *name);
    if let Some(n) = limit {
        entries.truncate(n);
    }
    let mut map = Map::new();
    for (name, entry) in entries {
        map.insert(name.to_string(), entry.to_structured(limit));
    }
    Value::Object(map)
}

impl ToStructured for PostCategory {
    fn to_structured(&self, _limit_relations: Option<usize>) -> Value {
        json!({
            "id": self.id,
            "name": self.name,
            "type": self.kind,
        })
    }
}

impl ToStructured for Message {
    fn to_structured(&self, limit_relations: Option<usize>) -> Value {
        json!({
            "id": self.id,
            "title": self.title,
            "posted_on": fmt_datetime(self.posted_on),
            "category": self.category.as_ref().map(|c| c.to_structured(limit_relations)),
            "attachments_count": self.attachments_count,
        })
    }
}

impl ToStructured for Comment {
    fn to_structured(&self, _limit_relations: Option<usize>) -> Value {
        json!({
            "id": self.id,
            "body": self.body,
            "author_id": self.author_id,
            "posted_on": fmt_datetime(self.posted_on),
            "post_id": self.post_id,
            "emailed_from": self.emailed_from,
            "attachments_count": self.attachments_count,
        })
    }
}

impl ToStructured for Milestone {
    fn to_structured(&self, _limit_relations: Option<usize>) -> Value {
        json!({
            "id": self.id,
            "title": self.title,
            "deadline": fmt_date(self.deadline),
            "completed": self.completed(),
            "created_on": self.created_on.map(fmt_datetime),
            "creator_id": self.creator_id,
            "project_id": self.project_id,
            "responsible_party_id": self.responsible_party_id,
            "responsible_party_type": self.responsible_party_type,
            "wants_notification": self.wants_notification(),
            "is_previous": self.is_previous(),
            "is_upcoming": self.is_upcoming(),
            "is_late": self.is_late(),
        })
    }
}

impl ToStructured for ToDoList {
    fn to_structured(&self, _limit_relations: Option<usize>) -> Value {
        json!({
            "id": self.id,
            "name": self.name,
            "project_id": self.project_id,
            "complete": self.complete_raw,
            "completed_count": self.completed_count,
            "uncompleted_count": self.uncompleted_count,
            "description": self.description,
            "milestone_id": self.milestone_id,
            "position": self.position,
            "private": self.private,
            "tracked": self.tracked,
            "is_complete": self.is_complete(),
            "is_sprint": self.is_sprint(),
            "is_backlog": self.is_backlog(),
            "sprint_number": self.sprint_number().ok(),
        })
    }
}

impl<C: ServiceConnection> Project<C> {
    /// Render the whole aggregate. Fallible because any slot that is still
    /// empty gets materialized on the way through.
    pub fn to_structured(&self, limit_relations: Option<usize>) -> Result<Value> {
        let limit = limit_relations;
        Ok(json!({
            "id": self.id,
            "name": self.name()?,
            "status": self.status()?,
            "last_changed_on": fmt_datetime(self.last_changed_on()?),
            "messages": sequence(self.messages()?, limit),
            "comments": sequence(self.comments()?, limit),
            "milestones": sequence(self.milestones()?, limit),
            "late_milestones": sequence(self.late_milestones()?.into_iter(), limit),
            "upcoming_milestones": sequence(self.upcoming_milestones()?.into_iter(), limit),
            "previous_milestones": sequence(self.previous_milestones()?.into_iter(), limit),
            "todo_lists": named_map(
                self.todo_lists()?.iter().map(|(k, v)| (k.as_str(), v)),
                limit,
            ),
            "backlogs": named_map(self.backlogs()?, limit),
            "backlogged_count": self.backlogged_count()?,
            "sprints": sequence(self.sprints()?.into_iter(), limit),
            "current_sprint": self.current_sprint()?.map(|s| s.to_structured(limit)),
            "upcoming_sprints": sequence(self.upcoming_sprints()?.into_iter(), limit),
        }))
    }

    pub fn to_json(&self, limit_relations: Option<usize>) -> Result<String> {
        Ok(self.to_structured(limit_relations)?.to_string())
    }
}
