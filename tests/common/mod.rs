// Shared fixture double for the integration tests: a ServiceConnection that
// replays canned XML and counts every fetch so cache semantics can be checked.
#![allow(dead_code)]

use campreport::client::ServiceConnection;
use campreport::Result;
use chrono::{Duration, Local, NaiveDate};
use std::cell::RefCell;
use std::collections::HashMap;

pub struct FixtureConnection {
    pub project_xml: String,
    pub archive_xml: String,
    pub comments_xml: HashMap<u64, String>,
    pub milestones_xml: String,
    pub todo_lists_xml: String,
    calls: RefCell<HashMap<&'static str, u32>>,
}

impl FixtureConnection {
    pub fn new() -> Self {
        Self {
            project_xml: project_xml("API Testing Project", "active", "2009-02-03T15:03:14"),
            archive_xml: "<posts></posts>".to_string(),
            comments_xml: HashMap::new(),
            milestones_xml: "<milestones></milestones>".to_string(),
            todo_lists_xml: "<todo-lists></todo-lists>".to_string(),
            calls: RefCell::new(HashMap::new()),
        }
    }

    fn count(&self, key: &'static str) {
        *self.calls.borrow_mut().entry(key).or_insert(0) += 1;
    }

    pub fn calls_to(&self, key: &str) -> u32 {
        self.calls.borrow().get(key).copied().unwrap_or(0)
    }
}

impl ServiceConnection for FixtureConnection {
    fn fetch_project(&self, _project_id: u64) -> Result<String> {
        self.count("project");
        Ok(self.project_xml.clone())
    }

    fn fetch_message_archive(&self, _project_id: u64) -> Result<String> {
        self.count("message_archive");
        Ok(self.archive_xml.clone())
    }

    fn fetch_comments(&self, message_id: u64) -> Result<String> {
        self.count("comments");
        Ok(self
            .comments_xml
            .get(&message_id)
            .cloned()
            .unwrap_or_else(|| "<comments></comments>".to_string()))
    }

    fn fetch_milestones(&self, _project_id: u64) -> Result<String> {
        self.count("milestones");
        Ok(self.milestones_xml.clone())
    }

    fn fetch_todo_lists(&self, _project_id: u64) -> Result<String> {
        self.count("todo_lists");
        Ok(self.todo_lists_xml.clone())
    }
}

// --- XML BUILDERS ---

pub fn project_xml(name: &str, status: &str, last_changed_on: &str) -> String {
    format!(
        "<project><id>2849305</id><name>{}</name><status>{}</status>\
         <last-changed-on>{}</last-changed-on></project>",
        name, status, last_changed_on
    )
}

pub fn post_xml(id: u64, title: &str, posted_on: &str) -> String {
    format!(
        "<post><id>{}</id><title>{}</title><posted-on>{}</posted-on>\
         <attachments-count>0</attachments-count>\
         <category><id>28605393</id><name>Assets</name><type>PostCategory</type></category>\
         </post>",
        id, title, posted_on
    )
}

pub fn comment_xml(id: u64, body: &str, author_id: u64, posted_on: &str) -> String {
    format!(
        "<comment><id>{}</id><body>{}</body><author-id>{}</author-id>\
         <posted-on>{}</posted-on><attachments-count>0</attachments-count></comment>",
        id, body, author_id, posted_on
    )
}

pub fn milestone_xml(id: u64, title: &str, deadline: NaiveDate, completed: &str) -> String {
    format!(
        "<milestone><id>{}</id><title>{}</title><deadline>{}</deadline>\
         <completed>{}</completed><project-id>2849305</project-id></milestone>",
        id,
        title,
        deadline.format("%Y-%m-%d"),
        completed
    )
}

pub fn todo_list_xml(
    id: u64,
    name: &str,
    complete: &str,
    completed_count: u32,
    uncompleted_count: u32,
) -> String {
    format!(
        "<todo-list><id>{}</id><name>{}</name><project-id>2849305</project-id>\
         <complete>{}</complete><completed-count>{}</completed-count>\
         <uncompleted-count>{}</uncompleted-count></todo-list>",
        id, name, complete, completed_count, uncompleted_count
    )
}

pub fn days_from_today(days: i64) -> NaiveDate {
    Local::now().date_naive() + Duration::days(days)
}

/// A fixture mirroring the shape of the recorded test project: four messages
/// (newest first), comments on the newest three, nine milestones (three late,
/// three completed in the past, three upcoming) and six to-do lists (two
/// backlogs, sprints 0-2 with sprint 0 complete, one plain list).
pub fn standard_fixture() -> FixtureConnection {
    let mut conn = FixtureConnection::new();

    conn.archive_xml = format!(
        "<posts>{}{}{}{}</posts>",
        post_xml(101, "This is the newest message", "2009-01-28T14:30:18"),
        post_xml(102, "Second message", "2009-01-27T10:00:00"),
        post_xml(103, "Third message", "2009-01-26T09:00:00"),
        post_xml(104, "Fourth message, beyond the comment window", "2009-01-25T08:00:00"),
    );

    conn.comments_xml.insert(
        101,
        format!(
            "<comments>{}{}</comments>",
            comment_xml(201, "An older comment", 3396975, "2009-01-28T15:00:00"),
            comment_xml(202, "This is the latest comment", 3396975, "2009-01-28T21:37:02"),
        ),
    );
    conn.comments_xml.insert(
        102,
        format!(
            "<comments>{}</comments>",
            comment_xml(203, "Comment on the second message", 3396976, "2009-01-27T12:00:00"),
        ),
    );
    conn.comments_xml.insert(
        103,
        format!(
            "<comments>{}</comments>",
            comment_xml(204, "Comment on the third message", 3396976, "2009-01-26T12:00:00"),
        ),
    );
    // Message 104 has comments too, but the report only looks at the newest
    // three messages, so these must never be fetched.
    conn.comments_xml.insert(
        104,
        format!(
            "<comments>{}</comments>",
            comment_xml(205, "Should never appear", 3396976, "2009-01-25T12:00:00"),
        ),
    );

    conn.milestones_xml = format!(
        "<milestones>{}{}{}{}{}{}{}{}{}</milestones>",
        milestone_xml(301, "Late 1", days_from_today(-30), "false"),
        milestone_xml(302, "Late 2", days_from_today(-20), "false"),
        milestone_xml(303, "Late 3", days_from_today(-10), "false"),
        milestone_xml(304, "Done 1", days_from_today(-60), "true"),
        milestone_xml(305, "Done 2", days_from_today(-50), "true"),
        milestone_xml(306, "Done 3", days_from_today(-40), "true"),
        milestone_xml(307, "Future Milestone 1", days_from_today(10), "false"),
        milestone_xml(308, "Future Milestone 2", days_from_today(20), "false"),
        milestone_xml(309, "Future Milestone 3", days_from_today(30), "false"),
    );

    conn.todo_lists_xml = format!(
        "<todo-lists>{}{}{}{}{}{}</todo-lists>",
        todo_list_xml(401, "Product backlog", "false", 1, 3),
        todo_list_xml(402, "Defect backlog", "false", 0, 2),
        todo_list_xml(403, "Sprint 0", "true", 8, 0),
        todo_list_xml(404, "Sprint 1", "false", 2, 4),
        todo_list_xml(405, "Sprint 2", "false", 0, 6),
        todo_list_xml(406, "Design ideas", "false", 0, 1),
    );

    conn
}
