// File: src/model/parser.rs
//
// Turns the service's XML documents into domain entities. The only document
// queries the core relies on are "all children with a given tag" and "text of
// the first child with a given tag", so both the live client and the fixture
// double can feed this parser unchanged.
use crate::error::{Error, Result};
use crate::model::datetime::{parse_date, parse_datetime};
use crate::model::{Comment, Message, Milestone, PostCategory, ProjectInfo, ToDoList};
use roxmltree::{Document, Node};

fn parse_document(xml: &str) -> Result<Document<'_>> {
    Document::parse(xml).map_err(|e| Error::Document(e.to_string()))
}

fn child_text<'a>(node: Node<'a, '_>, tag: &str) -> Option<&'a str> {
    node.children()
        .find(|c| c.has_tag_name(tag))
        .and_then(|c| c.text())
}

fn required_text<'a>(node: Node<'a, '_>, tag: &str) -> Result<&'a str> {
    child_text(node, tag)
        .ok_or_else(|| Error::Document(format!("missing <{}> in <{}>", tag, node.tag_name().name())))
}

fn required_u64(node: Node<'_, '_>, tag: &str) -> Result<u64> {
    let text = required_text(node, tag)?;
    text.parse()
        .map_err(|_| Error::Document(format!("non-numeric <{}>: '{}'", tag, text)))
}

fn optional_u64(node: Node<'_, '_>, tag: &str) -> Option<u64> {
    child_text(node, tag).and_then(|t| t.parse().ok())
}

fn required_u32(node: Node<'_, '_>, tag: &str) -> Result<u32> {
    let text = required_text(node, tag)?;
    text.parse()
        .map_err(|_| Error::Document(format!("non-numeric <{}>: '{}'", tag, text)))
}

fn counter(node: Node<'_, '_>, tag: &str) -> u32 {
    child_text(node, tag)
        .and_then(|t| t.parse().ok())
        .unwrap_or(0)
}

fn optional_bool(node: Node<'_, '_>, tag: &str) -> Option<bool> {
    child_text(node, tag).map(|t| t.eq_ignore_ascii_case("true"))
}

/// Parse project metadata from a `<project>` document.
pub fn parse_project_info(xml: &str) -> Result<ProjectInfo> {
    let doc = parse_document(xml)?;
    let root = doc.root_element();
    Ok(ProjectInfo {
        name: required_text(root, "name")?.to_string(),
        status: required_text(root, "status")?.to_string(),
        last_changed_on: parse_datetime(required_text(root, "last-changed-on")?)?,
    })
}

fn parse_message(node: Node<'_, '_>) -> Result<Message> {
    let category = node
        .children()
        .find(|c| c.has_tag_name("category"))
        .map(|cat| -> Result<PostCategory> {
            Ok(PostCategory {
                id: required_u64(cat, "id")?,
                name: required_text(cat, "name")?.to_string(),
                kind: child_text(cat, "type").unwrap_or_default().to_string(),
            })
        })
        .transpose()?;

    Ok(Message {
        id: required_u64(node, "id")?,
        title: required_text(node, "title")?.to_string(),
        posted_on: parse_datetime(required_text(node, "posted-on")?)?,
        category,
        attachments_count: counter(node, "attachments-count"),
    })
}

/// Parse a message archive: every `<post>` entry, in document order.
pub fn parse_messages(xml: &str) -> Result<Vec<Message>> {
    let doc = parse_document(xml)?;
    doc.root_element()
        .children()
        .filter(|n| n.has_tag_name("post"))
        .map(parse_message)
        .collect()
}

fn parse_comment(node: Node<'_, '_>) -> Result<Comment> {
    Ok(Comment {
        id: required_u64(node, "id")?,
        body: required_text(node, "body")?.to_string(),
        author_id: required_u64(node, "author-id")?,
        posted_on: parse_datetime(required_text(node, "posted-on")?)?,
        post_id: optional_u64(node, "post-id"),
        emailed_from: child_text(node, "emailed-from").map(str::to_string),
        attachments_count: counter(node, "attachments-count"),
    })
}

/// Parse every `<comment>` entry of a comments document.
pub fn parse_comments(xml: &str) -> Result<Vec<Comment>> {
    let doc = parse_document(xml)?;
    doc.root_element()
        .children()
        .filter(|n| n.has_tag_name("comment"))
        .map(parse_comment)
        .collect()
}

fn parse_milestone(node: Node<'_, '_>) -> Result<Milestone> {
    Ok(Milestone {
        id: required_u64(node, "id")?,
        title: required_text(node, "title")?.to_string(),
        deadline: parse_date(required_text(node, "deadline")?)?,
        completed_raw: required_text(node, "completed")?.to_string(),
        created_on: child_text(node, "created-on").map(parse_datetime).transpose()?,
        creator_id: optional_u64(node, "creator-id"),
        project_id: optional_u64(node, "project-id"),
        responsible_party_id: optional_u64(node, "responsible-party-id"),
        responsible_party_type: child_text(node, "responsible-party-type").map(str::to_string),
        wants_notification_raw: child_text(node, "wants-notification").map(str::to_string),
    })
}

/// Parse every `<milestone>` entry of a milestone listing.
pub fn parse_milestones(xml: &str) -> Result<Vec<Milestone>> {
    let doc = parse_document(xml)?;
    doc.root_element()
        .children()
        .filter(|n| n.has_tag_name("milestone"))
        .map(parse_milestone)
        .collect()
}

fn parse_todo_list(node: Node<'_, '_>) -> Result<ToDoList> {
    Ok(ToDoList {
        id: required_u64(node, "id")?,
        name: required_text(node, "name")?.to_string(),
        project_id: required_u64(node, "project-id")?,
        complete_raw: required_text(node, "complete")?.to_string(),
        completed_count: required_u32(node, "completed-count")?,
        uncompleted_count: required_u32(node, "uncompleted-count")?,
        description: child_text(node, "description").map(str::to_string),
        milestone_id: optional_u64(node, "milestone-id"),
        position: child_text(node, "position").and_then(|t| t.parse().ok()),
        private: optional_bool(node, "private"),
        tracked: optional_bool(node, "tracked"),
    })
}

/// Parse every `<todo-list>` entry of a to-do list listing.
pub fn parse_todo_lists(xml: &str) -> Result<Vec<ToDoList>> {
    let doc = parse_document(xml)?;
    doc.root_element()
        .children()
        .filter(|n| n.has_tag_name("todo-list"))
        .map(parse_todo_list)
        .collect()
}
