pub mod datetime;
pub mod item;
pub mod parser;

pub use item::{Comment, Message, Milestone, PostCategory, ProjectInfo, ToDoList};
