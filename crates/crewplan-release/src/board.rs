//! Task board capability
//!
//! The release workflow only needs three calls from a board: find or create
//! a list, add a card, and read cards back with their completion flag. Any
//! HTTP client for a real board implements [`BoardClient`].

use crate::error::BoardError;
use crewplan_model::FlatTask;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifier of a list on the board
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ListId(pub String);

/// Identifier of a card on the board
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CardId(pub String);

impl fmt::Display for ListId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl fmt::Display for CardId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Card to create
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewCard {
    /// Card title
    pub name: String,
    /// Card body
    pub description: String,
    /// Member to assign, if any
    pub assignee: Option<String>,
}

impl NewCard {
    /// Card for a flattened task
    ///
    /// Title is `"<task> - <assigned_to>"`; the body carries the duration
    /// and, when present, the resources.
    #[must_use]
    pub fn from_task(task: &FlatTask) -> Self {
        let mut description = format!("Duration: {}", task.duration);
        if !task.resources.is_empty() {
            description.push_str("\nResources: ");
            description.push_str(&task.resources.join(", "));
        }
        Self {
            name: format!("{} - {}", task.task_name, task.assigned_to),
            description,
            assignee: task.primary_assignee().map(str::to_string),
        }
    }
}

/// Card as read back from the board
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Card {
    /// Card identifier
    pub id: CardId,
    /// Card title
    pub name: String,
    /// Whether the card is marked complete
    pub complete: bool,
}

/// Board operations used by the release workflow
#[async_trait::async_trait]
pub trait BoardClient: Send + Sync {
    /// Find a list by name on a board, creating it if missing
    async fn get_or_create_list(&self, board: &str, name: &str) -> Result<ListId, BoardError>;

    /// Create a card on a list
    async fn create_card(&self, list: &ListId, card: &NewCard) -> Result<CardId, BoardError>;

    /// All cards on a list
    async fn list_cards(&self, list: &ListId) -> Result<Vec<Card>, BoardError>;
}
