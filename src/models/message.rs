// Message domain models - stored records and their public projection

//! # Message Models
//!
//! - `MessageId`: opaque identifier minted once when a message is created
//! - `Record`: what the store keeps under an identifier
//! - `Message`: a record joined with its identifier, handed to callers
//!
//! The store only ever holds `MessageId → Record`. A `Message` is built at
//! read time and is always an owned copy, never a view into the store.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Unique identifier for a stored message
///
/// The value is opaque to callers. Identifiers produced by
/// [`RandomIdGenerator`](crate::engine::ids::RandomIdGenerator) are 20
/// lowercase hex characters, but lookups accept any string.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MessageId(String);

impl MessageId {
    /// Get the identifier as a string slice
    ///
    /// ```rust
    /// # use graphql_messages::MessageId;
    /// let id = MessageId::from("abc123");
    /// assert_eq!(id.as_str(), "abc123");
    /// ```
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

impl From<String> for MessageId {
    fn from(s: String) -> Self {
        MessageId(s)
    }
}

impl From<&str> for MessageId {
    fn from(s: &str) -> Self {
        MessageId(s.to_string())
    }
}

impl fmt::Display for MessageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Stored content of a message
///
/// Both fields are optional. An absent field is distinct from an empty
/// string and is preserved as `None` through every operation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    pub content: Option<String>,
    pub author: Option<String>,
}

impl Record {
    pub fn new(content: Option<String>, author: Option<String>) -> Self {
        Self { content, author }
    }
}

/// A record joined with the identifier it is stored under
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    pub id: MessageId,
    pub content: Option<String>,
    pub author: Option<String>,
}

impl Message {
    /// Project a stored record under its key
    pub fn new(id: MessageId, record: Record) -> Self {
        Self {
            id,
            content: record.content,
            author: record.author,
        }
    }
}
