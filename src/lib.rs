// GraphQL Messages
// An in-memory message API exposed over GraphQL

//! # GraphQL Messages Library
//!
//! This is the library root for a small message API. Messages are created,
//! read and replaced through three GraphQL operations (`getMessage`,
//! `createMessage`, `updateMessage`); the same schema also carries a handful
//! of sample queries (`hello`, `rollDice`, ...).
//!
//! ## Layers
//!
//! ```text
//! Client (GraphiQL, curl, the `client` binary)
//!        ↓ HTTP/GraphQL
//! Server Layer (`server`)  ← axum router, GraphiQL, health check
//!        ↓ resolvers
//! Engine Layer (`engine`)  ← schema, MessageService, RecordStore
//!        ↓
//! Domain Layer (`models`)  ← MessageId, Record, Message
//! ```
//!
//! ## Usage Example
//! ```rust
//! use graphql_messages::{MessageService, Record};
//!
//! # tokio_test::block_on(async {
//! let service = MessageService::in_memory();
//! let created = service
//!     .create(Record::new(Some("hi".to_string()), Some("ann".to_string())))
//!     .await
//!     .unwrap();
//! let fetched = service.get(&created.id).await.unwrap();
//! assert_eq!(fetched, created);
//! # });
//! ```

// Domain types shared by every layer
pub mod models;

// Record store, message service and GraphQL schema
pub mod engine;

// HTTP server exposing the schema
pub mod server;

// GraphQL client used by the `client` binary
pub mod client;

pub use models::{Message, MessageId, Record};

pub use engine::{
    graphql::{
        create_schema, create_schema_with_service, MessageGQL, MessageInput, MessageSchema,
        Mutation, Query,
    },
    ids::{IdGenerator, RandomIdGenerator},
    messages::MessageService,
    storage::{InMemoryRecordStore, RecordStore},
};

pub use server::graphql::{GraphQLServer, GraphQLServerBuilder, GraphQLServerConfig};

pub use client::{ClientConfig, MessageClient};

use thiserror::Error;

/// Errors produced by the message engine
///
/// `MessageNotFound` is the only failure the message operations raise under
/// normal operation. `InvalidInput`, `Storage` and `Internal` cover the dice
/// resolvers, a poisoned store lock and the identifier collision guard;
/// `Network` and `GraphQL` are only produced by [`MessageClient`].
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// No record is stored under the requested identifier
    #[error("no message exists with id {id}")]
    MessageNotFound { id: String },

    /// Arguments outside the accepted range
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// The record store could not be accessed
    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Internal error: {0}")]
    Internal(String),

    /// HTTP transport failure in the client
    #[error("Network error: {0}")]
    Network(String),

    /// Errors reported by a remote GraphQL server
    #[error("GraphQL error: {0}")]
    GraphQL(String),
}

impl Error {
    /// Machine-readable code surfaced in GraphQL error extensions
    pub fn code(&self) -> &'static str {
        match self {
            Error::MessageNotFound { .. } => "NOT_FOUND",
            Error::InvalidInput(_) => "INVALID_INPUT",
            Error::Storage(_) | Error::Internal(_) => "INTERNAL",
            Error::Network(_) | Error::GraphQL(_) => "UPSTREAM",
        }
    }
}

/// Type alias for Results that use the crate error type
pub type Result<T> = std::result::Result<T, Error>;
