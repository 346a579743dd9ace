// Message engine
// Storage, identifier minting, the message service and the GraphQL schema

//! # Engine Module
//!
//! Sits between the domain models and the HTTP server:
//! - `storage`: the `RecordStore` trait and its in-memory backend
//! - `ids`: identifier generation for new messages
//! - `messages`: `MessageService`, the get/create/update operations
//! - `dice`: helpers behind the sample queries
//! - `graphql`: schema, resolvers and GraphQL input/output types

pub mod dice;
pub mod graphql;
pub mod ids;
pub mod messages;
pub mod storage;

pub use graphql::{
    create_schema, create_schema_with_service, MessageGQL, MessageInput, MessageSchema,
};
pub use ids::{IdGenerator, RandomIdGenerator};
pub use messages::MessageService;
pub use storage::{InMemoryRecordStore, RecordStore};
