// HTTP server exposing the message schema

//! # Server Module
//!
//! ```text
//! Client (any language)
//!        ↓ HTTP/GraphQL
//! Server Layer (this module) ← axum router, GraphiQL, health check
//!        ↓
//! Engine Layer ← schema, MessageService, RecordStore
//! ```

/// axum-based GraphQL server, configuration and builder
pub mod graphql;

pub use graphql::{GraphQLServer, GraphQLServerBuilder, GraphQLServerConfig};
