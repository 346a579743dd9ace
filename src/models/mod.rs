// Core domain models for the message API

//! # Domain Models Module
//!
//! Plain data types shared by the engine and server layers. Nothing in here
//! knows about GraphQL or storage; the GraphQL representations live in
//! `engine::graphql` and convert from these types.

// Contains MessageId, Record and Message
pub mod message;

pub use message::{Message, MessageId, Record};
