//! GraphQL client for the message API
//!
//! Speaks plain GraphQL-over-HTTP, so it works against any server exposing
//! the same three message operations.

use std::time::Duration;

use reqwest::Client as HttpClient;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tracing::debug;

use crate::models::{Message, MessageId, Record};
use crate::{Error, Result};

pub const DEFAULT_ENDPOINT: &str = "http://localhost:4000/graphql";

const MESSAGE_FIELDS: &str = "id content author";

/// Configuration for the message client
#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub endpoint: String,
    pub timeout_ms: u64,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            timeout_ms: 30_000,
        }
    }
}

#[derive(Serialize)]
struct GraphQLRequest<'a> {
    query: &'a str,
    variables: Value,
}

#[derive(Deserialize)]
struct GraphQLResponse<T> {
    data: Option<T>,
    #[serde(default)]
    errors: Vec<GraphQLError>,
}

#[derive(Deserialize)]
struct GraphQLError {
    message: String,
    #[serde(default)]
    extensions: Option<Value>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct GetMessageData {
    get_message: Option<Message>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct CreateMessageData {
    create_message: Option<Message>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct UpdateMessageData {
    update_message: Option<Message>,
}

#[derive(Deserialize)]
struct HelloData {
    hello: String,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RollDiceData {
    roll_dice: Vec<i32>,
}

/// Client for the message GraphQL API
#[derive(Debug, Clone)]
pub struct MessageClient {
    config: ClientConfig,
    http_client: HttpClient,
}

impl MessageClient {
    pub fn new(config: ClientConfig) -> Result<Self> {
        let http_client = HttpClient::builder()
            .timeout(Duration::from_millis(config.timeout_ms))
            .build()
            .map_err(|e| Error::Network(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            config,
            http_client,
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.config.endpoint
    }

    /// Send a raw GraphQL document and decode its `data`
    ///
    /// A response carrying errors is turned into an `Error`: a `NOT_FOUND`
    /// code becomes `MessageNotFound`, anything else becomes `GraphQL`.
    pub async fn execute<T: DeserializeOwned>(&self, query: &str, variables: Value) -> Result<T> {
        debug!(endpoint = %self.config.endpoint, "sending GraphQL request");

        let response = self
            .http_client
            .post(&self.config.endpoint)
            .json(&GraphQLRequest { query, variables })
            .send()
            .await
            .map_err(|e| Error::Network(format!("Request failed: {}", e)))?;

        let status = response.status();
        let body: GraphQLResponse<T> = response.json().await.map_err(|e| {
            Error::Network(format!("Invalid response (HTTP {}): {}", status, e))
        })?;

        if let Some(error) = body.errors.first() {
            return Err(remote_error(error, &body.errors));
        }

        body.data
            .ok_or_else(|| Error::GraphQL("response contained no data".to_string()))
    }

    pub async fn get_message(&self, id: &MessageId) -> Result<Message> {
        let query = format!(
            "query($id: ID!) {{ getMessage(id: $id) {{ {} }} }}",
            MESSAGE_FIELDS
        );
        let data: GetMessageData = self.execute(&query, json!({ "id": id })).await?;
        data.get_message.ok_or_else(|| missing(id))
    }

    pub async fn create_message(&self, record: &Record) -> Result<Message> {
        let query = format!(
            "mutation($input: MessageInput) {{ createMessage(input: $input) {{ {} }} }}",
            MESSAGE_FIELDS
        );
        let data: CreateMessageData = self.execute(&query, json!({ "input": record })).await?;
        data.create_message
            .ok_or_else(|| Error::GraphQL("createMessage returned null".to_string()))
    }

    pub async fn update_message(&self, id: &MessageId, record: &Record) -> Result<Message> {
        let query = format!(
            "mutation($id: ID!, $input: MessageInput) {{ updateMessage(id: $id, input: $input) {{ {} }} }}",
            MESSAGE_FIELDS
        );
        let data: UpdateMessageData = self
            .execute(&query, json!({ "id": id, "input": record }))
            .await?;
        data.update_message.ok_or_else(|| missing(id))
    }

    pub async fn hello(&self) -> Result<String> {
        let data: HelloData = self.execute("{ hello }", json!({})).await?;
        Ok(data.hello)
    }

    pub async fn roll_dice(&self, num_dice: i32, num_sides: Option<i32>) -> Result<Vec<i32>> {
        let data: RollDiceData = self
            .execute(
                "query($numDice: Int!, $numSides: Int) { rollDice(numDice: $numDice, numSides: $numSides) }",
                json!({ "numDice": num_dice, "numSides": num_sides }),
            )
            .await?;
        Ok(data.roll_dice)
    }
}

fn remote_error(first: &GraphQLError, all: &[GraphQLError]) -> Error {
    let code = first
        .extensions
        .as_ref()
        .and_then(|ext| ext.get("code"))
        .and_then(Value::as_str);

    if code == Some("NOT_FOUND") {
        if let Some(id) = first.message.strip_prefix("no message exists with id ") {
            return Error::MessageNotFound { id: id.to_string() };
        }
    }

    let messages: Vec<&str> = all.iter().map(|e| e.message.as_str()).collect();
    Error::GraphQL(messages.join(", "))
}

fn missing(id: &MessageId) -> Error {
    Error::MessageNotFound { id: id.to_string() }
}
