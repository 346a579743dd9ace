// GraphQL API for the message engine
// Exposes getMessage/createMessage/updateMessage plus the sample queries

use async_graphql::{
    Context, EmptySubscription, ErrorExtensions, InputObject, Object, Schema, SimpleObject, ID,
};

use crate::engine::dice;
use crate::engine::messages::MessageService;
use crate::models::{Message, MessageId, Record};

// GraphQL types - API representations of the domain models

#[derive(SimpleObject, Debug, Clone, PartialEq, Eq)]
#[graphql(name = "Message")]
pub struct MessageGQL {
    pub id: ID,
    pub content: Option<String>,
    pub author: Option<String>,
}

#[derive(InputObject, Debug, Clone, Default)]
pub struct MessageInput {
    pub content: Option<String>,
    pub author: Option<String>,
}

impl From<Message> for MessageGQL {
    fn from(message: Message) -> Self {
        Self {
            id: ID(message.id.into_inner()),
            content: message.content,
            author: message.author,
        }
    }
}

impl From<MessageInput> for Record {
    fn from(input: MessageInput) -> Self {
        Record::new(input.content, input.author)
    }
}

impl ErrorExtensions for crate::Error {
    fn extend(&self) -> async_graphql::Error {
        async_graphql::Error::new(self.to_string()).extend_with(|_, e| e.set("code", self.code()))
    }
}

// GraphQL Query root
pub struct Query;

#[Object]
impl Query {
    /// Fetch a message by ID; errors when no message exists with that ID
    async fn get_message(
        &self,
        ctx: &Context<'_>,
        id: ID,
    ) -> async_graphql::Result<Option<MessageGQL>> {
        let service = ctx.data::<MessageService>()?;
        let message = service
            .get(&MessageId::from(id.0))
            .await
            .map_err(|e| e.extend())?;
        Ok(Some(MessageGQL::from(message)))
    }

    async fn hello(&self) -> Option<String> {
        Some(dice::GREETING.to_string())
    }

    async fn quote_of_the_day(&self) -> Option<String> {
        Some(dice::quote_of_the_day(&mut rand::thread_rng()).to_string())
    }

    /// Uniform random number in [0, 1)
    async fn random(&self) -> f64 {
        dice::random_unit(&mut rand::thread_rng())
    }

    async fn roll_three_dice(&self) -> async_graphql::Result<Option<Vec<Option<i32>>>> {
        dice::roll_dice(&mut rand::thread_rng(), 3, None)
            .map(nullable_rolls)
            .map_err(|e| e.extend())
    }

    /// Roll `numDice` dice with `numSides` sides each (default 6)
    async fn roll_dice(
        &self,
        num_dice: i32,
        num_sides: Option<i32>,
    ) -> async_graphql::Result<Option<Vec<Option<i32>>>> {
        dice::roll_dice(&mut rand::thread_rng(), num_dice, num_sides)
            .map(nullable_rolls)
            .map_err(|e| e.extend())
    }
}

// Rolls are exposed as `[Int]`
fn nullable_rolls(rolls: Vec<i32>) -> Option<Vec<Option<i32>>> {
    Some(rolls.into_iter().map(Some).collect())
}

// GraphQL Mutation root
pub struct Mutation;

#[Object]
impl Mutation {
    /// Store a new message under a freshly generated ID
    async fn create_message(
        &self,
        ctx: &Context<'_>,
        input: Option<MessageInput>,
    ) -> async_graphql::Result<Option<MessageGQL>> {
        let service = ctx.data::<MessageService>()?;
        let record = Record::from(input.unwrap_or_default());
        let message = service.create(record).await.map_err(|e| e.extend())?;
        Ok(Some(MessageGQL::from(message)))
    }

    /// Replace an existing message; omitted fields become null
    async fn update_message(
        &self,
        ctx: &Context<'_>,
        id: ID,
        input: Option<MessageInput>,
    ) -> async_graphql::Result<Option<MessageGQL>> {
        let service = ctx.data::<MessageService>()?;
        let record = Record::from(input.unwrap_or_default());
        let message = service
            .update(&MessageId::from(id.0), record)
            .await
            .map_err(|e| e.extend())?;
        Ok(Some(MessageGQL::from(message)))
    }
}

// Schema type alias
pub type MessageSchema = Schema<Query, Mutation, EmptySubscription>;

/// Create the schema over a fresh in-memory store
pub fn create_schema() -> MessageSchema {
    create_schema_with_service(MessageService::in_memory())
}

/// Create the schema over an existing service
pub fn create_schema_with_service(service: MessageService) -> MessageSchema {
    Schema::build(Query, Mutation, EmptySubscription)
        .data(service)
        .finish()
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_graphql::{Request, Variables};
    use serde_json::{json, Value};

    async fn run(schema: &MessageSchema, query: &str, variables: Value) -> async_graphql::Response {
        schema
            .execute(Request::new(query).variables(Variables::from_json(variables)))
            .await
    }

    fn data(response: async_graphql::Response) -> Value {
        assert!(response.errors.is_empty(), "unexpected errors: {:?}", response.errors);
        response.data.into_json().unwrap()
    }

    const CREATE: &str = r#"
        mutation Create($input: MessageInput) {
            createMessage(input: $input) { id content author }
        }
    "#;

    const GET: &str = r#"
        query Get($id: ID!) {
            getMessage(id: $id) { id content author }
        }
    "#;

    const UPDATE: &str = r#"
        mutation Update($id: ID!, $input: MessageInput) {
            updateMessage(id: $id, input: $input) { id content author }
        }
    "#;

    #[tokio::test]
    async fn test_create_get_update_flow() {
        let schema = create_schema();

        let created = data(
            run(&schema, CREATE, json!({"input": {"content": "hi", "author": "ann"}})).await,
        );
        let id = created["createMessage"]["id"].as_str().unwrap().to_string();
        assert_eq!(id.len(), 20);
        assert_eq!(created["createMessage"]["content"], "hi");
        assert_eq!(created["createMessage"]["author"], "ann");

        let fetched = data(run(&schema, GET, json!({ "id": id })).await);
        assert_eq!(fetched["getMessage"], created["createMessage"]);

        let updated = data(
            run(
                &schema,
                UPDATE,
                json!({"id": id, "input": {"content": "bye", "author": "ann"}}),
            )
            .await,
        );
        assert_eq!(
            updated["updateMessage"],
            json!({"id": id, "content": "bye", "author": "ann"})
        );

        let fetched = data(run(&schema, GET, json!({ "id": id })).await);
        assert_eq!(
            fetched["getMessage"],
            json!({"id": id, "content": "bye", "author": "ann"})
        );
    }

    #[tokio::test]
    async fn test_create_without_input_stores_nulls() {
        let schema = create_schema();
        let created = data(run(&schema, CREATE, json!({})).await);
        assert_eq!(created["createMessage"]["content"], Value::Null);
        assert_eq!(created["createMessage"]["author"], Value::Null);
    }

    #[tokio::test]
    async fn test_get_unknown_id_reports_not_found() {
        let schema = create_schema();
        let response = run(&schema, GET, json!({"id": "nonexistent-id"})).await;

        assert_eq!(response.errors.len(), 1);
        let error = &response.errors[0];
        assert_eq!(error.message, "no message exists with id nonexistent-id");
        let error = serde_json::to_value(error).unwrap();
        assert_eq!(error["extensions"]["code"], "NOT_FOUND");
    }

    #[tokio::test]
    async fn test_update_unknown_id_does_not_create() {
        let schema = create_schema();
        let response = run(
            &schema,
            UPDATE,
            json!({"id": "nonexistent-id", "input": {"content": "x"}}),
        )
        .await;
        assert_eq!(response.errors.len(), 1);

        let response = run(&schema, GET, json!({"id": "nonexistent-id"})).await;
        assert_eq!(response.errors.len(), 1);
    }

    #[tokio::test]
    async fn test_sample_queries() {
        let schema = create_schema();
        let result = data(
            run(
                &schema,
                "{ hello quoteOfTheDay random rollThreeDice rollDice(numDice: 4, numSides: 2) }",
                json!({}),
            )
            .await,
        );

        assert_eq!(result["hello"], "Hello World!");
        assert!(dice::QUOTES.contains(&result["quoteOfTheDay"].as_str().unwrap()));
        let random = result["random"].as_f64().unwrap();
        assert!((0.0..1.0).contains(&random));
        assert_eq!(result["rollThreeDice"].as_array().unwrap().len(), 3);

        let rolls = result["rollDice"].as_array().unwrap();
        assert_eq!(rolls.len(), 4);
        assert!(rolls
            .iter()
            .all(|r| matches!(r.as_i64(), Some(1) | Some(2))));
    }

    #[tokio::test]
    async fn test_roll_dice_zero_sides_uses_six() {
        let schema = create_schema();
        let result = data(run(&schema, "{ rollDice(numDice: 50, numSides: 0) }", json!({})).await);

        let rolls = result["rollDice"].as_array().unwrap();
        assert_eq!(rolls.len(), 50);
        assert!(rolls
            .iter()
            .all(|r| (1..=6).contains(&r.as_i64().unwrap())));
    }

    #[tokio::test]
    async fn test_roll_dice_rejects_negative_count() {
        let schema = create_schema();
        let response = run(&schema, "{ rollDice(numDice: -1) }", json!({})).await;

        assert_eq!(response.errors.len(), 1);
        let error = serde_json::to_value(&response.errors[0]).unwrap();
        assert_eq!(error["extensions"]["code"], "INVALID_INPUT");
    }

    #[test]
    fn test_sdl_shape() {
        let sdl = create_schema().sdl();
        assert!(sdl.contains("getMessage(id: ID!): Message"));
        assert!(sdl.contains("createMessage(input: MessageInput): Message"));
        assert!(sdl.contains("updateMessage(id: ID!, input: MessageInput): Message"));
        assert!(sdl.contains("hello: String\n"));
        assert!(sdl.contains("quoteOfTheDay: String\n"));
        assert!(sdl.contains("random: Float!"));
        assert!(sdl.contains("rollThreeDice: [Int]\n"));
        assert!(sdl.contains("rollDice(numDice: Int!, numSides: Int): [Int]\n"));
    }
}
