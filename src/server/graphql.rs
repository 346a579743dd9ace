// GraphQL server implementation
// Serves the message schema over HTTP with a GraphiQL explorer

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context as _;
use async_graphql::http::GraphiQLSource;
use async_graphql_axum::{GraphQLRequest, GraphQLResponse};
use axum::{
    extract::State,
    http::StatusCode,
    response::{Html, IntoResponse},
    routing::get,
    Router, Server,
};
use tower_http::cors::CorsLayer;
use tracing::{error, info};

use crate::engine::{
    graphql::{create_schema_with_service, MessageSchema},
    messages::MessageService,
    storage::{InMemoryRecordStore, RecordStore},
};

/// GraphQL server configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GraphQLServerConfig {
    pub host: String,
    pub port: u16,
    pub cors_enabled: bool,
}

impl Default for GraphQLServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 4000,
            cors_enabled: true,
        }
    }
}

impl GraphQLServerConfig {
    /// Resolve `host:port` to the address to bind
    pub async fn socket_addr(&self) -> anyhow::Result<SocketAddr> {
        tokio::net::lookup_host((self.host.as_str(), self.port))
            .await
            .with_context(|| format!("failed to resolve {}:{}", self.host, self.port))?
            .next()
            .with_context(|| format!("no address found for {}:{}", self.host, self.port))
    }
}

/// Shared state handed to every route
#[derive(Clone)]
struct AppState {
    schema: MessageSchema,
    service: MessageService,
}

/// GraphQL server
pub struct GraphQLServer {
    config: GraphQLServerConfig,
    store: Arc<dyn RecordStore>,
}

impl GraphQLServer {
    pub fn new() -> Self {
        Self {
            config: GraphQLServerConfig::default(),
            store: Arc::new(InMemoryRecordStore::new()),
        }
    }

    pub fn with_config(mut self, config: GraphQLServerConfig) -> Self {
        self.config = config;
        self
    }

    pub fn with_store(mut self, store: Arc<dyn RecordStore>) -> Self {
        self.store = store;
        self
    }

    pub fn config(&self) -> &GraphQLServerConfig {
        &self.config
    }

    /// Build the axum router without binding a socket
    pub fn router(&self) -> Router {
        let service = MessageService::new(self.store.clone());
        let state = AppState {
            schema: create_schema_with_service(service.clone()),
            service,
        };

        let app = Router::new()
            .route("/", get(graphiql).post(graphql_handler))
            .route("/graphql", get(graphiql).post(graphql_handler))
            .route("/health", get(health_check))
            .with_state(state);

        if self.config.cors_enabled {
            app.layer(CorsLayer::permissive())
        } else {
            app
        }
    }

    /// Bind and serve until Ctrl-C
    pub async fn run(self) -> anyhow::Result<()> {
        let addr = self.config.socket_addr().await?;
        let app = self.router();

        info!(
            "Running a GraphQL API server at http://{}:{}/graphql",
            self.config.host, self.config.port
        );
        info!("GraphiQL interface: http://{}:{}/graphql", self.config.host, self.config.port);

        Server::try_bind(&addr)
            .with_context(|| format!("failed to bind {}", addr))?
            .serve(app.into_make_service())
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        info!("Server stopped");
        Ok(())
    }
}

impl Default for GraphQLServer {
    fn default() -> Self {
        Self::new()
    }
}

/// Fluent builder over `GraphQLServer`
pub struct GraphQLServerBuilder {
    server: GraphQLServer,
}

impl GraphQLServerBuilder {
    pub fn new() -> Self {
        Self {
            server: GraphQLServer::new(),
        }
    }

    pub fn with_store(mut self, store: Arc<dyn RecordStore>) -> Self {
        self.server = self.server.with_store(store);
        self
    }

    pub fn with_port(self, port: u16) -> Self {
        let config = GraphQLServerConfig {
            port,
            ..self.server.config.clone()
        };
        self.with_config(config)
    }

    pub fn with_host(self, host: impl Into<String>) -> Self {
        let config = GraphQLServerConfig {
            host: host.into(),
            ..self.server.config.clone()
        };
        self.with_config(config)
    }

    pub fn with_cors(self, enabled: bool) -> Self {
        let config = GraphQLServerConfig {
            cors_enabled: enabled,
            ..self.server.config.clone()
        };
        self.with_config(config)
    }

    pub fn with_config(mut self, config: GraphQLServerConfig) -> Self {
        self.server = self.server.with_config(config);
        self
    }

    pub fn build(self) -> GraphQLServer {
        self.server
    }

    pub fn build_router(self) -> Router {
        self.server.router()
    }

    pub async fn build_and_run(self) -> anyhow::Result<()> {
        self.server.run().await
    }
}

impl Default for GraphQLServerBuilder {
    fn default() -> Self {
        Self::new()
    }
}

// GraphQL handler
async fn graphql_handler(State(state): State<AppState>, req: GraphQLRequest) -> GraphQLResponse {
    state.schema.execute(req.into_inner()).await.into()
}

// GraphiQL explorer pointed at the POST endpoint
async fn graphiql() -> impl IntoResponse {
    Html(GraphiQLSource::build().endpoint("/graphql").finish())
}

// Health check endpoint
async fn health_check(State(state): State<AppState>) -> impl IntoResponse {
    match state.service.store().len().await {
        Ok(count) => (
            StatusCode::OK,
            format!("GraphQL message server is running ({} messages stored)", count),
        ),
        Err(e) => {
            error!("health check failed: {}", e);
            (StatusCode::INTERNAL_SERVER_ERROR, e.to_string())
        }
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!("failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}
