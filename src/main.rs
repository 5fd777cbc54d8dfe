use std::sync::Arc;

use axum::http::{header, Method};
use axum::Router;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use linkstash_api::config::Config;
use linkstash_api::graphql::SchemaBuilder;
use linkstash_api::repositories::{
    LinkRepository, MongoLinkRepository, MongoTagRepository, MongoUserRepository, TagRepository,
    UserRepository,
};
use linkstash_api::routes::{graphql_router, health_router, GraphQLState, HealthState};
use linkstash_api::services::{
    auth::AuthConfig, AuthService, GithubProvider, HttpPageMetadataFetcher, IdentityProviders,
    PageMetadataFetcher,
};

/// Build the CORS layer based on configuration.
///
/// Configured origins are always honored; without configuration, development
/// gets permissive CORS for convenience while production rejects
/// cross-origin requests.
fn build_cors_layer(config: &Config) -> CorsLayer {
    match &config.cors_allowed_origins {
        Some(origins) if !origins.is_empty() => {
            let allowed_origins: Vec<_> = origins
                .iter()
                .filter_map(|origin| {
                    origin.parse().ok().or_else(|| {
                        tracing::warn!("Invalid CORS origin '{}', skipping", origin);
                        None
                    })
                })
                .collect();

            CorsLayer::new()
                .allow_origin(allowed_origins)
                .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
                .allow_headers([
                    header::AUTHORIZATION,
                    header::CONTENT_TYPE,
                    header::ACCEPT,
                ])
        }
        _ if config.is_production() => {
            tracing::warn!(
                "CORS_ORIGINS not configured in production; cross-origin requests are rejected"
            );
            CorsLayer::new()
        }
        _ => {
            tracing::warn!("Using permissive CORS in development mode");
            CorsLayer::permissive()
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "linkstash_api=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    dotenvy::dotenv().ok();
    let config = Config::from_env()?;

    tracing::info!("Starting Linkstash API server on port {}", config.port);

    tracing::info!("Connecting to document store...");
    let client = mongodb::Client::with_uri_str(&config.mongo_url).await?;
    let db = client.database(&config.mongo_database);
    tracing::info!(database = %config.mongo_database, "Document store connection established");

    let links: Arc<dyn LinkRepository> = Arc::new(MongoLinkRepository::new(&db));
    let tags: Arc<dyn TagRepository> = Arc::new(MongoTagRepository::new(&db));
    let users: Arc<dyn UserRepository> = Arc::new(MongoUserRepository::new(&db));

    let auth_service = AuthService::new(
        AuthConfig::new(config.jwt_secret.clone()).with_ttl(config.token_ttl_secs),
    );

    let mut identity_providers = IdentityProviders::new();
    match (&config.github_client_id, &config.github_client_secret) {
        (Some(id), Some(secret)) => {
            identity_providers = identity_providers.register(
                "github",
                Arc::new(GithubProvider::new(id.clone(), secret.clone())),
            );
            tracing::info!("GitHub identity provider registered");
        }
        _ => {
            tracing::warn!("GitHub OAuth credentials not configured; GitHub login disabled");
        }
    }

    let page_meta: Arc<dyn PageMetadataFetcher> = Arc::new(HttpPageMetadataFetcher::new());

    let schema = SchemaBuilder::new()
        .links(links)
        .tags(tags.clone())
        .users(users.clone())
        .auth_service(auth_service.clone())
        .identity_providers(identity_providers)
        .page_meta(page_meta)
        .build();

    let graphql_state = GraphQLState {
        schema,
        auth_service,
        users,
        tags,
    };

    let app = Router::new()
        .merge(graphql_router(graphql_state, !config.is_production()))
        .merge(health_router(HealthState { db }))
        .layer(build_cors_layer(&config))
        .layer(TraceLayer::new_for_http());

    let addr = std::net::SocketAddr::from(([0, 0, 0, 0], config.port));
    tracing::info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
