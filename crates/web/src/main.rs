use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use axum::extract::DefaultBodyLimit;
use axum::http::{HeaderValue, Method, header};
use storage::Database;
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

mod auth;
mod blob;
mod config;
mod error;
mod extract;
mod features;
mod mailer;
mod middleware;
mod multipart;
mod routes;
mod state;

use auth::{GoogleVerifier, JwtKeys};
use blob::{BlobStore, LocalBlobStore, RemoteBlobStore, UPLOADS_ROUTE};
use config::{BlobStoreConfig, Config};
use features::{
    announcements, applications, auth as auth_feature, categories, contact, events, games,
    health, judge_panel, judges, news, players,
};
use mailer::{LogMailer, Mailer, WebhookMailer};
use middleware::auth::ApiKeys;
use state::{AppState, Settings};

const MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;

#[derive(OpenApi)]
#[openapi(
    paths(
        health::handlers::health,
        auth_feature::handlers::register,
        auth_feature::handlers::login,
        auth_feature::handlers::judge_login,
        auth_feature::handlers::logout,
        auth_feature::handlers::google_login,
        auth_feature::handlers::me,
        applications::handlers::apply,
        applications::handlers::list_applications,
        applications::handlers::applications_by_email,
        applications::handlers::game_post_holders,
        applications::handlers::review_application,
        applications::handlers::delete_application,
        categories::handlers::list_categories,
        categories::handlers::get_category,
        categories::handlers::create_category,
        categories::handlers::update_category,
        categories::handlers::delete_category,
        games::handlers::list_games,
        games::handlers::get_game,
        games::handlers::create_game,
        games::handlers::update_game,
        games::handlers::delete_game,
        events::handlers::list_events,
        events::handlers::get_event,
        events::handlers::create_event,
        events::handlers::update_event,
        events::handlers::delete_event,
        announcements::handlers::list_announcements,
        announcements::handlers::get_announcement,
        announcements::handlers::create_announcement,
        announcements::handlers::update_announcement,
        announcements::handlers::delete_announcement,
        news::handlers::list_news,
        news::handlers::get_news,
        news::handlers::create_news,
        news::handlers::update_news,
        news::handlers::delete_news,
        players::handlers::create_player,
        players::handlers::list_players,
        players::handlers::import_players,
        judges::handlers::create_judge,
        judges::handlers::list_judges,
        judges::handlers::get_judge,
        judges::handlers::update_judge,
        judges::handlers::delete_judge,
        judge_panel::handlers::assigned_games,
        judge_panel::handlers::announce_result,
        contact::handlers::submit_message,
    ),
    components(
        schemas(
            error::ErrorBody,
            health::handlers::HealthStatus,
            storage::dto::account::RegisterRequest,
            storage::dto::account::LoginRequest,
            storage::dto::account::GoogleLoginRequest,
            storage::dto::account::AuthPayload,
            storage::dto::application::CreateApplicationRequest,
            storage::dto::application::ReviewApplicationRequest,
            storage::dto::application::GamePostHolders,
            storage::dto::category::CreateCategoryRequest,
            storage::dto::category::UpdateCategoryRequest,
            storage::dto::game::CreateGameRequest,
            storage::dto::game::UpdateGameRequest,
            storage::dto::event::CreateEventRequest,
            storage::dto::event::UpdateEventRequest,
            storage::dto::announcement::CreateAnnouncementRequest,
            storage::dto::announcement::UpdateAnnouncementRequest,
            storage::dto::news::CreateNewsRequest,
            storage::dto::news::UpdateNewsRequest,
            storage::dto::player::CreatePlayerRequest,
            storage::dto::player::ImportPlayersResponse,
            storage::dto::judge::CreateJudgeRequest,
            storage::dto::judge::UpdateJudgeRequest,
            storage::dto::judge::JudgeResponse,
            storage::dto::judge::AnnounceResultRequest,
            storage::dto::contact::CreateContactRequest,
            storage::dto::common::PaginationMeta,
            storage::dto::common::StatusMessage,
            storage::dto::common::ImageRef,
            storage::models::Account,
            storage::models::Application,
            storage::models::Category,
            storage::models::Game,
            storage::models::Event,
            storage::models::Announcement,
            storage::models::News,
            storage::models::Player,
            storage::models::PlayerWithRefs,
            storage::models::Judge,
            storage::models::JudgeAssignment,
            storage::models::JudgeAssignmentDetail,
            storage::models::ContactMessage,
        )
    ),
    tags(
        (name = "health", description = "Liveness probe"),
        (name = "auth", description = "Registration, sign-in and sessions"),
        (name = "applications", description = "Applications for society posts"),
        (name = "categories", description = "Activity categories"),
        (name = "games", description = "Games within categories"),
        (name = "events", description = "Society events"),
        (name = "announcements", description = "Announcements by audience"),
        (name = "news", description = "News articles"),
        (name = "players", description = "Player registrations and CSV import"),
        (name = "judges", description = "Judge management"),
        (name = "judge-panel", description = "Endpoints for signed-in judges"),
        (name = "contact", description = "Contact form"),
    ),
    modifiers(&SecurityAddon)
)]
struct ApiDoc;

struct SecurityAddon;

impl utoipa::Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                utoipa::openapi::security::SecurityScheme::Http(
                    utoipa::openapi::security::HttpBuilder::new()
                        .scheme(utoipa::openapi::security::HttpAuthScheme::Bearer)
                        .bearer_format("JWT or API key")
                        .build(),
                ),
            )
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()),
        )
        .with_target(true)
        .with_file(true)
        .with_line_number(true)
        .init();

    tracing::info!("Starting activities platform API");

    let config = Config::from_env().context("Failed to load API configuration")?;
    tracing::info!("Configuration loaded successfully");

    tracing::info!(
        "Connecting to database at: {}",
        config
            .database_url
            .split('@')
            .next_back()
            .unwrap_or("unknown")
    );
    let db = Database::new(&config.database_url)
        .await
        .context("Failed to initialize database")?;
    tracing::info!("Database connection established");

    tracing::info!("Running database migrations");
    db.run_migrations()
        .await
        .context("Failed to run migrations")?;
    tracing::info!("Database migrations completed successfully");

    let http = reqwest::Client::builder()
        .timeout(Duration::from_secs(15))
        .build()
        .context("Failed to build HTTP client")?;

    let (blobs, uploads_dir) = blob_store(&config.blob_store, &http).await?;

    let mailer: Arc<dyn Mailer> = match config.mail_webhook_url.clone() {
        Some(url) => Arc::new(WebhookMailer::new(http.clone(), url)),
        None => {
            tracing::warn!("MAIL_WEBHOOK_URL not set, outgoing mail will only be logged");
            Arc::new(LogMailer)
        }
    };

    if config.google_client_id.is_none() {
        tracing::warn!("GOOGLE_CLIENT_ID not set, Google sign-in is disabled");
    }

    let state = AppState {
        db,
        api_keys: ApiKeys::from_comma_separated(&config.api_keys),
        jwt: JwtKeys::new(&config.auth_secret, config.token_ttl_hours),
        google: GoogleVerifier::new(http, config.google_client_id.clone()),
        blobs,
        mailer,
        settings: Arc::new(Settings {
            mail_from: config.mail_from.clone(),
            default_judge_password: config.default_judge_password.clone(),
        }),
    };

    let mut app = routes::api(state.clone())
        .with_state(state)
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()));

    if let Some(dir) = uploads_dir {
        tracing::info!("Serving uploaded files from {}", dir.display());
        app = app.nest_service(UPLOADS_ROUTE, ServeDir::new(dir));
    }

    let app = app
        .layer(DefaultBodyLimit::max(MAX_UPLOAD_BYTES))
        .layer(TraceLayer::new_for_http())
        .layer(cors_layer(&config.cors_origins)?);

    let bind_address = format!("{}:{}", config.host, config.port);
    tracing::info!("Starting server at http://{}", bind_address);
    tracing::info!(
        "Swagger UI available at http://{}/swagger-ui/",
        bind_address
    );

    let listener = tokio::net::TcpListener::bind(&bind_address)
        .await
        .with_context(|| format!("Failed to bind {bind_address}"))?;
    axum::serve(listener, app).await?;

    Ok(())
}

async fn blob_store(
    config: &BlobStoreConfig,
    http: &reqwest::Client,
) -> anyhow::Result<(Arc<dyn BlobStore>, Option<PathBuf>)> {
    match config {
        BlobStoreConfig::Remote { url, api_key } => {
            tracing::info!("Using remote blob store at {}", url);
            Ok((
                Arc::new(RemoteBlobStore::new(http.clone(), url, api_key.clone())),
                None,
            ))
        }
        BlobStoreConfig::Local {
            root,
            public_base_url,
        } => {
            let store = LocalBlobStore::new(root.clone(), public_base_url)
                .await
                .context("Failed to prepare the upload directory")?;
            let dir = store.root().to_path_buf();
            Ok((Arc::new(store), Some(dir)))
        }
    }
}

/// Any origin when none are configured, otherwise only the listed ones.
fn cors_layer(origins: &[String]) -> anyhow::Result<CorsLayer> {
    let cors = CorsLayer::new().max_age(Duration::from_secs(3600));

    if origins.is_empty() {
        return Ok(cors
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any));
    }

    let origins = origins
        .iter()
        .map(|o| o.parse::<HeaderValue>())
        .collect::<Result<Vec<_>, _>>()
        .context("CORS_ORIGINS contains an invalid origin")?;

    Ok(cors
        .allow_origin(origins)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([header::AUTHORIZATION, header::CONTENT_TYPE])
        .allow_credentials(true))
}
