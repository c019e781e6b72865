use std::sync::Arc;

use clap::{Parser, Subcommand};
use meet_datastore::PgDataStore;
use meet_relay::{
    auth::AuthApiClient,
    http::{self, AppState},
    tracing::init_tracing_subscriber,
    video::{VideoApiClient, VideoPlatform, TRANSCRIPT_READY_EVENT},
    GeminiClient, TranscriptPipelineBuilder,
};

#[derive(Parser)]
#[command(name = "meet-relay", about = "Meeting rooms, transcripts and AI briefings")]
struct Cli {
    /// Database connection URL
    #[arg(long, env = "DATABASE_URL")]
    database_url: String,

    /// Video platform API key
    #[arg(long, env = "VIDEO_API_KEY")]
    video_api_key: String,

    /// Video platform base URL override
    #[arg(long, env = "VIDEO_API_BASE_URL")]
    video_api_base_url: Option<String>,

    /// Generative model API key
    #[arg(long, env = "GEMINI_API_KEY")]
    gemini_api_key: String,

    /// Auth service base URL
    #[arg(long, env = "AUTH_BASE_URL")]
    auth_base_url: String,

    /// Auth service API key
    #[arg(long, env = "AUTH_API_KEY")]
    auth_api_key: String,

    /// HTTP listen port
    #[arg(long, env = "PORT", default_value = "8080")]
    port: u16,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Run the HTTP server
    Serve,
    /// Manage webhook registrations on the video platform
    Webhooks {
        #[command(subcommand)]
        action: WebhookAction,
    },
}

#[derive(Subcommand)]
enum WebhookAction {
    /// List registered webhooks
    List,
    /// Register a webhook delivery URL for transcript events
    Create {
        /// Publicly reachable URL of this service's webhook endpoint
        #[arg(long)]
        url: String,
    },
    /// Remove every registered webhook
    DeleteAll,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let _ = dotenvy::dotenv();

    let _guard = sentry::init((
        std::env::var("SENTRY_DSN").unwrap_or_default(),
        sentry::ClientOptions {
            release: sentry::release_name!(),
            environment: Some("production".into()),
            ..Default::default()
        },
    ));

    let cli = Cli::parse();
    init_tracing_subscriber()?;

    let video = match &cli.video_api_base_url {
        Some(url) => VideoApiClient::new(&cli.video_api_key).with_base_url(url),
        None => VideoApiClient::new(&cli.video_api_key),
    };

    match cli.command {
        Command::Serve => {
            tracing::info!(port = cli.port, "Starting relay server...");

            let store = PgDataStore::init(&cli.database_url).await?;
            let summarizer = GeminiClient::new(&cli.gemini_api_key);
            let auth = AuthApiClient::new(&cli.auth_base_url, &cli.auth_api_key);

            let pipeline = TranscriptPipelineBuilder::new()
                .store(store.clone())
                .video(video.clone())
                .summarizer(summarizer)
                .build();

            let state = AppState {
                store,
                video,
                auth,
                pipeline: Arc::new(pipeline),
            };

            http::serve(state, cli.port).await?;
        }
        Command::Webhooks { action } => match action {
            WebhookAction::List => {
                let webhooks = video.list_webhooks().await?;
                if webhooks.is_empty() {
                    println!("No webhooks registered");
                }
                for hook in webhooks {
                    println!(
                        "{}  {}  [{}]",
                        hook.uuid.as_deref().unwrap_or("-"),
                        hook.url,
                        hook.event_types.join(", ")
                    );
                }
            }
            WebhookAction::Create { url } => {
                let hook = video
                    .create_webhook(&url, &[TRANSCRIPT_READY_EVENT])
                    .await?;
                println!(
                    "Registered webhook {} -> {}",
                    hook.uuid.as_deref().unwrap_or("-"),
                    hook.url
                );
            }
            WebhookAction::DeleteAll => {
                let webhooks = video.list_webhooks().await?;
                for hook in &webhooks {
                    if let Some(uuid) = &hook.uuid {
                        video.delete_webhook(uuid).await?;
                        println!("Deleted webhook {uuid}");
                    }
                }
                println!("Deleted {} webhook(s)", webhooks.len());
            }
        },
    }

    Ok(())
}
