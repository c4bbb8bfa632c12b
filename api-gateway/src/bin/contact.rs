//! Contact Lambda - Appointment request form backend.
//!
//! Endpoints:
//! - POST /api/contact - Submit an appointment request
//! - GET /api/contact?limit=N - List stored requests
//! - OPTIONS * - CORS preflight

use lambda_http::{run, service_fn, Error, Request};
use shared::{BusinessProfile, Config, ContactService, DynamoStore, Notifier, SesMailer};
use std::sync::Arc;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

/// Application state
struct AppState {
    service: ContactService<DynamoStore, SesMailer>,
}

impl AppState {
    async fn new() -> Result<Self, Error> {
        let config = Config::from_env();
        let aws_config = aws_config::defaults(aws_config::BehaviorVersion::latest())
            .region(aws_config::Region::new(config.aws_region.clone()))
            .load()
            .await;

        if config.table_name.is_none() {
            warn!("DYNAMODB_TABLE not set; submissions cannot be stored");
        }
        info!(
            table = config.table_name.as_deref().unwrap_or("<unset>"),
            region = %config.aws_region,
            "Contact function starting"
        );

        let store = DynamoStore::new(
            aws_sdk_dynamodb::Client::new(&aws_config),
            config.table_name.clone(),
        );
        let mailer = SesMailer::new(aws_sdk_ses::Client::new(&aws_config), &config.from_email);
        let notifier = Notifier::new(mailer, BusinessProfile::from(&config));

        Ok(Self {
            service: ContactService::new(store, notifier),
        })
    }
}

#[tokio::main]
async fn main() -> Result<(), Error> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .init();

    let state = Arc::new(AppState::new().await?);
    let state_clone = state.clone();

    run(service_fn(move |event: Request| {
        let state = state_clone.clone();
        async move { state.service.handle(event).await }
    }))
    .await
}
