use std::sync::Arc;

use crate::config::{Config, LogFormat};
use saver_core::{
    goals::{GoalService, GoalServiceTrait},
    milestones::{MilestoneService, MilestoneServiceTrait},
    transactions::{TransactionService, TransactionServiceTrait},
};
use saver_storage_sqlite::{
    db, GoalRepository, MilestoneRepository, TransactionRepository,
};
use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, EnvFilter};

pub struct AppState {
    pub goal_service: Arc<dyn GoalServiceTrait + Send + Sync>,
    pub milestone_service: Arc<dyn MilestoneServiceTrait + Send + Sync>,
    pub transaction_service: Arc<dyn TransactionServiceTrait + Send + Sync>,
}

/// Installs the global subscriber. `log` records from the libraries are
/// forwarded through the subscriber's `tracing-log` bridge.
pub fn init_tracing(config: &Config) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let registry = tracing_subscriber::registry().with(filter);

    match config.log_format {
        LogFormat::Json => registry
            .with(fmt::layer().json().with_current_span(false))
            .init(),
        LogFormat::Text => registry
            .with(fmt::layer().with_target(true).with_line_number(true))
            .init(),
    }
}

pub async fn build_state(config: &Config) -> anyhow::Result<Arc<AppState>> {
    let db_path = db::init(&config.db_path)?;
    tracing::info!("Database path in use: {}", db_path);

    let pool = db::create_pool(&db_path)?;
    db::run_migrations(&pool)?;
    let writer = db::spawn_writer(&pool)?;

    let goal_repository = Arc::new(GoalRepository::new(pool.clone(), writer.clone()));
    let milestone_repository = Arc::new(MilestoneRepository::new(pool.clone(), writer.clone()));
    let transaction_repository = Arc::new(TransactionRepository::new(pool.clone(), writer));

    let goal_service = Arc::new(GoalService::new(goal_repository.clone()));
    let milestone_service = Arc::new(MilestoneService::new(milestone_repository.clone()));
    let transaction_service = Arc::new(TransactionService::new(
        transaction_repository,
        goal_repository,
        milestone_repository,
    ));

    Ok(Arc::new(AppState {
        goal_service,
        milestone_service,
        transaction_service,
    }))
}
