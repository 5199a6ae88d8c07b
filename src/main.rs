use std::sync::Arc;

use club_logbook::{
    app_state::AppState,
    domain::RatioConfig,
    get_postgres_pool,
    services::data_stores::PostgresLogbookStore,
    utils::{
        constants::{
            prod, DATABASE_URL, DUTY_ACTIVITIES, OTHER_ACTIVITIES, SECRET_KEY,
        },
        tracing::init_tracing,
    },
    Application,
};
use color_eyre::eyre::{eyre, Result};
use sqlx::PgPool;
use tokio::sync::RwLock;

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;
    init_tracing()?;

    let pg_pool = configure_postgresql().await?;
    let logbook_store =
        Arc::new(RwLock::new(PostgresLogbookStore::new(pg_pool)));

    let ratio_config =
        RatioConfig::new(DUTY_ACTIVITIES.clone(), OTHER_ACTIVITIES.clone())?;
    tracing::info!(
        "duty activities: {:?}, other activities: {:?}",
        ratio_config.duty_activities(),
        ratio_config.other_activities()
    );

    let app_state =
        AppState::new(logbook_store, ratio_config, SECRET_KEY.to_owned());

    let app = Application::build(app_state, prod::APP_ADDRESS)
        .await
        .map_err(|e| eyre!("Failed to build app: {e}"))?;

    app.run().await?;
    Ok(())
}

async fn configure_postgresql() -> Result<PgPool> {
    let pg_pool = get_postgres_pool(&DATABASE_URL).await?;

    sqlx::migrate!().run(&pg_pool).await?;

    Ok(pg_pool)
}
