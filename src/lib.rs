pub mod api;
pub mod cache;
pub mod catalog;
pub mod config;
pub mod error;
pub mod logging;
pub mod metrics;
pub mod planner;
pub mod routes;
pub mod state;
pub mod store;

use std::sync::Arc;
use anyhow::Context;
use crate::metrics::Metrics;
use crate::planner::week::Slot;

/// Start up: logging, config, demo user, and a fresh week plan saved to disk
pub fn run() -> anyhow::Result<()> {
    // Initialize structured logging first
    logging::init_logging();
    tracing::info!("Palate Planner starting");

    let config = config::planner::get_config();
    let backend = Arc::new(store::FileStore::new(config.data_dir.clone()));
    let ctx = routes::AppContext::new(config, backend);

    let rt = tokio::runtime::Runtime::new()
        .context("Failed to create async runtime")?;

    rt.block_on(async {
        let user_id = ctx.users.seed_demo_user().await?;
        ctx.users.set_current_user(&user_id).await?;

        let week = routes::generate_week_plan(&ctx, user_id.clone())
            .await
            .map_err(anyhow::Error::msg)?;

        for (day, plan) in &week {
            let meals: Vec<&str> = Slot::ALL
                .iter()
                .filter_map(|slot| plan.get(slot).map(|meal| meal.name.as_str()))
                .collect();
            tracing::info!(day = %day, meals = ?meals, "Planned day");
        }

        let metrics = &ctx.state.metrics;
        tracing::info!(
            user_id = %user_id,
            data_dir = ?config.data_dir,
            selections = Metrics::get(&metrics.selections),
            recency_relaxations = Metrics::get(&metrics.recency_relaxations),
            dietary_relaxations = Metrics::get(&metrics.dietary_relaxations),
            plan_writes = Metrics::get(&metrics.plan_writes),
            "Palate Planner ready"
        );
        Ok::<(), anyhow::Error>(())
    })
}
