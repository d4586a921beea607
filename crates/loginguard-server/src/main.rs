mod config;
mod middleware;
mod routes;
mod state;

use std::sync::Arc;

use actix_web::{web, App, HttpServer};
use loginguard_core::counter_store::RedisCounterStore;
use loginguard_core::list_repository::PostgresListRepository;
use loginguard_core::{DecisionEngine, FlushScheduler, ListService, RateLimitConfig, RateLimiter};
use sqlx::postgres::PgPoolOptions;
use tracing::info;

use crate::config::Config;
use crate::state::AppState;

fn init_tracing(config: &Config) {
    use tracing_subscriber::{fmt, EnvFilter};

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.log_level.clone()));

    #[cfg(distribute)]
    {
        fmt().json().with_env_filter(filter).init();
    }

    #[cfg(not(distribute))]
    {
        fmt().pretty().with_env_filter(filter).init();
    }
}

async fn create_pool(config: &Config) -> sqlx::PgPool {
    PgPoolOptions::new()
        .max_connections(config.db_max_open_conns)
        .min_connections(config.db_max_idle_conns)
        .max_lifetime(config.db_conn_max_lifetime)
        .connect(&config.database_url)
        .await
        .expect("failed to create database connection pool")
}

async fn migrate(pool: &sqlx::PgPool) {
    sqlx::migrate!("./migrations").run(pool).await.expect("failed to run database migrations");
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenvy::dotenv().ok();

    let config = Config::from_env().expect("failed to load configuration");
    init_tracing(&config);
    info!(addr = %config.bind_addr, "starting loginguard-server");

    let pool = create_pool(&config).await;
    migrate(&pool).await;
    info!("database migrations applied");

    let counter_store: Arc<dyn loginguard_core::CounterStore> = Arc::new(
        RedisCounterStore::connect(&config.redis_url)
            .await
            .expect("failed to connect to redis"),
    );

    let list_repository = Arc::new(PostgresListRepository::new(pool));
    let lists = Arc::new(ListService::new(list_repository));

    let rate_limits = RateLimitConfig {
        login_limit: config.login_limit,
        password_limit: config.password_limit,
        ip_limit: config.ip_limit,
    };
    let limiter = Arc::new(RateLimiter::new(counter_store.clone(), rate_limits));

    let engine = Arc::new(
        DecisionEngine::new(lists.clone(), limiter).with_request_deadline(config.storage_timeout),
    );

    let mut flush_scheduler = FlushScheduler::new(counter_store, config.flush_interval);
    flush_scheduler.start();
    info!(interval_secs = config.flush_interval.as_secs(), "started counter flush scheduler");

    let app_state = web::Data::new(AppState { engine, lists });
    let bind = config.bind_addr.clone();
    let shutdown_timeout = config.shutdown_timeout;

    let server = HttpServer::new(move || {
        App::new()
            .app_data(app_state.clone())
            .wrap(middleware::RequestLogger)
            .configure(routes::configure)
    })
    .bind(&bind)?
    .shutdown_timeout(shutdown_timeout.as_secs())
    .run();

    server.await?;

    flush_scheduler.stop().await;
    info!("shutdown complete");
    Ok(())
}
