use axum::{
    routing::{get, post},
    Router,
};
use quiz_backend::{
    config::{get_config, init_config},
    database::pool::create_pool,
    routes, AppState,
};
use std::net::SocketAddr;
use std::time::Duration;
use tokio::net::TcpListener;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();
    init_config()?;
    let config = get_config();

    let pool = create_pool().await?;
    sqlx::migrate!("./migrations").run(&pool).await?;

    let app_state = AppState::new(pool);

    {
        // Tokens for abandoned attempts are never redeemed; only the sweep
        // removes them.
        let store = app_state.attempt_store.clone();
        tokio::spawn(async move {
            loop {
                tokio::time::sleep(Duration::from_secs(60)).await;
                let removed = store.sweep();
                if removed > 0 {
                    tracing::debug!(removed, "swept expired attempt tokens");
                }
            }
        });
    }

    let base_routes = Router::new().route("/health", get(routes::health::health));

    let quiz_api = Router::new()
        .route("/api/quizzes", get(routes::quiz_routes::list_quizzes))
        .route(
            "/api/quizzes/grouped",
            get(routes::quiz_routes::grouped_quizzes),
        )
        .route("/api/quizzes/random", get(routes::quiz_routes::random_quiz))
        .route(
            "/api/quizzes/random/submit",
            post(routes::attempt_routes::submit_random),
        )
        .route("/api/quizzes/:id", get(routes::quiz_routes::get_quiz))
        .route(
            "/api/quizzes/:id/submit",
            post(routes::attempt_routes::submit_quiz),
        )
        .layer(axum::middleware::from_fn_with_state(
            quiz_backend::middleware::rate_limit::new_rps_state(config.public_rps),
            quiz_backend::middleware::rate_limit::rps_middleware,
        ));

    let results_api = Router::new()
        .route("/api/results", get(routes::result_routes::my_results))
        .route(
            "/api/results/summary",
            get(routes::result_routes::my_summary),
        )
        .layer(axum::middleware::from_fn(
            quiz_backend::middleware::auth::require_bearer_auth,
        ));

    let app = base_routes
        .merge(quiz_api)
        .merge(results_api)
        .with_state(app_state)
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http());

    let addr: SocketAddr = config.server_address.parse()?;
    info!("Server listening on {}", addr);
    let listener = TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
