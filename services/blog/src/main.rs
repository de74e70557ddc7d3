use sea_orm::Database;
use tracing::info;

use quill_blog::config::BlogConfig;
use quill_blog::infra::cache::RedisCodeStore;
use quill_blog::infra::code::RandomCodeGenerator;
use quill_blog::infra::mail::SmtpMailer;
use quill_blog::infra::mail_queue::MailQueue;
use quill_blog::router::build_router;
use quill_blog::state::AppState;
use quill_blog::usecase::verification::DeliverCodeUseCase;
use quill_core::config::Config;
use quill_core::tracing::init_tracing;

#[tokio::main]
async fn main() {
    init_tracing("info,tower_http=debug,sea_orm=warn");

    let config = BlogConfig::from_env();

    let db = Database::connect(&config.database_url)
        .await
        .expect("failed to connect to database");

    let redis_cfg = deadpool_redis::Config::from_url(&config.redis_url);
    let redis = redis_cfg
        .create_pool(Some(deadpool_redis::Runtime::Tokio1))
        .expect("failed to create Redis pool");

    let mailer = SmtpMailer::new(
        &config.smtp_host,
        config.smtp_port,
        &config.smtp_sender,
        &config.smtp_password,
    )
    .expect("invalid SMTP configuration");

    let delivery = DeliverCodeUseCase {
        codes: RedisCodeStore {
            pool: redis.clone(),
        },
        mailer,
        generator: RandomCodeGenerator,
    };
    let mail_queue = MailQueue::start(
        delivery,
        config.mail_workers,
        config.mail_queue_capacity,
    );

    let state = AppState {
        db,
        redis,
        jwt_secret: config.jwt_secret,
        media_dir: config.media_dir,
        mail_queue,
    };

    let router = build_router(state);
    let addr = format!("0.0.0.0:{}", config.http_port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .expect("failed to bind");

    info!("blog service listening on {addr}");
    axum::serve(listener, router).await.expect("server error");
}
