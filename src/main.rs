use actix_cors::Cors;
use actix_web::{web, App, HttpServer, middleware};
use lesson_match::config::{LoggingSettings, Settings};
use lesson_match::core::Matcher;
use lesson_match::routes::{self, schedule::AppState};
use tracing::{info, error};
use tracing_subscriber::EnvFilter;

/// Request bodies carry whole rosters
const JSON_LIMIT_BYTES: usize = 8 * 1024 * 1024;

fn init_tracing(logging: &LoggingSettings) {
    // RUST_LOG wins over the configured level
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&logging.level));

    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_level(true);

    if logging.format == "pretty" {
        subscriber.pretty().init();
    } else {
        subscriber.json().init();
    }
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // Load .env file if present
    dotenv::dotenv().ok();

    // Load configuration, from LESSON_MATCH_CONFIG when it names a file
    let loaded = match std::env::var("LESSON_MATCH_CONFIG") {
        Ok(path) => Settings::load_from(path),
        Err(_) => Settings::load(),
    };
    let settings = match loaded {
        Ok(settings) => settings,
        Err(e) => {
            init_tracing(&LoggingSettings::default());
            error!("Failed to load configuration: {}", e);
            return Err(std::io::Error::new(std::io::ErrorKind::InvalidInput, e.to_string()));
        }
    };

    init_tracing(&settings.logging);

    info!("Starting Lesson Match scheduling service...");
    info!(
        "Configuration loaded (default seats per slot: {})",
        settings.matching.default_max_per_slot
    );

    let app_state = AppState {
        matcher: Matcher::new(),
        matching: settings.matching.clone(),
    };

    // Configure HTTP server
    let host = settings.server.host.clone();
    let port = settings.server.port;
    let workers = settings.server.workers.unwrap_or(4);

    info!("Starting HTTP server on {}:{}", host, port);

    HttpServer::new(move || {
        let cors = Cors::permissive();

        App::new()
            .app_data(web::Data::new(app_state.clone()))
            .app_data(routes::json_config(JSON_LIMIT_BYTES))
            .wrap(cors)
            .wrap(middleware::Logger::default())
            .wrap(middleware::Compress::default())
            .configure(routes::configure_routes)
    })
    .workers(workers)
    .bind((host, port))?
    .run()
    .await
}
