use crate::Environment;
use tracing::{debug, info};
use tracing_subscriber::{prelude::*, EnvFilter};

const PRODUCTION_FILTER: &str = "info,sea_orm=warn,sqlx=warn";
const DEVELOPMENT_FILTER: &str = "debug,domain_catalog=trace,tower_http=debug,sea_orm=info,sqlx=warn";

/// Installs color-eyre with location sections on and env sections off.
///
/// Call early in `main`. Repeated calls are ignored.
pub fn install_color_eyre() {
    let _ = color_eyre::config::HookBuilder::default()
        .display_location_section(true)
        .display_env_section(false)
        .install();
}

/// Default filter directives for the environment, used when `RUST_LOG` is unset.
pub fn default_filter(environment: &Environment) -> &'static str {
    if environment.is_production() {
        PRODUCTION_FILTER
    } else {
        DEVELOPMENT_FILTER
    }
}

/// Initializes the global subscriber with an [`tracing_error::ErrorLayer`].
///
/// - Production (`APP_ENV=production`): flattened JSON events, no targets.
/// - Development: pretty output with targets.
///
/// `RUST_LOG` overrides [`default_filter`]. Safe to call more than once; later
/// calls leave the first subscriber in place.
pub fn init_tracing(environment: &Environment) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_filter(environment)));

    let result = if environment.is_production() {
        tracing_subscriber::registry()
            .with(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_target(false)
                    .flatten_event(true),
            )
            .with(tracing_error::ErrorLayer::default())
            .with(filter)
            .try_init()
    } else {
        tracing_subscriber::registry()
            .with(tracing_subscriber::fmt::layer().with_target(true).pretty())
            .with(tracing_error::ErrorLayer::default())
            .with(filter)
            .try_init()
    };

    match result {
        Ok(()) => info!(?environment, "Tracing initialized"),
        Err(_) => debug!("Tracing already initialized, skipping re-initialization"),
    }
}
