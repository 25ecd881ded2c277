use crate::components::email::LogEmailSender;
use crate::components::meeting_store::{storage_from_config, MeetingStoreHandle};
use crate::components::slots::{SlotCatalogue, SlotPicker};
use crate::components::suggest::SuggestionFlow;
use crate::config::Config;
use crate::error::{Error, MaestroResult};
use crate::shutdown;
use crate::web::{self, AppState};
use std::net::SocketAddr;
use std::sync::Arc;
use tracing::{error, info, warn};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

/// Initialize logging with environment-based configuration
pub fn init_logging() -> miette::Result<()> {
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info,tower_http=debug")),
        )
        .finish();

    tracing::subscriber::set_global_default(subscriber)
        .map_err(|e| Error::Other(format!("Failed to set up logging: {}", e)))?;

    Ok(())
}

/// Load and initialize the application config
pub fn load_config() -> miette::Result<Config> {
    match Config::load() {
        Ok(config) => Ok(config),
        Err(e) => {
            error!("Failed to load configuration: {:?}", e);
            Err(e.into())
        }
    }
}

/// Suggestion flow for the configured completion backend, if any
fn suggestion_flow(config: &Config) -> Option<SuggestionFlow> {
    let Some(api_key) = config.gemini_api_key.as_deref() else {
        warn!("GEMINI_API_KEY not set, time suggestions are disabled");
        return None;
    };

    #[cfg(feature = "gemini")]
    {
        use crate::components::suggest::GeminiCompletion;

        info!("Using Gemini model: {}", config.gemini_model);
        Some(SuggestionFlow::new(Arc::new(GeminiCompletion::new(
            api_key,
            config.gemini_model.clone(),
        ))))
    }

    #[cfg(not(feature = "gemini"))]
    {
        let _ = api_key;
        warn!("Built without the gemini feature, time suggestions are disabled");
        None
    }
}

/// Wire the store, picker and collaborators into the web state
pub fn build_state(config: &Config) -> MaestroResult<AppState> {
    rust_i18n::set_locale(&config.locale);
    info!("Setting locale to {}", config.locale);

    let storage = storage_from_config(config)?;
    info!("Using {} meeting storage", storage.name());
    let store = MeetingStoreHandle::spawn(storage);

    let catalogue = SlotCatalogue::from_settings(&config.slots)?;
    let picker = SlotPicker::new(catalogue, store.clone());

    Ok(AppState {
        store,
        picker,
        email: Arc::new(LogEmailSender),
        suggestions: suggestion_flow(config),
        participant_directory: config.participant_directory.clone(),
        tz: config.tz()?,
    })
}

/// Serve the web interface until a shutdown signal arrives
pub async fn serve(config: Config) -> miette::Result<()> {
    let state = build_state(&config)?;
    let store = state.store.clone();
    let app = web::router(state);

    let ip = config
        .bind_address
        .parse()
        .map_err(|e| Error::Config(format!("Invalid BIND_ADDRESS: {}", e)))?;
    let addr = SocketAddr::new(ip, config.port);
    info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .map_err(Error::from)?;

    let token = shutdown::shutdown_token();
    let result = axum::serve(listener, app)
        .with_graceful_shutdown(token.cancelled_owned())
        .await
        .map_err(Error::from);

    // Shut down the store actor once no request can reach it
    if let Err(e) = store.shutdown().await {
        error!("Error shutting down meeting store: {:?}", e);
    } else {
        info!("Meeting store shut down successfully");
    }

    result?;
    Ok(())
}
