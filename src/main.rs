#[cfg(feature = "web-interface")]
use meetingmaestro::startup;
#[cfg(feature = "web-interface")]
use tracing::info;

#[tokio::main]
async fn main() -> miette::Result<()> {
    #[cfg(not(feature = "web-interface"))]
    {
        println!("Web interface feature not enabled. Please compile with --features web-interface");
        return Ok(());
    }

    #[cfg(feature = "web-interface")]
    {
        // Initialize logging
        startup::init_logging()?;

        info!("Starting MeetingMaestro");

        // Load configuration
        let config = startup::load_config()?;

        // Serve the web interface until a shutdown signal arrives
        startup::serve(config).await
    }
}
