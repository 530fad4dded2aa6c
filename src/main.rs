use anyhow::Result;
use tokio::net::TcpListener;
use tokio::signal;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use email_template_renderer::config::Settings;
use email_template_renderer::server::{create_app, AppState};
use email_template_renderer::template::{render_view, EmailTemplateService, ServiceRegistry};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    init_tracing();

    // Load configuration
    let settings = Settings::new()?;
    tracing::info!("Configuration loaded");

    let options = settings.templates.registry_options();
    let extension = options.extension.clone();

    // Render through a shared registry
    let registry = ServiceRegistry::initialize(options.clone())?;
    for name in ["EmailTemplate", "WelcomeMail"] {
        let content = render_view(&registry, &format!("Templates/{}.{}", name, extension)).await?;
        println!("{}", content);
    }

    // Render through a self-contained service
    let service = EmailTemplateService::with_options(options)?;
    let content = service
        .render_view(&format!(
            "Templates/Layouts/SaltedResponsiveEmailTemplate.{}",
            extension
        ))
        .await?;
    println!("{}", content);

    // Create Axum app
    let app = create_app(AppState::new(settings.clone()));

    // Start server
    let addr = settings.server_addr();
    let listener = TcpListener::bind(&addr).await?;
    tracing::info!("Server listening on {}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal_handler())
        .await?;

    tracing::info!("Server shutdown complete");
    Ok(())
}

fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer())
        .init();
}

async fn shutdown_signal_handler() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("Failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Received Ctrl+C, initiating graceful shutdown");
        }
        _ = terminate => {
            tracing::info!("Received terminate signal, initiating graceful shutdown");
        }
    }
}
