use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Result;
use dotenvy::dotenv;
use tokio::signal;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use fleet_logistics::config::environment::EnvironmentConfig;
use fleet_logistics::database::connection::{create_pool, run_migrations};
use fleet_logistics::repositories::postgres::PgResourceStore;
use fleet_logistics::routes::build_router;
use fleet_logistics::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Cargar variables de entorno
    dotenv().ok();

    // Configurar logging
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("fleet_logistics=debug,tower_http=info")),
        )
        .init();

    info!("🚚 Fleet Logistics API");
    info!("======================");

    let config = EnvironmentConfig::default();

    // Inicializar base de datos
    let pool = match create_pool(None).await {
        Ok(pool) => pool,
        Err(e) => {
            error!("❌ Error conectando a la base de datos: {}", e);
            return Err(e);
        }
    };
    run_migrations(&pool).await?;
    info!("✅ Base de datos lista");

    let store = Arc::new(PgResourceStore::new(pool));
    let state = AppState::new(store, config.clone());
    let app = build_router(state);

    let addr: SocketAddr = config.server_addr().parse()?;
    info!("🌐 Servidor iniciando en http://{}", addr);
    info!("🔍 Endpoints disponibles:");
    info!("   GET  /health - Health check");
    info!("   POST /api/auth/register - Registrar usuario");
    info!("   POST /api/auth/login - Login");
    info!("   GET  /api/auth/profile - Perfil del usuario autenticado");
    info!("   CRUD /api/vehicles - Flota");
    info!("   CRUD /api/cargos - Cargas");
    info!("   CRUD /api/routes - Rutas de reparto (ciclo de vida)");
    info!("   CRUD /api/trainings - Capacitaciones");
    info!("   GET  /api/users - Usuarios");
    info!("   GET  /api/dashboard/stats - Indicadores operativos");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("👋 Servidor terminado");
    Ok(())
}

/// Señal de apagado graceful
async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("🛑 Señal Ctrl+C recibida, apagando servidor...");
        },
        _ = terminate => {
            info!("🛑 Señal SIGTERM recibida, apagando servidor...");
        },
    }
}
