use std::net::SocketAddr;

use anyhow::Result;
use dotenvy::dotenv;
use tokio::signal;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

use fleetlink::config::{DatabaseConfig, EnvironmentConfig, StorageBackend};
use fleetlink::database::DatabaseConnection;
use fleetlink::{create_app, AppState};

#[tokio::main]
async fn main() -> Result<()> {
    // Cargar variables de entorno
    dotenv().ok();

    // Configurar logging
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    info!("🚚 FleetLink - API de reservas de flota");
    info!("=======================================");

    let config = EnvironmentConfig::from_env()?;
    info!("🌍 Entorno: {}", config.environment);

    let app_state = match config.storage_backend {
        StorageBackend::Postgres => {
            let db_config = DatabaseConfig::from_env()?;
            let db_connection = match DatabaseConnection::connect(&db_config).await {
                Ok(conn) => conn,
                Err(e) => {
                    error!("❌ Error conectando a la base de datos: {:#}", e);
                    return Err(e);
                }
            };
            AppState::with_postgres(config.clone(), db_connection.pool().clone())
        }
        StorageBackend::Memory => {
            warn!("⚠️ STORAGE_BACKEND=memory: los datos se pierden al reiniciar");
            AppState::in_memory(config.clone())
        }
    };

    let app = create_app(app_state);

    let addr: SocketAddr = config.server_addr().parse()?;

    info!("🌐 Servidor iniciando en http://{}", addr);
    info!("🔍 Endpoints disponibles:");
    info!("   GET    /health - Health check");
    info!("🚛 Vehículos:");
    info!("   POST   /api/vehicles - Registrar vehículo");
    info!("   GET    /api/vehicles - Listar vehículos");
    info!("   GET    /api/vehicles/available - Buscar vehículos disponibles");
    info!("   GET    /api/vehicles/:id - Obtener vehículo");
    info!("   PATCH  /api/vehicles/:id/availability - Cambiar disponibilidad");
    info!("📅 Reservas:");
    info!("   POST   /api/bookings - Crear reserva");
    info!("   GET    /api/bookings - Listar reservas");
    info!("   DELETE /api/bookings/:id - Eliminar reserva");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    if let Err(e) = axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
    {
        error!("❌ Servidor terminó con error: {}", e);
        return Err(e.into());
    }

    info!("👋 Servidor terminado");
    Ok(())
}

/// Señal de apagado graceful
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            error!("❌ No se pudo instalar el handler de Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                error!("❌ No se pudo instalar el handler de SIGTERM: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("🛑 Señal Ctrl+C recibida, apagando servidor...");
        },
        _ = terminate => {
            info!("🛑 Señal de terminación recibida, apagando servidor...");
        },
    }
}
