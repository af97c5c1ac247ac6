// src/config.rs

use std::{env, path::PathBuf, time::Duration};

use sqlx::{postgres::PgPoolOptions, PgPool};

use crate::{
    db::{
        BarberRepository, DeductionRepository, InventoryRepository, ServiceRepository,
        UserRepository,
    },
    services::{
        AuthService, BarberService, InventoryService, LedgerService, StatsService, WipeService,
    },
};

// El estado compartido, accesible en toda la aplicación.
#[derive(Clone)]
pub struct AppState {
    pub db_pool: PgPool,
    pub export_font_dir: PathBuf,
    pub auth_service: AuthService,
    pub barber_service: BarberService,
    pub stats_service: StatsService,
    pub ledger_service: LedgerService,
    pub inventory_service: InventoryService,
    pub wipe_service: WipeService,
}

impl AppState {
    // Carga la configuración y monta el estado con todos los servicios.
    pub async fn new() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        let database_url = env::var("DATABASE_URL")
            .map_err(|_| anyhow::anyhow!("DATABASE_URL debe estar definida"))?;
        let jwt_secret = env::var("JWT_SECRET")
            .map_err(|_| anyhow::anyhow!("JWT_SECRET debe estar definido"))?;
        // Directorio con las fuentes TTF que usa la exportación a PDF.
        let export_font_dir = env::var("EXPORT_FONT_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("fonts"));

        let db_pool = match PgPoolOptions::new()
            .max_connections(5)
            .acquire_timeout(Duration::from_secs(3))
            .connect(&database_url)
            .await
        {
            Ok(pool) => {
                tracing::info!("✅ Conexión con la base de datos establecida.");
                pool
            }
            Err(e) => {
                tracing::error!("🔥 Fallo al conectar con la base de datos: {:?}", e);
                return Err(e.into());
            }
        };

        let user_repo = UserRepository::new(db_pool.clone());
        let barber_repo = BarberRepository::new(db_pool.clone());
        let service_repo = ServiceRepository::new(db_pool.clone());
        let deduction_repo = DeductionRepository::new(db_pool.clone());
        let inventory_repo = InventoryRepository::new(db_pool.clone());

        Ok(Self {
            auth_service: AuthService::new(
                user_repo,
                barber_repo.clone(),
                jwt_secret,
                db_pool.clone(),
            ),
            barber_service: BarberService::new(
                barber_repo.clone(),
                service_repo.clone(),
                db_pool.clone(),
            ),
            stats_service: StatsService::new(service_repo),
            ledger_service: LedgerService::new(deduction_repo, barber_repo, db_pool.clone()),
            inventory_service: InventoryService::new(inventory_repo, db_pool.clone()),
            wipe_service: WipeService::new(db_pool.clone()),
            export_font_dir,
            db_pool,
        })
    }
}
