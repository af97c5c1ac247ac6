// src/services/wipe_service.rs
//
// Borrado total de datos. Irreversible, así que va detrás de una máquina de
// confirmación explícita en dos pasos con tokens de un solo uso: nada de
// diálogos bloqueantes.

use std::sync::{Arc, Mutex};

use chrono::{DateTime, Duration, Utc};
use serde::Serialize;
use sqlx::PgPool;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::common::error::AppError;

/// Los tokens de confirmación caducan a los 2 minutos.
const TOKEN_TTL_SECONDS: i64 = 120;

/// Estados de la máquina: Idle → PendingConfirm → PendingFinalConfirm →
/// Executing → Done/Failed. Cualquier llamada fuera de orden devuelve la
/// máquina a Idle y falla.
#[derive(Debug, Clone, PartialEq)]
pub enum WipeStage {
    Idle,
    PendingConfirm {
        token: Uuid,
        requested_at: DateTime<Utc>,
    },
    PendingFinalConfirm {
        token: Uuid,
        requested_at: DateTime<Utc>,
    },
    Executing,
    Done {
        finished_at: DateTime<Utc>,
    },
    Failed {
        error: String,
    },
}

impl WipeStage {
    /// Primer paso: solicitar el borrado. Solo desde un estado de reposo.
    pub fn request(self, now: DateTime<Utc>, token: Uuid) -> Result<WipeStage, AppError> {
        match self {
            WipeStage::Idle | WipeStage::Done { .. } | WipeStage::Failed { .. } => {
                Ok(WipeStage::PendingConfirm {
                    token,
                    requested_at: now,
                })
            }
            WipeStage::Executing => Err(AppError::WipeState(
                "Ya hay un borrado en ejecución.".to_string(),
            )),
            _ => Err(AppError::WipeState(
                "Ya hay una confirmación pendiente; vuelve a empezar.".to_string(),
            )),
        }
    }

    /// Segundo paso: confirmar con el token del primer paso.
    pub fn confirm(
        self,
        presented: Uuid,
        now: DateTime<Utc>,
        next_token: Uuid,
    ) -> Result<WipeStage, AppError> {
        match self {
            WipeStage::PendingConfirm {
                token,
                requested_at,
            } if token == presented && !expired(requested_at, now) => {
                Ok(WipeStage::PendingFinalConfirm {
                    token: next_token,
                    requested_at: now,
                })
            }
            // Token equivocado o caducado: vuelta a Idle.
            _ => Err(AppError::WipeState(
                "Confirmación inválida o caducada; el proceso se ha reiniciado.".to_string(),
            )),
        }
    }

    /// Tercer paso: ejecutar con el token de la confirmación final.
    pub fn begin_execution(self, presented: Uuid, now: DateTime<Utc>) -> Result<WipeStage, AppError> {
        match self {
            WipeStage::PendingFinalConfirm {
                token,
                requested_at,
            } if token == presented && !expired(requested_at, now) => Ok(WipeStage::Executing),
            _ => Err(AppError::WipeState(
                "Confirmación final inválida o caducada; el proceso se ha reiniciado.".to_string(),
            )),
        }
    }

    pub fn as_label(&self) -> &'static str {
        match self {
            WipeStage::Idle => "IDLE",
            WipeStage::PendingConfirm { .. } => "PENDING_CONFIRM",
            WipeStage::PendingFinalConfirm { .. } => "PENDING_FINAL_CONFIRM",
            WipeStage::Executing => "EXECUTING",
            WipeStage::Done { .. } => "DONE",
            WipeStage::Failed { .. } => "FAILED",
        }
    }
}

fn expired(requested_at: DateTime<Utc>, now: DateTime<Utc>) -> bool {
    now - requested_at > Duration::seconds(TOKEN_TTL_SECONDS)
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct WipeStatus {
    pub stage: String,
    pub token: Option<Uuid>,
}

#[derive(Clone)]
pub struct WipeService {
    stage: Arc<Mutex<WipeStage>>,
    pool: PgPool,
}

impl WipeService {
    pub fn new(pool: PgPool) -> Self {
        Self {
            stage: Arc::new(Mutex::new(WipeStage::Idle)),
            pool,
        }
    }

    pub fn request(&self) -> Result<WipeStatus, AppError> {
        let token = Uuid::new_v4();
        self.transition(|stage| stage.request(Utc::now(), token))?;
        Ok(WipeStatus {
            stage: "PENDING_CONFIRM".to_string(),
            token: Some(token),
        })
    }

    pub fn confirm(&self, presented: Uuid) -> Result<WipeStatus, AppError> {
        let next_token = Uuid::new_v4();
        self.transition(|stage| stage.confirm(presented, Utc::now(), next_token))?;
        Ok(WipeStatus {
            stage: "PENDING_FINAL_CONFIRM".to_string(),
            token: Some(next_token),
        })
    }

    /// Ejecuta el borrado en orden de dependencia: primero los registros
    /// dependientes, después los padres referenciados. Todo en una
    /// transacción.
    pub async fn execute(&self, presented: Uuid) -> Result<WipeStatus, AppError> {
        self.transition(|stage| stage.begin_execution(presented, Utc::now()))?;

        let result = self.run_wipe().await;

        let mut guard = self.stage.lock().expect("lock de la máquina de borrado");
        match &result {
            Ok(()) => {
                *guard = WipeStage::Done {
                    finished_at: Utc::now(),
                };
            }
            Err(e) => {
                *guard = WipeStage::Failed {
                    error: e.to_string(),
                };
            }
        }
        drop(guard);

        result.map(|()| WipeStatus {
            stage: "DONE".to_string(),
            token: None,
        })
    }

    pub fn status(&self) -> WipeStatus {
        let guard = self.stage.lock().expect("lock de la máquina de borrado");
        WipeStatus {
            stage: guard.as_label().to_string(),
            token: None,
        }
    }

    // Transición con el lock cogido; ante error la máquina vuelve a Idle.
    fn transition(
        &self,
        f: impl FnOnce(WipeStage) -> Result<WipeStage, AppError>,
    ) -> Result<(), AppError> {
        let mut guard = self.stage.lock().expect("lock de la máquina de borrado");
        let current = guard.clone();
        match f(current) {
            Ok(next) => {
                *guard = next;
                Ok(())
            }
            Err(e) => {
                *guard = WipeStage::Idle;
                Err(e)
            }
        }
    }

    async fn run_wipe(&self) -> Result<(), AppError> {
        let mut tx = self.pool.begin().await?;

        sqlx::query("DELETE FROM inventory_sales").execute(&mut *tx).await?;
        sqlx::query("DELETE FROM inventory_movements").execute(&mut *tx).await?;
        sqlx::query("DELETE FROM services").execute(&mut *tx).await?;
        sqlx::query("DELETE FROM barber_deductions").execute(&mut *tx).await?;
        sqlx::query("UPDATE profiles SET barber_id = NULL").execute(&mut *tx).await?;
        sqlx::query("DELETE FROM inventory_items").execute(&mut *tx).await?;
        sqlx::query("DELETE FROM barbers").execute(&mut *tx).await?;

        tx.commit().await?;
        tracing::warn!("🧹 Borrado total de datos ejecutado.");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn now() -> DateTime<Utc> {
        Utc::now()
    }

    #[test]
    fn happy_path_walks_both_confirmations() {
        let t1 = Uuid::new_v4();
        let t2 = Uuid::new_v4();
        let stage = WipeStage::Idle.request(now(), t1).unwrap();
        let stage = stage.confirm(t1, now(), t2).unwrap();
        let stage = stage.begin_execution(t2, now()).unwrap();
        assert_eq!(stage, WipeStage::Executing);
    }

    #[test]
    fn wrong_token_fails_each_step() {
        let t1 = Uuid::new_v4();
        let stage = WipeStage::Idle.request(now(), t1).unwrap();
        assert!(stage.clone().confirm(Uuid::new_v4(), now(), Uuid::new_v4()).is_err());

        let t2 = Uuid::new_v4();
        let stage = stage.confirm(t1, now(), t2).unwrap();
        assert!(stage.begin_execution(Uuid::new_v4(), now()).is_err());
    }

    #[test]
    fn expired_token_is_rejected() {
        let t1 = Uuid::new_v4();
        let old = now() - Duration::seconds(TOKEN_TTL_SECONDS + 1);
        let stage = WipeStage::Idle.request(old, t1).unwrap();
        assert!(stage.confirm(t1, now(), Uuid::new_v4()).is_err());
    }

    #[test]
    fn cannot_request_twice_without_restarting() {
        let stage = WipeStage::Idle.request(now(), Uuid::new_v4()).unwrap();
        assert!(stage.request(now(), Uuid::new_v4()).is_err());
    }

    #[test]
    fn executing_blocks_new_requests() {
        assert!(WipeStage::Executing.request(now(), Uuid::new_v4()).is_err());
    }

    #[test]
    fn done_and_failed_allow_a_fresh_request() {
        let done = WipeStage::Done {
            finished_at: now(),
        };
        assert!(done.request(now(), Uuid::new_v4()).is_ok());
        let failed = WipeStage::Failed {
            error: "x".to_string(),
        };
        assert!(failed.request(now(), Uuid::new_v4()).is_ok());
    }
}
