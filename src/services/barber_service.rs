// src/services/barber_service.rs

use chrono::{NaiveDate, Utc};
use rust_decimal::Decimal;
use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::{BarberRepository, ServiceRepository},
    models::{
        barber::Barber,
        catalog::{ClassificationStrategy, PaymentMethod, BUNDLE_SERVICE},
        service::ServiceRecord,
        stats::WeekWindow,
    },
};

#[derive(Clone)]
pub struct BarberService {
    barber_repo: BarberRepository,
    service_repo: ServiceRepository,
    pool: PgPool,
}

impl BarberService {
    pub fn new(
        barber_repo: BarberRepository,
        service_repo: ServiceRepository,
        pool: PgPool,
    ) -> Self {
        Self {
            barber_repo,
            service_repo,
            pool,
        }
    }

    // ---
    // Fichas de barbero
    // ---

    pub async fn get_all(&self) -> Result<Vec<Barber>, AppError> {
        self.barber_repo.get_all().await
    }

    pub async fn find(&self, id: Uuid) -> Result<Barber, AppError> {
        self.barber_repo
            .find_by_id(id)
            .await?
            .ok_or(AppError::BarberNotFound)
    }

    pub async fn create(
        &self,
        name: &str,
        phone: Option<&str>,
        photo_url: Option<&str>,
    ) -> Result<Barber, AppError> {
        self.barber_repo
            .create(&self.pool, name, phone, photo_url)
            .await
    }

    pub async fn update(
        &self,
        id: Uuid,
        name: &str,
        phone: Option<&str>,
        photo_url: Option<&str>,
    ) -> Result<Barber, AppError> {
        self.barber_repo
            .update(&self.pool, id, name, phone, photo_url)
            .await
    }

    pub async fn delete(&self, id: Uuid) -> Result<(), AppError> {
        self.barber_repo.delete(&self.pool, id).await
    }

    // ---
    // Servicios en caja
    // ---

    pub async fn list_services_in_week(
        &self,
        barber_id: Option<Uuid>,
        reference: NaiveDate,
    ) -> Result<Vec<ServiceRecord>, AppError> {
        let window = WeekWindow::containing(reference);
        match barber_id {
            Some(id) => self.service_repo.list_for_barber_in_week(id, &window).await,
            None => self.service_repo.list_in_week(&window).await,
        }
    }

    /// Alta de un servicio. El alta de la fila y el incremento del contador
    /// de cache del barbero van en UNA transacción. La promo se materializa
    /// como DOS filas con el mismo timestamp (un único evento comisionable),
    /// repartiendo el importe entre ambas.
    pub async fn record_service(
        &self,
        barber_id: Uuid,
        service_type: &str,
        earning_amount: Decimal,
        payment_method: PaymentMethod,
        customer_name: Option<&str>,
        proof_photo_url: Option<&str>,
    ) -> Result<Vec<ServiceRecord>, AppError> {
        let mut tx = self.pool.begin().await?;

        self.barber_repo
            .find_by_id(barber_id)
            .await?
            .ok_or(AppError::BarberNotFound)?;

        let now = Utc::now();
        let mut created = Vec::new();

        let amounts: Vec<Decimal> = if service_type == BUNDLE_SERVICE {
            let half = earning_amount / Decimal::TWO;
            vec![earning_amount - half, half]
        } else {
            vec![earning_amount]
        };

        for amount in amounts {
            let record = self
                .service_repo
                .create(
                    &mut *tx,
                    barber_id,
                    service_type,
                    amount,
                    payment_method,
                    customer_name,
                    proof_photo_url,
                    now,
                )
                .await?;

            if let Some(kind) = ClassificationStrategy::counter_kind(service_type) {
                self.barber_repo
                    .bump_counter(&mut *tx, barber_id, kind, 1)
                    .await?;
            }
            created.push(record);
        }

        tx.commit().await?;
        Ok(created)
    }

    /// Baja de un servicio, con el decremento del contador de cache en la
    /// misma transacción.
    pub async fn delete_service(&self, id: Uuid) -> Result<(), AppError> {
        let mut tx = self.pool.begin().await?;

        let record = self
            .service_repo
            .find_by_id(id)
            .await?
            .ok_or(AppError::ServiceNotFound)?;

        self.service_repo.delete(&mut *tx, id).await?;

        if let Some(kind) = ClassificationStrategy::counter_kind(&record.service_type) {
            self.barber_repo
                .bump_counter(&mut *tx, record.barber_id, kind, -1)
                .await?;
        }

        tx.commit().await?;
        Ok(())
    }
}
