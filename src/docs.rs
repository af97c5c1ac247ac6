// src/docs.rs

use utoipa::OpenApi;
use utoipa::openapi::security::{Http, HttpAuthScheme, SecurityScheme};
use crate::handlers;
use crate::models;
use crate::services;

#[derive(OpenApi)]
#[openapi(
    paths(
        // --- Auth ---
        handlers::auth::register,
        handlers::auth::login,
        handlers::auth::get_me,
        handlers::auth::link_barber,

        // --- Barbers ---
        handlers::barbers::list_barbers,
        handlers::barbers::get_barber,
        handlers::barbers::create_barber,
        handlers::barbers::update_barber,
        handlers::barbers::delete_barber,

        // --- Services ---
        handlers::services::list_services,
        handlers::services::create_service,
        handlers::services::delete_service,

        // --- Stats ---
        handlers::stats::weekly_me,
        handlers::stats::weekly_barber,
        handlers::stats::weekly_overview,
        handlers::stats::weekly_special_rate,
        handlers::stats::weekly_ledger,

        // --- Deductions ---
        handlers::deductions::list_deductions,
        handlers::deductions::create_deduction,
        handlers::deductions::delete_deduction,

        // --- Inventory ---
        handlers::inventory::list_items,
        handlers::inventory::create_item,
        handlers::inventory::update_item,
        handlers::inventory::delete_item,
        handlers::inventory::list_movements,
        handlers::inventory::create_movement,
        handlers::inventory::list_sales,
        handlers::inventory::create_sale,
        handlers::inventory::delete_sale,

        // --- Export ---
        handlers::export::weekly_csv,
        handlers::export::weekly_pdf,
        handlers::export::ledger_csv,

        // --- Admin ---
        handlers::admin::wipe_status,
        handlers::admin::wipe_request,
        handlers::admin::wipe_confirm,
        handlers::admin::wipe_execute,
    ),
    components(
        schemas(
            // --- Auth ---
            models::auth::User,
            models::auth::Role,
            models::auth::Profile,
            models::auth::RegisterUserPayload,
            models::auth::LoginUserPayload,
            models::auth::AuthResponse,
            models::auth::MeResponse,
            models::auth::LinkBarberPayload,

            // --- Barbers ---
            models::barber::Barber,
            models::barber::CreateBarberPayload,
            models::barber::UpdateBarberPayload,

            // --- Services ---
            models::service::ServiceRecord,
            models::service::CreateServicePayload,
            models::catalog::PaymentMethod,

            // --- Stats ---
            models::stats::ServiceTypeCount,
            models::stats::DayRow,
            models::stats::WeekTotalRow,
            models::stats::WeeklyReport,
            models::stats::BarberLedger,
            models::stats::LedgerSummary,

            // --- Deductions ---
            models::deduction::DeductionTransaction,
            models::deduction::CreateDeductionPayload,

            // --- Inventory ---
            models::inventory::InventoryItem,
            models::inventory::MovementKind,
            models::inventory::StockMovement,
            models::inventory::InventorySale,
            models::inventory::CreateItemPayload,
            models::inventory::UpdateItemPayload,
            models::inventory::CreateMovementPayload,
            models::inventory::CreateSalePayload,

            // --- Admin ---
            services::wipe_service::WipeStatus,
            handlers::admin::WipeConfirmPayload,
        )
    ),
    tags(
        (name = "Auth", description = "Autenticación y registro"),
        (name = "Users", description = "Datos del usuario y vínculo con barbero"),
        (name = "Barbers", description = "Gestión de barberos y sus contadores"),
        (name = "Services", description = "Servicios realizados (cortes, barbas, etc.)"),
        (name = "Stats", description = "Estadísticas semanales y recálculos"),
        (name = "Deductions", description = "Libro de bonos y descuentos"),
        (name = "Inventory", description = "Productos, movimientos de stock y ventas"),
        (name = "Export", description = "Exportación de informes a CSV y PDF"),
        (name = "Admin", description = "Operaciones administrativas")
    ),
    modifiers(&SecurityAddon)
)]
pub struct ApiDoc;

struct SecurityAddon;

impl utoipa::Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi.components.get_or_insert_with(Default::default);
        components.add_security_scheme(
            "api_jwt",
            SecurityScheme::Http(
                Http::new(HttpAuthScheme::Bearer)
            ),
        );
    }
}
