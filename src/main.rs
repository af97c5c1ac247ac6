// src/main.rs

use axum::{
    middleware as axum_middleware,
    routing::{get, post, put},
    Router,
};
use tokio::net::TcpListener;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

mod common;
mod config;
mod db;
mod docs;
mod handlers;
mod middleware;
mod models;
mod services;

use crate::config::AppState;
use crate::docs::ApiDoc;
use crate::middleware::auth::auth_guard;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt().with_target(false).compact().init();

    // Si la configuración falla, la aplicación no debe arrancar.
    let app_state = AppState::new()
        .await
        .expect("Fallo al inicializar el estado de la aplicación.");

    sqlx::migrate!()
        .run(&app_state.db_pool)
        .await
        .expect("Fallo al ejecutar las migraciones de la base de datos.");

    tracing::info!("✅ Migraciones de la base de datos ejecutadas.");

    // Rutas públicas.
    let auth_routes = Router::new()
        .route("/register", post(handlers::auth::register))
        .route("/login", post(handlers::auth::login));

    let user_routes = Router::new()
        .route("/me", get(handlers::auth::get_me))
        .route("/link-barber", post(handlers::auth::link_barber));

    let barber_routes = Router::new()
        .route(
            "/",
            get(handlers::barbers::list_barbers).post(handlers::barbers::create_barber),
        )
        .route(
            "/{id}",
            get(handlers::barbers::get_barber)
                .put(handlers::barbers::update_barber)
                .delete(handlers::barbers::delete_barber),
        );

    let service_routes = Router::new()
        .route(
            "/",
            get(handlers::services::list_services).post(handlers::services::create_service),
        )
        .route("/{id}", axum::routing::delete(handlers::services::delete_service));

    let stats_routes = Router::new()
        .route("/me", get(handlers::stats::weekly_me))
        .route("/overview", get(handlers::stats::weekly_overview))
        .route("/special-rate", get(handlers::stats::weekly_special_rate))
        .route("/ledger", get(handlers::stats::weekly_ledger))
        .route("/barbers/{id}", get(handlers::stats::weekly_barber));

    let deduction_routes = Router::new()
        .route(
            "/",
            get(handlers::deductions::list_deductions)
                .post(handlers::deductions::create_deduction),
        )
        .route(
            "/{id}",
            axum::routing::delete(handlers::deductions::delete_deduction),
        );

    let inventory_routes = Router::new()
        .route(
            "/items",
            get(handlers::inventory::list_items).post(handlers::inventory::create_item),
        )
        .route(
            "/items/{id}",
            put(handlers::inventory::update_item).delete(handlers::inventory::delete_item),
        )
        .route(
            "/items/{id}/movements",
            get(handlers::inventory::list_movements),
        )
        .route("/movements", post(handlers::inventory::create_movement))
        .route(
            "/sales",
            get(handlers::inventory::list_sales).post(handlers::inventory::create_sale),
        )
        .route(
            "/sales/{id}",
            axum::routing::delete(handlers::inventory::delete_sale),
        );

    let export_routes = Router::new()
        .route("/weekly.csv", get(handlers::export::weekly_csv))
        .route("/weekly.pdf", get(handlers::export::weekly_pdf))
        .route("/ledger.csv", get(handlers::export::ledger_csv));

    let admin_routes = Router::new()
        .route("/wipe", get(handlers::admin::wipe_status))
        .route("/wipe/request", post(handlers::admin::wipe_request))
        .route("/wipe/confirm", post(handlers::admin::wipe_confirm))
        .route("/wipe/execute", post(handlers::admin::wipe_execute));

    // Todo lo que no sea registro/login va detrás del guard de autenticación.
    let protected = Router::new()
        .nest("/api/users", user_routes)
        .nest("/api/barbers", barber_routes)
        .nest("/api/services", service_routes)
        .nest("/api/stats", stats_routes)
        .nest("/api/deductions", deduction_routes)
        .nest("/api/inventory", inventory_routes)
        .nest("/api/export", export_routes)
        .nest("/api/admin", admin_routes)
        .layer(axum_middleware::from_fn_with_state(
            app_state.clone(),
            auth_guard,
        ));

    let app = Router::new()
        .route("/api/health", get(|| async { "OK" }))
        .nest("/api/auth", auth_routes)
        .merge(protected)
        .merge(SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .with_state(app_state);

    let addr = "0.0.0.0:3000";
    let listener = TcpListener::bind(addr)
        .await
        .expect("Fallo al abrir el listener TCP");
    tracing::info!("🚀 Servidor escuchando en {}", listener.local_addr().unwrap());
    axum::serve(listener, app)
        .await
        .expect("Error en el servidor Axum");
}
