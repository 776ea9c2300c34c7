// src/main.rs

use actix_web::{middleware::Logger, web, App, HttpServer};
use tracing::info;
use tracing_subscriber::EnvFilter;

mod categories; // Módulo de categorias
mod config; // Configuração via variáveis de ambiente
mod error; // Erros do banco e da API
mod products; // Módulo de produtos
mod repository; // Repositório genérico
mod shared; // Módulo shared
mod unit_of_work; // Unidade de trabalho por requisição

use config::AppConfig;
use unit_of_work::PgDatabase;

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    // O .env é opcional; em produção as variáveis vêm do ambiente
    dotenvy::dotenv().ok();
    init_tracing();

    let config = AppConfig::from_env()?;
    let database = PgDatabase::connect(&config).await?;

    // web::Data compartilha o pool entre os workers; cada requisição abre sua própria transação
    let db_data = web::Data::new(database);

    let (host, port) = config.bind_address();
    info!(%host, port, "Iniciando API Catálogo");

    HttpServer::new(move || {
        App::new()
            .wrap(Logger::default())
            .app_data(db_data.clone())
            .configure(products::product_router::configure::<PgDatabase>)
            .configure(categories::category_router::configure::<PgDatabase>)
    })
    .bind((host, port))?
    .run()
    .await?;

    Ok(())
}

/// Inicializa o subscriber de logs. `RUST_LOG` sobrescreve o filtro padrão.
/// O access log do `Logger` do actix chega aqui pela ponte do crate `log`.
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,catalogo_api=debug,sqlx=warn"));

    tracing_subscriber::fmt().with_env_filter(filter).init();
}
