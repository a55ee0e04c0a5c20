/* demo/backend/rust/src/main.rs */

mod chrome;
mod hooks;
mod pages;

use std::sync::Arc;

use axum::Router;
use axum::routing::get;
use quire_server::{MessageCatalog, QuireServer, SiteConfig, load_message_catalog};
use quire_server_axum::{RenderRouterExt, serve};
use tracing_subscriber::EnvFilter;

use chrome::{AdminChrome, DemoTemplates, SiteChrome};
use pages::topic::{admin_dashboard, home, topic};

fn catalog() -> MessageCatalog {
  if let Ok(dir) = std::env::var("QUIRE_LANGUAGE_DIR") {
    match load_message_catalog(&dir) {
      Ok(catalog) => return catalog,
      Err(e) => tracing::warn!(dir, error = %e, "falling back to built-in messages"),
    }
  }
  let mut c = MessageCatalog::new();
  c.insert("en-GB", "pages", "home", "Home");
  c.insert("en-GB", "global", "site", "Quire demo");
  c.insert("en-GB", "admin", "dashboard", "Dashboard");
  c.insert("fr", "pages", "home", "Accueil");
  c.insert("fr", "global", "site", "Démo Quire");
  c.insert("fr", "admin", "dashboard", "Tableau de bord");
  c
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
  tracing_subscriber::fmt()
    .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
    .init();

  let site = SiteConfig::from_env();
  let interceptor = QuireServer::new(site)
    .hooks(Arc::new(hooks::registry()))
    .template_engine(Arc::new(DemoTemplates))
    .translation(Arc::new(catalog()))
    .standard_header(Arc::new(SiteChrome))
    .admin_header(Arc::new(AdminChrome))
    .build()?;

  let router = Router::new()
    .route("/", get(home))
    .route("/api/", get(home))
    .route("/topic/{tid}", get(topic))
    .route("/api/topic/{tid}", get(topic))
    .route("/admin", get(admin_dashboard))
    .with_renderer(interceptor);

  let port = std::env::var("PORT").unwrap_or_else(|_| "3000".to_string());
  serve(router, &format!("0.0.0.0:{port}")).await
}
