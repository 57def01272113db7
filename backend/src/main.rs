mod config;
mod error;
mod services;
mod state;
mod store;

use crate::config::Config;
use crate::state::AppState;
use crate::store::sqlite::SqliteStore;
use actix_web::{middleware, web, App, HttpRequest, HttpResponse, HttpServer};
use env_logger::Env;
use include_dir::{include_dir, Dir};
use log::{info, warn};
use mime_guess::from_path;
use std::io;
use std::sync::Arc;
use std::thread;
use std::time::Duration;

/// The compiled "Report Defect" button (wasm bundle and its JS loader).
static STATIC_DIR: Dir = include_dir!("$CARGO_MANIFEST_DIR/static/dist");

async fn serve_embedded(req: HttpRequest) -> HttpResponse {
    let file_path = req.path().trim_start_matches('/');

    match STATIC_DIR.get_file(file_path) {
        Some(file) => {
            let mime = from_path(file_path).first_or_octet_stream();
            HttpResponse::Ok()
                .content_type(mime.as_ref())
                .body(file.contents().to_vec())
        }
        None => HttpResponse::NotFound().body("Not Found"),
    }
}

#[actix_web::main]
async fn main() -> io::Result<()> {
    dotenvy::dotenv().ok();
    env_logger::init_from_env(Env::default().default_filter_or("info"));

    let config = Config::from_env().map_err(|e| io::Error::new(io::ErrorKind::InvalidInput, e))?;
    let store = SqliteStore::open(&config.db_path).map_err(io::Error::other)?;
    if config.seed_demo {
        store.seed_demo().map_err(io::Error::other)?;
        info!("Demo purchase order available at {}/orders/123", config.base_url());
    }
    if STATIC_DIR.get_file("report_defect.js").is_none() {
        warn!("Report Defect bundle is not embedded; the order page falls back to a plain link");
    }

    let url = config.base_url();
    if config.open_browser {
        let order_url = format!("{url}/orders/123");
        thread::spawn(move || {
            thread::sleep(Duration::from_millis(500));
            let _ = webbrowser::open(&order_url);
        });
    }

    info!(
        "Server running at {url} (records in {}, trigger transport {})",
        store.path().display(),
        config.trigger_transport
    );

    let (host, port) = (config.host.clone(), config.port);
    let state = web::Data::new(AppState::new(Arc::new(store), config));

    HttpServer::new(move || {
        App::new()
            .wrap(middleware::Logger::default())
            .app_data(state.clone())
            .configure(services::configure)
            .default_service(web::route().to(serve_embedded))
    })
    .bind((host, port))?
    .run()
    .await
}
