use std::{io, sync::{Arc, Mutex}, time::Duration as StdDuration};
use actix_web::{web::{self, Data}, App, HttpServer, middleware::Logger, rt};
use chrono::Duration;
use tracing::info;
use tracing_subscriber::{EnvFilter, fmt};

use config::Config;
use db::DB;
use provider::{AuthProvider, LocalAuthProvider};
use session::{lock, Sessions};

mod config;
mod data;
mod db;
mod form;
mod provider;
mod render;
mod routes;
mod session;
mod state;

const SESSION_SWEEP_INTERVAL: StdDuration = StdDuration::from_secs(60);

#[actix_web::main]
async fn main() -> io::Result<()> {
    fmt().with_env_filter(EnvFilter::from_default_env()).init();

    let config = Config::load().map_err(|e| io::Error::new(io::ErrorKind::InvalidInput, e))?;
    info!(store = %config.store.display(), "loading store");

    let provider: Arc<dyn AuthProvider> = Arc::new(LocalAuthProvider::load(&config.store));
    let provider = Data::from(provider);
    let db = Data::new(Mutex::new(DB::load(&config.store)));
    let sessions = Data::new(Mutex::new(Sessions::init()));

    let ttl = Duration::minutes(config.session_ttl_minutes);
    let sweeper = sessions.clone();
    rt::spawn(async move {
        let mut interval = rt::time::interval(SESSION_SWEEP_INTERVAL);
        loop {
            interval.tick().await;
            let mut sessions = lock(&sweeper);
            let evicted = sessions.delete_sessions_older_than(&ttl);
            if evicted > 0 {
                info!(evicted, remaining = sessions.len(), "evicted idle sessions");
            }
        }
    });

    info!("binding to {}:{}", config.host, config.port);
    HttpServer::new(move || {
        App::new()
            .configure(routes::configure)
            .app_data(provider.clone())
            .app_data(db.clone())
            .app_data(sessions.clone())
            .wrap(Logger::default())
            .default_service(web::to(routes::default_handler))
    })
    .bind((config.host.as_str(), config.port))?
    .run()
    .await
}
