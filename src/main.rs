mod config;
mod controllers;
mod crypto;
mod database;
mod error;
mod http;
mod model;
mod routes;
mod usecases;
mod validation;

use actix_web::{middleware::Logger, web, App, HttpServer};
use clap::Parser;
use config::Config;
use controllers::{AddMovieController, SignUpController};
use crypto::BcryptAdapter;
use database::*;
use log::info;
use std::sync::Arc;
use validation::EmailValidatorAdapter;

#[actix_rt::main]
async fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or("watchlist=debug,actix_web=info"),
    )
    .init();

    let config = Config::parse();
    let db = config.open_db()?;
    if config.is_temporary() {
        seed_catalogue(&db)?;
        info!("using a temporary database seeded with a demo movie");
    }

    let sign_up = web::Data::new(SignUpController::new(
        Arc::new(DbAddAccount::new(db.clone())),
        Arc::new(EmailValidatorAdapter),
        Arc::new(BcryptAdapter::new(config.bcrypt_cost)),
    ));
    let add_movie = web::Data::new(AddMovieController::new(
        Arc::new(DbAddMovie::new(db.clone())),
        Arc::new(DbFindMovieById::new(db)),
    ));

    info!("listening on {}", config.bind);
    HttpServer::new(move || {
        App::new()
            .wrap(Logger::default())
            .app_data(sign_up.clone())
            .app_data(add_movie.clone())
            .configure(routes::configure)
    })
    .bind(&config.bind)?
    .run()
    .await?;
    Ok(())
}
