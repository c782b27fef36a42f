use crate::config::AppConfig;
use crate::db::connection::{init_db, Database};
use crate::db::documents::{count_documents, import_documents};
use crate::domain::PipelineError;
use crate::router::handle;
use crate::session::Session;
use crate::source::{DataApiSource, DocumentSource, SqliteDocumentSource};
use astra::Server;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

mod charts;
mod config;
mod db;
mod domain;
mod errors;
mod responses;
mod router;
mod session;
mod source;
mod spreadsheets;
mod templates;

#[cfg(test)]
mod tests;

fn main() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    // 1️⃣ Configuration
    let config = match AppConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            error!(error = %e, "configuration rejected");
            std::process::exit(1);
        }
    };

    // 2️⃣ Fetch and normalize once; failures become the session's error state
    let session = match open_source(&config) {
        Ok(source) => Session::load(source.as_ref()),
        Err(e) => Session::from_error(e),
    };

    // 3️⃣ Start the server
    info!(addr = %config.bind_addr, "starting server");
    let server = Server::bind(&config.bind_addr).max_workers(config.max_workers);

    // 4️⃣ Serve requests; the session is owned by the handler closure
    let result = server.serve(move |req, _info| match handle(req, &session) {
        Ok(resp) => resp,
        Err(err) => templates::html_error_response(err),
    });

    if let Err(e) = result {
        error!(error = %e, "server ended with error");
    }

    info!("server shut down cleanly");
}

fn open_source(config: &AppConfig) -> Result<Box<dyn DocumentSource>, PipelineError> {
    if let Some(api) = &config.data_api {
        return Ok(Box::new(DataApiSource::new(api.clone())?));
    }

    let db = Database::new(&config.db_path);
    init_db(&db)?;

    if let Some(seed) = &config.seed_file {
        if count_documents(&db, &config.collection)? == 0 {
            import_documents(&db, &config.collection, seed)?;
        } else {
            warn!(seed = %seed.display(), "document store not empty, seed file ignored");
        }
    }

    Ok(Box::new(SqliteDocumentSource::new(db, config.collection.clone())))
}
