use apartment_tracker::config::{self, AppConfig};
use apartment_tracker::db::{init_db, Database};
use apartment_tracker::logging;
use apartment_tracker::router::{handle, AppState};
use apartment_tracker::templates;
use astra::Server;
use tracing::{error, info, warn};

fn main() {
    config::load_dotenv();
    logging::init();

    let cfg = match AppConfig::from_env() {
        Ok(cfg) => cfg,
        Err(e) => {
            error!("configuration error: {e}");
            std::process::exit(1);
        }
    };

    let db = Database::new(&cfg.sqlite_path);
    if let Err(e) = init_db(&db, &cfg.schema_path) {
        error!("database initialization failed: {e}");
        std::process::exit(1);
    }

    if cfg.editors.is_empty() {
        warn!("APARTMENT_EDITORS is empty; nobody can update apartments");
    }

    let state = AppState {
        db,
        editors: cfg.editors,
    };

    info!(addr = %cfg.bind_addr, "starting server");
    let server = Server::bind(&cfg.bind_addr).max_workers(8);

    let result = server.serve(move |req, _info| match handle(req, &state) {
        Ok(resp) => resp,
        Err(err) => templates::html_error_response(err),
    });

    if let Err(e) = result {
        error!("server ended with error: {e}");
        std::process::exit(1);
    }

    info!("server shut down cleanly");
}
