/// ferrite-digits Studio
///
/// Browser front end for the remote digit classifier, served by a
/// synchronous tiny_http server; no JavaScript frameworks required.
///
/// Run with:
///   cargo run --bin studio --release
/// Then open http://127.0.0.1:7878
///
/// Views:
///   /         upload a digit image and get a prediction
///   /history  every prediction made so far

mod state;
mod render;
mod routes;
mod handlers;
mod util;

use std::sync::{Arc, Mutex};
use tiny_http::Server;
use tracing::{error, info};

use ferrite_digits::{Config, FormController, HistoryStore, PredictionClient};
use state::StudioState;

fn main() {
    ferrite_digits::init_tracing();

    let config = match Config::from_env() {
        Ok(c) => c,
        Err(e) => {
            error!(error = %e, "invalid configuration");
            std::process::exit(1);
        }
    };

    let client = match PredictionClient::new(&config.endpoint) {
        Ok(c) => c,
        Err(e) => {
            error!(error = ?e, "could not build HTTP client");
            std::process::exit(1);
        }
    };

    let server = match Server::http(&config.bind_addr) {
        Ok(s) => s,
        Err(e) => {
            error!(addr = %config.bind_addr, error = %e, "failed to bind HTTP server");
            std::process::exit(1);
        }
    };

    let form = FormController::new(HistoryStore::open(&config.history_path));
    let shared_state = Arc::new(Mutex::new(StudioState::new(form, Arc::new(client))));

    println!("╔══════════════════════════════════════════════╗");
    println!("║          ferrite-digits Studio               ║");
    println!("╠══════════════════════════════════════════════╣");
    println!("║  Open in your browser:                       ║");
    println!("║  http://{:<37}║", config.bind_addr);
    println!("╚══════════════════════════════════════════════╝");

    info!(endpoint = %config.endpoint, history = %config.history_path.display(), "studio ready");

    // Each request runs on its own thread so a slow classifier round trip
    // does not stall page loads.
    for request in server.incoming_requests() {
        let state_clone = shared_state.clone();
        std::thread::spawn(move || {
            routes::dispatch(request, state_clone);
        });
    }
}
