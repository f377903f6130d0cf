use std::io::Read;

use turtlekit::{init_logging, run_options, run_turtle_code, Config, RunRequest, RunResponse};

/// Read one JSON request from the argument file or stdin, execute it, and
/// write the JSON response to stdout. A failing script is a `success: false`
/// response, not a process failure; only I/O-level faults exit non-zero.
fn main() -> anyhow::Result<()> {
    let config = Config::load().unwrap_or_else(|err| {
        eprintln!("warning: {}, using default configuration", err);
        Config::default()
    });

    init_logging(&config.logging.filter)?;

    let input = match std::env::args().nth(1) {
        Some(path) => std::fs::read_to_string(path)?,
        None => {
            let mut buffer = String::new();
            std::io::stdin().read_to_string(&mut buffer)?;
            buffer
        }
    };

    let response = match serde_json::from_str::<RunRequest>(&input) {
        Ok(request) => run_turtle_code(&request, &run_options(&config)),
        Err(err) => RunResponse::failure(format!("invalid request: {}", err)),
    };

    serde_json::to_writer(std::io::stdout().lock(), &response)?;
    println!();
    Ok(())
}
