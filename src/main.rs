// src/main.rs

// dependencies
use clap::Parser;
use nuru_devserver::{DEFAULT_PORT, DEFAULT_ROOT_DIR, HttpServer, ServerConfig};
use std::path::PathBuf;

/// Serve the current directory for the Nuru wasm playground
#[derive(Debug, Parser)]
#[command(name = "nuru-devserver", version)]
struct Cli {
    /// Port to listen on
    #[arg(short, long, default_value_t = DEFAULT_PORT)]
    port: u16,

    /// Directory to serve
    #[arg(short, long, default_value = DEFAULT_ROOT_DIR)]
    dir: PathBuf,
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    let config = ServerConfig::default()
        .with_root_dir(cli.dir)
        .with_port(cli.port);

    match HttpServer::bind(config) {
        Ok(server) => server.run(),
        Err(err) => {
            log::error!("{}", err);
            std::process::exit(1);
        }
    }
}
