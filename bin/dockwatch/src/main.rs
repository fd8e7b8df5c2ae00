use std::process;

use dockwatch::{Config, Logger, Monitor, Result};
use xiaomi::Vacuum;

use log::info;
use tokio::signal::unix::{signal, SignalKind};

const VERSION: &str = env!("CARGO_PKG_VERSION");

fn exit_with_failure() -> ! {
    log::logger().flush();
    process::exit(1);
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    Logger::new(Config::log_file_from_env())?.install()?;

    // Config::load logs the reason
    let Ok(config) = Config::load() else {
        exit_with_failure();
    };

    info!("dockwatch version {VERSION}");
    info!("vacuum ip: {}", config.vacuum_ip);
    info!("log file: {}", config.log_file.display());

    let mut sigterm = signal(SignalKind::terminate())?;

    let vacuum = Vacuum::connect(config.vacuum_ip, config.vacuum_token);

    tokio::select! {
        result = Monitor::start(vacuum, config.check_interval) => {
            if result.is_err() {
                exit_with_failure();
            }
        },
        _ = sigterm.recv() => { info!("got SIGTERM, exiting...") },
    };

    log::logger().flush();

    Ok(())
}
