//! Command sources: character device, TCP or stdin

use std::{fmt, path::{Path, PathBuf}, time::Duration};

use tokio::{fs::File, net::TcpListener, time::sleep};
use tracing::{info, warn};

use crate::scheduler::CookScheduler;
use super::serve_lines;

/// Delay before reopening a device or retrying a failed accept
const RETRY_DELAY: Duration = Duration::from_secs(1);

/// Where command lines come from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommandSource {
    /// Character device such as a bound RFCOMM tty; reopened after EOF
    Device(PathBuf),
    /// TCP address; one controller connection is served at a time
    Tcp(String),
    Stdin,
}

impl fmt::Display for CommandSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CommandSource::Device(path) => write!(f, "device {}", path.display()),
            CommandSource::Tcp(addr) => write!(f, "tcp {}", addr),
            CommandSource::Stdin => f.write_str("stdin"),
        }
    }
}

/// Deliver commands from `source` to the scheduler.
///
/// Device and TCP sources run until the process exits; stdin returns at EOF.
pub async fn run_transport(source: CommandSource, scheduler: CookScheduler) -> std::io::Result<()> {
    match source {
        CommandSource::Device(path) => serve_device(&path, &scheduler).await,
        CommandSource::Tcp(addr) => serve_tcp(&addr, &scheduler).await,
        CommandSource::Stdin => {
            info!("Reading commands from stdin");
            let delivered = serve_lines(tokio::io::stdin(), &scheduler).await?;
            info!("stdin closed after {} commands", delivered);
            Ok(())
        }
    }
}

async fn serve_device(path: &Path, scheduler: &CookScheduler) -> std::io::Result<()> {
    loop {
        match File::open(path).await {
            Ok(file) => {
                info!("Waiting for commands on {}", path.display());
                match serve_lines(file, scheduler).await {
                    Ok(delivered) => info!(
                        "{} closed after {} commands, reopening", path.display(), delivered
                    ),
                    Err(e) => warn!("Error reading from {}: {}", path.display(), e),
                }
            }
            Err(e) => warn!("Failed to open {}: {}", path.display(), e),
        }

        sleep(RETRY_DELAY).await;
    }
}

async fn serve_tcp(addr: &str, scheduler: &CookScheduler) -> std::io::Result<()> {
    let listener = TcpListener::bind(addr).await?;
    info!("Waiting for a controller connection on {}", listener.local_addr()?);

    loop {
        let (stream, peer) = match listener.accept().await {
            Ok(accepted) => accepted,
            Err(e) => {
                warn!("Failed to accept connection: {}", e);
                sleep(RETRY_DELAY).await;
                continue;
            }
        };

        info!("Controller connected from {}", peer);
        match serve_lines(stream, scheduler).await {
            Ok(delivered) => info!("Controller {} disconnected after {} commands", peer, delivered),
            Err(e) => warn!("Connection from {} failed: {}", peer, e),
        }
    }
}
