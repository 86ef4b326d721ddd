use std::net::{IpAddr, UdpSocket};
use std::path::{Path, PathBuf};

use tracing::{info, warn};

use crate::config::ServerConfig;
use crate::handlers::pages::PAGE_ROUTES;

pub const REQUIRED_DOWNLOADS: &[&str] = &[
    "downloads/UPB_presence.apk",
    "downloads/UPB_Presence_Final_Installer.zip",
];

#[derive(Debug, PartialEq)]
pub enum DownloadStatus {
    Present { path: PathBuf, bytes: u64 },
    Missing { path: PathBuf },
}

pub fn check_downloads(root: &Path) -> Vec<DownloadStatus> {
    info!("Checking download files...");
    REQUIRED_DOWNLOADS
        .iter()
        .map(|relative| {
            let path = root.join(relative);
            match std::fs::metadata(&path) {
                Ok(meta) if meta.is_file() => {
                    info!("{} - {:.1} MB", relative, meta.len() as f64 / (1024.0 * 1024.0));
                    DownloadStatus::Present { path, bytes: meta.len() }
                }
                _ => {
                    warn!("Missing download file: {}", relative);
                    DownloadStatus::Missing { path }
                }
            }
        })
        .collect()
}

/// Address of the interface that would route to the internet. Connecting a
/// UDP socket only picks the route; nothing is sent.
pub fn local_ip() -> Option<IpAddr> {
    let socket = UdpSocket::bind("0.0.0.0:0").ok()?;
    socket.connect("8.8.8.8:80").ok()?;
    socket.local_addr().ok().map(|addr| addr.ip())
}

pub fn log_banner(config: &ServerConfig) {
    let network = local_ip()
        .map(|ip| ip.to_string())
        .unwrap_or_else(|| "unavailable".to_string());
    let root = std::fs::canonicalize(&config.root).unwrap_or_else(|_| config.root.clone());

    info!("Portfolio development server");
    info!("Serving {}", root.display());
    info!("Local:   http://localhost:{}", config.port);
    info!("Network: http://{}:{}", network, config.port);
    for (route, _) in PAGE_ROUTES.iter().filter(|(route, _)| *route != "/") {
        info!("  http://{}:{}{}", network, config.port, route);
    }
    info!("To open it from a phone, join the same network and browse to the network URL");
    info!("Press Ctrl+C to stop");
}
