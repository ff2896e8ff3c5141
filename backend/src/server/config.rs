//! Server settings parsed from the command line and environment.

use std::net::{IpAddr, Ipv4Addr, SocketAddr};

use clap::Parser;

/// Port used when neither `--port` nor `PORT` is given.
pub const DEFAULT_PORT: u16 = 3000;

/// Listener settings.
///
/// Flags take precedence over environment variables, which take precedence
/// over the defaults.
#[derive(Debug, Clone, PartialEq, Eq, Parser)]
#[command(name = "users-backend", about = "In-memory users CRUD service")]
pub struct ServerSettings {
    /// TCP port to listen on.
    #[arg(long, env = "PORT", default_value_t = DEFAULT_PORT)]
    pub port: u16,
    /// Interface address to bind.
    #[arg(long, env = "HOST", default_value_t = IpAddr::V4(Ipv4Addr::UNSPECIFIED))]
    pub host: IpAddr,
}

impl ServerSettings {
    /// Socket address the server binds to.
    #[must_use]
    pub fn bind_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}
