// src/cli/mod.rs
use clap::Parser;

use crate::core::Config;

#[derive(Parser, Debug)]
#[command(author, version, about = "Serves cryptographically secure passwords over HTTPS", long_about = None)]
pub struct Args {
    /// Port to listen on (overrides PORT)
    #[arg(long, short)]
    pub port: Option<u16>,

    /// Address to bind (overrides BIND_ADDRESS)
    #[arg(long, short)]
    pub address: Option<String>,

    /// Serve plain HTTP instead of HTTPS
    #[arg(long)]
    pub no_tls: bool,
}

impl Args {
    /// Apply command-line overrides on top of the environment configuration.
    pub fn apply(&self, config: &mut Config) {
        if let Some(port) = self.port {
            config.port = port;
        }
        if let Some(address) = &self.address {
            config.bind_address = address.clone();
        }
        if self.no_tls {
            config.tls_enabled = false;
        }
    }
}
