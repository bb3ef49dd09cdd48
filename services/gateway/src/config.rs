use anyhow::Context;
use std::net::SocketAddr;
use std::path::PathBuf;

pub const BIND_ADDR_VAR: &str = "PORTAL_BIND_ADDR";
pub const CATALOG_PATH_VAR: &str = "PORTAL_CATALOG_PATH";

/// Gateway settings, read from the environment at startup
#[derive(Debug, Clone, PartialEq)]
pub struct GatewayConfig {
    pub bind_addr: SocketAddr,
    /// Course catalog JSON file; the embedded catalog is used when unset
    pub catalog_path: Option<PathBuf>,
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            bind_addr: SocketAddr::from(([0, 0, 0, 0], 8080)),
            catalog_path: None,
        }
    }
}

impl GatewayConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from any key/value source, falling back to defaults for unset keys.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        let mut config = Self::default();

        if let Some(addr) = lookup(BIND_ADDR_VAR) {
            config.bind_addr = addr
                .parse()
                .with_context(|| format!("invalid {}: {:?}", BIND_ADDR_VAR, addr))?;
        }
        if let Some(path) = lookup(CATALOG_PATH_VAR).filter(|p| !p.trim().is_empty()) {
            config.catalog_path = Some(PathBuf::from(path));
        }

        Ok(config)
    }
}
