//! Persisted account credentials
//!
//! The file uses the capitalized keys `Email`, `Device` and `Password`, so
//! credential files written by other FranklinWH tools load as-is. The password is
//! stored as the digest the login endpoint expects, never in clear text.

use anyhow::{Context, Result};
use md5::{Digest, Md5};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::io::Write;
use std::path::Path;
use tracing::debug;

/// Default location of the credentials file
pub const DEFAULT_CREDENTIALS_PATH: &str = "./benwh.config";

/// Account credentials and the devices of the site
#[derive(Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Credentials {
    #[serde(rename = "Email", default)]
    pub email: String,
    /// Site device identifiers; only the first one is queried
    #[serde(rename = "Device", default)]
    pub devices: Vec<String>,
    /// Password digest as sent to the login endpoint
    #[serde(rename = "Password", default)]
    pub password: String,
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("email", &self.email)
            .field("devices", &self.devices)
            .field("password", &"<redacted>")
            .finish()
    }
}

impl Credentials {
    /// Load credentials from a JSON file
    pub fn load(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("unable to read credentials file {}", path.display()))?;

        let credentials: Credentials = serde_json::from_str(&contents)
            .with_context(|| format!("unable to decode credentials file {}", path.display()))?;

        debug!(
            "Loaded credentials for {} ({} devices) from {}",
            credentials.email,
            credentials.devices.len(),
            path.display()
        );

        Ok(credentials)
    }

    /// Write credentials to a JSON file readable only by its owner
    pub fn save(&self, path: &Path) -> Result<()> {
        let contents = serde_json::to_vec(self).context("unable to encode credentials")?;

        let mut options = fs::OpenOptions::new();
        options.write(true).create(true).truncate(true);
        #[cfg(unix)]
        {
            use std::os::unix::fs::OpenOptionsExt;
            options.mode(0o600);
        }

        let mut file = options
            .open(path)
            .with_context(|| format!("unable to open credentials file {}", path.display()))?;
        file.write_all(&contents)
            .with_context(|| format!("failed to write credentials file {}", path.display()))?;

        // mode() only applies when the file is created
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            fs::set_permissions(path, fs::Permissions::from_mode(0o600)).with_context(|| {
                format!("unable to restrict permissions of {}", path.display())
            })?;
        }

        Ok(())
    }

    /// Device the status query is addressed to
    pub fn primary_device(&self) -> Option<&str> {
        self.devices
            .first()
            .map(|device| device.trim())
            .filter(|device| !device.is_empty())
    }
}

/// Split a comma separated device list, dropping empty entries
pub fn parse_device_list(list: &str) -> Vec<String> {
    list.split(',')
        .map(str::trim)
        .filter(|device| !device.is_empty())
        .map(str::to_string)
        .collect()
}

/// Lowercase hex MD5 digest of a clear-text password
pub fn password_digest(plain: &str) -> String {
    hex::encode(Md5::digest(plain.as_bytes()))
}
