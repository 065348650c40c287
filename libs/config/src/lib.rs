//! # Status Client Configuration
//!
//! Two independent sources feed the client:
//!
//! - **Credentials**: account email, site device identifiers and the password
//!   digest, persisted as a small JSON file readable only by its owner
//! - **Client Settings**: gateway base URL, backoff base and request timeout,
//!   from an optional TOML file with `FWH_*` environment overrides
//!
//! ## Usage
//!
//! ```rust,no_run
//! use config::{ClientSettings, Credentials};
//! use std::path::Path;
//!
//! let credentials = Credentials::load(Path::new("./benwh.config"))?;
//! let settings = ClientSettings::from_toml_with_env_overrides(None)?;
//! # Ok::<(), anyhow::Error>(())
//! ```

pub mod credentials;
pub mod settings;

pub use credentials::{parse_device_list, password_digest, Credentials, DEFAULT_CREDENTIALS_PATH};
pub use settings::{ClientSettings, DEFAULT_BASE_URL, DEFAULT_INITIAL_BACKOFF_SECS, DEFAULT_USER_AGENT};
