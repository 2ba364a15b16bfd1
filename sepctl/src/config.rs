//! `sepctl` configuration file.
//!
//! Only presentation-side knobs live here: which site to query by default, the refresh
//! interval and the reference point of the airspace view.  Site definitions themselves
//! are in `sources.hcl` (see the `sources` crate).
//!

use eyre::{eyre, Result};
use serde::Deserialize;
use tracing::info;

use sepwatch_common::{ConfigFile, Location, Versioned};

/// Current `config.hcl` version
const CVERSION: usize = 1;

/// Configuration for the CLI tool.
///
#[derive(Clone, Debug, Deserialize)]
pub struct Config {
    /// Version number for safety
    pub version: usize,
    /// Default site to query
    pub default_site: String,
    /// Refresh interval in seconds for `watch`
    pub refresh: u64,
    /// Airspace view radius around the reference point, nautical miles
    pub range_nm: u32,
    /// Fixed reference point the airspace view is centred on
    pub reference: Location,
}

impl Versioned for Config {
    fn version(&self) -> usize {
        self.version
    }
}

impl Config {
    /// Load the named file, the default one, or fall back on built-in defaults.
    ///
    #[tracing::instrument]
    pub fn load(fname: Option<&str>) -> Result<Config> {
        let cfg: Config = match ConfigFile::<Config>::load(fname) {
            Ok(cfile) => cfile.inner().clone(),
            Err(e) => {
                // An explicitly named file must exist, the default one may not.
                //
                if fname.is_some() {
                    return Err(e);
                }
                info!("no config.hcl found, using built-in defaults");
                hcl::from_str(include_str!("config.hcl"))?
            }
        };

        if cfg.version() != CVERSION {
            return Err(eyre!(
                "Bad config version {}, expecting {}",
                cfg.version(),
                CVERSION
            ));
        }
        Ok(cfg)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_builtin_defaults() {
        let cfg: Config = hcl::from_str(include_str!("config.hcl")).unwrap();

        assert_eq!(CVERSION, cfg.version());
        assert_eq!("drns", cfg.default_site);
        assert_eq!(2, cfg.refresh);
        assert_eq!(10, cfg.range_nm);

        // Baghdad
        //
        assert!((cfg.reference.lat - 33.3152).abs() < 1e-9);
        assert!((cfg.reference.lon - 44.3661).abs() < 1e-9);
    }

    #[test]
    fn test_config_load_explicit_missing() {
        assert!(Config::load(Some("/nonexistent/config.hcl")).is_err());
    }
}
