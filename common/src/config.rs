//! This is the `ConfigFile` struct.
//!
//! This is for finding the right default locations for the various configuration files
//! used by `sepwatch`.  This is a configuration file/struct neutral loading engine, storing
//! only the base directory and with `load()` read the proper file or the default one.
//!
//! This encapsulates the configuration file, available with `.inner()`.
//!

use crate::{makepath, Versioned};

use directories::BaseDirs;
use eyre::{eyre, Result};
use serde::de::DeserializeOwned;
use std::fmt::Debug;
use std::path::PathBuf;
use std::{env, fs};
use tracing::{debug, trace};

/// Default config filename
const CONFIG: &str = "config.hcl";

/// Main name for the directory base
const TAG: &str = "sepwatch";

/// Generic loader for the HCL configuration files.  `T` is whatever struct the caller
/// expects to find in the file, it only has to carry a version number.
///
#[derive(Debug)]
pub struct ConfigFile<T: Debug + DeserializeOwned + Versioned> {
    /// This is the base directory for all files.
    basedir: PathBuf,
    inner: Option<T>,
}

impl<T> ConfigFile<T>
where
    T: Debug + DeserializeOwned + Versioned,
{
    fn new(tag: &str) -> Result<Self> {
        let base = BaseDirs::new();

        let basedir: PathBuf = match base {
            Some(base) => {
                #[cfg(unix)]
                let base = base.home_dir().join(".config").to_string_lossy().to_string();

                #[cfg(windows)]
                let base = base.data_local_dir().to_string_lossy().to_string();

                debug!("base = {base}");
                let base: PathBuf = makepath!(base, tag);
                base
            }
            None => {
                #[cfg(unix)]
                let homedir =
                    env::var("HOME").map_err(|_| eyre!("No HOME variable defined, can not continue"))?;

                #[cfg(windows)]
                let homedir = env::var("LOCALAPPDATA")
                    .map_err(|_| eyre!("No LOCALAPPDATA variable defined, can not continue"))?;

                debug!("base = {homedir}");

                #[cfg(unix)]
                let base: PathBuf = makepath!(homedir, ".config", tag);

                #[cfg(windows)]
                let base: PathBuf = makepath!(homedir, tag);

                base
            }
        };
        Ok(ConfigFile {
            basedir,
            inner: None,
        })
    }

    /// Returns the path of the default config directory
    ///
    pub fn config_path(&self) -> PathBuf {
        self.basedir.clone()
    }

    /// Returns the path of the default config file
    ///
    pub fn default_file(&self) -> PathBuf {
        self.default_file_as(CONFIG)
    }

    /// Same, for a non-default filename inside the config directory
    ///
    pub fn default_file_as(&self, name: &str) -> PathBuf {
        let cfg = self.config_path().join(name);
        debug!("default = {cfg:?}");
        cfg
    }

    /// Load the default-named file and return a struct T in the right format.
    ///
    #[tracing::instrument]
    pub fn load(fname: Option<&str>) -> Result<ConfigFile<T>> {
        Self::load_as(fname, CONFIG)
    }

    /// Load the file and return a struct T in the right format.
    ///
    /// Use the following search path:
    /// - file specified on CLI
    /// - `name` inside the default basedir (based on $HOME or $LOCALAPPDATA)
    ///
    #[tracing::instrument]
    pub fn load_as(fname: Option<&str>, name: &str) -> Result<ConfigFile<T>> {
        let mut cfg = ConfigFile::<T>::new(TAG)?;

        let fname = match fname {
            Some(fname) => PathBuf::from(fname),
            None => cfg.default_file_as(name),
        };

        // Use a full path
        //
        let fname = if fname.exists() {
            fname.canonicalize()?
        } else {
            return Err(eyre!(
                "Unknown config file {:?} and no default in {:?}",
                fname,
                cfg.config_path()
            ));
        };

        trace!("Loading config file {fname:?} from {:?}", cfg.config_path());

        let data = fs::read_to_string(fname)?;
        debug!("string data = {data}");

        let data: T = hcl::from_str(&data)?;
        debug!("struct data = {data:?}");

        cfg.inner = Some(data);
        Ok(cfg)
    }

    /// Return the inner configuration struct
    ///
    pub fn inner(&self) -> &T {
        self.inner.as_ref().unwrap()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;
    use std::env::temp_dir;

    #[derive(Clone, Debug, Default, Deserialize)]
    struct Foo {
        pub version: usize,
        pub name: String,
    }

    impl Versioned for Foo {
        fn version(&self) -> usize {
            self.version
        }
    }

    #[test]
    fn test_config_engine_load_file() -> Result<()> {
        let fname = temp_dir().join("local.hcl");
        fs::write(&fname, "version = 1\nname = \"foo\"\n")?;

        let cfg = ConfigFile::<Foo>::load(Some(&fname.to_string_lossy()))?;
        let inner = cfg.inner();
        assert_eq!(1, inner.version());
        assert_eq!("foo", inner.name);

        fs::remove_file(&fname)?;
        Ok(())
    }

    #[test]
    fn test_config_engine_load_missing() {
        let cfg = ConfigFile::<Foo>::load(Some("/nonexistent/nowhere.hcl"));
        assert!(cfg.is_err());
    }
}
