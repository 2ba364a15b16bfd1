//! This is the exposed part of the `sepwatch-sources` API.
//!

use std::collections::btree_map::{Iter, Keys, Values};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use eyre::{eyre, Result};
use serde::Deserialize;
use tabled::builder::Builder;
use tabled::settings::Style;
use tracing::{info, trace};

use crate::{Auth, Site, CONFIG, SVERSION};

use sepwatch_common::{ConfigFile, Versioned};

/// On-disk structure of `sources.hcl`.
///
#[derive(Clone, Debug, Default, Deserialize)]
pub struct SourcesConfig {
    /// Version number for safety
    version: usize,
    /// Each site by name
    site: BTreeMap<String, Site>,
}

impl Versioned for SourcesConfig {
    fn version(&self) -> usize {
        self.version
    }
}

/// List of sources, this is the only exposed struct from here.
///
#[derive(Clone, Debug, Default, Deserialize)]
pub struct Sources {
    site: BTreeMap<String, Site>,
}

/// Initialise a `Sources` from a `BTreeMap`
///
impl From<BTreeMap<String, Site>> for Sources {
    fn from(value: BTreeMap<String, Site>) -> Self {
        Sources { site: value }
    }
}

impl Sources {
    /// Load sources from the configuration file, or fall back on the built-in list
    /// when there is none.
    ///
    #[tracing::instrument]
    pub fn load(fname: Option<&str>) -> Result<Self> {
        let cfg = match ConfigFile::<SourcesConfig>::load_as(fname, CONFIG) {
            Ok(cfile) => cfile.inner().clone(),
            Err(e) => {
                // An explicitly named file must exist, the default one may not.
                //
                if fname.is_some() {
                    return Err(e);
                }
                info!("no {} found, using built-in defaults", CONFIG);
                hcl::from_str(include_str!("sources.hcl"))?
            }
        };

        Self::from_config(cfg)
    }

    /// Built-in list only, no filesystem access.
    ///
    pub fn builtin() -> Result<Self> {
        Self::from_config(hcl::from_str(include_str!("sources.hcl"))?)
    }

    fn from_config(cfg: SourcesConfig) -> Result<Self> {
        if cfg.version() != SVERSION {
            return Err(eyre!(
                "Bad sources file version {}, expecting {}",
                cfg.version(),
                SVERSION
            ));
        }

        // The map key is the site name, copy it inside each `Site`.
        //
        let all = cfg
            .site
            .into_iter()
            .map(|(n, mut site)| {
                site.name = n.clone();
                (n, site)
            })
            .collect::<BTreeMap<_, _>>();
        Ok(Sources::from(all))
    }

    /// Install default files
    ///
    #[tracing::instrument]
    pub fn install_defaults(dir: &Path) -> std::io::Result<()> {
        trace!("install_defaults in {dir:?}");

        // Create config directory if needed
        //
        if !dir.exists() {
            fs::create_dir_all(dir)?
        }

        // Copy content of `sources.hcl` into place.
        //
        let fname: PathBuf = dir.join(CONFIG);
        let content = include_str!("sources.hcl");
        fs::write(fname, content)
    }

    /// List of currently known sources into a nicely formatted string.
    ///
    #[tracing::instrument(skip(self))]
    pub fn list(&self) -> Result<String> {
        let header = vec!["Name", "Format", "URL", "Auth", "Routes"];

        let mut builder = Builder::default();
        builder.push_record(header);

        self.site.iter().for_each(|(n, s)| {
            let mut row = vec![];

            let format = s.format.clone();
            let base_url = s.base_url.clone();
            row.push(n);
            row.push(&format);
            row.push(&base_url);
            let auth = match &s.auth {
                Some(Auth::Key { .. }) => "API key",
                _ => "open",
            }
            .to_string();
            row.push(&auth);
            let routes = s
                .list()
                .iter()
                .map(|r| r.to_string())
                .collect::<Vec<String>>()
                .join(",");
            row.push(&routes);
            builder.push_record(row);
        });

        let table = builder.build().with(Style::rounded()).to_string();
        let table = format!("Listing all sources:\n{table}");
        Ok(table)
    }
}

// -----

/// Helper methods
///
impl Sources {
    /// Wrap `get`
    ///
    #[inline]
    pub fn get(&self, name: &str) -> Option<&Site> {
        self.site.get(name)
    }

    /// Wrap `is_empty()`
    ///
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.site.is_empty()
    }

    /// Wrap `len()`
    ///
    #[inline]
    pub fn len(&self) -> usize {
        self.site.len()
    }

    /// Wrap `keys()`
    ///
    #[inline]
    pub fn keys(&self) -> Keys<'_, String, Site> {
        self.site.keys()
    }

    /// Wrap `values()`
    ///
    #[inline]
    pub fn values(&self) -> Values<'_, String, Site> {
        self.site.values()
    }

    /// Wrap `contains_key()`
    ///
    #[inline]
    pub fn contains_key(&self, s: &str) -> bool {
        self.site.contains_key(s)
    }

    /// Wrap `iter()`
    ///
    #[inline]
    pub fn iter(&self) -> Iter<'_, String, Site> {
        self.site.iter()
    }
}

impl<'a> IntoIterator for &'a Sources {
    type Item = (&'a String, &'a Site);
    type IntoIter = Iter<'a, String, Site>;

    /// We can now do `for (name, site) in &sources`
    ///
    fn into_iter(self) -> Iter<'a, String, Site> {
        self.site.iter()
    }
}

#[cfg(test)]
mod tests {
    use std::env::temp_dir;

    use super::*;

    #[test]
    fn test_sources_builtin() {
        let s = Sources::builtin().unwrap();

        assert!(!s.is_empty());
        assert_eq!(1, s.len());
        assert!(s.contains_key("drns"));

        let site = s.get("drns").unwrap();
        assert_eq!("https://drns-1.onrender.com", site.base_url);
    }

    #[test]
    fn test_sources_bad_version() {
        let cfg: SourcesConfig = hcl::from_str(
            r##"
version = 666

site "drns" {
  format   = "drns"
  base_url = "http://127.0.0.1:2400"
}
"##,
        )
        .unwrap();
        assert!(Sources::from_config(cfg).is_err());
    }

    #[test]
    fn test_sources_load_explicit_missing() {
        let s = Sources::load(Some("/nonexistent/sources.hcl"));
        assert!(s.is_err());
    }

    #[test]
    fn test_install_files() -> Result<()> {
        let tempdir = temp_dir().join("sepwatch-install");

        Sources::install_defaults(&tempdir)?;
        let f = tempdir.join(CONFIG);
        assert!(f.exists());

        // And it must load back
        //
        let s = Sources::load(Some(&f.to_string_lossy()))?;
        assert!(s.contains_key("drns"));

        fs::remove_dir_all(&tempdir)?;
        Ok(())
    }
}
