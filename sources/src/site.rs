//!  Module that defines what is a site (API endpoint).
//!
//! This is used to configure the list of possible sources through `sources.hcl`.
//!
//! Sites can have different ways to authenticate (or not) the request; the services we
//! know are either fully open or take an API key in a header.
//!
//! You can define a set of possible routes for a site depending on how the API is
//! designed.
//!

use std::collections::BTreeMap;
use std::fmt::{Display, Formatter};
use std::str::FromStr;

use eyre::{eyre, Result};
use serde::{Deserialize, Serialize};
use tracing::trace;

use sepwatch_formats::Format;

use crate::access::Drns;
use crate::{Fetchable, Sources};

/// Describe what a site is and associated credentials.
///
#[derive(Clone, Debug, Default, Deserialize, PartialEq, Serialize)]
pub struct Site {
    /// Name of the site, filled from the configuration key
    #[serde(default)]
    pub name: String,
    /// Type of input
    pub format: String,
    /// Base URL (to avoid repeating)
    pub base_url: String,
    /// Credentials
    #[serde(default)]
    pub auth: Option<Auth>,
    /// Different URLs available
    #[serde(default)]
    pub routes: Option<BTreeMap<String, String>>,
    /// Per-request timeout override, seconds
    #[serde(default)]
    pub timeout: Option<u64>,
    /// Fetch-cache TTL override, seconds
    #[serde(default)]
    pub cache_ttl: Option<u64>,
}

/// Describe the possible ways to authenticate oneself
///
#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Auth {
    /// Nothing special, no auth
    #[default]
    Anon,
    /// Using an API key supplied through a header
    Key { api_key: String },
}

impl Display for Auth {
    /// Obfuscate the keys
    ///
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let auth = match self.clone() {
            Auth::Key { .. } => Auth::Key {
                api_key: "HIDDEN".to_string(),
            },
            _ => Auth::Anon,
        };
        write!(f, "{:?}", auth)
    }
}

impl Site {
    /// Basic `new()`
    ///
    pub fn new() -> Self {
        Site::default()
    }

    /// Load site by checking whether it is present in the configuration file
    ///
    pub fn load(name: &str, cfg: &Sources) -> Result<Box<dyn Fetchable>> {
        trace!("Loading site {}", name);
        match cfg.get(name) {
            Some(site) => match site.format() {
                Format::Drns => Ok(Box::new(Drns::new().load(site).clone())),
                _ => Err(eyre!("invalid site {name}")),
            },
            None => Err(eyre!("no such site {name}")),
        }
    }

    /// Return the site input format
    ///
    pub fn format(&self) -> Format {
        Format::from_str(&self.format).unwrap_or_default()
    }

    /// Return the list of routes
    ///
    pub fn list(&self) -> Vec<&String> {
        match &self.routes {
            Some(routes) => routes.keys().collect::<Vec<_>>(),
            _ => vec![],
        }
    }

    /// Check whether site has the mentioned route
    ///
    pub fn has(&self, meth: &str) -> bool {
        match &self.routes {
            Some(routes) => routes.contains_key(meth),
            _ => false,
        }
    }

    /// Retrieve a route
    ///
    pub fn route(&self, key: &str) -> Option<&String> {
        match &self.routes {
            Some(routes) => routes.get(key),
            _ => None,
        }
    }
}

impl Display for Site {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let auth = match self.auth.clone() {
            Some(auth) => auth,
            _ => Auth::Anon,
        };
        write!(
            f,
            "{{ format={} url={} auth={} routes={:?} }}",
            self.format, self.base_url, auth, self.routes
        )
    }
}
