//! DRNS site-specifics.
//!
//! The DRNS deconfliction service exposes one read-only route answering the current
//! fleet state, either raw (`?process=false`) or after its collision-avoidance pass
//! (`?process=true`).  No authentication in the hosted instance; keyed deployments put
//! their key in an `api_key` header.
//!
//! Answers are cached for a short TTL, keyed on `(base_url, processed)`, so the
//! before/after pair of one render pass never turns into duplicate calls when
//! something re-asks within the same pass.  Entries expire unconditionally, the
//! service has no invalidation signal.
//!
//! This implements the `Fetchable` trait described in `lib.rs`.
//!

use std::fmt::{Debug, Formatter};
use std::time::Duration;

use clap::{crate_name, crate_version};
use mini_moka::sync::Cache;
use reqwest::blocking::Client;
use tracing::{debug, trace};

use sepwatch_formats::{FleetSnapshot, Format, SnapshotTag};

use crate::site::Site;
use crate::{http_get, Auth, Capability, FetchError, Fetchable, TransportError};

/// Default service base
const DEF_SITE: &str = "https://drns-1.onrender.com";
/// Default data route
const DEF_GET: &str = "/uavs";
/// Per-request timeout, seconds
const DEF_TIMEOUT: u64 = 20;
/// Expiration after insert, seconds
const CACHE_TTL: u64 = 1;
/// Cache max entries
const CACHE_SIZE: u64 = 8;

/// This describe the DRNS "site" and the client talking to it.
///
#[derive(Clone)]
pub struct Drns {
    /// Describe the different features of the source
    pub features: Vec<Capability>,
    /// Input formats
    pub format: Format,
    /// API key, when the deployment wants one
    pub api_key: Option<String>,
    /// Base site url taken from config
    pub base_url: String,
    /// Add this to `base_url` to fetch data
    pub get: String,
    /// Per-request timeout, seconds
    pub timeout: u64,
    /// reqwest blocking client
    pub client: Client,
    /// Short-lived fetch cache, keyed on `(base_url, processed)`
    cache: Cache<(String, bool), FleetSnapshot>,
}

impl Drns {
    #[tracing::instrument]
    pub fn new() -> Self {
        trace!("drns::new");

        Self::with_cache_ttl(CACHE_TTL)
    }

    /// Same, with a specific cache TTL (also the escape hatch for tests).
    ///
    pub fn with_cache_ttl(ttl: u64) -> Self {
        // Set some reasonable defaults
        //
        Drns {
            features: vec![Capability::Fetch, Capability::Read],
            format: Format::Drns,
            api_key: None,
            base_url: DEF_SITE.to_owned(),
            get: DEF_GET.to_owned(),
            timeout: DEF_TIMEOUT,
            client: Client::new(),
            cache: Cache::builder()
                .max_capacity(CACHE_SIZE)
                .time_to_live(Duration::from_secs(ttl))
                .build(),
        }
    }

    /// Load our site details from what is in the configuration file
    ///
    #[tracing::instrument(skip(self))]
    pub fn load(&mut self, site: &Site) -> &mut Self {
        trace!("drns::load({site})");

        self.base_url = site.base_url.to_owned();
        if let Some(Auth::Key { api_key }) = &site.auth {
            self.api_key = Some(api_key.to_owned());
        }
        if let Some(get) = site.route("get") {
            self.get = get.to_owned();
        }
        if let Some(timeout) = site.timeout {
            self.timeout = timeout;
        }
        if let Some(ttl) = site.cache_ttl {
            self.cache = Cache::builder()
                .max_capacity(CACHE_SIZE)
                .time_to_live(Duration::from_secs(ttl))
                .build();
        }
        self
    }
}

impl Default for Drns {
    fn default() -> Self {
        Self::new()
    }
}

impl Debug for Drns {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Drns {{ base_url: {}, get: {}, timeout: {}s }}",
            self.base_url, self.get, self.timeout
        )
    }
}

impl Fetchable for Drns {
    fn name(&self) -> String {
        "drns".to_string()
    }

    /// Fetch one fleet snapshot from the service.
    ///
    /// Transport failures (network, timeout, non-2xx) and contract violations are both
    /// fatal for the caller's cycle; nothing is retried here.
    ///
    #[tracing::instrument(skip(self))]
    fn fetch(&self, processed: bool) -> Result<FleetSnapshot, FetchError> {
        trace!("drns::fetch({processed})");

        let key = (self.base_url.clone(), processed);
        if let Some(snap) = self.cache.get(&key) {
            debug!("cache hit for process={processed}");
            return Ok(snap);
        }

        let url = format!("{}{}?process={}", self.base_url, self.get, processed);
        trace!("Fetching {}…", url);

        let resp = match &self.api_key {
            Some(api_key) => http_get!(self, url, api_key),
            None => http_get!(self, url),
        }
        .map_err(|e| {
            if e.is_timeout() {
                TransportError::Timeout(self.timeout)
            } else {
                TransportError::Network(e.to_string())
            }
        })?;

        let status = resp.status();
        if !status.is_success() {
            return Err(TransportError::Status(status.as_u16()).into());
        }

        let body = resp
            .text()
            .map_err(|e| TransportError::Network(e.to_string()))?;
        debug!("{} bytes read.", body.len());

        let tag = if processed {
            SnapshotTag::After
        } else {
            SnapshotTag::Before
        };
        let snap = FleetSnapshot::decode(tag, &body)?;

        self.cache.insert(key, snap.clone());
        Ok(snap)
    }

    /// Returns the site's input formats
    ///
    fn format(&self) -> Format {
        Format::Drns
    }
}
