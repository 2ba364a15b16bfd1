//! Define our own macro to simplify the code
//!

/// Call the HTTP client with the proper arguments
///
/// - plain GET
/// - GET with an API key header
///
/// Callers need `clap::{crate_name, crate_version}` and `std::time::Duration` in
/// scope.
///
#[macro_export]
macro_rules! http_get {
    ($self:ident, $url:ident) => {
        $self
            .client
            .clone()
            .get(&$url)
            .header(
                "user-agent",
                format!("{}/{}", crate_name!(), crate_version!()),
            )
            .header("content-type", "application/json")
            .timeout(Duration::from_secs($self.timeout))
            .send()
    };
    ($self:ident, $url:ident, $key:expr) => {
        $self
            .client
            .clone()
            .get(&$url)
            .header(
                "user-agent",
                format!("{}/{}", crate_name!(), crate_version!()),
            )
            .header("content-type", "application/json")
            .header("api_key", $key)
            .timeout(Duration::from_secs($self.timeout))
            .send()
    };
}
