use std::time::Duration;

use courier_interface::client::TransportOptions;
use courier_interface::register::BACKEND;

use super::{BuildClientResult, Client};

/// A builder for [`Client`].
#[derive(Debug, Clone, Default)]
pub struct ClientBuilder {
    options: TransportOptions,
}

impl ClientBuilder {
    /// Sets the `User-Agent` sent with every request.
    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.options.user_agent = Some(user_agent.into());
        self
    }

    /// Adds a header sent with every request.
    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.options
            .default_headers
            .push((name.into(), value.into()));
        self
    }

    /// Ignores the system proxy settings.
    pub fn no_proxy(mut self) -> Self {
        self.options.use_default_proxy = false;
        self
    }

    /// Returns redirect responses as-is instead of following them.
    pub fn no_redirects(mut self) -> Self {
        self.options.follow_redirects = false;
        self
    }

    /// Fails exchanges that do not finish within `timeout` with
    /// [`crate::TransportError::RequestTimeout`].
    pub fn request_timeout(mut self, timeout: Duration) -> Self {
        self.options.request_timeout = Some(timeout);
        self
    }

    /// Fails exchanges whose response body is larger than `size` bytes with
    /// [`crate::TransportError::ResponseTooLarge`].
    pub fn max_response_buffer_size(mut self, size: u64) -> Self {
        self.options.max_response_buffer_size = Some(size);
        self
    }

    /// Builds a client with the registered backend.
    ///
    /// Without a registered backend, the bundled reqwest transport is used when the `reqwest`
    /// feature is enabled.
    pub fn build(self) -> BuildClientResult<Client> {
        match BACKEND.get() {
            Some(backend) => Ok(Client::from_any(backend.create_transport(self.options)?)),
            None => build_fallback(self.options),
        }
    }
}

#[cfg(feature = "reqwest")]
fn build_fallback(options: TransportOptions) -> BuildClientResult<Client> {
    let transport = courier_backend_reqwest::ReqwestTransport::new(options)?;
    Ok(Client::new(transport))
}

#[cfg(not(feature = "reqwest"))]
fn build_fallback(_options: TransportOptions) -> BuildClientResult<Client> {
    Err(super::BuildClientError::NoBackend)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn collects_options() {
        let builder = ClientBuilder::default()
            .user_agent("courier/1")
            .with_header("x-a", "1")
            .with_header("x-a", "2")
            .no_proxy()
            .no_redirects()
            .request_timeout(Duration::from_secs(5))
            .max_response_buffer_size(1024);
        let options = &builder.options;
        assert_eq!(options.user_agent.as_deref(), Some("courier/1"));
        assert_eq!(
            options.default_headers,
            [("x-a".to_string(), "1".to_string()), ("x-a".into(), "2".into())]
        );
        assert!(!options.use_default_proxy);
        assert!(!options.follow_redirects);
        assert_eq!(options.request_timeout, Some(Duration::from_secs(5)));
        assert_eq!(options.max_response_buffer_size, Some(1024));
    }

    #[cfg(feature = "reqwest")]
    #[test]
    fn builds_without_registered_backend() {
        let client = ClientBuilder::default().build().unwrap();
        assert!(format!("{client:?}").contains("ReqwestTransport"));
    }
}
