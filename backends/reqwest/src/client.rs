use courier_interface::client::TransportOptions;
use http::{HeaderMap, HeaderName, HeaderValue};
use reqwest::Client;

use crate::error::{ReqwestBackendError, Result};

#[derive(Clone)]
pub struct ReqwestClient {
    pub(crate) client: Client,
    pub(crate) max_response_buffer_size: Option<u64>,
}

impl ReqwestClient {
    pub fn new(options: TransportOptions) -> Result<Self> {
        let client = build_reqwest_client(&options)?;

        Ok(Self {
            client,
            max_response_buffer_size: options.max_response_buffer_size,
        })
    }
}

pub fn build_reqwest_client(options: &TransportOptions) -> Result<Client> {
    let mut builder = Client::builder();

    if let Some(user_agent) = &options.user_agent {
        builder = builder.user_agent(user_agent);
    }
    let default_headers: Result<HeaderMap> = options
        .default_headers
        .iter()
        .map(|(k, v)| {
            Ok::<_, ReqwestBackendError>((
                HeaderName::from_bytes(k.as_bytes())
                    .map_err(|_| ReqwestBackendError::InvalidHeaderName(k.into()))?,
                HeaderValue::from_str(v)
                    .map_err(|_| ReqwestBackendError::InvalidHeaderValue(v.into()))?,
            ))
        })
        .collect();

    if !options.use_default_proxy {
        builder = builder.no_proxy();
    }
    builder = builder.redirect(if options.follow_redirects {
        reqwest::redirect::Policy::default()
    } else {
        reqwest::redirect::Policy::none()
    });
    if let Some(timeout) = options.request_timeout {
        builder = builder.timeout(timeout);
    }

    builder
        .default_headers(default_headers?)
        .build()
        .map_err(ReqwestBackendError::Reqwest)
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;

    #[test]
    fn builds_with_every_option() {
        let options = TransportOptions {
            user_agent: Some("courier-test".into()),
            default_headers: vec![("x-trace".into(), "1".into())],
            use_default_proxy: false,
            follow_redirects: false,
            max_response_buffer_size: Some(16),
            request_timeout: Some(Duration::from_secs(3)),
        };
        let client = ReqwestClient::new(options).unwrap();
        assert_eq!(client.max_response_buffer_size, Some(16));
    }

    #[test]
    fn rejects_invalid_default_header() {
        let options = TransportOptions {
            default_headers: vec![("bad header".into(), "1".into())],
            ..Default::default()
        };
        let err = build_reqwest_client(&options).unwrap_err();
        assert!(matches!(
            err,
            ReqwestBackendError::InvalidHeaderName(name) if name == "bad header"
        ));
    }
}
