//! An in-memory transport for unit tests.

use std::fmt;
use std::io::{self, Read};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{mpsc, Arc, Mutex};

use courier_interface::{
    Body as BodyImpl, Error as ErrorImpl, Method, RawResponse, Request, Transport,
};

/// An exchange as seen by [`MockTransport`].
#[derive(Debug, Clone)]
pub(crate) struct Recorded {
    pub method: Method,
    pub uri: String,
    pub headers: Vec<(String, String)>,
    pub content_type: Option<String>,
    pub body: Vec<u8>,
}

#[derive(Default)]
struct State {
    recorded: Mutex<Vec<Recorded>>,
    released: AtomicUsize,
    gate: Mutex<Option<mpsc::Receiver<()>>>,
}

/// Answers every exchange in memory.
///
/// - Hosts named `unreachable` fail with a refused connection.
/// - A path of `/status/<code>` answers with that status.
/// - A path of `/broken-body` fails while draining the body.
/// - Otherwise the request body is echoed back with status 200.
///
/// Every response counts as released once dropped.
#[derive(Clone, Default)]
pub(crate) struct MockTransport {
    state: Arc<State>,
}

impl MockTransport {
    /// A transport whose exchanges block until the returned sender fires once per exchange.
    pub fn gated() -> (Self, mpsc::Sender<()>) {
        let (sender, receiver) = mpsc::channel();
        let transport = Self::default();
        *transport.state.gate.lock().unwrap() = Some(receiver);
        (transport, sender)
    }

    pub fn recorded(&self) -> Vec<Recorded> {
        self.state.recorded.lock().unwrap().clone()
    }

    pub fn exchanges(&self) -> usize {
        self.state.recorded.lock().unwrap().len()
    }

    pub fn released(&self) -> usize {
        self.state.released.load(Ordering::SeqCst)
    }
}

fn drain(body: Option<BodyImpl>) -> io::Result<(Option<String>, Vec<u8>)> {
    let Some(body) = body else {
        return Ok((None, vec![]));
    };
    let content_type = body.content_type().map(str::to_owned);
    let content = match body {
        BodyImpl::Bytes { content, .. } => content.into_owned(),
        BodyImpl::Form { fields } => fields
            .iter()
            .map(|(k, v)| format!("{k}={v}"))
            .collect::<Vec<_>>()
            .join("&")
            .into_bytes(),
        BodyImpl::Stream { mut reader, .. } => {
            let mut buf = vec![];
            reader.stream.read_to_end(&mut buf)?;
            buf
        }
        BodyImpl::File { path, .. } => std::fs::read(path)?,
        #[cfg(feature = "multipart")]
        BodyImpl::Multipart { parts } => parts
            .iter()
            .map(|p| p.name.to_string())
            .collect::<Vec<_>>()
            .join(",")
            .into_bytes(),
    };
    Ok((content_type, content))
}

impl Transport for MockTransport {
    type Response = MockResponse;

    fn describe(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "MockTransport")
    }

    fn exchange(&self, req: Request) -> courier_interface::Result<MockResponse> {
        if let Some(gate) = &*self.state.gate.lock().unwrap() {
            gate.recv().ok();
        }
        let url = url::Url::parse(&req.uri)
            .map_err(|_| ErrorImpl::InvalidUrl(req.uri.to_string()))?;
        let (content_type, body) = drain(req.body)?;
        let headers: Vec<(String, String)> = req
            .headers
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        self.state.recorded.lock().unwrap().push(Recorded {
            method: req.method,
            uri: req.uri.to_string(),
            headers: headers.clone(),
            content_type: content_type.clone(),
            body: body.clone(),
        });

        if url.host_str() == Some("unreachable") {
            return Err(ErrorImpl::Io(io::Error::new(
                io::ErrorKind::ConnectionRefused,
                "connection refused",
            )));
        }
        let path = url.path();
        let status = path
            .strip_prefix("/status/")
            .and_then(|code| code.parse().ok())
            .unwrap_or(200);
        let mut response_headers = vec![("x-method".to_string(), req.method.to_string())];
        if let Some(content_type) = content_type {
            response_headers.push(("Content-Type".into(), content_type));
        }
        response_headers.extend(headers);
        Ok(MockResponse {
            status,
            headers: response_headers,
            body: (path != "/broken-body").then_some(body),
            state: self.state.clone(),
        })
    }
}

pub(crate) struct MockResponse {
    status: u16,
    headers: Vec<(String, String)>,
    body: Option<Vec<u8>>,
    state: Arc<State>,
}

impl RawResponse for MockResponse {
    fn describe(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "MockResponse(status: {})", self.status)
    }

    fn status(&self) -> u16 {
        self.status
    }

    fn headers(&self) -> Vec<(String, String)> {
        self.headers.clone()
    }

    fn content_length(&self) -> Option<u64> {
        self.body.as_ref().map(|b| b.len() as u64)
    }

    fn bytes(&mut self) -> courier_interface::Result<Vec<u8>> {
        self.body.take().ok_or_else(|| {
            ErrorImpl::Io(io::Error::new(
                io::ErrorKind::UnexpectedEof,
                "connection closed mid-body",
            ))
        })
    }
}

impl Drop for MockResponse {
    fn drop(&mut self) {
        self.state.released.fetch_add(1, Ordering::SeqCst);
    }
}
