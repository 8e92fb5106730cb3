use std::borrow::Cow;
use std::fmt;
use std::io::{self, Read};
use std::path::PathBuf;
use std::sync::{Arc, Mutex, PoisonError};

use courier_interface::{Body as BodyImpl, BoxedStream, StreamReader};
#[cfg(feature = "multipart")]
use courier_interface::{Part as PartImpl, PartBody as PartBodyImpl};

/// A request body.
///
/// Attached to payload-bearing requests with [`crate::Request::set_body`]. Cloning a body is
/// cheap; stream content is shared between clones and can be sent only once.
#[derive(Clone)]
pub struct Body {
    inner: BodyInner,
}

#[derive(Clone)]
enum BodyInner {
    Bytes {
        content: Cow<'static, [u8]>,
        content_type: Cow<'static, str>,
    },
    Form {
        fields: Vec<(Cow<'static, str>, Cow<'static, str>)>,
    },
    Stream {
        stream: SharedStream,
        content_type: Cow<'static, str>,
    },
    File {
        path: PathBuf,
        content_type: Cow<'static, str>,
    },
    #[cfg(feature = "multipart")]
    Multipart { parts: Vec<Part> },
}

/// A single-use byte source shared between clones of a request template.
#[derive(Clone)]
struct SharedStream {
    stream: Arc<Mutex<Option<BoxedStream>>>,
    content_length: Option<u64>,
}

impl SharedStream {
    fn new(stream: impl Read + Send + 'static, content_length: Option<u64>) -> Self {
        Self {
            stream: Arc::new(Mutex::new(Some(Box::new(stream)))),
            content_length,
        }
    }

    /// Takes the stream out, leaving an empty one for later exchanges.
    fn take(&self) -> StreamReader {
        let stream = self
            .stream
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take();
        match stream {
            Some(stream) => StreamReader {
                stream,
                content_length: self.content_length,
            },
            None => StreamReader {
                stream: Box::new(io::empty()),
                content_length: Some(0),
            },
        }
    }
}

fn text_to_bytes(text: Cow<'static, str>) -> Cow<'static, [u8]> {
    match text {
        Cow::Borrowed(s) => Cow::Borrowed(s.as_bytes()),
        Cow::Owned(s) => Cow::Owned(s.into_bytes()),
    }
}

impl Body {
    /// A text body with the given content type.
    pub fn text(
        text: impl Into<Cow<'static, str>>,
        content_type: impl Into<Cow<'static, str>>,
    ) -> Self {
        Self::bytes(text_to_bytes(text.into()), content_type)
    }

    /// A binary body with the given content type.
    pub fn bytes(
        bytes: impl Into<Cow<'static, [u8]>>,
        content_type: impl Into<Cow<'static, str>>,
    ) -> Self {
        Self {
            inner: BodyInner::Bytes {
                content: bytes.into(),
                content_type: content_type.into(),
            },
        }
    }

    /// Already serialized JSON, sent as `application/json`.
    pub fn json_bytes(bytes: impl Into<Cow<'static, [u8]>>) -> Self {
        Self::bytes(bytes, "application/json")
    }

    /// Serializes `value` as JSON, sent as `application/json`.
    #[cfg(feature = "json")]
    #[cfg_attr(docsrs, doc(cfg(feature = "json")))]
    pub fn json<T: serde::Serialize + ?Sized>(value: &T) -> serde_json::Result<Self> {
        Ok(Self::json_bytes(serde_json::to_vec(value)?))
    }

    /// A body read from a blocking stream of unknown length.
    pub fn stream(
        stream: impl Read + Send + 'static,
        content_type: impl Into<Cow<'static, str>>,
    ) -> Self {
        Self {
            inner: BodyInner::Stream {
                stream: SharedStream::new(stream, None),
                content_type: content_type.into(),
            },
        }
    }

    /// A body read from a blocking stream yielding exactly `content_length` bytes.
    pub fn sized_stream(
        stream: impl Read + Send + 'static,
        content_length: u64,
        content_type: impl Into<Cow<'static, str>>,
    ) -> Self {
        Self {
            inner: BodyInner::Stream {
                stream: SharedStream::new(stream, Some(content_length)),
                content_type: content_type.into(),
            },
        }
    }

    /// The content of a file, read when the request is sent.
    pub fn file(path: impl Into<PathBuf>, content_type: impl Into<Cow<'static, str>>) -> Self {
        Self {
            inner: BodyInner::File {
                path: path.into(),
                content_type: content_type.into(),
            },
        }
    }

    /// An `application/x-www-form-urlencoded` form. Fields keep their order.
    ///
    /// See also [`crate::body_form!`].
    pub fn form<K, V>(fields: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<Cow<'static, str>>,
        V: Into<Cow<'static, str>>,
    {
        Self {
            inner: BodyInner::Form {
                fields: fields
                    .into_iter()
                    .map(|(k, v)| (k.into(), v.into()))
                    .collect(),
            },
        }
    }

    /// A `multipart/form-data` form.
    #[cfg(feature = "multipart")]
    #[cfg_attr(docsrs, doc(cfg(feature = "multipart")))]
    pub fn multipart(parts: impl IntoIterator<Item = Part>) -> Self {
        Self {
            inner: BodyInner::Multipart {
                parts: parts.into_iter().collect(),
            },
        }
    }

    /// The declared content type, if the body carries one directly.
    pub fn content_type(&self) -> Option<&str> {
        match &self.inner {
            BodyInner::Bytes { content_type, .. }
            | BodyInner::Stream { content_type, .. }
            | BodyInner::File { content_type, .. } => Some(content_type),
            BodyInner::Form { .. } => Some("application/x-www-form-urlencoded"),
            #[cfg(feature = "multipart")]
            BodyInner::Multipart { .. } => None,
        }
    }

    /// Produces the body handed to a transport for one exchange.
    pub(crate) fn snapshot(&self) -> BodyImpl {
        match &self.inner {
            BodyInner::Bytes {
                content,
                content_type,
            } => BodyImpl::Bytes {
                content: content.clone(),
                content_type: content_type.clone(),
            },
            BodyInner::Form { fields } => BodyImpl::Form {
                fields: fields.clone(),
            },
            BodyInner::Stream {
                stream,
                content_type,
            } => BodyImpl::Stream {
                reader: stream.take(),
                content_type: content_type.clone(),
            },
            BodyInner::File { path, content_type } => BodyImpl::File {
                path: path.clone(),
                content_type: content_type.clone(),
            },
            #[cfg(feature = "multipart")]
            BodyInner::Multipart { parts } => BodyImpl::Multipart {
                parts: parts.iter().map(Part::snapshot).collect(),
            },
        }
    }
}

impl fmt::Debug for Body {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.inner {
            BodyInner::Bytes {
                content,
                content_type,
            } => f
                .debug_struct("Bytes")
                .field("len", &content.len())
                .field("content_type", content_type)
                .finish(),
            BodyInner::Form { fields } => f.debug_struct("Form").field("fields", fields).finish(),
            BodyInner::Stream {
                stream,
                content_type,
            } => f
                .debug_struct("Stream")
                .field("content_length", &stream.content_length)
                .field("content_type", content_type)
                .finish(),
            BodyInner::File { path, content_type } => f
                .debug_struct("File")
                .field("path", path)
                .field("content_type", content_type)
                .finish(),
            #[cfg(feature = "multipart")]
            BodyInner::Multipart { parts } => f
                .debug_struct("Multipart")
                .field("parts", &parts.len())
                .finish(),
        }
    }
}

/// A single part of a multipart form.
#[cfg(feature = "multipart")]
#[cfg_attr(docsrs, doc(cfg(feature = "multipart")))]
#[derive(Clone)]
pub struct Part {
    headers: Vec<(Cow<'static, str>, Cow<'static, str>)>,
    name: Cow<'static, str>,
    filename: Option<Cow<'static, str>>,
    content_type: Cow<'static, str>,
    body: PartBody,
}

/// Content of a multipart part.
#[cfg(feature = "multipart")]
#[cfg_attr(docsrs, doc(cfg(feature = "multipart")))]
#[derive(Clone)]
pub struct PartBody {
    inner: PartBodyInner,
}

#[cfg(feature = "multipart")]
#[derive(Clone)]
enum PartBodyInner {
    Bytes { content: Cow<'static, [u8]> },
    Stream(SharedStream),
}

#[cfg(feature = "multipart")]
impl Part {
    /// A part named `name` with the given content.
    pub fn new(
        name: impl Into<Cow<'static, str>>,
        content_type: impl Into<Cow<'static, str>>,
        body: PartBody,
    ) -> Self {
        Self {
            headers: vec![],
            name: name.into(),
            filename: None,
            content_type: content_type.into(),
            body,
        }
    }

    /// A `text/plain` part.
    pub fn text(name: impl Into<Cow<'static, str>>, text: impl Into<Cow<'static, str>>) -> Self {
        Self::new(name, "text/plain", PartBody::text(text))
    }

    /// Adds an extra header to this part.
    pub fn with_header(
        mut self,
        name: impl Into<Cow<'static, str>>,
        value: impl Into<Cow<'static, str>>,
    ) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    /// Sets the file name reported for this part.
    pub fn with_filename(mut self, filename: impl Into<Cow<'static, str>>) -> Self {
        self.filename = Some(filename.into());
        self
    }

    fn snapshot(&self) -> PartImpl {
        PartImpl {
            headers: self.headers.clone(),
            name: self.name.clone(),
            filename: self.filename.clone(),
            content_type: self.content_type.clone(),
            body: match &self.body.inner {
                PartBodyInner::Bytes { content } => PartBodyImpl::Bytes {
                    content: content.clone(),
                },
                PartBodyInner::Stream(stream) => PartBodyImpl::Stream(stream.take()),
            },
        }
    }
}

#[cfg(feature = "multipart")]
impl PartBody {
    /// In-memory text content.
    pub fn text(text: impl Into<Cow<'static, str>>) -> Self {
        Self::bytes(text_to_bytes(text.into()))
    }

    /// In-memory binary content.
    pub fn bytes(bytes: impl Into<Cow<'static, [u8]>>) -> Self {
        Self {
            inner: PartBodyInner::Bytes {
                content: bytes.into(),
            },
        }
    }

    /// Content read from a blocking stream.
    pub fn stream(stream: impl Read + Send + 'static, content_length: Option<u64>) -> Self {
        Self {
            inner: PartBodyInner::Stream(SharedStream::new(stream, content_length)),
        }
    }

    /// Content of the file at `path`, opened now and read when the request is sent.
    pub fn file(path: impl AsRef<std::path::Path>) -> io::Result<Self> {
        let file = std::fs::File::open(path)?;
        let content_length = file.metadata()?.len();
        Ok(Self::stream(file, Some(content_length)))
    }
}

/// Builds an `application/x-www-form-urlencoded` [`Body`] from `key => value` pairs.
///
/// ```
/// let body = courier::body_form! {
///     "key1" => "value1",
///     "key2" => String::from("value2"),
/// };
/// assert_eq!(body.content_type(), Some("application/x-www-form-urlencoded"));
/// ```
#[macro_export]
macro_rules! body_form {
    ($($key:expr => $value:expr),* $(,)?) => {
        $crate::Body::form([
            $((
                ::std::borrow::Cow::<'static, str>::from($key),
                ::std::borrow::Cow::<'static, str>::from($value),
            ),)*
        ])
    };
}

#[cfg(test)]
mod tests {
    use std::io::{Cursor, Read};

    use super::*;

    fn drain(body: BodyImpl) -> Vec<u8> {
        let BodyImpl::Stream { reader, .. } = body else {
            panic!("expected a stream body");
        };
        let mut buf = vec![];
        let mut stream = reader.stream;
        stream.read_to_end(&mut buf).unwrap();
        buf
    }

    #[test]
    fn text_keeps_content_type() {
        let body = Body::text("hello", "text/plain");
        assert_eq!(body.content_type(), Some("text/plain"));
        match body.snapshot() {
            BodyImpl::Bytes {
                content,
                content_type,
            } => {
                assert_eq!(&*content, b"hello");
                assert_eq!(content_type, "text/plain");
            }
            other => panic!("unexpected body {other:?}"),
        }
    }

    #[cfg(feature = "json")]
    #[test]
    fn json_serializes_value() {
        #[derive(serde::Serialize)]
        struct Named<'a> {
            name: &'a str,
        }
        let body = Body::json(&Named { name: "x" }).unwrap();
        assert_eq!(body.content_type(), Some("application/json"));
        let BodyImpl::Bytes { content, .. } = body.snapshot() else {
            panic!("expected bytes");
        };
        assert_eq!(&*content, br#"{"name":"x"}"#);
    }

    #[test]
    fn stream_is_single_use_across_clones() {
        let body = Body::sized_stream(Cursor::new(b"once".to_vec()), 4, "application/octet-stream");
        let copy = body.clone();
        assert_eq!(drain(body.snapshot()), b"once");
        let second = copy.snapshot();
        let BodyImpl::Stream { reader, .. } = &second else {
            panic!("expected a stream body");
        };
        assert_eq!(reader.content_length, Some(0));
        assert!(drain(second).is_empty());
    }

    #[test]
    fn form_macro_keeps_order() {
        let body = body_form! {
            "a" => "1",
            "b" => String::from("2"),
        };
        let BodyImpl::Form { fields } = body.snapshot() else {
            panic!("expected a form body");
        };
        assert_eq!(
            fields,
            vec![
                (Cow::from("a"), Cow::from("1")),
                (Cow::from("b"), Cow::from("2"))
            ]
        );
    }

    #[test]
    fn file_is_not_opened_eagerly() {
        let body = Body::file("/not/there", "application/octet-stream");
        assert!(format!("{body:?}").contains("/not/there"));
    }
}
