//! Request body types handed to a transport.

use std::borrow::Cow;
use std::fmt;
use std::io::Read;
use std::path::PathBuf;

/// A blocking byte source used as a request body.
pub type BoxedStream = Box<dyn Read + Send + 'static>;

/// A readable body source together with its length, if known.
pub struct StreamReader {
    /// The byte source.
    pub stream: BoxedStream,
    /// Number of bytes the stream yields, if known in advance.
    pub content_length: Option<u64>,
}

/// Body attached to a request.
pub enum Body {
    /// In-memory content.
    Bytes {
        /// The content.
        content: Cow<'static, [u8]>,
        /// Declared content type.
        content_type: Cow<'static, str>,
    },
    /// `application/x-www-form-urlencoded` fields.
    Form {
        /// Form fields in order.
        fields: Vec<(Cow<'static, str>, Cow<'static, str>)>,
    },
    /// Content read from a blocking stream.
    Stream {
        /// The byte source.
        reader: StreamReader,
        /// Declared content type.
        content_type: Cow<'static, str>,
    },
    /// Content of a file, opened by the transport at dispatch time.
    File {
        /// Path of the file.
        path: PathBuf,
        /// Declared content type.
        content_type: Cow<'static, str>,
    },
    /// `multipart/form-data` parts.
    #[cfg(feature = "multipart")]
    #[cfg_attr(docsrs, doc(cfg(feature = "multipart")))]
    Multipart {
        /// Parts in order.
        parts: Vec<Part>,
    },
}

/// A single part of a multipart form.
#[cfg(feature = "multipart")]
#[cfg_attr(docsrs, doc(cfg(feature = "multipart")))]
pub struct Part {
    /// Extra headers of this part.
    pub headers: Vec<(Cow<'static, str>, Cow<'static, str>)>,
    /// Form field name.
    pub name: Cow<'static, str>,
    /// Optional file name.
    pub filename: Option<Cow<'static, str>>,
    /// Content type of this part.
    pub content_type: Cow<'static, str>,
    /// Content of this part.
    pub body: PartBody,
}

/// Content of a multipart part.
#[cfg(feature = "multipart")]
#[cfg_attr(docsrs, doc(cfg(feature = "multipart")))]
pub enum PartBody {
    /// In-memory content.
    Bytes {
        /// The content.
        content: Cow<'static, [u8]>,
    },
    /// Content read from a blocking stream.
    Stream(StreamReader),
}

impl Body {
    /// The content type declared for this body, if it carries one directly.
    pub fn content_type(&self) -> Option<&str> {
        match self {
            Body::Bytes { content_type, .. }
            | Body::Stream { content_type, .. }
            | Body::File { content_type, .. } => Some(content_type),
            Body::Form { .. } => Some("application/x-www-form-urlencoded"),
            #[cfg(feature = "multipart")]
            Body::Multipart { .. } => None,
        }
    }
}

impl fmt::Debug for Body {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Body::Bytes {
                content,
                content_type,
            } => f
                .debug_struct("Bytes")
                .field("len", &content.len())
                .field("content_type", content_type)
                .finish(),
            Body::Form { fields } => f.debug_struct("Form").field("fields", fields).finish(),
            Body::Stream {
                reader,
                content_type,
            } => f
                .debug_struct("Stream")
                .field("content_length", &reader.content_length)
                .field("content_type", content_type)
                .finish(),
            Body::File { path, content_type } => f
                .debug_struct("File")
                .field("path", path)
                .field("content_type", content_type)
                .finish(),
            #[cfg(feature = "multipart")]
            Body::Multipart { parts } => f
                .debug_struct("Multipart")
                .field("parts", &parts.len())
                .finish(),
        }
    }
}
