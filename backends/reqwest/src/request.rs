use std::borrow::Cow;
use std::io::Read;

use courier_interface::{Body, Method, StreamReader};
use http::{header::CONTENT_TYPE, HeaderName, HeaderValue};
use reqwest::{Client, RequestBuilder};
use url::Url;

use crate::error::{ReqwestBackendError, Result};

pub fn convert_method(method: Method) -> reqwest::Method {
    match method {
        Method::Get => reqwest::Method::GET,
        Method::Post => reqwest::Method::POST,
        Method::Put => reqwest::Method::PUT,
        Method::Patch => reqwest::Method::PATCH,
        Method::Delete => reqwest::Method::DELETE,
    }
}

pub fn build_url(url: &str) -> Result<Url> {
    Url::parse(url).map_err(|_| ReqwestBackendError::InvalidUrl(url.to_string()))
}

fn convert_header_name(s: Cow<'static, str>) -> Result<HeaderName> {
    HeaderName::from_bytes(s.as_bytes())
        .map_err(|_| ReqwestBackendError::InvalidHeaderName(s.into_owned()))
}

fn convert_header_value(k: &str, v: Cow<'static, str>) -> Result<HeaderValue> {
    match v {
        Cow::Borrowed(s) => HeaderValue::from_str(s),
        Cow::Owned(s) => HeaderValue::try_from(s),
    }
    .map_err(|_| ReqwestBackendError::InvalidHeaderValue(k.into()))
}

fn read_stream(reader: StreamReader) -> Result<Vec<u8>> {
    let StreamReader {
        mut stream,
        content_length,
    } = reader;
    let capacity = content_length.and_then(|len| usize::try_from(len).ok());
    let mut buf = Vec::with_capacity(capacity.unwrap_or_default());
    stream.read_to_end(&mut buf)?;
    Ok(buf)
}

fn encode_form(fields: &[(Cow<'static, str>, Cow<'static, str>)]) -> String {
    let mut serializer = url::form_urlencoded::Serializer::new(String::new());
    for (key, value) in fields {
        serializer.append_pair(key, value);
    }
    serializer.finish()
}

/// Builds a request ready to send.
///
/// Stream and file bodies are read here, on the calling thread, so that no blocking I/O happens
/// on the runtime.
pub fn build_request(client: &Client, req: courier_interface::Request) -> Result<RequestBuilder> {
    let url = build_url(&req.uri)?;
    let mut request_builder = client.request(convert_method(req.method), url);

    for (key, value) in req.headers {
        let value = convert_header_value(&key, value)?;
        request_builder = request_builder.header(convert_header_name(key)?, value);
    }

    match req.body {
        None => {}
        Some(Body::Bytes {
            content,
            content_type,
        }) => {
            request_builder = request_builder
                .header(CONTENT_TYPE, &*content_type)
                .body(content.into_owned());
        }
        Some(Body::Form { fields }) => {
            request_builder = request_builder
                .header(CONTENT_TYPE, "application/x-www-form-urlencoded")
                .body(encode_form(&fields));
        }
        Some(Body::Stream {
            reader,
            content_type,
        }) => {
            request_builder = request_builder
                .header(CONTENT_TYPE, &*content_type)
                .body(read_stream(reader)?);
        }
        Some(Body::File { path, content_type }) => {
            let content = std::fs::read(&path)?;
            request_builder = request_builder
                .header(CONTENT_TYPE, &*content_type)
                .body(content);
        }
        #[cfg(feature = "multipart")]
        Some(Body::Multipart { parts }) => {
            let mut form = reqwest::multipart::Form::new();
            for part in parts {
                use std::iter;

                use http::HeaderMap;

                let headers = part
                    .headers
                    .into_iter()
                    .map(|(k, v)| {
                        let value = convert_header_value(&k, v)?;
                        Ok((convert_header_name(k)?, value))
                    })
                    .chain(iter::once(Ok((
                        CONTENT_TYPE,
                        convert_header_value("content-type", part.content_type)?,
                    ))))
                    .collect::<Result<HeaderMap>>()?;

                let content = match part.body {
                    courier_interface::PartBody::Bytes { content } => content.into_owned(),
                    courier_interface::PartBody::Stream(stream) => read_stream(stream)?,
                };
                let mut part_builder = reqwest::multipart::Part::bytes(content);
                if let Some(filename) = part.filename {
                    part_builder = part_builder.file_name(filename);
                }
                form = form.part(part.name, part_builder.headers(headers));
            }
            request_builder = request_builder.multipart(form);
        }
    }

    Ok(request_builder)
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use super::*;

    fn request(body: Option<Body>) -> courier_interface::Request {
        courier_interface::Request {
            method: Method::Post,
            uri: "http://127.0.0.1:9/echo?a=1".into(),
            headers: vec![("x-dup".into(), "1".into()), ("x-dup".into(), "2".into())],
            body,
        }
    }

    #[test]
    fn keeps_duplicate_headers() {
        let built = build_request(&Client::new(), request(None))
            .unwrap()
            .build()
            .unwrap();
        let values: Vec<_> = built.headers().get_all("x-dup").iter().collect();
        assert_eq!(values, ["1", "2"]);
        assert_eq!(built.method(), reqwest::Method::POST);
        assert_eq!(built.url().query(), Some("a=1"));
    }

    #[test]
    fn rejects_relative_url() {
        let mut req = request(None);
        req.uri = "/relative".into();
        let err = build_request(&Client::new(), req).unwrap_err();
        assert!(matches!(err, ReqwestBackendError::InvalidUrl(url) if url == "/relative"));
    }

    #[test]
    fn drains_stream_body() {
        let body = Body::Stream {
            reader: StreamReader {
                stream: Box::new(Cursor::new(b"streamed".to_vec())),
                content_length: Some(8),
            },
            content_type: "application/octet-stream".into(),
        };
        let built = build_request(&Client::new(), request(Some(body)))
            .unwrap()
            .build()
            .unwrap();
        assert_eq!(
            built.body().and_then(|b| b.as_bytes()),
            Some(&b"streamed"[..])
        );
        assert_eq!(
            built.headers().get(CONTENT_TYPE).unwrap(),
            "application/octet-stream"
        );
    }

    #[test]
    fn encodes_form_fields_in_order() {
        let encoded = encode_form(&[("key 1".into(), "a&b".into()), ("k2".into(), "".into())]);
        assert_eq!(encoded, "key+1=a%26b&k2=");
    }

    #[test]
    fn missing_file_is_io_error() {
        let body = Body::File {
            path: "/definitely/not/here.bin".into(),
            content_type: "application/octet-stream".into(),
        };
        let err = build_request(&Client::new(), request(Some(body))).unwrap_err();
        assert!(matches!(err, ReqwestBackendError::Io(_)));
    }
}
