//! The request model.
//!
//! A [`Request`] is a reusable template for one HTTP call. Its method is a type parameter, so
//! body operations exist only on the payload-bearing methods ([`Post`], [`Put`] and [`Patch`]).

use std::borrow::Cow;
use std::fmt;
use std::marker::PhantomData;

use courier_interface::{Method as MethodImpl, Request as RequestImpl, Transport};
use url::Url;

use crate::body::Body;
use crate::client::Client;
use crate::deferred::Deferred;
use crate::either::Either;
use crate::error::{MalformedTargetError, TransportError};
use crate::execute::Exchange;
use crate::response::Response;
use crate::stream::ResponseStream;

mod sealed {
    pub trait Sealed {}
}

/// An HTTP method a [`Request`] can be built for.
pub trait Method: sealed::Sealed + Send + Sync + 'static {
    /// The method token sent on the wire.
    const METHOD: MethodImpl;

    #[doc(hidden)]
    type Payload: PayloadSlot;
}

/// Methods whose requests carry a body.
pub trait WithPayload: Method<Payload = Payload> {}

#[doc(hidden)]
pub trait PayloadSlot: Clone + Default + fmt::Debug + Send + Sync + 'static {
    fn body(&self) -> Option<&Body>;
}

#[doc(hidden)]
#[derive(Clone, Default, Debug)]
pub struct NoPayload;

#[doc(hidden)]
#[derive(Clone, Default, Debug)]
pub struct Payload {
    body: Option<Body>,
}

impl PayloadSlot for NoPayload {
    fn body(&self) -> Option<&Body> {
        None
    }
}

impl PayloadSlot for Payload {
    fn body(&self) -> Option<&Body> {
        self.body.as_ref()
    }
}

macro_rules! methods {
    ($($(#[$doc:meta])* $name:ident => $method:ident, $payload:ty;)*) => {
        $(
            $(#[$doc])*
            #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
            pub enum $name {}

            impl sealed::Sealed for $name {}

            impl Method for $name {
                const METHOD: MethodImpl = MethodImpl::$method;
                type Payload = $payload;
            }
        )*
    };
}

methods! {
    /// The GET method.
    Get => Get, NoPayload;
    /// The POST method.
    Post => Post, Payload;
    /// The PUT method.
    Put => Put, Payload;
    /// The PATCH method.
    Patch => Patch, Payload;
    /// The DELETE method.
    Delete => Delete, NoPayload;
}

impl WithPayload for Post {}
impl WithPayload for Put {}
impl WithPayload for Patch {}

/// A request template for one HTTP call.
///
/// Nothing is sent until one of the execution methods is called. Each call performs exactly one
/// exchange, so the same request may be executed again, possibly after further mutation.
///
/// Clones share the transport and any stream body. A stream body is drained by the first
/// exchange of any clone; later exchanges send it empty.
///
/// ```no_run
/// let response = courier::get("http://localhost:8080/items")
///     .with_parameter("page", "2")?
///     .with_header("accept", "application/json")
///     .execute()
///     .success_or_propagate()?;
/// println!("{}", response.content());
/// # Ok::<_, Box<dyn std::error::Error>>(())
/// ```
pub struct Request<M: Method> {
    target: String,
    headers: Vec<(Cow<'static, str>, Cow<'static, str>)>,
    payload: M::Payload,
    client: Client,
    _method: PhantomData<fn() -> M>,
}

impl<M: Method> Request<M> {
    pub(crate) fn new(target: impl Into<String>, client: Client) -> Self {
        Self {
            target: target.into(),
            headers: vec![],
            payload: Default::default(),
            client,
            _method: PhantomData,
        }
    }

    /// The method token of this request.
    pub fn method(&self) -> &'static str {
        M::METHOD.as_str()
    }

    /// The target, including every query parameter added so far.
    pub fn target(&self) -> &str {
        &self.target
    }

    /// Headers in the order they were added.
    pub fn headers(&self) -> &[(Cow<'static, str>, Cow<'static, str>)] {
        &self.headers
    }

    /// The client this request will be executed with.
    pub fn client(&self) -> &Client {
        &self.client
    }

    /// Appends a query parameter to the target.
    ///
    /// Fails if the target is not an absolute URL.
    pub fn add_parameter(
        &mut self,
        key: &str,
        value: &str,
    ) -> Result<&mut Self, MalformedTargetError> {
        let mut url =
            Url::parse(&self.target).map_err(|e| MalformedTargetError::new(&*self.target, e))?;
        url.query_pairs_mut().append_pair(key, value);
        self.target = url.into();
        Ok(self)
    }

    /// Appends a query parameter to the target.
    pub fn with_parameter(mut self, key: &str, value: &str) -> Result<Self, MalformedTargetError> {
        self.add_parameter(key, value)?;
        Ok(self)
    }

    /// Appends a header. Earlier headers with the same name are kept.
    pub fn add_header(
        &mut self,
        name: impl Into<Cow<'static, str>>,
        value: impl Into<Cow<'static, str>>,
    ) -> &mut Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    /// Appends a header. Earlier headers with the same name are kept.
    pub fn with_header(
        mut self,
        name: impl Into<Cow<'static, str>>,
        value: impl Into<Cow<'static, str>>,
    ) -> Self {
        self.add_header(name, value);
        self
    }

    /// Executes later exchanges with `transport`.
    pub fn set_transport(&mut self, transport: impl Transport) -> &mut Self {
        self.client = Client::new(transport);
        self
    }

    /// Executes later exchanges with `transport`.
    pub fn with_transport(mut self, transport: impl Transport) -> Self {
        self.set_transport(transport);
        self
    }

    /// Executes later exchanges with `client`.
    pub fn set_client(&mut self, client: Client) -> &mut Self {
        self.client = client;
        self
    }

    /// Executes later exchanges with `client`.
    pub fn with_client(mut self, client: Client) -> Self {
        self.set_client(client);
        self
    }

    pub(crate) fn snapshot(&self) -> Exchange {
        Exchange::new(
            self.client.clone(),
            RequestImpl {
                method: M::METHOD,
                uri: self.target.clone().into(),
                headers: self.headers.clone(),
                body: self.payload.body().map(Body::snapshot),
            },
        )
    }

    /// Performs one exchange, discarding the failure detail.
    pub fn execute_optional(&self) -> Option<Response> {
        self.execute().success()
    }

    /// Performs one exchange on the current thread.
    pub fn execute(&self) -> Either<TransportError, Response> {
        self.snapshot().run()
    }

    /// Starts one exchange on a worker thread and returns a handle on its outcome.
    pub fn execute_deferred(&self) -> Deferred {
        Deferred::spawn(self.snapshot())
    }

    /// Returns a stream performing one exchange when first polled.
    ///
    /// The stream yields the response, or the transport error, then ends. Each call returns an
    /// independent stream with its own exchange.
    pub fn execute_stream(&self) -> ResponseStream {
        let template = self.clone();
        ResponseStream::new(move || template.snapshot())
    }
}

impl<M: WithPayload> Request<M> {
    /// The body attached to this request, if any.
    pub fn body(&self) -> Option<&Body> {
        self.payload.body.as_ref()
    }

    /// Attaches a body, replacing any earlier one.
    pub fn set_body(&mut self, body: Body) -> &mut Self {
        self.payload.body = Some(body);
        self
    }

    /// Attaches a body, replacing any earlier one.
    pub fn with_body(mut self, body: Body) -> Self {
        self.set_body(body);
        self
    }

    /// Attaches `value` serialized as JSON, replacing any earlier body.
    #[cfg(feature = "json")]
    #[cfg_attr(docsrs, doc(cfg(feature = "json")))]
    pub fn set_json_body<T: serde::Serialize + ?Sized>(
        &mut self,
        value: &T,
    ) -> serde_json::Result<&mut Self> {
        Ok(self.set_body(Body::json(value)?))
    }

    /// Attaches `value` serialized as JSON, replacing any earlier body.
    #[cfg(feature = "json")]
    #[cfg_attr(docsrs, doc(cfg(feature = "json")))]
    pub fn with_json_body<T: serde::Serialize + ?Sized>(
        mut self,
        value: &T,
    ) -> serde_json::Result<Self> {
        self.set_json_body(value)?;
        Ok(self)
    }
}

impl<M: Method> Clone for Request<M> {
    fn clone(&self) -> Self {
        Self {
            target: self.target.clone(),
            headers: self.headers.clone(),
            payload: self.payload.clone(),
            client: self.client.clone(),
            _method: PhantomData,
        }
    }
}

impl<M: Method> fmt::Debug for Request<M> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Request")
            .field("method", &M::METHOD)
            .field("target", &self.target)
            .field("headers", &self.headers)
            .field("body", &self.payload.body())
            .field("client", &self.client)
            .finish()
    }
}

/// Object-safe execution, for handling requests of different methods together.
///
/// ```no_run
/// use courier::Execute;
///
/// let requests: Vec<Box<dyn Execute>> = vec![
///     Box::new(courier::get("http://localhost:8080/a")),
///     Box::new(courier::delete("http://localhost:8080/b")),
/// ];
/// for request in &requests {
///     request.execute().apply_failure(|e| eprintln!("{e}"));
/// }
/// ```
pub trait Execute {
    /// Performs one exchange on the current thread.
    fn execute(&self) -> Either<TransportError, Response>;

    /// Starts one exchange on a worker thread.
    fn execute_deferred(&self) -> Deferred;
}

impl<M: Method> Execute for Request<M> {
    fn execute(&self) -> Either<TransportError, Response> {
        Request::execute(self)
    }

    fn execute_deferred(&self) -> Deferred {
        Request::execute_deferred(self)
    }
}

impl<T: Execute + ?Sized> Execute for &T {
    fn execute(&self) -> Either<TransportError, Response> {
        (**self).execute()
    }

    fn execute_deferred(&self) -> Deferred {
        (**self).execute_deferred()
    }
}

impl<T: Execute + ?Sized> Execute for Box<T> {
    fn execute(&self) -> Either<TransportError, Response> {
        (**self).execute()
    }

    fn execute_deferred(&self) -> Deferred {
        (**self).execute_deferred()
    }
}
