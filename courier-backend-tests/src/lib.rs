#![cfg(test)]

use std::{
    collections::BTreeMap,
    convert::Infallible,
    future::Future,
    io,
    net::SocketAddr,
    pin::Pin,
    sync::{LazyLock, Mutex, Once},
};

use courier::{Client, ClientBuilder};
use http_body_util::{BodyExt, Full};
use hyper::{
    body::{self, Bytes},
    server::conn::http1,
    service::service_fn,
    Request, Response,
};
use hyper_util::rt::TokioIo;
use tokio::net::TcpListener;

mod fixtures;

/// A target nothing listens on.
const UNREACHABLE: &str = "http://127.0.0.1:1/unreachable";

#[must_use]
struct HyperFixtureHandle(String);

impl Drop for HyperFixtureHandle {
    fn drop(&mut self) {
        let failed_request = {
            let mut services = HYPER_SERVICE_FIXTURES.lock().unwrap();
            services
                .get_mut(&*self.0)
                .expect("fixture not found")
                .assertion_failed_request
                .take()
        };
        if let Some(req) = failed_request {
            panic!("assertion failed for request {}: {:?}", self.0, req);
        }
    }
}

type BoxedBody = http_body_util::combinators::BoxBody<Bytes, hyper::Error>;

type FixtureAssertionResult = (ResponseWrapper, Result<(), Request<body::Incoming>>);

struct ResponseWrapper(Response<BoxedBody>);

impl From<Response<Full<Bytes>>> for ResponseWrapper {
    fn from(resp: Response<Full<Bytes>>) -> Self {
        let resp = resp.map(|body| body.map_err(|_| unreachable!()).boxed());
        ResponseWrapper(resp)
    }
}

impl From<Response<BoxedBody>> for ResponseWrapper {
    fn from(resp: Response<BoxedBody>) -> Self {
        ResponseWrapper(resp)
    }
}

type HyperServiceFixtureCallback = Box<
    dyn Fn(Request<body::Incoming>) -> Pin<Box<dyn Future<Output = FixtureAssertionResult> + Send>>
        + Send
        + Sync,
>;
struct HyperServiceFixture {
    svc: HyperServiceFixtureCallback,
    assertion_failed_request: Option<Request<body::Incoming>>,
}

static HYPER_SERVICE_FIXTURES: Mutex<BTreeMap<String, HyperServiceFixture>> =
    Mutex::new(BTreeMap::new());

fn add_hyper_fixture<Fut, Resp>(
    path: impl Into<String>,
    svc_fn: impl Fn(Request<body::Incoming>) -> Fut + Send + Sync + 'static,
) -> HyperFixtureHandle
where
    Fut: Future<Output = (Resp, Result<(), Request<body::Incoming>>)> + Send + 'static,
    Resp: Into<ResponseWrapper>,
{
    let mut path: String = path.into();
    if !path.starts_with('/') {
        path.insert(0, '/');
    }
    let svc = Box::new(move |req| {
        let fut = svc_fn(req);
        Box::pin(async move {
            let (resp, result) = fut.await;
            (resp.into(), result)
        }) as _
    });
    let fixture = HyperServiceFixture {
        svc,
        assertion_failed_request: None,
    };
    {
        let path = path.clone();
        let mut services = HYPER_SERVICE_FIXTURES.lock().unwrap();
        services.insert(path, fixture);
    }
    HyperFixtureHandle(path)
}

async fn handle_service(req: Request<body::Incoming>) -> Result<Response<BoxedBody>, Infallible> {
    let path = req.uri().path().to_owned();
    let fut = {
        let services = HYPER_SERVICE_FIXTURES.lock().unwrap();
        let fixture = services.get(&*path).unwrap();
        (fixture.svc)(req)
    };
    let (response, result) = fut.await;

    if let Err(req) = result {
        let mut services = HYPER_SERVICE_FIXTURES.lock().unwrap();
        let fixture = services.get_mut(&*path).unwrap();
        fixture.assertion_failed_request = Some(req);
    }

    Ok(response.0)
}

async fn setup_hyper_impl() -> Result<String, io::Error> {
    let addr = SocketAddr::from(([127, 0, 0, 1], 0));

    let listener = TcpListener::bind(addr).await?;
    let port = listener.local_addr()?.port();

    tokio::spawn(async move {
        loop {
            let (stream, _) = listener.accept().await.expect("accept failed");
            let io = TokioIo::new(stream);

            tokio::task::spawn(async move {
                if let Err(err) = http1::Builder::new()
                    .serve_connection(io, service_fn(handle_service))
                    .await
                {
                    eprintln!("Error serving connection: {err:?}");
                }
            });
        }
    });

    Ok(format!("http://127.0.0.1:{port}"))
}

static TOKIO_RT: LazyLock<tokio::runtime::Runtime> = LazyLock::new(|| {
    tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .unwrap()
});

/// Returns the base URL of the fixture server, starting it on first use.
fn server_url() -> io::Result<String> {
    use tokio::sync::OnceCell;

    static HYPER_SERVICE_INIT: OnceCell<io::Result<String>> = OnceCell::const_new();
    TOKIO_RT.block_on(async {
        match HYPER_SERVICE_INIT.get_or_init(setup_hyper_impl).await {
            Ok(url) => Ok(url.clone()),
            Err(err) => Err(io::Error::new(err.kind(), err.to_string())),
        }
    })
}

/// The absolute URL of `path` on the fixture server.
fn url(path: &str) -> String {
    let base = server_url().unwrap();
    format!("{base}/{}", path.trim_start_matches('/'))
}

fn init_builder() -> ClientBuilder {
    static BACKEND_INIT: Once = Once::new();
    BACKEND_INIT.call_once(init_backend);
    ClientBuilder::default().with_header("x-courier-test", "1")
}

fn init_client() -> Client {
    init_builder().build().unwrap()
}

fn init_backend() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();

    #[cfg(feature = "reqwest")]
    courier_backend_reqwest::register();
    #[cfg(not(feature = "reqwest"))]
    panic!("No backend feature enabled.");
}
