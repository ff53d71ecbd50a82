//! Test helpers: captured log output and a mock forms API.

use std::{
  io,
  sync::{Arc, Mutex},
};

use axum::{
  Router,
  body::Body,
  extract::Request,
  http::HeaderMap,
  middleware::{self, Next},
};
use chrono::{DateTime, TimeZone, Utc};
use tokio::net::TcpListener;
use tracing::subscriber::DefaultGuard;
use tracing_subscriber::fmt::MakeWriter;

use crate::sign::Clock;

// ─── Logs ─────────────────────────────────────────────────────────────────────

/// Formatted log output written while a [`capture_logs`] guard is alive.
#[derive(Clone, Default)]
pub struct CapturedLogs(Arc<Mutex<Vec<u8>>>);

impl CapturedLogs {
  pub fn contents(&self) -> String {
    String::from_utf8_lossy(&self.0.lock().unwrap()).into_owned()
  }

  pub fn error_lines(&self) -> Vec<String> {
    self
      .contents()
      .lines()
      .filter(|l| l.contains(" ERROR "))
      .map(str::to_string)
      .collect()
  }
}

pub struct CapturedWriter(Arc<Mutex<Vec<u8>>>);

impl io::Write for CapturedWriter {
  fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
    self.0.lock().unwrap().extend_from_slice(buf);
    Ok(buf.len())
  }

  fn flush(&mut self) -> io::Result<()> {
    Ok(())
  }
}

impl<'a> MakeWriter<'a> for CapturedLogs {
  type Writer = CapturedWriter;

  fn make_writer(&'a self) -> Self::Writer {
    CapturedWriter(self.0.clone())
  }
}

/// Route this thread's `tracing` events into a buffer until the guard drops.
pub fn capture_logs() -> (CapturedLogs, DefaultGuard) {
  let logs = CapturedLogs::default();
  let subscriber = tracing_subscriber::fmt()
    .with_writer(logs.clone())
    .with_ansi(false)
    .with_max_level(tracing::Level::INFO)
    .finish();
  let guard = tracing::subscriber::set_default(subscriber);
  (logs, guard)
}

// ─── Clock ────────────────────────────────────────────────────────────────────

pub struct FixedClock(pub DateTime<Utc>);

impl Clock for FixedClock {
  fn now(&self) -> DateTime<Utc> {
    self.0
  }
}

pub fn fixed_clock() -> Arc<dyn Clock> {
  Arc::new(FixedClock(Utc.with_ymd_and_hms(2024, 1, 2, 3, 4, 5).unwrap()))
}

// ─── Mock forms API ───────────────────────────────────────────────────────────

/// One request received by the mock.
#[derive(Debug, Clone)]
pub struct Hit {
  pub method:  String,
  pub path:    String,
  pub headers: HeaderMap,
  pub body:    String,
}

pub struct Upstream {
  pub base_url: String,
  hits:         Arc<Mutex<Vec<Hit>>>,
}

impl Upstream {
  pub fn hits(&self) -> Vec<Hit> {
    self.hits.lock().unwrap().clone()
  }
}

/// Serve `routes` on an ephemeral port, recording every request.
pub async fn upstream(routes: Router) -> Upstream {
  let hits = Arc::new(Mutex::new(Vec::new()));
  let recorder = hits.clone();

  let app = routes.layer(middleware::from_fn(move |req: Request, next: Next| {
    let recorder = recorder.clone();
    async move {
      let (parts, body) = req.into_parts();
      let bytes = axum::body::to_bytes(body, usize::MAX).await.unwrap();
      recorder.lock().unwrap().push(Hit {
        method:  parts.method.to_string(),
        path:    parts.uri.path().to_string(),
        headers: parts.headers.clone(),
        body:    String::from_utf8_lossy(&bytes).into_owned(),
      });
      next.run(Request::from_parts(parts, Body::from(bytes))).await
    }
  }));

  let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
  let addr = listener.local_addr().unwrap();
  tokio::spawn(async move {
    axum::serve(listener, app).await.unwrap();
  });

  Upstream {
    base_url: format!("http://{addr}"),
    hits,
  }
}

/// A base URL on which nothing is listening.
pub async fn unreachable_base_url() -> String {
  let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
  let addr = listener.local_addr().unwrap();
  drop(listener);
  format!("http://{addr}")
}
