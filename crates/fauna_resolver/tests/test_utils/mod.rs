//! Test utilities for resolver tests.
//!
//! Provides a scripted [`ImageTransport`] so resolution can be exercised
//! without network access.

use async_trait::async_trait;
use fauna_error::{TransportError, TransportErrorKind};
use fauna_resolver::{FetchRequest, ImageTransport, TransportResponse};
use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

/// A single scripted outcome.
#[derive(Debug, Clone)]
pub enum Scripted {
    /// Return this response
    Respond(TransportResponse),
    /// Fail at the network level
    Fail(TransportErrorKind),
}

impl Scripted {
    /// 200 with a cat-style body.
    pub fn cat(url: &str) -> Self {
        Scripted::Respond(TransportResponse::ok(format!(r#"[{{"id":"x","url":"{url}"}}]"#)))
    }

    /// 429 with an optional `Retry-After`.
    pub fn too_many(retry_after: Option<Duration>) -> Self {
        Scripted::Respond(TransportResponse::new(429, retry_after, ""))
    }

    /// Request timeout.
    pub fn timeout() -> Self {
        Scripted::Fail(TransportErrorKind::Timeout("deadline elapsed".to_string()))
    }
}

/// Transport that plays back a script and records what it was asked.
///
/// The last scripted outcome repeats once the script runs out.
#[derive(Clone)]
pub struct ScriptedTransport {
    script: Arc<Mutex<VecDeque<Scripted>>>,
    last: Arc<Mutex<Option<Scripted>>>,
    requests: Arc<Mutex<Vec<FetchRequest>>>,
    delay: Option<Duration>,
    in_flight: Arc<AtomicUsize>,
    peak: Arc<AtomicUsize>,
}

impl ScriptedTransport {
    /// Play `outcomes` in order.
    pub fn sequence(outcomes: Vec<Scripted>) -> Self {
        Self {
            script: Arc::new(Mutex::new(outcomes.into())),
            last: Arc::new(Mutex::new(None)),
            requests: Arc::new(Mutex::new(Vec::new())),
            delay: None,
            in_flight: Arc::new(AtomicUsize::new(0)),
            peak: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Always produce `outcome`.
    pub fn always(outcome: Scripted) -> Self {
        Self::sequence(vec![outcome])
    }

    /// Hold every request open for `delay` before answering.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    /// Number of times get() was called.
    pub fn call_count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }

    /// Every request seen so far.
    pub fn requests(&self) -> Vec<FetchRequest> {
        self.requests.lock().unwrap().clone()
    }

    /// Highest number of requests that were open at once.
    pub fn peak_in_flight(&self) -> usize {
        self.peak.load(Ordering::SeqCst)
    }

    fn next_outcome(&self) -> Option<Scripted> {
        let mut script = self.script.lock().unwrap();
        let mut last = self.last.lock().unwrap();
        if let Some(next) = script.pop_front() {
            *last = Some(next);
        }
        last.clone()
    }
}

#[async_trait]
impl ImageTransport for ScriptedTransport {
    async fn get(&self, request: &FetchRequest) -> Result<TransportResponse, TransportError> {
        self.requests.lock().unwrap().push(request.clone());
        let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.peak.fetch_max(now, Ordering::SeqCst);

        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }

        self.in_flight.fetch_sub(1, Ordering::SeqCst);
        match self.next_outcome() {
            Some(Scripted::Respond(response)) => Ok(response),
            Some(Scripted::Fail(kind)) => Err(TransportError::new(kind)),
            None => Err(TransportError::new(TransportErrorKind::Connect(
                "empty script".to_string(),
            ))),
        }
    }
}
