//! Fallback telemetry.
//!
//! Every time a façade call falls back to a default value, a
//! [`FallbackEvent`] is queued for the configured sinks on a background
//! thread. Recording never blocks the caller or changes what it gets back.
//!
//! In development the event carries a truncated JSON sample of the offending
//! payload. In production the sample is dropped entirely so user data does
//! not end up in logs.

use std::fmt;
use std::fs::OpenOptions;
use std::io::Write;
use std::panic::{self, AssertUnwindSafe};
use std::path::{Path, PathBuf};
use std::sync::mpsc::{self, Receiver, SyncSender, TrySendError};
use std::sync::{Arc, Mutex, OnceLock, PoisonError};
use std::thread::{self, JoinHandle};

use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::Value;

use crate::util::config::{Config, RuntimeMode, MAX_SAMPLE_LIMIT};

/// Appended to samples cut at the sample limit.
pub const TRUNCATION_MARKER: &str = "…[truncated]";

/// Why a fallback value was returned.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum FallbackReason {
    /// Transport failed: unreachable, timed out, non-2xx or unreadable body.
    #[serde(rename = "Network error")]
    Network,

    /// The response arrived but did not match the declared schema.
    #[serde(rename = "Schema validation failed")]
    Validation,
}

impl FallbackReason {
    pub fn as_str(&self) -> &'static str {
        match self {
            FallbackReason::Network => "Network error",
            FallbackReason::Validation => "Schema validation failed",
        }
    }
}

impl fmt::Display for FallbackReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Warn,
    Error,
}

/// One recorded fallback.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FallbackEvent {
    /// Route template, e.g. `/api/candidates/:id`
    pub endpoint: String,
    pub reason: FallbackReason,
    /// Error message or schema issues
    pub detail: String,
    pub severity: Severity,
    pub timestamp: DateTime<Utc>,
    /// Truncated payload; always `None` in production
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sample: Option<String>,
}

/// Destination for fallback events.
///
/// Implementations must not panic and must swallow their own I/O errors.
pub trait TelemetrySink: Send + Sync {
    fn record(&self, event: &FallbackEvent);
}

/// Emits events as structured `tracing` records.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingSink;

impl TelemetrySink for TracingSink {
    fn record(&self, event: &FallbackEvent) {
        let sample = event.sample.as_deref().unwrap_or("");
        match event.severity {
            Severity::Warn => tracing::warn!(
                endpoint = %event.endpoint,
                reason = %event.reason,
                detail = %event.detail,
                sample,
                "API fallback used"
            ),
            Severity::Error => tracing::error!(
                endpoint = %event.endpoint,
                reason = %event.reason,
                detail = %event.detail,
                "API fallback used"
            ),
        }
    }
}

/// Keeps events in memory for later inspection.
#[derive(Debug, Clone, Default)]
pub struct MemorySink {
    events: Arc<Mutex<Vec<FallbackEvent>>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of the events recorded so far.
    pub fn events(&self) -> Vec<FallbackEvent> {
        self.events
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn len(&self) -> usize {
        self.events
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn clear(&self) {
        self.events
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clear();
    }
}

impl TelemetrySink for MemorySink {
    fn record(&self, event: &FallbackEvent) {
        self.events
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(event.clone());
    }
}

/// Appends each event as one JSON object per line.
#[derive(Debug)]
pub struct JsonLinesSink {
    path: PathBuf,
    lock: Mutex<()>,
}

impl JsonLinesSink {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        JsonLinesSink {
            path: path.into(),
            lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn append(&self, event: &FallbackEvent) -> std::io::Result<()> {
        let mut line = serde_json::to_string(event)?;
        line.push('\n');

        let _guard = self.lock.lock().unwrap_or_else(PoisonError::into_inner);
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;
        file.write_all(line.as_bytes())
    }
}

impl TelemetrySink for JsonLinesSink {
    fn record(&self, event: &FallbackEvent) {
        if let Err(e) = self.append(event) {
            tracing::warn!(
                "Failed to write telemetry to {}: {}",
                self.path.display(),
                e
            );
        }
    }
}

/// Events queued for the worker before new ones are dropped.
const QUEUE_CAPACITY: usize = 256;

enum Message {
    Event(FallbackEvent),
    Flush(mpsc::Sender<()>),
}

/// Background thread that owns delivery to the sinks.
struct Worker {
    sender: Option<SyncSender<Message>>,
    handle: Option<JoinHandle<()>>,
}

impl Worker {
    fn spawn(sinks: Vec<Arc<dyn TelemetrySink>>) -> Self {
        let (sender, receiver) = mpsc::sync_channel(QUEUE_CAPACITY);
        let spawned = thread::Builder::new()
            .name("ballot-telemetry".to_string())
            .spawn(move || deliver(receiver, &sinks));

        match spawned {
            Ok(handle) => Worker {
                sender: Some(sender),
                handle: Some(handle),
            },
            Err(e) => {
                tracing::warn!("Failed to start telemetry worker: {}", e);
                Worker {
                    sender: None,
                    handle: None,
                }
            }
        }
    }

    /// Queue `event` without blocking. Dropped if the queue is full.
    fn send(&self, event: FallbackEvent) {
        let Some(sender) = &self.sender else {
            return;
        };
        match sender.try_send(Message::Event(event)) {
            Ok(()) => {}
            Err(TrySendError::Full(Message::Event(event))) => {
                tracing::debug!("Telemetry queue full, dropped event for {}", event.endpoint);
            }
            Err(_) => {}
        }
    }

    fn flush(&self) {
        let Some(sender) = &self.sender else {
            return;
        };
        let (ack, done) = mpsc::channel();
        if sender.send(Message::Flush(ack)).is_ok() {
            let _ = done.recv();
        }
    }
}

impl Drop for Worker {
    fn drop(&mut self) {
        // Closing the queue lets the worker drain what is left and exit.
        self.sender.take();
        if let Some(handle) = self.handle.take() {
            let _ = handle.join();
        }
    }
}

fn deliver(receiver: Receiver<Message>, sinks: &[Arc<dyn TelemetrySink>]) {
    for message in receiver {
        match message {
            Message::Event(event) => {
                for sink in sinks {
                    let delivered = panic::catch_unwind(AssertUnwindSafe(|| sink.record(&event)));
                    if delivered.is_err() {
                        tracing::error!(endpoint = %event.endpoint, "Telemetry sink panicked");
                    }
                }
            }
            Message::Flush(ack) => {
                let _ = ack.send(());
            }
        }
    }
}

/// Builds fallback events and queues them for the sinks.
///
/// Sinks run on a background thread started on the first recorded event.
/// Clones share that thread; it is joined when the last clone is dropped.
#[derive(Clone)]
pub struct Telemetry {
    mode: RuntimeMode,
    sample_limit: usize,
    sinks: Vec<Arc<dyn TelemetrySink>>,
    worker: Arc<OnceLock<Worker>>,
}

impl Telemetry {
    /// Telemetry with no sinks.
    pub fn new(mode: RuntimeMode) -> Self {
        Telemetry {
            mode,
            sample_limit: MAX_SAMPLE_LIMIT,
            sinks: Vec::new(),
            worker: Arc::new(OnceLock::new()),
        }
    }

    /// Tracing output, plus a JSON lines file when one is configured.
    pub fn from_config(config: &Config) -> Self {
        let mut telemetry = Telemetry::new(config.mode())
            .with_sample_limit(config.sample_limit())
            .with_sink(Arc::new(TracingSink));

        if let Some(path) = &config.telemetry.log_file {
            telemetry = telemetry.with_sink(Arc::new(JsonLinesSink::new(path)));
        }

        telemetry
    }

    pub fn with_sink(mut self, sink: Arc<dyn TelemetrySink>) -> Self {
        self.sinks.push(sink);
        self.worker = Arc::new(OnceLock::new());
        self
    }

    /// Lower the sample limit. Values above [`MAX_SAMPLE_LIMIT`] are clamped.
    pub fn with_sample_limit(mut self, limit: usize) -> Self {
        self.sample_limit = limit.min(MAX_SAMPLE_LIMIT);
        self
    }

    pub fn mode(&self) -> RuntimeMode {
        self.mode
    }

    /// Record a fallback for `endpoint`.
    ///
    /// Returns as soon as the event is queued. `sample` is only serialized
    /// outside production.
    pub fn record(
        &self,
        endpoint: &str,
        reason: FallbackReason,
        detail: impl Into<String>,
        sample: Option<&Value>,
    ) {
        if self.sinks.is_empty() {
            return;
        }

        let (severity, sample) = if self.mode.is_production() {
            (Severity::Error, None)
        } else {
            (
                Severity::Warn,
                sample.and_then(|value| sample_of(value, self.sample_limit)),
            )
        };

        let event = FallbackEvent {
            endpoint: endpoint.to_string(),
            reason,
            detail: detail.into(),
            severity,
            timestamp: Utc::now(),
            sample,
        };

        self.worker
            .get_or_init(|| Worker::spawn(self.sinks.clone()))
            .send(event);
    }

    /// Block until every event recorded so far has reached the sinks.
    pub fn flush(&self) {
        if let Some(worker) = self.worker.get() {
            worker.flush();
        }
    }
}

impl fmt::Debug for Telemetry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Telemetry")
            .field("mode", &self.mode)
            .field("sample_limit", &self.sample_limit)
            .field("sinks", &self.sinks.len())
            .finish()
    }
}

/// Serialize `value` and cut it to `limit` characters.
///
/// Returns `None` if serialization fails.
pub fn sample_of(value: &Value, limit: usize) -> Option<String> {
    serde_json::to_string(value)
        .ok()
        .map(|json| truncate_sample(&json, limit))
}

/// Keep the first `limit` characters of `text`, marking the cut.
pub fn truncate_sample(text: &str, limit: usize) -> String {
    match text.char_indices().nth(limit) {
        None => text.to_string(),
        Some((cut, _)) => format!("{}{}", &text[..cut], TRUNCATION_MARKER),
    }
}
