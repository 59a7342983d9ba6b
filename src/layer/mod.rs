//! `tracing` integration: a layer that sends events to Slack

mod visitor;

pub use visitor::record_from_event;

use crate::config::HandlerConfig;
use crate::error::{Result, SlackLogError};
use crate::handler::SlackLogHandler;
use crate::logging::log_error;
use crate::record::LogRecord;
use crate::slack::{ChatApi, SlackClient};
use std::cell::Cell;
use std::sync::mpsc;
use std::thread;
use tracing::{Event, Subscriber};
use tracing_subscriber::layer::{Context, Layer};

thread_local! {
    /// Set while this thread is delivering a record, so that events raised
    /// during delivery are not fed back into Slack.
    static DELIVERING: Cell<bool> = const { Cell::new(false) };
}

struct DeliveryGuard;

impl DeliveryGuard {
    fn enter() -> Option<Self> {
        DELIVERING.with(|flag| {
            if flag.get() {
                None
            } else {
                flag.set(true);
                Some(DeliveryGuard)
            }
        })
    }
}

impl Drop for DeliveryGuard {
    fn drop(&mut self) {
        DELIVERING.with(|flag| flag.set(false));
    }
}

struct Delivery {
    record: LogRecord,
    done: mpsc::Sender<Result<()>>,
}

type ErrorHandler = Box<dyn Fn(&SlackLogError) + Send + Sync>;

/// A [`Layer`] that posts every event it sees to Slack.
///
/// Delivery is synchronous for the caller: `on_event` returns once the send
/// attempt has finished. The Slack client runs on a dedicated thread with its
/// own single-threaded tokio runtime, so the layer can be used both inside
/// and outside async code.
///
/// All threads share that one delivery thread: records are sent one at a
/// time, so a slow Slack request also delays every other thread that logs
/// through this layer until its own record has been sent.
///
/// Errors that the handler propagates (`fail_silent = false`) are passed to
/// the error handler, which logs them through `tracing` by default. Use
/// [`Layer::with_filter`] to restrict the levels that reach Slack.
pub struct SlackLayer {
    sender: mpsc::Sender<Delivery>,
    error_handler: ErrorHandler,
}

impl SlackLayer {
    /// Create a layer backed by the Slack Web API.
    ///
    /// Blocks until configuration is resolved; fails if any mention user is
    /// not found.
    pub fn connect(config: impl Into<HandlerConfig>) -> Result<Self> {
        let config = config.into();
        let client = SlackClient::new(&config.api_token)?;
        Self::with_client(client, config)
    }

    /// Create a layer backed by any [`ChatApi`] implementation
    pub fn with_client<C>(client: C, config: impl Into<HandlerConfig>) -> Result<Self>
    where
        C: ChatApi + 'static,
    {
        let config = config.into();
        let (ready_tx, ready_rx) = mpsc::channel();
        let (sender, receiver) = mpsc::channel();

        thread::Builder::new()
            .name("slack-log-delivery".to_string())
            .spawn(move || run_delivery(client, config, ready_tx, receiver))?;

        ready_rx.recv().map_err(|_| {
            SlackLogError::Delivery("delivery thread exited during startup".to_string())
        })??;

        Ok(Self {
            sender,
            error_handler: Box::new(|e| log_error("slack_emit", e)),
        })
    }

    /// Replace the handler for delivery errors
    #[must_use]
    pub fn error_handler<F>(mut self, handler: F) -> Self
    where
        F: Fn(&SlackLogError) + Send + Sync + 'static,
    {
        self.error_handler = Box::new(handler);
        self
    }

    fn deliver(&self, record: LogRecord) -> Result<()> {
        let (done, result) = mpsc::channel();
        self.sender
            .send(Delivery { record, done })
            .map_err(|_| SlackLogError::Delivery("delivery thread has stopped".to_string()))?;

        result.recv().map_err(|_| {
            SlackLogError::Delivery("delivery thread stopped before completing".to_string())
        })?
    }
}

impl<S: Subscriber> Layer<S> for SlackLayer {
    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        let Some(_guard) = DeliveryGuard::enter() else {
            return;
        };

        if let Err(e) = self.deliver(record_from_event(event)) {
            (self.error_handler)(&e);
        }
    }
}

fn run_delivery<C: ChatApi>(
    client: C,
    config: HandlerConfig,
    ready: mpsc::Sender<Result<()>>,
    receiver: mpsc::Receiver<Delivery>,
) {
    DELIVERING.with(|flag| flag.set(true));

    // Blocking-pool threads belong to delivery too; events raised there must
    // not queue behind the send that is waiting on them.
    let runtime = match tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .on_thread_start(|| DELIVERING.with(|flag| flag.set(true)))
        .build()
    {
        Ok(runtime) => runtime,
        Err(e) => {
            let _ = ready.send(Err(e.into()));
            return;
        }
    };

    let handler = match runtime.block_on(SlackLogHandler::new(client, config)) {
        Ok(handler) => handler,
        Err(e) => {
            let _ = ready.send(Err(e));
            return;
        }
    };
    let _ = ready.send(Ok(()));

    while let Ok(delivery) = receiver.recv() {
        let result = runtime.block_on(handler.emit(&delivery.record));
        let _ = delivery.done.send(result);
    }

    tracing::debug!("Slack log delivery thread stopped");
}
