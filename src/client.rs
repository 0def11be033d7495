// client.rs - One intent, one request; outcomes come back over a channel

use std::sync::mpsc::{self, Receiver, Sender};
use std::time::Duration;

use thiserror::Error;
use tracing::{debug, trace, warn};

use crate::board::BoardStore;
use crate::protocol::{Command, PayloadError, Snapshot, ToggleReply};

const REQUEST_TIMEOUT: Duration = Duration::from_secs(8);

#[derive(Debug, Error)]
pub enum SyncError {
    #[error("transport failure: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("server answered {0}")]
    Status(reqwest::StatusCode),
    #[error(transparent)]
    Payload(#[from] PayloadError),
}

#[derive(Debug)]
enum Reply {
    Full(Snapshot),
    LiveCells(u32),
}

/// A completed request on its way back to the UI thread.
#[derive(Debug)]
struct Delivery {
    seq: u64,
    command: Command,
    outcome: Result<Reply, SyncError>,
}

/// Issues commands against the remote simulation service.
///
/// Requests run on a background tokio runtime and deliver their outcome over
/// an mpsc channel that [`SyncClient::pump`] drains on the UI thread. Every
/// dispatch gets a sequence number; a response that is not the most recently
/// issued one is discarded instead of clobbering newer state, which fixes the
/// shared-handle race the service's stock frontend has.
pub struct SyncClient {
    http: reqwest::Client,
    base_url: String,
    runtime: tokio::runtime::Runtime,
    outcome_tx: Sender<Delivery>,
    outcome_rx: Receiver<Delivery>,
    next_seq: u64,
    latest_seq: u64,
}

impl SyncClient {
    pub fn new(base_url: String) -> anyhow::Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()?;
        let runtime = tokio::runtime::Runtime::new()?;
        let (outcome_tx, outcome_rx) = mpsc::channel();
        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_owned(),
            runtime,
            outcome_tx,
            outcome_rx,
            next_seq: 0,
            latest_seq: 0,
        })
    }

    pub fn new_board(&mut self, width: u32, height: u32) {
        self.dispatch(Command::NewBoard { width, height });
    }

    pub fn reset(&mut self) {
        self.dispatch(Command::Reset);
    }

    pub fn advance(&mut self) {
        self.dispatch(Command::Advance);
    }

    pub fn randomize(&mut self) {
        self.dispatch(Command::Randomize);
    }

    pub fn toggle(&mut self, id: usize) {
        self.dispatch(Command::Toggle { id });
    }

    fn dispatch(&mut self, command: Command) {
        self.next_seq += 1;
        let seq = self.next_seq;
        self.latest_seq = seq;

        let url = format!("{}/{}", self.base_url, command.request_path());
        let http = self.http.clone();
        let tx = self.outcome_tx.clone();
        trace!(seq, %url, "dispatching");
        self.runtime.spawn(async move {
            let outcome = fetch(&http, &url, command).await;
            if let Err(err) = &outcome {
                // Fail-silent: the display stays on the last good snapshot.
                warn!(seq, %url, error = %err, "request failed");
            }
            // The receiver only disappears when the app is shutting down.
            let _ = tx.send(Delivery {
                seq,
                command,
                outcome,
            });
        });
    }

    /// Drains completed requests into the store. Returns true when a full
    /// snapshot was applied, so the caller can drop optimistic click
    /// feedback.
    pub fn pump(&mut self, store: &mut BoardStore) -> bool {
        let mut applied_full = false;
        while let Ok(delivery) = self.outcome_rx.try_recv() {
            applied_full |= self.apply(store, delivery);
        }
        applied_full
    }

    fn apply(&mut self, store: &mut BoardStore, delivery: Delivery) -> bool {
        if delivery.seq != self.latest_seq {
            debug!(
                seq = delivery.seq,
                latest = self.latest_seq,
                "discarding stale response"
            );
            return false;
        }
        match delivery.outcome {
            Ok(Reply::Full(snapshot)) => {
                trace!(
                    generations = snapshot.generations,
                    live_cells = snapshot.live_cells,
                    "applying snapshot"
                );
                store.apply_snapshot(&snapshot, delivery.command.clears_history());
                true
            }
            Ok(Reply::LiveCells(live_cells)) => {
                store.apply_live_cells(live_cells);
                false
            }
            // Already logged at completion time; leave the store untouched.
            Err(_) => false,
        }
    }
}

async fn fetch(http: &reqwest::Client, url: &str, command: Command) -> Result<Reply, SyncError> {
    let response = http.get(url).send().await?;
    if !response.status().is_success() {
        return Err(SyncError::Status(response.status()));
    }
    let body = response.text().await?;
    if command.expects_full_snapshot() {
        Ok(Reply::Full(Snapshot::parse(&body)?))
    } else {
        Ok(Reply::LiveCells(ToggleReply::parse(&body)?.live_cells))
    }
}
