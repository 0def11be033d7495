// app.rs - Application state: board, sync client, scheduler, user intents

use std::collections::HashMap;
use std::time::Instant;

use tracing::warn;

use crate::board::{BoardStore, CellVisual};
use crate::client::SyncClient;
use crate::scheduler::AutoAdvance;

/// Board size requested at startup, matching the stock frontend's prompt
/// defaults.
const DEFAULT_WIDTH: u32 = 50;
const DEFAULT_HEIGHT: u32 = 50;

/// The viewer application. `ui.rs` projects this onto the screen every frame.
pub struct LifeViewer {
    pub(crate) board: BoardStore,
    pub(crate) client: SyncClient,
    pub(crate) scheduler: AutoAdvance,

    // New-board size fields, the only configuration the service knows.
    pub(crate) width_input: String,
    pub(crate) height_input: String,

    // Optimistic click feedback, dropped when the next full snapshot lands.
    pub(crate) pending: HashMap<usize, CellVisual>,
}

impl LifeViewer {
    pub fn new(server: String) -> anyhow::Result<Self> {
        let mut client = SyncClient::new(server)?;
        client.new_board(DEFAULT_WIDTH, DEFAULT_HEIGHT);
        Ok(Self {
            board: BoardStore::default(),
            client,
            scheduler: AutoAdvance::default(),
            width_input: DEFAULT_WIDTH.to_string(),
            height_input: DEFAULT_HEIGHT.to_string(),
            pending: HashMap::new(),
        })
    }

    /// Once per frame: apply finished requests, then let the scheduler fire.
    pub(crate) fn sync_frame(&mut self) {
        if self.client.pump(&mut self.board) {
            self.pending.clear();
        }
        if self.scheduler.poll(Instant::now()) {
            self.client.advance();
        }
    }

    pub(crate) fn toggle_running(&mut self) {
        if self.scheduler.is_running() {
            self.scheduler.stop();
        } else {
            self.scheduler.start();
        }
    }

    pub(crate) fn request_new_board(&mut self) {
        self.scheduler.stop();
        match (parse_extent(&self.width_input), parse_extent(&self.height_input)) {
            (Some(width), Some(height)) => self.client.new_board(width, height),
            _ => warn!(
                width = %self.width_input,
                height = %self.height_input,
                "ignoring new-board request with invalid size"
            ),
        }
    }

    pub(crate) fn request_reset(&mut self) {
        self.scheduler.stop();
        self.client.reset();
    }

    pub(crate) fn request_advance(&mut self) {
        self.scheduler.stop();
        self.client.advance();
    }

    pub(crate) fn request_randomize(&mut self) {
        self.scheduler.stop();
        self.client.randomize();
    }

    /// Click on a cell: show the assumed transition right away, ask the
    /// server to flip it. The next full snapshot is authoritative and may
    /// contradict the assumption.
    pub(crate) fn toggle_cell(&mut self, id: usize) {
        self.scheduler.stop();
        let assumed = self.cell_visual(id).after_click();
        self.pending.insert(id, assumed);
        self.client.toggle(id);
    }

    /// Visual state with optimistic click feedback layered on top.
    pub(crate) fn cell_visual(&self, id: usize) -> CellVisual {
        self.pending
            .get(&id)
            .copied()
            .unwrap_or_else(|| self.board.visual(id))
    }
}

fn parse_extent(input: &str) -> Option<u32> {
    input.trim().parse::<u32>().ok().filter(|&n| n > 0)
}
