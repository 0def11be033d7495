// board.rs - Client-side board state: latest snapshot plus the ever-alive overlay

use crate::protocol::{Dimensions, Snapshot};

/// What a single cell looks like on screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CellVisual {
    On,
    PreviouslyAlive,
    Off,
}

impl CellVisual {
    /// Cosmetic transition assumed when the user clicks a cell, shown until
    /// the next full snapshot confirms or contradicts it.
    pub fn after_click(self) -> CellVisual {
        match self {
            CellVisual::On => CellVisual::PreviouslyAlive,
            CellVisual::Off | CellVisual::PreviouslyAlive => CellVisual::On,
        }
    }
}

/// Last known board state. Snapshots replace the cell array wholesale; the
/// history overlay only ever accumulates until a NewBoard/Reset wipes it.
#[derive(Debug, Default)]
pub struct BoardStore {
    dims: Option<Dimensions>,
    cells: Vec<bool>,
    history: Vec<bool>,
    generations: u32,
    live_cells: u32,
}

impl BoardStore {
    /// Replaces the whole board with a server snapshot. `clear_history` is
    /// set when the snapshot answers a NewBoard or Reset command.
    pub fn apply_snapshot(&mut self, snapshot: &Snapshot, clear_history: bool) {
        let dims = snapshot.dimensions();
        self.dims = Some(dims);
        self.cells = snapshot.array.clone();
        if clear_history || self.history.len() != dims.cell_count() {
            self.history = vec![false; dims.cell_count()];
        }
        for (seen, &alive) in self.history.iter_mut().zip(&snapshot.array) {
            *seen |= alive;
        }
        self.generations = snapshot.generations;
        self.live_cells = snapshot.live_cells;
    }

    pub fn clear_history(&mut self) {
        let len = self.dims.map(|d| d.cell_count()).unwrap_or(0);
        self.history = vec![false; len];
    }

    /// Stats-only update after a toggle. Cells and history stay as they are
    /// until the next full snapshot.
    pub fn apply_live_cells(&mut self, live_cells: u32) {
        self.live_cells = live_cells;
    }

    /// Render projection: alive beats previously-alive beats off.
    pub fn visual(&self, id: usize) -> CellVisual {
        if self.cells.get(id).copied().unwrap_or(false) {
            CellVisual::On
        } else if self.history.get(id).copied().unwrap_or(false) {
            CellVisual::PreviouslyAlive
        } else {
            CellVisual::Off
        }
    }

    /// `None` until the first successful sync.
    pub fn dimensions(&self) -> Option<Dimensions> {
        self.dims
    }

    pub fn cells(&self) -> &[bool] {
        &self.cells
    }

    pub fn history(&self) -> &[bool] {
        &self.history
    }

    pub fn generations(&self) -> u32 {
        self.generations
    }

    pub fn live_cells(&self) -> u32 {
        self.live_cells
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snapshot(width: u32, height: u32, alive: &[usize], generations: u32) -> Snapshot {
        let mut array = vec![false; (width * height) as usize];
        for &id in alive {
            array[id] = true;
        }
        Snapshot {
            width,
            height,
            generations,
            live_cells: alive.len() as u32,
            array,
        }
    }

    #[test]
    fn snapshot_replaces_cells_and_sizes_overlay() {
        let mut store = BoardStore::default();
        store.apply_snapshot(&snapshot(3, 3, &[4], 1), true);
        assert_eq!(store.cells().len(), 9);
        assert_eq!(store.history().len(), 9);
        assert_eq!(store.visual(4), CellVisual::On);
        assert_eq!(store.visual(0), CellVisual::Off);
    }

    #[test]
    fn history_is_monotonic_across_plain_snapshots() {
        let mut store = BoardStore::default();
        store.apply_snapshot(&snapshot(3, 3, &[4], 1), true);
        store.apply_snapshot(&snapshot(3, 3, &[], 2), false);
        assert_eq!(store.visual(4), CellVisual::PreviouslyAlive);

        store.apply_snapshot(&snapshot(3, 3, &[2], 3), false);
        // Both the old and the new ever-alive cells stay flagged.
        assert_eq!(store.history()[4], true);
        assert_eq!(store.history()[2], true);
    }

    #[test]
    fn clearing_snapshot_wipes_history() {
        let mut store = BoardStore::default();
        store.apply_snapshot(&snapshot(3, 3, &[4], 1), true);
        store.apply_snapshot(&snapshot(3, 3, &[], 2), false);
        store.apply_snapshot(&snapshot(3, 3, &[], 0), true);
        assert_eq!(store.visual(4), CellVisual::Off);
        assert!(store.history().iter().all(|&seen| !seen));
    }

    #[test]
    fn reapplying_a_snapshot_is_idempotent() {
        let mut store = BoardStore::default();
        let snap = snapshot(2, 4, &[1, 6], 7);
        store.apply_snapshot(&snap, false);
        let first: Vec<_> = (0..8).map(|id| store.visual(id)).collect();
        store.apply_snapshot(&snap, false);
        let second: Vec<_> = (0..8).map(|id| store.visual(id)).collect();
        assert_eq!(first, second);
    }

    #[test]
    fn live_cells_update_leaves_board_untouched() {
        let mut store = BoardStore::default();
        store.apply_snapshot(&snapshot(3, 3, &[4], 1), true);
        let cells = store.cells().to_vec();
        let history = store.history().to_vec();

        store.apply_live_cells(5);

        assert_eq!(store.live_cells(), 5);
        assert_eq!(store.cells(), &cells[..]);
        assert_eq!(store.history(), &history[..]);
    }

    #[test]
    fn dimension_change_resizes_overlay() {
        let mut store = BoardStore::default();
        store.apply_snapshot(&snapshot(3, 3, &[0], 1), true);
        store.apply_snapshot(&snapshot(2, 2, &[], 0), true);
        assert_eq!(store.history().len(), 4);
        assert_eq!(store.cells().len(), 4);
    }

    #[test]
    fn click_transitions() {
        assert_eq!(CellVisual::On.after_click(), CellVisual::PreviouslyAlive);
        assert_eq!(CellVisual::Off.after_click(), CellVisual::On);
        assert_eq!(CellVisual::PreviouslyAlive.after_click(), CellVisual::On);
    }
}
