// Viewer/controller for a remotely-computed Game of Life board.
//
// The server owns the simulation; this crate fetches snapshots, keeps an
// ever-alive overlay for visual history, and drives the timed auto-advance
// loop.

pub mod app;
pub mod board;
pub mod client;
pub mod protocol;
pub mod scheduler;
mod ui;
