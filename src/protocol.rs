// protocol.rs - Command set and wire payloads of the remote Game of Life service

use serde::{Deserialize, Deserializer};
use thiserror::Error;

/// Board extent as reported by the server. Never computed locally; the server
/// is the only source of truth for these two numbers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Dimensions {
    pub width: u32,
    pub height: u32,
}

impl Dimensions {
    pub fn cell_count(&self) -> usize {
        self.width as usize * self.height as usize
    }

    /// Linear cell id shared with the server's `ChangeValue?id=` endpoint.
    ///
    /// Convention: `x` runs over the width dimension (the outer loop, rendered
    /// as the grid row) and `y` over the height dimension (the inner loop,
    /// rendered as the grid column), so `id = x * height + y`. This must be
    /// computed against the currently known dimensions or the server will
    /// flip the wrong cell.
    pub fn index(&self, x: u32, y: u32) -> usize {
        debug_assert!(x < self.width && y < self.height);
        (x * self.height + y) as usize
    }

    /// Inverse of [`Dimensions::index`].
    pub fn coord(&self, id: usize) -> (u32, u32) {
        let id = id as u32;
        (id / self.height, id % self.height)
    }
}

/// One outbound request. Every user or scheduler intent maps to exactly one
/// of these.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    NewBoard { width: u32, height: u32 },
    Reset,
    Advance,
    Randomize,
    Toggle { id: usize },
}

impl Command {
    /// Path-and-query fragment appended to the service base URL.
    pub fn request_path(&self) -> String {
        match *self {
            Command::NewBoard { width, height } => {
                format!("NewBoard?height={height}&width={width}")
            }
            Command::Reset => "ResetBoard".to_owned(),
            Command::Advance => "Advance".to_owned(),
            Command::Randomize => "Randomize".to_owned(),
            Command::Toggle { id } => format!("ChangeValue?id={id}"),
        }
    }

    /// Whether applying this command's response must also wipe the
    /// ever-alive overlay.
    pub fn clears_history(&self) -> bool {
        matches!(self, Command::NewBoard { .. } | Command::Reset)
    }

    /// Toggle answers with a live-cell count only; everything else returns a
    /// complete board snapshot.
    pub fn expects_full_snapshot(&self) -> bool {
        !matches!(self, Command::Toggle { .. })
    }
}

#[derive(Debug, Error)]
pub enum PayloadError {
    #[error("payload is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("board dimensions must be positive, got {width}x{height}")]
    EmptyBoard { width: u32, height: u32 },
    #[error("cell array holds {got} entries, {width}x{height} board needs {want}")]
    LengthMismatch {
        got: usize,
        want: usize,
        width: u32,
        height: u32,
    },
}

/// A complete board state from the server: dimensions, stats and the flat
/// cell array, ordered width-outer / height-inner to match
/// [`Dimensions::index`].
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Snapshot {
    pub height: u32,
    pub width: u32,
    pub generations: u32,
    pub live_cells: u32,
    #[serde(deserialize_with = "cells_from_markers")]
    pub array: Vec<bool>,
}

impl Snapshot {
    pub fn parse(body: &str) -> Result<Self, PayloadError> {
        let snapshot: Snapshot = serde_json::from_str(body)?;
        if snapshot.width == 0 || snapshot.height == 0 {
            return Err(PayloadError::EmptyBoard {
                width: snapshot.width,
                height: snapshot.height,
            });
        }
        let want = snapshot.dimensions().cell_count();
        if snapshot.array.len() != want {
            return Err(PayloadError::LengthMismatch {
                got: snapshot.array.len(),
                want,
                width: snapshot.width,
                height: snapshot.height,
            });
        }
        Ok(snapshot)
    }

    pub fn dimensions(&self) -> Dimensions {
        Dimensions {
            width: self.width,
            height: self.height,
        }
    }
}

/// `ChangeValue` answers with the new live-cell count and nothing else.
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct ToggleReply {
    pub live_cells: u32,
}

impl ToggleReply {
    pub fn parse(body: &str) -> Result<Self, PayloadError> {
        Ok(serde_json::from_str(body)?)
    }
}

// The service serializes cells as JSON booleans, the frontend contract talks
// about "0"/"1" markers. Accept both.
fn cells_from_markers<'de, D>(deserializer: D) -> Result<Vec<bool>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Mark {
        Flag(bool),
        Marker(String),
    }

    let marks = Vec::<Mark>::deserialize(deserializer)?;
    marks
        .into_iter()
        .map(|mark| match mark {
            Mark::Flag(flag) => Ok(flag),
            Mark::Marker(s) => match s.as_str() {
                "1" => Ok(true),
                "0" => Ok(false),
                other => Err(serde::de::Error::custom(format!(
                    "unrecognized cell marker {other:?}"
                ))),
            },
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_paths_match_service_routes() {
        assert_eq!(
            Command::NewBoard {
                width: 4,
                height: 3
            }
            .request_path(),
            "NewBoard?height=3&width=4"
        );
        assert_eq!(Command::Reset.request_path(), "ResetBoard");
        assert_eq!(Command::Advance.request_path(), "Advance");
        assert_eq!(Command::Randomize.request_path(), "Randomize");
        assert_eq!(Command::Toggle { id: 17 }.request_path(), "ChangeValue?id=17");
    }

    #[test]
    fn only_new_board_and_reset_clear_history() {
        assert!(Command::NewBoard { width: 2, height: 2 }.clears_history());
        assert!(Command::Reset.clears_history());
        assert!(!Command::Advance.clears_history());
        assert!(!Command::Randomize.clears_history());
        assert!(!Command::Toggle { id: 0 }.clears_history());
    }

    #[test]
    fn parses_boolean_cell_array() {
        let body = r#"{"width":2,"height":2,"generations":5,"live_cells":1,
                       "array":[false,true,false,false]}"#;
        let snapshot = Snapshot::parse(body).unwrap();
        assert_eq!(snapshot.array, vec![false, true, false, false]);
        assert_eq!(snapshot.generations, 5);
        assert_eq!(snapshot.live_cells, 1);
    }

    #[test]
    fn parses_marker_cell_array() {
        let body = r#"{"width":2,"height":2,"generations":0,"live_cells":2,
                       "array":["1","0","0","1"]}"#;
        let snapshot = Snapshot::parse(body).unwrap();
        assert_eq!(snapshot.array, vec![true, false, false, true]);
    }

    #[test]
    fn rejects_length_mismatch() {
        let body = r#"{"width":3,"height":3,"generations":0,"live_cells":0,
                       "array":["0","0"]}"#;
        assert!(matches!(
            Snapshot::parse(body),
            Err(PayloadError::LengthMismatch { got: 2, want: 9, .. })
        ));
    }

    #[test]
    fn rejects_zero_dimensions() {
        let body = r#"{"width":0,"height":3,"generations":0,"live_cells":0,"array":[]}"#;
        assert!(matches!(
            Snapshot::parse(body),
            Err(PayloadError::EmptyBoard { .. })
        ));
    }

    #[test]
    fn rejects_unknown_marker() {
        let body = r#"{"width":1,"height":1,"generations":0,"live_cells":0,"array":["x"]}"#;
        assert!(matches!(Snapshot::parse(body), Err(PayloadError::Json(_))));
    }

    #[test]
    fn linear_id_round_trips() {
        let dims = Dimensions {
            width: 5,
            height: 3,
        };
        for x in 0..5 {
            for y in 0..3 {
                let id = dims.index(x, y);
                assert_eq!(dims.coord(id), (x, y));
            }
        }
        // Outer-major on width: stepping y moves by one, stepping x by height.
        assert_eq!(dims.index(0, 1), 1);
        assert_eq!(dims.index(1, 0), 3);
    }

    #[test]
    fn toggle_reply_carries_live_cells_only() {
        let reply = ToggleReply::parse(r#"{"live_cells":5}"#).unwrap();
        assert_eq!(reply.live_cells, 5);
    }
}
