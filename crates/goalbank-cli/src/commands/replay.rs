//! Replay a JSON array of inputs through one session.
//!
//! Each invocation of the CLI starts a fresh session, so this is the way to
//! drive several steps in a row:
//!
//! ```json
//! [
//!   {"type": "record_contribution", "goal_id": "dream-car", "amount": 50000, "date": "2024-12-26"},
//!   {"type": "toggle_favorite", "id": "youth-hope"}
//! ]
//! ```

use std::path::Path;

use goalbank_core::Input;
use tracing::info;

use super::{open_session, print_json, SessionOpts};

pub fn run(opts: &SessionOpts, file: &Path, events: bool) -> Result<(), Box<dyn std::error::Error>> {
    let content = std::fs::read_to_string(file)?;
    let inputs: Vec<Input> = serde_json::from_str(&content)?;
    let (mut engine, _config) = open_session(opts)?;

    info!(count = inputs.len(), file = %file.display(), "replaying inputs");
    let emitted = engine.apply_all(&inputs)?;

    if events {
        print_json(&emitted)
    } else {
        print_json(&engine.snapshot())
    }
}
