//! Shared channel infrastructure between system threads.
//!
//! The `SystemBus` is the communication hub for the render, input, logic and
//! decode threads. Every thread gets a clone and uses the ends it needs.

use crate::decode::{DecodeOutcome, DecodeRequest};
use crate::input::events::{ConfigAction, RawInputEvent};
use crate::shared::snapshot::RenderState;
use crossbeam_channel::{Receiver, Sender, unbounded};

/// System-level events sent by the window.
#[derive(Debug, Clone)]
pub enum SystemEvent {
    /// Application shutdown requested.
    Quit,
}

/// Aggregates the cross-thread communication channels.
///
/// - Raw keyboard events from the window
/// - Configuration actions from the UI and the input thread
/// - Render snapshots to the render thread
/// - Decode requests and their outcomes
/// - System events (quit)
#[derive(Clone)]
pub struct SystemBus {
    /// Render → Input: keyboard events egui did not consume.
    pub raw_input_tx: Sender<RawInputEvent>,
    pub raw_input_rx: Receiver<RawInputEvent>,

    /// Render/Input → Logic: store mutations requested by the user.
    pub action_tx: Sender<ConfigAction>,
    pub action_rx: Receiver<ConfigAction>,

    /// Logic → Render: snapshots after every change.
    pub render_tx: Sender<RenderState>,
    pub render_rx: Receiver<RenderState>,

    /// Logic → Decode: files picked for upload.
    pub decode_tx: Sender<DecodeRequest>,
    pub decode_rx: Receiver<DecodeRequest>,

    /// Decode → Logic: finished decodes.
    pub decoded_tx: Sender<DecodeOutcome>,
    pub decoded_rx: Receiver<DecodeOutcome>,

    /// Render → Logic: system events.
    pub sys_tx: Sender<SystemEvent>,
    pub sys_rx: Receiver<SystemEvent>,
}

impl SystemBus {
    /// Creates a new system bus with all channels initialized.
    pub fn new() -> Self {
        let (raw_input_tx, raw_input_rx) = unbounded();
        let (action_tx, action_rx) = unbounded();

        // Snapshots are only produced on change, so none may be dropped:
        // the renderer drains the queue and keeps the newest.
        let (render_tx, render_rx) = unbounded();

        let (decode_tx, decode_rx) = unbounded();
        let (decoded_tx, decoded_rx) = unbounded();
        let (sys_tx, sys_rx) = unbounded();

        Self {
            raw_input_tx,
            raw_input_rx,
            action_tx,
            action_rx,
            render_tx,
            render_rx,
            decode_tx,
            decode_rx,
            decoded_tx,
            decoded_rx,
            sys_tx,
            sys_rx,
        }
    }
}

impl Default for SystemBus {
    fn default() -> Self {
        Self::new()
    }
}
