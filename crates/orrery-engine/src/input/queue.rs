use crate::assets::loader::LoadOutcome;

/// Events the host pushes into the engine between frames.
/// Generic, no game-specific semantics.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    /// A custom event from the UI layer (control panel, buttons, etc.).
    /// `kind` identifies the event type; `a`, `b`, `c` carry arbitrary data.
    Custom { kind: u32, a: f32, b: f32, c: f32 },
    /// The host finished loading the detailed object requested for `slot`.
    AssetLoaded { slot: u32, handle: u32 },
    /// The host gave up loading the detailed object requested for `slot`.
    AssetFailed { slot: u32 },
}

impl From<LoadOutcome> for InputEvent {
    /// Marshal a native loader outcome back onto the animation thread.
    /// The failure reason stays with the loader's log.
    fn from(outcome: LoadOutcome) -> Self {
        match outcome {
            LoadOutcome::Ready { slot, object } => {
                InputEvent::AssetLoaded { slot, handle: object.handle.0 }
            }
            LoadOutcome::Failed { slot, reason } => {
                log::warn!("slot {}: load failed: {}", slot, reason);
                InputEvent::AssetFailed { slot }
            }
        }
    }
}

/// A queue of input events.
/// The host writes events into the queue; Rust reads and drains them each frame.
pub struct InputQueue {
    events: Vec<InputEvent>,
}

impl InputQueue {
    pub fn new() -> Self {
        Self {
            events: Vec::with_capacity(32),
        }
    }

    /// Push a new input event (called from the host via wasm-bindgen).
    pub fn push(&mut self, event: InputEvent) {
        self.events.push(event);
    }

    /// Drain all pending events. Returns a Vec and clears the queue.
    pub fn drain(&mut self) -> Vec<InputEvent> {
        std::mem::take(&mut self.events)
    }

    /// Iterate over pending events without consuming them.
    pub fn iter(&self) -> impl Iterator<Item = &InputEvent> {
        self.events.iter()
    }

    /// Check if there are pending events.
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Number of pending events.
    pub fn len(&self) -> usize {
        self.events.len()
    }
}

impl Default for InputQueue {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn outcomes_become_asset_events() {
        use crate::api::types::ModelHandle;
        use crate::assets::loader::DetailedObject;

        let object = DetailedObject { handle: ModelHandle(9) };
        let ready = LoadOutcome::Ready { slot: 4, object };
        assert_eq!(InputEvent::from(ready), InputEvent::AssetLoaded { slot: 4, handle: 9 });
        let failed = LoadOutcome::Failed { slot: 1, reason: "missing".to_string() };
        assert_eq!(InputEvent::from(failed), InputEvent::AssetFailed { slot: 1 });
    }

    #[test]
    fn push_and_drain() {
        let mut q = InputQueue::new();
        q.push(InputEvent::Custom { kind: 1, a: 0.5, b: 0.0, c: 0.0 });
        q.push(InputEvent::AssetLoaded { slot: 3, handle: 17 });
        assert_eq!(q.len(), 2);
        let events = q.drain();
        assert_eq!(events.len(), 2);
        assert!(q.is_empty());
    }

    #[test]
    fn preserves_arrival_order() {
        let mut q = InputQueue::new();
        q.push(InputEvent::AssetFailed { slot: 2 });
        q.push(InputEvent::AssetLoaded { slot: 0, handle: 1 });
        let kinds: Vec<_> = q.iter().copied().collect();
        assert_eq!(kinds[0], InputEvent::AssetFailed { slot: 2 });
        assert_eq!(kinds[1], InputEvent::AssetLoaded { slot: 0, handle: 1 });
    }
}
