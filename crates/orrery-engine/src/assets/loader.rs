//! Asynchronous detailed-object loading.
//!
//! Loads are fire-and-forget: the game calls [`AssetLoader::load`] and moves
//! on. Outcomes come back later as [`LoadOutcome`]s and are applied by the
//! game on the animation thread, never from inside the loader.

use crate::api::types::ModelHandle;

/// One detailed-object request, addressed by the slot it will fill.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadRequest {
    pub slot: u32,
    pub material_path: String,
    pub geometry_path: String,
}

/// A ready-to-display detailed object.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DetailedObject {
    pub handle: ModelHandle,
}

/// Completion of a single [`LoadRequest`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadOutcome {
    Ready { slot: u32, object: DetailedObject },
    Failed { slot: u32, reason: String },
}

impl LoadOutcome {
    pub fn slot(&self) -> u32 {
        match self {
            LoadOutcome::Ready { slot, .. } | LoadOutcome::Failed { slot, .. } => *slot,
        }
    }
}

/// Starts loads. Implementations must not block the caller.
pub trait AssetLoader {
    fn load(&mut self, request: LoadRequest);
}

/// Loader backed by the browser host.
///
/// Requests issued during a frame are published to the host after the tick;
/// the host reports back through `InputEvent::AssetLoaded` / `AssetFailed`.
#[derive(Debug, Default)]
pub struct HostLoader {
    pending: Vec<LoadRequest>,
    issued: usize,
}

impl HostLoader {
    pub fn new() -> Self {
        Self::default()
    }

    /// Requests issued since the last [`clear`](Self::clear).
    pub fn pending(&self) -> &[LoadRequest] {
        &self.pending
    }

    /// Total requests issued over the loader's lifetime.
    pub fn issued(&self) -> usize {
        self.issued
    }

    /// Forget requests the host has already picked up.
    pub fn clear(&mut self) {
        self.pending.clear();
    }
}

impl AssetLoader for HostLoader {
    fn load(&mut self, request: LoadRequest) {
        log::debug!("load requested: slot {} ({})", request.slot, request.geometry_path);
        self.pending.push(request);
        self.issued += 1;
    }
}

#[cfg(not(target_arch = "wasm32"))]
pub use threaded::ThreadedLoader;

#[cfg(not(target_arch = "wasm32"))]
mod threaded {
    use std::sync::mpsc::{self, Receiver, RecvTimeoutError, Sender};
    use std::sync::Arc;
    use std::thread;
    use std::time::Duration;

    use super::{AssetLoader, DetailedObject, LoadOutcome, LoadRequest};

    /// Native loader running each request on its own OS thread.
    ///
    /// Worker threads only produce [`LoadOutcome`]s; they never touch scene
    /// state. The animation thread collects them with [`poll`](Self::poll).
    pub struct ThreadedLoader<F> {
        fetch: Arc<F>,
        tx: Sender<LoadOutcome>,
        rx: Receiver<LoadOutcome>,
    }

    impl<F> ThreadedLoader<F>
    where
        F: Fn(&LoadRequest) -> Result<DetailedObject, String> + Send + Sync + 'static,
    {
        pub fn new(fetch: F) -> Self {
            let (tx, rx) = mpsc::channel();
            Self {
                fetch: Arc::new(fetch),
                tx,
                rx,
            }
        }

        /// Outcomes that have arrived so far. Never blocks.
        pub fn poll(&self) -> Vec<LoadOutcome> {
            self.rx.try_iter().collect()
        }

        /// Block up to `timeout` for the next outcome.
        pub fn wait(&self, timeout: Duration) -> Option<LoadOutcome> {
            match self.rx.recv_timeout(timeout) {
                Ok(outcome) => Some(outcome),
                Err(RecvTimeoutError::Timeout) | Err(RecvTimeoutError::Disconnected) => None,
            }
        }
    }

    impl<F> AssetLoader for ThreadedLoader<F>
    where
        F: Fn(&LoadRequest) -> Result<DetailedObject, String> + Send + Sync + 'static,
    {
        fn load(&mut self, request: LoadRequest) {
            let fetch = Arc::clone(&self.fetch);
            let tx = self.tx.clone();
            thread::spawn(move || {
                let outcome = match fetch(&request) {
                    Ok(object) => LoadOutcome::Ready { slot: request.slot, object },
                    Err(reason) => LoadOutcome::Failed { slot: request.slot, reason },
                };
                // Receiver gone means the loader was dropped; nothing to report to.
                let _ = tx.send(outcome);
            });
        }
    }
}
