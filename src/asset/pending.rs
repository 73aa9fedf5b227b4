//! Background model loading with a single result-or-error outcome.

use std::fmt;
use std::path::PathBuf;
use std::sync::mpsc;

use super::loader::{load_model, load_model_from_slice};
use super::model::LoadedModel;
use crate::error::RoomviewError;

/// Where a model is loaded from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ModelSource {
    /// A `.gltf` or `.glb` file on disk.
    Path(PathBuf),
    /// Model bytes already in memory.
    Bytes {
        /// Label used in log messages.
        label: String,
        /// GLB bytes or glTF JSON with embedded buffers.
        data: Vec<u8>,
    },
}

impl ModelSource {
    /// Import the model on the calling thread.
    pub fn load(&self) -> Result<LoadedModel, RoomviewError> {
        match self {
            Self::Path(path) => load_model(path),
            Self::Bytes { data, .. } => load_model_from_slice(data),
        }
    }
}

impl fmt::Display for ModelSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Path(path) => write!(f, "{}", path.display()),
            Self::Bytes { label, data } => {
                write!(f, "{label} ({} bytes)", data.len())
            }
        }
    }
}

impl From<PathBuf> for ModelSource {
    fn from(path: PathBuf) -> Self {
        Self::Path(path)
    }
}

impl From<&str> for ModelSource {
    fn from(path: &str) -> Self {
        Self::Path(PathBuf::from(path))
    }
}

/// Outcome delivered by a [`PendingLoad`].
pub type LoadOutcome = Result<LoadedModel, RoomviewError>;

/// A model import running on a background thread.
///
/// Delivers exactly one [`LoadOutcome`]: [`poll`](Self::poll) returns
/// `Some` once, and `None` both before the import finishes and after the
/// outcome has been taken.
pub struct PendingLoad {
    source: String,
    result_rx: mpsc::Receiver<LoadOutcome>,
    thread: Option<std::thread::JoinHandle<()>>,
    delivered: bool,
}

impl PendingLoad {
    /// Spawn the import thread.
    ///
    /// # Errors
    ///
    /// Returns [`RoomviewError::ThreadSpawn`] if the thread cannot be
    /// created.
    pub fn spawn(source: ModelSource) -> Result<Self, RoomviewError> {
        let label = source.to_string();
        let (result_tx, result_rx) = mpsc::channel::<LoadOutcome>();

        let thread = std::thread::Builder::new()
            .name("model-loader".into())
            .spawn(move || {
                let _ = result_tx.send(source.load());
            })
            .map_err(RoomviewError::ThreadSpawn)?;

        log::info!("loading model from {label}");
        Ok(Self {
            source: label,
            result_rx,
            thread: Some(thread),
            delivered: false,
        })
    }

    /// Human-readable description of what is being loaded.
    #[must_use]
    pub fn source(&self) -> &str {
        &self.source
    }

    /// Whether the outcome has already been handed out.
    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.delivered
    }

    /// Non-blocking check for the outcome.
    pub fn poll(&mut self) -> Option<LoadOutcome> {
        if self.delivered {
            return None;
        }
        let outcome = match self.result_rx.try_recv() {
            Ok(outcome) => outcome,
            Err(mpsc::TryRecvError::Empty) => return None,
            Err(mpsc::TryRecvError::Disconnected) => Err(self.died()),
        };
        self.finish();
        Some(outcome)
    }

    /// Block until the outcome is available.
    pub fn wait(mut self) -> LoadOutcome {
        if self.delivered {
            return Err(RoomviewError::ModelLoad(format!(
                "outcome for {} was already taken",
                self.source
            )));
        }
        let outcome = self.result_rx.recv().unwrap_or_else(|_| Err(self.died()));
        self.finish();
        outcome
    }

    fn died(&self) -> RoomviewError {
        RoomviewError::ModelLoad(format!(
            "loader thread for {} exited without a result",
            self.source
        ))
    }

    fn finish(&mut self) {
        self.delivered = true;
        if let Some(handle) = self.thread.take() {
            let _ = handle.join();
        }
    }
}

#[cfg(test)]
mod tests {
    use std::time::{Duration, Instant};

    use super::*;

    fn poll_until_done(pending: &mut PendingLoad) -> LoadOutcome {
        let deadline = Instant::now() + Duration::from_secs(10);
        loop {
            if let Some(outcome) = pending.poll() {
                return outcome;
            }
            assert!(Instant::now() < deadline, "load never finished");
            std::thread::sleep(Duration::from_millis(5));
        }
    }

    #[test]
    fn delivers_exactly_one_outcome() {
        let source = ModelSource::Bytes {
            label: "empty".into(),
            data: br#"{"asset":{"version":"2.0"},"scenes":[{"nodes":[]}],"scene":0}"#
                .to_vec(),
        };
        let mut pending = PendingLoad::spawn(source).unwrap();
        let model = poll_until_done(&mut pending).unwrap();
        assert!(model.is_empty());
        assert!(pending.is_finished());
        assert!(pending.poll().is_none());
    }

    #[test]
    fn failure_is_delivered_as_error() {
        let pending =
            PendingLoad::spawn(ModelSource::from("missing/room.glb")).unwrap();
        assert_eq!(pending.source(), "missing/room.glb");
        assert!(pending.wait().is_err());
    }

    #[test]
    fn bytes_source_describes_itself() {
        let source = ModelSource::Bytes {
            label: "download".into(),
            data: vec![0; 12],
        };
        assert_eq!(source.to_string(), "download (12 bytes)");
    }
}
