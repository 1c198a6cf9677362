//! Background asset loading.
//!
//! The model and the music clip are read on short-lived worker threads so
//! the window opens immediately. Each worker sends exactly one `Result`
//! back over a channel; the frame loop polls the [`PendingLoad`] once per
//! frame and applies the outcome on the main thread.

pub mod audio;
pub mod model;

use std::sync::mpsc;

pub use audio::{load_audio, AudioClip};
pub use model::{load_model, ModelMesh, ModelVertex};

use crate::error::ViewerError;

/// A load running on a worker thread.
#[derive(Debug)]
pub struct PendingLoad<T> {
    label: &'static str,
    rx: mpsc::Receiver<Result<T, ViewerError>>,
}

impl<T> PendingLoad<T> {
    /// What is being loaded, for log messages.
    #[must_use]
    pub fn label(&self) -> &'static str {
        self.label
    }

    /// Non-blocking check for the result.
    ///
    /// Returns `None` while the worker is still running. A worker that
    /// exits without sending (it panicked) yields
    /// [`ViewerError::AssetLoad`].
    pub fn poll(&self) -> Option<Result<T, ViewerError>> {
        match self.rx.try_recv() {
            Ok(result) => Some(result),
            Err(mpsc::TryRecvError::Empty) => None,
            Err(mpsc::TryRecvError::Disconnected) => {
                Some(Err(ViewerError::AssetLoad(format!(
                    "{} loader exited without a result",
                    self.label
                ))))
            }
        }
    }
}

/// Run `load` on a named worker thread.
pub fn spawn_load<T, F>(
    label: &'static str,
    load: F,
) -> Result<PendingLoad<T>, ViewerError>
where
    T: Send + 'static,
    F: FnOnce() -> Result<T, ViewerError> + Send + 'static,
{
    let (tx, rx) = mpsc::channel();
    let _handle = std::thread::Builder::new()
        .name(format!("{label}-loader"))
        .spawn(move || {
            // The receiver is gone if the viewer closed first.
            let _ = tx.send(load());
        })
        .map_err(ViewerError::ThreadSpawn)?;
    log::debug!("{label} load started");
    Ok(PendingLoad { label, rx })
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;

    fn wait<T>(pending: &PendingLoad<T>) -> Result<T, ViewerError> {
        for _ in 0..500 {
            if let Some(result) = pending.poll() {
                return result;
            }
            std::thread::sleep(Duration::from_millis(2));
        }
        panic!("{} load did not finish", pending.label());
    }

    #[test]
    fn delivers_success() {
        let pending = spawn_load("number", || Ok(7_u32)).unwrap();
        assert_eq!(wait(&pending).unwrap(), 7);
    }

    #[test]
    fn delivers_failure() {
        let pending: PendingLoad<()> = spawn_load("broken", || {
            Err(ViewerError::ModelLoad("bad file".into()))
        })
        .unwrap();
        assert!(matches!(wait(&pending), Err(ViewerError::ModelLoad(_))));
    }

    #[test]
    fn panicking_worker_reports_asset_error() {
        let pending: PendingLoad<()> =
            spawn_load("panicky", || panic!("worker failed")).unwrap();
        assert!(matches!(wait(&pending), Err(ViewerError::AssetLoad(_))));
    }
}
