//! Ctrl-C handling for the command-line run.

use std::future::Future;
use tokio::sync::oneshot;

/// Races work against a one-shot interrupt.
///
/// Once interrupted, every later [`Shutdown::run`] returns `None` without
/// polling its future.
pub struct Shutdown {
    rx: Option<oneshot::Receiver<()>>,
    interrupted: bool,
}

impl Shutdown {
    pub fn new(rx: oneshot::Receiver<()>) -> Self {
        Self {
            rx: Some(rx),
            interrupted: false,
        }
    }

    /// Listen for Ctrl-C in the background
    pub fn listen() -> Self {
        let (shutdown_tx, shutdown_rx) = oneshot::channel::<()>();

        tokio::spawn(async move {
            if let Err(e) = tokio::signal::ctrl_c().await {
                eprintln!("Failed to listen for shutdown signal: {}", e);
            } else {
                let _ = shutdown_tx.send(());
            }
        });

        Self::new(shutdown_rx)
    }

    pub fn is_interrupted(&self) -> bool {
        self.interrupted
    }

    /// Run `fut` to completion unless an interrupt arrives first.
    pub async fn run<F: Future>(&mut self, fut: F) -> Option<F::Output> {
        if self.interrupted {
            return None;
        }
        let Some(rx) = self.rx.as_mut() else {
            return Some(fut.await);
        };

        tokio::pin!(fut);
        let signal = tokio::select! {
            out = &mut fut => return Some(out),
            signal = rx => signal,
        };
        self.rx = None;

        // sender dropped without a signal: nothing can interrupt any more
        if signal.is_err() {
            return Some(fut.await);
        }

        self.interrupted = true;
        None
    }
}
