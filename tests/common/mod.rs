//! Shared utilities for integration tests.
#![allow(dead_code)]

use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use futures_util::future::BoxFuture;
use tempfile::TempDir;

use appboot::lifecycle::{BoxError, ExitFn, TeardownFn};

/// A scratch project directory for env-file and config tests.
pub struct ScratchProject {
    dir: TempDir,
}

impl ScratchProject {
    pub fn new() -> Self {
        Self {
            dir: tempfile::tempdir().unwrap(),
        }
    }

    pub fn path(&self) -> &std::path::Path {
        self.dir.path()
    }

    /// Write a file directly under the project root.
    pub fn write_file(&self, name: &str, content: &str) {
        std::fs::write(self.dir.path().join(name), content).unwrap();
    }
}

/// An exit capability that records codes instead of terminating.
pub fn recording_exit() -> (ExitFn, Arc<Mutex<Vec<i32>>>) {
    let codes = Arc::new(Mutex::new(Vec::new()));
    let recorded = codes.clone();
    let exit: ExitFn = Arc::new(move |code| {
        recorded.lock().unwrap().push(code);
    });
    (exit, codes)
}

/// A teardown that counts invocations and completes immediately.
pub fn counting_teardown(count: Arc<AtomicU32>) -> TeardownFn {
    Box::new(move || {
        let fut: BoxFuture<'static, Result<(), BoxError>> = Box::pin(async move {
            count.fetch_add(1, Ordering::SeqCst);
            Ok(())
        });
        fut
    })
}

/// A teardown that records it started but never completes.
pub fn pending_teardown(started: Arc<AtomicU32>) -> TeardownFn {
    Box::new(move || {
        let fut: BoxFuture<'static, Result<(), BoxError>> = Box::pin(async move {
            started.fetch_add(1, Ordering::SeqCst);
            futures_util::future::pending::<()>().await;
            Ok(())
        });
        fut
    })
}

/// A teardown that fails.
pub fn failing_teardown() -> TeardownFn {
    Box::new(|| {
        let fut: BoxFuture<'static, Result<(), BoxError>> =
            Box::pin(async { Err("teardown exploded".into()) });
        fut
    })
}

/// Poll `cond` until it holds, panicking after two seconds.
pub async fn wait_until<F: Fn() -> bool>(cond: F) {
    for _ in 0..200 {
        if cond() {
            return;
        }
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
    panic!("condition not reached within 2s");
}
