pub mod countdown;
pub mod ui;

use anyhow::{format_err, Result};
use std::{future::Future, sync::Arc};
use tokio::sync::watch;
use tracing::{debug, error};

pub type ServiceId = &'static str;

/// Service execution control instance
///
/// Every service is a task on the runtime, and we would like to be able to
/// gracefully terminate them all, and stop everything else when any of them
/// fails.
#[derive(Clone)]
pub struct ServiceControl {
    stop_all: Arc<watch::Sender<bool>>,
}

impl Default for ServiceControl {
    fn default() -> Self {
        Self::new()
    }
}

impl ServiceControl {
    pub fn new() -> Self {
        let (stop_all, _) = watch::channel(false);
        Self {
            stop_all: Arc::new(stop_all),
        }
    }

    /// Safe to call from any thread, including a signal handler
    pub fn stop_all(&self) {
        self.stop_all.send_replace(true);
    }

    pub fn is_stopped(&self) -> bool {
        *self.stop_all.borrow()
    }

    /// Resolves once [`Self::stop_all`] was called
    pub fn stopped(&self) -> impl Future<Output = ()> + Send + 'static {
        let mut rx = self.stop_all.subscribe();
        async move {
            while !*rx.borrow_and_update() {
                if rx.changed().await.is_err() {
                    return;
                }
            }
        }
    }

    /// Start a new service as a task
    ///
    /// The task ends when `f` does or when all services are stopped. An
    /// error returned by `f` stops every other service too.
    pub fn spawn<F>(&self, service_id: ServiceId, f: F) -> JoinHandle
    where
        F: Future<Output = Result<()>> + Send + 'static,
    {
        let stopped = self.stopped();
        let svc_ctl = self.clone();

        JoinHandle::new(tokio::spawn(async move {
            let res = tokio::select! {
                res = f => res,
                _ = stopped => {
                    debug!(service_id, "service stopped");
                    Ok(())
                }
            };
            if let Err(e) = &res {
                error!(service_id, error = %e, "service failed");
                svc_ctl.stop_all();
            }
            res
        }))
    }
}

/// Task join wrapper that cancels the task on drop
pub struct JoinHandle {
    task: Option<tokio::task::JoinHandle<Result<()>>>,
}

impl JoinHandle {
    fn new(task: tokio::task::JoinHandle<Result<()>>) -> Self {
        Self { task: Some(task) }
    }

    pub async fn join(mut self) -> Result<()> {
        match self.task.take() {
            Some(task) => task.await.map_err(|e| {
                if e.is_panic() {
                    format_err!("service panicked")
                } else {
                    format_err!("join failed: {:?}", e)
                }
            })?,
            None => Ok(()),
        }
    }
}

impl Drop for JoinHandle {
    fn drop(&mut self) {
        if let Some(task) = self.task.take() {
            task.abort();
        }
    }
}
