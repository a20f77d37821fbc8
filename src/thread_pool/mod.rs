//! Executors for the line server's per-connection jobs.
//!
//! A pool is chosen once at startup (`finanza-server --pool`) and every
//! accepted connection becomes one job on it.

use crate::Result;
use std::thread;

pub trait ThreadPool {
    /// `size` is the worker count for pools that keep workers around; pools
    /// without a fixed worker set may ignore it.
    fn new(size: usize) -> Result<Self>
    where
        Self: std::marker::Sized;

    /// Queues `job`. Never blocks on the job itself.
    fn spawn<F>(&self, job: F)
    where
        F: FnOnce() + Send + 'static;
}

/// Starts a detached OS thread for every connection. Handy for debugging,
/// unbounded under load.
pub struct NaiveThreadPool;

impl ThreadPool for NaiveThreadPool {
    fn new(_size: usize) -> Result<NaiveThreadPool> {
        Ok(NaiveThreadPool)
    }

    fn spawn<F>(&self, job: F)
    where
        F: FnOnce() + Send + 'static,
    {
        thread::spawn(job);
    }
}

mod shared_queue;

pub use self::shared_queue::SharedQueueThreadPool;
