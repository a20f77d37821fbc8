use super::ThreadPool;
use crate::{BridgeError, Result};
use std::io;
use std::panic::{self, AssertUnwindSafe};
use std::sync::mpsc::{self, Receiver, Sender};
use std::sync::{Arc, Mutex};
use std::thread;

type Job = Box<dyn FnOnce() + Send + 'static>;

/// Fixed set of workers pulling jobs from one shared channel. Workers exit
/// once the pool is dropped and the queue is drained.
pub struct SharedQueueThreadPool {
    sender: Sender<Job>,
}

impl ThreadPool for SharedQueueThreadPool {
    fn new(size: usize) -> Result<SharedQueueThreadPool> {
        if size == 0 {
            return Err(BridgeError::IOError(io::Error::new(
                io::ErrorKind::InvalidInput,
                "thread pool size must be at least 1",
            )));
        }
        let (sender, receiver) = mpsc::channel::<Job>();
        let receiver = Arc::new(Mutex::new(receiver));
        for id in 0..size {
            let receiver = Arc::clone(&receiver);
            thread::Builder::new()
                .name(format!("finanza-worker-{}", id))
                .spawn(move || run_worker(&receiver))?;
        }
        Ok(SharedQueueThreadPool { sender })
    }

    fn spawn<F>(&self, job: F)
    where
        F: FnOnce() + Send + 'static,
    {
        // Workers only stop after the sender is gone, so this cannot fail
        // while `self` is alive.
        let _ = self.sender.send(Box::new(job));
    }
}

fn run_worker(receiver: &Mutex<Receiver<Job>>) {
    loop {
        let job = match receiver.lock() {
            Ok(guard) => guard.recv(),
            Err(_) => return,
        };
        match job {
            // A panicking job must not take the worker down with it.
            Ok(job) => {
                let _ = panic::catch_unwind(AssertUnwindSafe(job));
            }
            Err(_) => return,
        }
    }
}
