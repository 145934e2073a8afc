// This module exposes functions to easily perform performance and correctness
// tests maintaining consistency across all tests. The Runtime executing all
// actions is decoupled from the inner types used, so the same driver can run
// against other crates' primitives for comparison.

use std::{
    sync::{
        Arc,
        mpsc::{self, Receiver, SyncSender},
    },
    thread,
};

use crate::guarded::Guarded;
use crate::raw::RawRwLock;

#[derive(Clone)]
pub enum ReadTask<I> {
    Until { goal: u64, stop_fn: fn(&I, u64) -> bool },
    Hits { hits: usize },
    Stop,
}

#[derive(Clone)]
pub enum WriteTask<I> {
    Simple { num_execs: usize, task: fn(&I) -> I },
    Stop,
}

pub enum TaskResult {
    ReadDone,
    WriteDone,
}

pub struct RuntimeHandle<I: Clone> {
    readers: Vec<SyncSender<ReadTask<I>>>,
    writers: Vec<SyncSender<WriteTask<I>>>,
    res_recv: Receiver<TaskResult>,
}

impl<I: Clone> RuntimeHandle<I> {
    pub fn new(num_readers: usize, num_writers: usize) -> (Self, SyncSender<TaskResult>) {
        let (res_tx, res_rx) = mpsc::sync_channel(num_readers + num_writers);

        let self_ = Self {
            readers: vec![],
            writers: vec![],
            res_recv: res_rx,
        };

        (self_, res_tx)
    }

    pub fn register_reader(&mut self) -> Receiver<ReadTask<I>> {
        let (tx, rx) = mpsc::sync_channel(1);
        self.readers.push(tx);
        rx
    }

    pub fn register_writer(&mut self) -> Receiver<WriteTask<I>> {
        let (tx, rx) = mpsc::sync_channel(1);
        self.writers.push(tx);
        rx
    }

    pub fn write(&self, task: WriteTask<I>) {
        self.writers
            .iter()
            .for_each(|channel| channel.send(task.clone()).expect(""));
    }

    pub fn read(&self, task: ReadTask<I>) {
        self.readers.iter().for_each(|channel| {
            channel.send(task.clone()).expect("");
        });
    }

    pub fn recv_results(&self, expected: usize, timeout: std::time::Duration) -> Vec<TaskResult> {
        (0..expected)
            .map(|_| {
                self.res_recv
                    .recv_timeout(timeout)
                    .expect("Should retrieve results before defined time")
            })
            .collect()
    }
}

impl<I: Clone> Drop for RuntimeHandle<I> {
    fn drop(&mut self) {
        self.readers.iter().for_each(|channel| {
            channel.send(ReadTask::Stop).expect("");
        });

        self.writers.iter().for_each(|channel| {
            channel.send(WriteTask::Stop).expect("");
        });
    }
}

pub fn runtime<I: Send + Clone + 'static, T: ReadWriteExt<I> + Send + Sync + 'static>(
    num_readers: usize,
    num_writers: usize,
    target: Arc<T>,
) -> RuntimeHandle<I> {
    let (mut r_handle, res_tx) = RuntimeHandle::<I>::new(num_readers, num_writers);

    (0..num_readers).for_each(|_| {
        let task_rx = r_handle.register_reader();
        let res_tx = res_tx.clone();
        let target = target.clone();
        thread::spawn(move || {
            loop {
                match task_rx
                    .recv()
                    .expect("Should receive stop before handle be dropped")
                {
                    ReadTask::Stop => {
                        break;
                    }
                    ReadTask::Until { goal, stop_fn } => {
                        while !stop_fn(&target.snapshot(), goal) {
                            thread::yield_now();
                        }

                        res_tx.send(TaskResult::ReadDone).expect("");
                    }
                    ReadTask::Hits { hits } => {
                        for _ in 0..hits {
                            let _ = target.snapshot();
                        }

                        res_tx.send(TaskResult::ReadDone).expect("");
                    }
                }
            }
        });
    });

    (0..num_writers).for_each(|_| {
        let task_rx = r_handle.register_writer();
        let res_tx = res_tx.clone();
        let target = target.clone();

        thread::spawn(move || {
            loop {
                match task_rx
                    .recv()
                    .expect("Should receive stop before handle be dropped")
                {
                    WriteTask::Stop => {
                        break;
                    }
                    WriteTask::Simple { num_execs, task } => {
                        let mut iter = 0;

                        while iter < num_execs {
                            target.update(task);
                            iter += 1;
                        }

                        res_tx.send(TaskResult::WriteDone).expect("");
                    }
                }
            }
        });
    });

    r_handle
}

pub trait ReadWriteExt<I> {
    fn snapshot(&self) -> I;
    fn update(&self, fn_ptr: fn(&I) -> I);
}

impl<I: Clone, R: RawRwLock> ReadWriteExt<I> for Guarded<I, R> {
    fn snapshot(&self) -> I {
        self.read().clone()
    }

    fn update(&self, fn_ptr: fn(&I) -> I) {
        let mut value = self.write();
        let next = fn_ptr(&value);
        *value = next;
    }
}

impl<I: Clone> ReadWriteExt<I> for std::sync::RwLock<I> {
    fn snapshot(&self) -> I {
        self.read().expect("Lock never poisoned").clone()
    }

    fn update(&self, fn_ptr: fn(&I) -> I) {
        let mut value = self.write().expect("Lock never poisoned");
        let next = fn_ptr(&value);
        *value = next;
    }
}

#[cfg(feature = "benches")]
impl<I: Clone> ReadWriteExt<I> for arc_swap::ArcSwap<I> {
    fn snapshot(&self) -> I {
        self.load_full().as_ref().clone()
    }

    fn update(&self, fn_ptr: fn(&I) -> I) {
        self.rcu(|inner| fn_ptr(inner.as_ref()));
    }
}
