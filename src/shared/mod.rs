//! Types exchanged between threads.

pub mod snapshot;
