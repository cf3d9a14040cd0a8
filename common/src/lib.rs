//! Synchronization primitives shared by the driver crates.
//!
//! Everything here is `no_std`, allocation-free and safe to use on a
//! single-core target where interrupt handlers preempt normal code.

#![cfg_attr(not(test), no_std)]

pub mod sync;
