// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Shared test doubles for Backboard crates.
#![forbid(unsafe_code)]
//!
//! - [`store`] - In-memory key-value store fake for testing without filesystem

pub mod store;

pub use store::InMemoryStore;
