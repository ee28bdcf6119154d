// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Database layer (single JSON file).

pub mod json_store;

pub use json_store::{JsonStore, StoreError};
