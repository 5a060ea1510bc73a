// ABOUTME: Re-exports the unified error system from the core crate
// ABOUTME: Keeps crate::errors paths stable for the library and binaries
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

pub use sleep_coach_core::errors::*;
