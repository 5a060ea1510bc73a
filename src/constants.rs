// ABOUTME: Re-exports application constants from the core crate
// ABOUTME: Sleep thresholds, narrative text, generation defaults and env var names
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

pub use sleep_coach_core::constants::*;
