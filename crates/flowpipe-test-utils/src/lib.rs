// SPDX-FileCopyrightText: 2026 Flowpipe Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Test utilities for Flowpipe adapter tests.
//!
//! Provides mock collaborators so adapter behaviour can be tested without
//! network access.
//!
//! # Components
//!
//! - [`MockTranscriptProvider`] - Scripted per-language transcript outcomes with a call log
//! - [`RecordingSink`] - Status sink that captures every emitted event

pub mod mock_provider;
pub mod recording_sink;

pub use mock_provider::MockTranscriptProvider;
pub use recording_sink::RecordingSink;
