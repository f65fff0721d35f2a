// SPDX-FileCopyrightText: 2026 Flowpipe Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Adapter trait definitions for the Flowpipe plugin surface.
//!
//! Host-facing adapters extend the [`PluginAdapter`] base trait and use
//! `#[async_trait]` for dynamic dispatch compatibility. The remaining traits
//! are collaborators the adapters consume.

pub mod adapter;
pub mod pipe;
pub mod status;
pub mod tool;
pub mod transcript;

pub use adapter::PluginAdapter;
pub use pipe::{PipeAdapter, PipeOutput, TextStream};
pub use status::StatusSink;
pub use tool::ToolAdapter;
pub use transcript::{TranscriptFormatter, TranscriptProvider};
