// SPDX-FileCopyrightText: 2026 Flowpipe Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Core library for the Flowpipe host adapters.
//!
//! This crate provides the trait definitions, error taxonomy and host-facing
//! data types shared by the chatflow pipe and the transcript tool.

pub mod error;
pub mod traits;
pub mod types;

// Re-export key items at crate root for ergonomic imports.
pub use error::FlowpipeError;
pub use types::{
    AdapterType, ContentPart, Conversation, HealthStatus, HostEvent, Message, MessageContent,
    PipeDescriptor, PipeRequest, Role, StatusEvent, StatusKind, ToolOutput, TranscriptSegment,
    VideoId,
};

pub use traits::{
    PipeAdapter, PipeOutput, PluginAdapter, StatusSink, TextStream, ToolAdapter,
    TranscriptFormatter, TranscriptProvider,
};
