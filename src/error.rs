//! Error types for toolprobe operations.
//!
//! This module defines [`ToolprobeError`], the primary error type used
//! throughout the crate, and a [`Result`] type alias for convenience.
//!
//! # Error Handling Strategy
//!
//! - Every probe failure is terminal and surfaces as a distinct variant
//! - Variants carry enough context to render a diagnostic without re-probing
//! - Use `anyhow::Error` (via `ToolprobeError::Other`) for unexpected errors

use std::path::PathBuf;

use serde::Serialize;
use thiserror::Error;

use crate::version::RangeCheck;

/// Core error type for toolprobe operations.
#[derive(Debug, Error)]
pub enum ToolprobeError {
    /// No matching executable exists under the search root.
    #[error("Executable '{executable}' not found under {search_root}")]
    NotFound {
        executable: String,
        search_root: PathBuf,
    },

    /// The filesystem layout is not what a tool installation can look like.
    #[error("Unexpected filesystem layout at {path}: {message}")]
    StructuralError { path: PathBuf, message: String },

    /// The version command could not be launched or the channel failed.
    #[error("Version command for '{tool}' could not be run ({command}): {message}")]
    ProbeExecutionError {
        tool: String,
        command: String,
        message: String,
    },

    /// The installed version falls outside the configured range.
    #[error(
        "Tool '{tool}' in {home} has version {} which is {}; accepted range is {} to {}",
        .version.as_deref().unwrap_or("(unparsed)"),
        describe_comparison(.comparison),
        .min.as_deref().unwrap_or("(none)"),
        .max.as_deref().unwrap_or("(none)")
    )]
    VersionOutOfRange {
        tool: String,
        home: PathBuf,
        version: Option<String>,
        min: Option<String>,
        max: Option<String>,
        comparison: RangeCheck,
    },

    /// A probe request is inconsistent and was rejected at construction.
    #[error("Invalid probe request for '{tool}': {message}")]
    InvalidRequest { tool: String, message: String },

    /// Configuration file not found at expected location.
    #[error("Configuration not found: {path}")]
    ConfigNotFound { path: PathBuf },

    /// Failed to parse configuration file.
    #[error("Failed to parse config at {path}: {message}")]
    ConfigParseError { path: PathBuf, message: String },

    /// Invalid configuration structure or values.
    #[error("Invalid configuration: {message}")]
    ConfigValidationError { message: String },

    /// Requested tool has no entry in the configuration.
    #[error("Unknown tool: {name}")]
    UnknownTool { name: String },

    /// IO error wrapper.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Generic wrapped error for anyhow interop.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Coarse classification of a failure, used in machine-readable reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureKind {
    NotFound,
    StructuralError,
    ProbeExecutionError,
    VersionOutOfRange,
    InvalidRequest,
    Configuration,
    Io,
}

impl ToolprobeError {
    /// Classify this error.
    pub fn kind(&self) -> FailureKind {
        match self {
            Self::NotFound { .. } => FailureKind::NotFound,
            Self::StructuralError { .. } => FailureKind::StructuralError,
            Self::ProbeExecutionError { .. } => FailureKind::ProbeExecutionError,
            Self::VersionOutOfRange { .. } => FailureKind::VersionOutOfRange,
            Self::InvalidRequest { .. } => FailureKind::InvalidRequest,
            Self::ConfigNotFound { .. }
            | Self::ConfigParseError { .. }
            | Self::ConfigValidationError { .. }
            | Self::UnknownTool { .. } => FailureKind::Configuration,
            Self::Io(_) | Self::Other(_) => FailureKind::Io,
        }
    }
}

fn describe_comparison(comparison: &RangeCheck) -> &'static str {
    match comparison {
        RangeCheck::BelowMin => "below the minimum",
        RangeCheck::AboveMax => "above the maximum",
        RangeCheck::InRange => "in range",
        RangeCheck::NotEvaluated => "not evaluated",
    }
}

/// Result type alias for toolprobe operations.
pub type Result<T> = std::result::Result<T, ToolprobeError>;
