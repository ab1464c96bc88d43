// Copyright 2025 the VizIR Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use pie_charts::DataError;

/// Errors surfaced by the rendering pipeline.
///
/// Everything arc- or label-local is absorbed by the renderer; only failures that leave no
/// usable frame reach the caller.
#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    /// The backing surface could not be allocated at the requested pixel size.
    #[error("cannot allocate a {width}x{height} surface")]
    SurfaceUnavailable {
        /// Requested width in device pixels.
        width: u32,
        /// Requested height in device pixels.
        height: u32,
    },
    /// A record was rejected under [`pie_charts::InvalidDataPolicy::Abort`].
    #[error("invalid data: {0}")]
    Data(#[from] DataError),
    /// Font bytes could not be parsed.
    #[error("cannot load font: {0}")]
    Font(String),
    /// PNG encoding failed.
    #[error("png encoding failed: {0}")]
    Png(String),
}
