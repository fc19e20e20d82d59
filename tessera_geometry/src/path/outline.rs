// Copyright 2025 the Tessera Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Lazily derived outline paths.
//!
//! Text and other content can produce an outline path, but doing so is expensive and
//! usually unnecessary. A [`LazyOutline`] holds the producer and runs it at most once, the
//! first time the outline is requested.

use std::fmt;
use std::sync::OnceLock;

use super::Path;
pub use crate::error::OutlineError;

/// Something that can derive an outline path on demand.
///
/// Return [`OutlineError::Unavailable`] when there is nothing to outline, and
/// [`OutlineError::Failed`] only for real failures.
pub trait OutlineProducer {
    /// Produces the outline.
    fn produce_outline(&self) -> Result<Path, OutlineError>;
}

impl<F> OutlineProducer for F
where
    F: Fn() -> Result<Path, OutlineError>,
{
    fn produce_outline(&self) -> Result<Path, OutlineError> {
        self()
    }
}

/// An outline path computed on first request and cached afterwards.
pub struct LazyOutline<P> {
    producer: P,
    outline: OnceLock<Result<Path, OutlineError>>,
}

impl<P: OutlineProducer> LazyOutline<P> {
    /// Wraps a producer without running it.
    pub fn new(producer: P) -> Self {
        Self {
            producer,
            outline: OnceLock::new(),
        }
    }

    /// The outline, produced on the first call.
    pub fn get(&self) -> Result<&Path, OutlineError> {
        self.outline
            .get_or_init(|| self.producer.produce_outline())
            .as_ref()
            .map_err(Clone::clone)
    }

    /// Returns `true` once the producer has run.
    pub fn is_resolved(&self) -> bool {
        self.outline.get().is_some()
    }
}

impl<P> fmt::Debug for LazyOutline<P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LazyOutline")
            .field("outline", &self.outline.get())
            .finish_non_exhaustive()
    }
}
