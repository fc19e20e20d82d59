// Copyright 2025 the Tessera Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Views over shared, append-only lists of painted rectangles.
//!
//! A [`PaintRegionRecorder`] collects the rects painted while walking a tree of layers.
//! Each subtree remembers where its rects start with [`PaintRegionRecorder::mark`] and,
//! once done, takes a [`PaintRegion`] spanning everything appended since. Regions share the
//! recorder's storage, so they stay valid after the recorder moves on.

use std::sync::{Arc, PoisonError, RwLock};

use crate::accumulation_rect::AccumulationRect;
use crate::rect::Rect;

type Storage = Arc<RwLock<Vec<Rect>>>;

/// Owns the shared rect storage and hands out [`PaintRegion`]s over it.
#[derive(Debug, Default)]
pub struct PaintRegionRecorder {
    rects: Storage,
}

impl PaintRegionRecorder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a painted rect.
    pub fn add_rect(&mut self, rect: Rect) {
        self.rects
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .push(rect);
    }

    /// The current end of the storage, to pass to [`PaintRegionRecorder::region_since`].
    pub fn mark(&self) -> usize {
        self.rects.read().unwrap_or_else(PoisonError::into_inner).len()
    }

    /// A region over every rect appended since `begin`.
    pub fn region_since(&self, begin: usize, has_readback: bool, has_texture: bool) -> PaintRegion {
        let end = self.mark();
        debug_assert!(begin <= end, "region begins past the end of the storage");
        PaintRegion {
            rects: Some(Arc::clone(&self.rects)),
            begin: begin.min(end),
            end,
            has_readback,
            has_texture,
        }
    }
}

/// An immutable range of a recorder's rects.
///
/// The default region is invalid: it has no storage and panics if its rects are read.
#[derive(Clone, Debug, Default)]
pub struct PaintRegion {
    rects: Option<Storage>,
    begin: usize,
    end: usize,
    has_readback: bool,
    has_texture: bool,
}

impl PaintRegion {
    /// Returns `false` for a default constructed region.
    pub fn is_valid(&self) -> bool {
        self.rects.is_some()
    }

    /// Returns `true` if the subtree reads back from the surface it paints on.
    pub fn has_readback(&self) -> bool {
        self.has_readback
    }

    /// Returns `true` if the subtree draws an external texture.
    pub fn has_texture(&self) -> bool {
        self.has_texture
    }

    pub fn len(&self) -> usize {
        self.end - self.begin
    }

    pub fn is_empty(&self) -> bool {
        self.begin == self.end
    }

    /// Copies out the rects of the region.
    ///
    /// # Panics
    ///
    /// Panics if the region is invalid.
    pub fn rects(&self) -> Vec<Rect> {
        let Some(storage) = &self.rects else {
            panic!("reading the rects of an invalid PaintRegion");
        };
        let rects = storage.read().unwrap_or_else(PoisonError::into_inner);
        rects[self.begin..self.end].to_vec()
    }

    /// The bounds of every rect in the region.
    ///
    /// # Panics
    ///
    /// Panics if the region is invalid.
    pub fn compute_bounds(&self) -> Rect {
        let mut acc = AccumulationRect::new();
        for rect in self.rects() {
            acc.accumulate_rect(&rect);
        }
        acc.bounds()
    }
}

#[cfg(test)]
mod tests {
    use super::{PaintRegion, PaintRegionRecorder};
    use crate::rect::Rect;

    #[test]
    fn regions_span_appended_rects() {
        let mut recorder = PaintRegionRecorder::new();
        recorder.add_rect(Rect::make_ltrb(0.0, 0.0, 1.0, 1.0));
        let begin = recorder.mark();
        recorder.add_rect(Rect::make_ltrb(10.0, 10.0, 20.0, 20.0));
        recorder.add_rect(Rect::make_ltrb(30.0, 5.0, 40.0, 15.0));
        let region = recorder.region_since(begin, true, false);

        // Later appends don't change existing regions.
        recorder.add_rect(Rect::make_ltrb(-50.0, -50.0, 0.0, 0.0));

        assert!(region.is_valid());
        assert!(region.has_readback());
        assert!(!region.has_texture());
        assert_eq!(region.len(), 2);
        assert_eq!(region.rects()[1], Rect::make_ltrb(30.0, 5.0, 40.0, 15.0));
        assert_eq!(region.compute_bounds(), Rect::make_ltrb(10.0, 5.0, 40.0, 20.0));
        assert_eq!(recorder.region_since(0, false, true).len(), 4);
    }

    #[test]
    fn empty_region() {
        let recorder = PaintRegionRecorder::new();
        let region = recorder.region_since(recorder.mark(), false, false);
        assert!(region.is_valid());
        assert!(region.is_empty());
        assert_eq!(region.compute_bounds(), Rect::ZERO);
    }

    #[test]
    #[should_panic(expected = "invalid PaintRegion")]
    fn default_region_is_invalid() {
        let region = PaintRegion::default();
        assert!(!region.is_valid());
        let _ = region.rects();
    }
}
