//! Per-compilation mutable state.

use std::{
    collections::{HashMap, HashSet},
    time::{SystemTime, UNIX_EPOCH},
};

use log::trace;

use scenic_core::{
    geometry::{BBox, Grid},
    scene::Stamp,
    semantic::{Common, Diagram},
    style::{self, Style, StylePresets},
};

use super::RenderError;

/// State threaded through every renderer call of one compilation.
///
/// A single counter, starting at 1, drives generated ids, seeds and
/// synthetic timestamps. The context is created per compilation and never
/// shared.
#[derive(Debug)]
pub(crate) struct RenderContext<'a> {
    counter: u64,
    start_time: i64,
    grid: Grid,
    presets: &'a StylePresets,
    fit_text: bool,
    ids: HashSet<String>,
    bboxes: HashMap<String, BBox>,
}

impl<'a> RenderContext<'a> {
    /// Create a context for `diagram`.
    ///
    /// `start_time` (milliseconds since the Unix epoch) freezes the
    /// timestamp base; `None` captures the wall clock once.
    pub(crate) fn new(diagram: &'a Diagram, start_time: Option<i64>) -> Self {
        Self {
            counter: 1,
            start_time: start_time.unwrap_or_else(now_millis),
            grid: Grid::new(diagram.grid()),
            presets: diagram.styles(),
            fit_text: diagram.fit_text(),
            ids: HashSet::new(),
            bboxes: HashMap::new(),
        }
    }

    pub(crate) fn grid(&self) -> Grid {
        self.grid
    }

    pub(crate) fn fit_text(&self) -> bool {
        self.fit_text
    }

    /// Returns the explicit id, or generates `{prefix}-{counter}`.
    ///
    /// Either way the id is claimed for this compilation.
    ///
    /// # Errors
    ///
    /// Returns [`RenderError::DuplicateId`] if the id is already claimed.
    pub(crate) fn resolve_id(
        &mut self,
        common: &Common,
        prefix: &str,
    ) -> Result<String, RenderError> {
        let id = match &common.id {
            Some(id) => id.clone(),
            None => {
                let id = format!("{prefix}-{}", self.counter);
                self.counter += 1;
                id
            }
        };

        if !self.ids.insert(id.clone()) {
            return Err(RenderError::DuplicateId { id });
        }
        Ok(id)
    }

    /// Resolves the style cascade for the element `id`.
    pub(crate) fn resolve_style(
        &self,
        base: &Style,
        common: &Common,
        id: &str,
    ) -> Result<Style, RenderError> {
        style::resolve(
            base,
            common.style.as_deref(),
            common.style_overrides.as_ref(),
            self.presets,
        )
        .map_err(|err| RenderError::UnknownStylePreset {
            element: id.to_string(),
            preset: err.0,
        })
    }

    /// Seed, version nonce and timestamp for the next element.
    ///
    /// Seed and nonce read the counter; the timestamp then advances it, so
    /// no two stamps of one compilation share a seed.
    pub(crate) fn stamp(&mut self) -> Stamp {
        let stamp = Stamp {
            seed: self.counter,
            version_nonce: self.counter + 100,
            updated: self.start_time.saturating_add_unsigned(self.counter),
        };
        self.counter += 1;
        stamp
    }

    /// Records the bounding box of a shape or text element.
    pub(crate) fn register(&mut self, id: &str, bbox: BBox) {
        trace!(id, x = bbox.x(), y = bbox.y(), w = bbox.width(), h = bbox.height(); "Registered bbox");
        self.bboxes.insert(id.to_string(), bbox);
    }

    pub(crate) fn lookup(&self, id: &str) -> Option<BBox> {
        self.bboxes.get(id).copied()
    }
}

fn now_millis() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| i64::try_from(elapsed.as_millis()).unwrap_or(i64::MAX))
        .unwrap_or_default()
}
