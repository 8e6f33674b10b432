//! Pagination — pushes fragments down so none ends inside a page's unsafe bottom zone.
//!
//! # Pass
//! Fragments are visited once, in document order. For each one the *live* position is
//! read (it already includes pushes given to earlier fragments in this pass):
//! - `page      = floor(top / stride)`
//! - `safe      = page × stride + page_height − bottom_buffer`
//! - if `bottom > safe`: push = `(page + 1) × stride + top_margin − top` (when positive)
//!
//! A pushed fragment lands exactly on the next page's content start. A fragment taller
//! than a page is still moved there and simply overflows; fragments are never split, so
//! callers should measure at paragraph / list-item granularity.
//!
//! The engine never touches a rendering tree. It talks to a `FragmentLayout`, which the
//! rendering side implements over real elements and `FlowLayout` implements in memory.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::layout::geometry::PageGeometry;

/// A measured fragment rectangle, relative to the document container.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FragmentBox {
    pub top_offset_px: f64,
    pub height_px: f64,
}

impl FragmentBox {
    pub fn new(top_offset_px: f64, height_px: f64) -> Self {
        Self {
            top_offset_px,
            height_px,
        }
    }

    pub fn bottom_px(&self) -> f64 {
        self.top_offset_px + self.height_px
    }
}

/// Live view of rendered fragments. Implementations must reflect spacing applied to a
/// fragment in the measurements of that fragment and every fragment after it.
pub trait FragmentLayout {
    fn fragment_count(&self) -> usize;

    /// Removes every extra top spacing applied by a previous pass.
    fn clear_spacing(&mut self);

    /// Current position of fragment `index`, including all spacing applied so far.
    fn measure(&self, index: usize) -> FragmentBox;

    fn apply_spacing(&mut self, index: usize, extra_top_px: f64);
}

/// Result of one pass.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PaginationOutcome {
    /// Per fragment, in input order. Always ≥ 0.
    pub extra_top_spacing_px: Vec<f64>,
    /// Pages spanned by the laid-out content (0 when there is nothing to lay out).
    pub page_count: usize,
    /// Fragments that received a non-zero push.
    pub pushed: usize,
}

/// How far `fragment` must move down to clear the unsafe zone of the page it starts on.
pub fn required_push(fragment: FragmentBox, geometry: &PageGeometry) -> f64 {
    let top = fragment.top_offset_px;
    let bottom = fragment.bottom_px();
    if !top.is_finite() || !bottom.is_finite() {
        return 0.0;
    }

    let page = geometry.page_index(top);
    if bottom <= geometry.safe_limit(page) {
        return 0.0;
    }

    let push = geometry.content_start(page + 1) - top;
    if push > 0.0 {
        push
    } else {
        0.0
    }
}

/// Runs a full pass over `layout`: clear, then measure → decide → apply per fragment.
pub fn paginate<L: FragmentLayout + ?Sized>(
    layout: &mut L,
    geometry: &PageGeometry,
) -> PaginationOutcome {
    let count = layout.fragment_count();
    layout.clear_spacing();

    let mut extra_top_spacing_px = Vec::with_capacity(count);
    let mut pushed = 0;
    let mut furthest_bottom: Option<f64> = None;

    for index in 0..count {
        let live = layout.measure(index);
        let push = required_push(live, geometry);

        if push > 0.0 {
            debug!(
                "Fragment {index} at {:.1}px (h={:.1}) pushed {:.1}px to next page",
                live.top_offset_px, live.height_px, push
            );
            layout.apply_spacing(index, push);
            pushed += 1;
        }
        extra_top_spacing_px.push(push);

        let bottom = live.bottom_px() + push;
        if bottom.is_finite() {
            furthest_bottom = Some(furthest_bottom.map_or(bottom, |b| b.max(bottom)));
        }
    }

    let page_count = furthest_bottom
        .map(|bottom| (geometry.page_index(bottom).max(0) + 1) as usize)
        .unwrap_or(0);

    PaginationOutcome {
        extra_top_spacing_px,
        page_count,
        pushed,
    }
}

// ────────────────────────────────────────────────────────────────────────────
// In-memory flow layout
// ────────────────────────────────────────────────────────────────────────────

/// Fragments stacked in normal flow: spacing on fragment `i` shifts `i` and everything
/// below it by the same amount.
#[derive(Debug, Clone)]
pub struct FlowLayout {
    boxes: Vec<FragmentBox>,
    spacing: Vec<f64>,
}

impl FlowLayout {
    /// `boxes` are positions measured with no extra spacing applied.
    pub fn new(boxes: Vec<FragmentBox>) -> Self {
        let spacing = vec![0.0; boxes.len()];
        Self { boxes, spacing }
    }

    #[cfg(test)]
    pub fn spacing(&self) -> &[f64] {
        &self.spacing
    }
}

impl FragmentLayout for FlowLayout {
    fn fragment_count(&self) -> usize {
        self.boxes.len()
    }

    fn clear_spacing(&mut self) {
        self.spacing.iter_mut().for_each(|s| *s = 0.0);
    }

    fn measure(&self, index: usize) -> FragmentBox {
        let shift: f64 = self.spacing[..=index].iter().sum();
        let base = self.boxes[index];
        FragmentBox::new(base.top_offset_px + shift, base.height_px)
    }

    fn apply_spacing(&mut self, index: usize, extra_top_px: f64) {
        self.spacing[index] = extra_top_px;
    }
}

/// Spacing for a snapshot of fragment boxes measured without any extra spacing.
pub fn compute_spacing(fragments: &[FragmentBox], geometry: &PageGeometry) -> PaginationOutcome {
    let mut layout = FlowLayout::new(fragments.to_vec());
    paginate(&mut layout, geometry)
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────
