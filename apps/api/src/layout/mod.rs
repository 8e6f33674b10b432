// Paged preview layout: A4 page geometry and the fragment pagination pass.
// The pass is a pure function over measured rectangles; measuring and applying margins
// belongs to whatever renders the preview.

pub mod geometry;
pub mod handlers;
pub mod paginator;

pub use geometry::PageGeometry;
pub use paginator::{compute_spacing, FragmentBox, PaginationOutcome};
