//! Export of the indexed geometry, for debugging.

mod wavefront;
