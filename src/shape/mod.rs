//! Shapes indexed by the BVH, and the accessors the BVH reads them through.

pub use self::triangle::Triangle;
pub use self::triangle_soup::TriangleSoup;
pub use self::triangle_source::TriangleSource;

mod triangle;
mod triangle_soup;
mod triangle_source;
