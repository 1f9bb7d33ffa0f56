mod boundary;
mod culling;
mod indexed_mesh;
mod mesh_generators;
#[cfg(feature = "parallel")]
mod par_intersect;
mod scenarios;
#[cfg(feature = "wavefront")]
mod wavefront;
