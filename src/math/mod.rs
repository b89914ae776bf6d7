//! Hand-written linear algebra used by the pipeline.
//!
//! Everything is `f32` and uses column vectors (`Mat4 * v`).

pub mod mat4;
pub mod vec3;
pub mod vec4;
