//! Small linear algebra kit used by every stage of the pipeline.
//!
//! Conventions follow fixed-function OpenGL: right-handed world space, the
//! camera looks down `-Z`, column vectors multiplied on the right, and clip
//! space depth in `[-w, w]`.

pub mod mat4;
pub mod vec3;
pub mod vec4;

pub use mat4::Mat4;
pub use vec3::Vec3;
pub use vec4::Vec4;
