pub mod camera;
pub mod mesh;
pub mod scene_object;
pub mod viewport;
