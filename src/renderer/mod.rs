//! WebGPU rendering module
//!
//! A single vertex-quad pipeline: the board is retessellated into colored
//! triangles every frame from the current game snapshot.

pub mod pipeline;
pub mod shapes;
pub mod vertex;

pub use pipeline::RenderState;
pub use shapes::board_vertices;
pub use vertex::Vertex;
