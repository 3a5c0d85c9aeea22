pub mod canvas;
pub mod connections;
pub mod overlay;

pub use canvas::BufferCanvas;
pub use connections::DrawStyle;
pub use overlay::{draw_frame, DrawPrimitives};
