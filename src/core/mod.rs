pub mod color;
pub mod constants;
pub mod engine;
pub mod offline;
pub mod palette;
pub mod particles;
pub mod schedule;
pub mod store;

pub use color::*;
pub use engine::*;
pub use palette::*;
pub use particles::*;
pub use schedule::*;
pub use store::*;
