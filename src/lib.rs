pub mod gif;
pub mod render;
pub mod robot;
pub mod simulation;

pub mod prelude {
    pub use crate::gif::*;
    pub use crate::render::*;
    pub use crate::robot::*;
    pub use crate::simulation::*;
}
