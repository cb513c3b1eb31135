pub mod grid;
pub mod types;

pub use grid::BoardGeometry;
pub use types::GameStatus;
