pub mod courses;
pub mod docs;
pub mod evaluate;

pub use courses::*;
pub use docs::*;
pub use evaluate::*;
