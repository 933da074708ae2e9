pub mod pair;
pub mod symbols;
pub mod util;
pub mod verify;

pub use pair::*;
pub use symbols::*;
pub use util::*;
pub use verify::*;
