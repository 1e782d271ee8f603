pub mod card;
pub mod category;
pub mod program;

pub use card::*;
pub use category::*;
pub use program::*;
