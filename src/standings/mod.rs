// Standings pipeline: sheet -> extraction -> ranking / stage series

pub mod extractor;
pub mod ranking;
pub mod series;

pub use extractor::*;
pub use ranking::*;
pub use series::*;
