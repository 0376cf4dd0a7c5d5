pub mod chart;
pub mod signals;
pub mod timeframe;

pub use chart::*;
pub use signals::*;
pub use timeframe::*;
