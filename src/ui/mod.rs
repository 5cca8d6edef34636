mod progress;
mod style;

pub use progress::RowProgress;
pub use style::Style;
