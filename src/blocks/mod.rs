pub mod filter;
pub mod fold;
pub mod print;
pub mod window;

pub use filter::{CombinePolicy, Filter, Predicate};
pub use fold::{median, Median, Sum};
pub use print::Print;
pub use window::{TumblingWindow, WindowState};
