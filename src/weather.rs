mod condition;
mod openweathermap;
mod refresh;
mod sample;
mod source;

pub use condition::*;
pub use openweathermap::*;
pub use refresh::*;
pub use sample::*;
pub use source::*;
