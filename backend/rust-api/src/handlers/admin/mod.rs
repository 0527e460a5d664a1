mod contests;
mod events;
mod forum;

pub use contests::*;
pub use events::*;
pub use forum::*;
