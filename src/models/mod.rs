pub mod event;
pub mod result;

pub use event::TabSwitchEvent;
pub use result::{NavigationDetails, PageSnapshot, SuspicionResult};
