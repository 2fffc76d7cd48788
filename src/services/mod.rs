pub mod active_window;
pub mod protocol;
pub mod stop_signal;
pub mod title_resolver;
pub mod tracker;

pub use active_window::ActiveWindowLocator;
pub use protocol::{ProtocolClient, X11Client};
pub use stop_signal::StopSignal;
pub use title_resolver::TitleResolver;
pub use tracker::Tracker;
