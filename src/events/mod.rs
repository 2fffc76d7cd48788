pub mod property;
pub mod window;

pub use property::{Atoms, PropertyValue, TrackedProperty};
pub use window::{PropertyChange, WindowEvent, WindowHandle, WINDOW_NONE};
