//! Protocol client: единственное место, которое разговаривает с оконным сервером.
//! Остальные сервисы видят только `ProtocolClient`, поэтому их можно тестировать
//! без живого X-сервера.

#[cfg(test)]
pub mod fake;
mod x11;
mod r#trait;

pub use self::r#trait::ProtocolClient;
pub use self::x11::X11Client;
