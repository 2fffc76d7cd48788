use crate::error::Result;
use crate::events::{PropertyValue, WindowEvent, WindowHandle, WINDOW_NONE};
use tracing::{debug, info, trace};
use x11rb::connection::Connection;
use x11rb::errors::ReplyError;
use x11rb::protocol::xproto::{ChangeWindowAttributesAux, ConnectionExt, EventMask};
use x11rb::protocol::Event;
use x11rb::rust_connection::RustConnection;

use super::r#trait::ProtocolClient;

/// Клиент X11 поверх x11rb. Соединение закрывается при drop.
pub struct X11Client {
    conn: RustConnection,
    root: WindowHandle,
}

impl X11Client {
    /// Подключиться к дисплею из `$DISPLAY`
    pub fn connect() -> Result<Self> {
        let (conn, screen_num) = x11rb::connect(None)?;

        let root = conn
            .setup()
            .roots
            .get(screen_num)
            .map(|screen| screen.root)
            .unwrap_or(WINDOW_NONE);

        info!("Подключено к X-серверу, экран {}, корневое окно 0x{:x}", screen_num, root);

        Ok(Self { conn, root })
    }
}

impl ProtocolClient for X11Client {
    fn resolve_atom(&mut self, name: &str) -> Result<u32> {
        let reply = self
            .conn
            .intern_atom(true, name.as_bytes())?
            .reply()
            .map_err(|e| {
                debug!("InternAtom {} завершился ошибкой: {}", name, e);
                crate::xwindow_error!(atom, "{}", name)
            })?;

        if reply.atom == x11rb::NONE {
            return Err(crate::xwindow_error!(atom, "{}", name));
        }

        debug!("Атом {} = {}", name, reply.atom);
        Ok(reply.atom)
    }

    fn root_window(&self) -> WindowHandle {
        self.root
    }

    fn get_property(
        &mut self,
        window: WindowHandle,
        property: u32,
        property_type: u32,
        max_length: usize,
    ) -> Result<PropertyValue> {
        // Сервер считает длину в 32-битных словах
        let long_length = u32::try_from(max_length.div_ceil(4)).unwrap_or(u32::MAX);

        let cookie = self
            .conn
            .get_property(false, window, property, property_type, 0, long_length)?;

        match cookie.reply() {
            Ok(reply) => Ok(PropertyValue::new(reply.format, reply.value, reply.bytes_after)),
            Err(ReplyError::X11Error(e)) => {
                trace!("Свойство {} окна 0x{:x} недоступно: {:?}", property, window, e.error_kind);
                Ok(PropertyValue::absent())
            }
            Err(ReplyError::ConnectionError(e)) => Err(e.into()),
        }
    }

    fn set_interest(&mut self, window: WindowHandle, interested: bool) {
        let mask = if interested {
            EventMask::PROPERTY_CHANGE
        } else {
            EventMask::NO_EVENT
        };
        let aux = ChangeWindowAttributesAux::new().event_mask(mask);

        match self.conn.change_window_attributes(window, &aux) {
            Ok(cookie) => cookie.ignore_error(),
            Err(e) => {
                debug!("Не удалось изменить маску событий окна 0x{:x}: {}", window, e);
                return;
            }
        }

        if let Err(e) = self.conn.flush() {
            debug!("Не удалось отправить запрос для окна 0x{:x}: {}", window, e);
        }
    }

    fn poll_event(&mut self) -> Result<Option<WindowEvent>> {
        let event = match self.conn.poll_for_event()? {
            Some(Event::PropertyNotify(notify)) => {
                WindowEvent::property_changed(notify.window, notify.atom)
            }
            Some(Event::Error(e)) => {
                trace!("Асинхронная ошибка протокола: {:?}", e.error_kind);
                WindowEvent::Other
            }
            Some(_) => WindowEvent::Other,
            None => return Ok(None),
        };

        Ok(Some(event))
    }
}
