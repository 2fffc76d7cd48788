use std::fmt;

/// Идентификатор окна, назначенный сервером
pub type WindowHandle = u32;

/// Сентинел "окна нет"
pub const WINDOW_NONE: WindowHandle = 0;

/// Событие, полученное из соединения с сервером
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WindowEvent {
    /// У окна изменилось свойство
    PropertyChanged(PropertyChange),
    /// Любое другое событие или асинхронная ошибка протокола
    Other,
}

impl WindowEvent {
    pub fn property_changed(window: WindowHandle, atom: u32) -> Self {
        Self::PropertyChanged(PropertyChange { window, atom })
    }
}

/// Уведомление об изменении свойства окна
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PropertyChange {
    pub window: WindowHandle,
    pub atom: u32,
}

impl fmt::Display for PropertyChange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "окно 0x{:x}, атом {}", self.window, self.atom)
    }
}
