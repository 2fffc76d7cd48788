/// Имена атомов, которые нужны трекеру
pub const NET_ACTIVE_WINDOW: &str = "_NET_ACTIVE_WINDOW";
pub const NET_WM_NAME: &str = "_NET_WM_NAME";
pub const UTF8_STRING: &str = "UTF8_STRING";

/// Атомы, полученные один раз при старте и неизменные до конца работы
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Atoms {
    pub net_active_window: u32,
    pub net_wm_name: u32,
    pub utf8_string: u32,
}

/// Свойство, за изменениями которого следит трекер
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrackedProperty {
    ActiveWindow,
    Title,
}

impl Atoms {
    pub fn classify(&self, atom: u32) -> Option<TrackedProperty> {
        if atom == self.net_active_window {
            Some(TrackedProperty::ActiveWindow)
        } else if atom == self.net_wm_name {
            Some(TrackedProperty::Title)
        } else {
            None
        }
    }
}

/// Результат чтения свойства: полученные байты, их формат (8/16/32 бита)
/// и сколько байт осталось на сервере
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PropertyValue {
    pub format: u8,
    pub value: Vec<u8>,
    pub bytes_after: u32,
}

impl PropertyValue {
    pub fn new(format: u8, value: Vec<u8>, bytes_after: u32) -> Self {
        Self {
            format,
            value,
            bytes_after,
        }
    }

    /// Пустое значение для отсутствующего окна или свойства
    pub fn absent() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.value.is_empty()
    }

    /// Значение как 32-битные слова, как `GetPropertyReply::value32()` в x11rb.
    /// `None`, если формат свойства не 32.
    pub fn value32(&self) -> Option<impl Iterator<Item = u32> + '_> {
        if self.format != 32 {
            return None;
        }
        Some(
            self.value
                .chunks_exact(4)
                .map(|word| u32::from_ne_bytes([word[0], word[1], word[2], word[3]])),
        )
    }
}
