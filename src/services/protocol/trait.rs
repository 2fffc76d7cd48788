use crate::error::Result;
use crate::events::{PropertyValue, WindowEvent, WindowHandle};

/// Примитивы оконного сервера, которые нужны трекеру
pub trait ProtocolClient {
    /// Получить атом по имени. Неизвестный серверу атом - фатальная ошибка.
    fn resolve_atom(&mut self, name: &str) -> Result<u32>;

    /// Корневое окно экрана (или `WINDOW_NONE`, если сервер его не сообщил)
    fn root_window(&self) -> WindowHandle;

    /// Прочитать до `max_length` байт свойства окна.
    /// Отсутствующее окно или свойство - пустое значение, а не ошибка.
    fn get_property(
        &mut self,
        window: WindowHandle,
        property: u32,
        property_type: u32,
        max_length: usize,
    ) -> Result<PropertyValue>;

    /// Включить или выключить уведомления об изменении свойств окна.
    /// Ошибки для уничтоженного окна игнорируются.
    fn set_interest(&mut self, window: WindowHandle, interested: bool);

    /// Неблокирующая выборка следующего события
    fn poll_event(&mut self) -> Result<Option<WindowEvent>>;
}
