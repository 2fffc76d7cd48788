use thiserror::Error;

#[derive(Error, Debug)]
pub enum XwindowError {
    #[error("Не удалось подключиться к дисплею: {0}")]
    Connect(#[from] x11rb::errors::ConnectError),

    #[error("Соединение с X-сервером потеряно: {0}")]
    Connection(#[from] x11rb::errors::ConnectionError),

    #[error("Ошибка ответа X-сервера: {0}")]
    Reply(#[from] x11rb::errors::ReplyError),

    #[error("Ошибка ввода-вывода: {0}")]
    Io(#[from] std::io::Error),

    #[error("Не удалось получить атом {0}")]
    AtomResolution(String),

    #[error("Корневое окно не найдено")]
    RootWindowNotFound,
}

pub type Result<T> = std::result::Result<T, XwindowError>;

#[macro_export]
macro_rules! xwindow_error {
    (atom, $($arg:tt)*) => {
        $crate::error::XwindowError::AtomResolution(format!($($arg)*))
    };
}
