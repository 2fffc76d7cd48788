pub mod output;

pub use output::TitlePrinter;

// ✅ Макросы условного логирования, чтобы не форматировать trace-сообщения зря
#[macro_export]
macro_rules! trace_if_enabled {
    ($($arg:tt)*) => {
        if tracing::enabled!(tracing::Level::TRACE) {
            tracing::trace!($($arg)*);
        }
    };
}
