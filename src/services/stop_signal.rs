use crate::error::Result;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tokio::signal::unix::{signal, SignalKind};
use tracing::info;

/// Флаг кооперативной остановки: выставляется один раз обработчиком сигнала,
/// проверяется циклом отслеживания на каждой итерации.
#[derive(Debug, Clone, Default)]
pub struct StopSignal {
    requested: Arc<AtomicBool>,
}

impl StopSignal {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn request(&self) {
        self.requested.store(true, Ordering::SeqCst);
    }

    pub fn is_requested(&self) -> bool {
        self.requested.load(Ordering::SeqCst)
    }

    /// Установить обработчики SIGINT и SIGTERM. Обработчик только выставляет флаг.
    pub fn listen_for_termination(&self) -> Result<()> {
        let mut interrupt = signal(SignalKind::interrupt())?;
        let mut terminate = signal(SignalKind::terminate())?;
        let stop = self.clone();

        tokio::spawn(async move {
            tokio::select! {
                _ = interrupt.recv() => info!("Получен сигнал завершения (SIGINT)"),
                _ = terminate.recv() => info!("Получен сигнал завершения (SIGTERM)"),
            }
            stop.request();
        });

        Ok(())
    }
}
