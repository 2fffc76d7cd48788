use crate::config::Config;
use crate::error::{Result, XwindowError};
use crate::events::property::{NET_ACTIVE_WINDOW, NET_WM_NAME, UTF8_STRING};
use crate::events::{Atoms, PropertyChange, TrackedProperty, WindowEvent, WindowHandle, WINDOW_NONE};
use crate::services::{ActiveWindowLocator, ProtocolClient, StopSignal, TitleResolver};
use crate::trace_if_enabled;
use crate::utils::TitlePrinter;
use std::io::Write;
use std::time::Duration;
use tracing::{debug, info};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrackerState {
    Init,
    Running,
    Stopping,
    Stopped,
}

/// Отслеживает активное окно и печатает его заголовок.
///
/// В режиме follow держит подписку на изменения свойств корневого окна и
/// текущего активного окна. При смене фокуса подписка с прежнего окна снимается
/// до того, как ставится на новое.
pub struct Tracker<'a, C: ProtocolClient, W: Write> {
    client: &'a mut C,
    config: &'a Config,
    printer: TitlePrinter<W>,
    locator: ActiveWindowLocator,
    resolver: TitleResolver,
    atoms: Atoms,
    root: WindowHandle,
    active: WindowHandle,
    title: Vec<u8>,
    state: TrackerState,
}

impl<'a, C: ProtocolClient, W: Write> Tracker<'a, C, W> {
    /// Разрешить атомы, найти корневое и активное окно и напечатать заголовок
    pub fn init(client: &'a mut C, config: &'a Config, out: W) -> Result<Self> {
        let atoms = Atoms {
            net_active_window: client.resolve_atom(NET_ACTIVE_WINDOW)?,
            net_wm_name: client.resolve_atom(NET_WM_NAME)?,
            utf8_string: client.resolve_atom(UTF8_STRING)?,
        };

        let root = client.root_window();
        if root == WINDOW_NONE {
            return Err(XwindowError::RootWindowNotFound);
        }
        debug!(
            "Корневое окно 0x{:x}, лимит заголовка {} + {} байт суффикса",
            root,
            config.max_title_length,
            config.suffix_length()
        );

        let mut tracker = Self {
            client,
            config,
            printer: TitlePrinter::new(out, config.ignore_empty_title),
            locator: ActiveWindowLocator::new(&atoms),
            resolver: TitleResolver::new(&atoms, config),
            atoms,
            root,
            active: WINDOW_NONE,
            title: Vec::new(),
            state: TrackerState::Init,
        };

        tracker.active = tracker.locator.locate(&mut *tracker.client, root)?;
        tracker.print_title()?;

        Ok(tracker)
    }

    #[allow(dead_code)]
    pub fn state(&self) -> TrackerState {
        self.state
    }

    #[allow(dead_code)]
    pub fn active_window(&self) -> WindowHandle {
        self.active
    }

    /// В режиме single сразу завершается; в режиме follow работает до запроса остановки
    pub async fn run(mut self, stop: &StopSignal) -> Result<()> {
        if !self.config.is_follow() {
            self.transition(TrackerState::Stopped);
            return Ok(());
        }

        self.transition(TrackerState::Running);
        self.client.set_interest(self.root, true);
        self.subscribe_active();

        let poll_interval = self.config.poll_interval();
        let result = self.follow(stop, poll_interval).await;

        // Подписки снимаются и при ошибке
        self.transition(TrackerState::Stopping);
        self.unsubscribe_active();
        self.client.set_interest(self.root, false);
        self.transition(TrackerState::Stopped);

        result
    }

    async fn follow(&mut self, stop: &StopSignal, poll_interval: Duration) -> Result<()> {
        info!("Отслеживание активного окна запущено");

        while !stop.is_requested() {
            match self.client.poll_event()? {
                Some(event) => {
                    self.handle_event(event)?;
                    // Даём отработать обработчику сигналов и драйверу рантайма
                    // даже при непрерывном потоке событий
                    tokio::task::yield_now().await;
                }
                None => tokio::time::sleep(poll_interval).await,
            }
        }

        info!("Получен запрос остановки, завершаем отслеживание");
        Ok(())
    }

    /// Обработать одно событие в порядке доставки сервером
    pub fn handle_event(&mut self, event: WindowEvent) -> Result<()> {
        let WindowEvent::PropertyChanged(change) = event else {
            trace_if_enabled!("Пропущено событие без изменения свойства");
            return Ok(());
        };

        match self.atoms.classify(change.atom) {
            Some(TrackedProperty::ActiveWindow) => self.switch_active_window(),
            Some(TrackedProperty::Title) => self.title_changed(change),
            None => {
                trace_if_enabled!("Пропущено изменение постороннего свойства: {}", change);
                Ok(())
            }
        }
    }

    fn switch_active_window(&mut self) -> Result<()> {
        self.unsubscribe_active();
        self.active = self.locator.locate(&mut *self.client, self.root)?;
        self.subscribe_active();
        self.print_title()
    }

    fn title_changed(&mut self, change: PropertyChange) -> Result<()> {
        // Уведомление могло прийти от окна, которое только что потеряло фокус
        if change.window != self.active {
            trace_if_enabled!("Пропущено устаревшее уведомление: {}", change);
            return Ok(());
        }
        self.print_title()
    }

    fn print_title(&mut self) -> Result<()> {
        self.resolver
            .resolve_into(&mut *self.client, self.active, &mut self.title)?;
        if !self.printer.print(&self.title)? {
            trace_if_enabled!("Пустой заголовок окна 0x{:x} не напечатан", self.active);
        }
        Ok(())
    }

    fn tracks_active_separately(&self) -> bool {
        self.active != WINDOW_NONE && self.active != self.root
    }

    fn subscribe_active(&mut self) {
        if self.tracks_active_separately() {
            debug!("Подписка на окно 0x{:x}", self.active);
            self.client.set_interest(self.active, true);
        }
    }

    fn unsubscribe_active(&mut self) {
        if self.tracks_active_separately() {
            debug!("Отписка от окна 0x{:x}", self.active);
            self.client.set_interest(self.active, false);
        }
    }

    fn transition(&mut self, next: TrackerState) {
        debug!("Трекер: {:?} -> {:?}", self.state, next);
        self.state = next;
    }
}
