//! Сценарный клиент для тестов: хранит свойства в памяти, отдаёт заранее
//! заданные события и записывает все изменения подписок.

use crate::error::Result;
use crate::events::property::{NET_ACTIVE_WINDOW, NET_WM_NAME, UTF8_STRING};
use crate::events::{PropertyValue, WindowEvent, WindowHandle};
use crate::services::StopSignal;
use std::collections::{HashMap, HashSet, VecDeque};

use super::r#trait::ProtocolClient;

pub const ROOT: WindowHandle = 0x100;
pub const ACTIVE_WINDOW_ATOM: u32 = 301;
pub const TITLE_ATOM: u32 = 302;
pub const UTF8_ATOM: u32 = 303;
pub const OTHER_ATOM: u32 = 399;

/// Шаг сценария, выполняемый при очередном опросе
#[derive(Debug, Clone)]
pub enum Step {
    /// Изменить свойство без уведомления
    SetProperty(WindowHandle, u32, u8, Vec<u8>),
    /// Доставить событие
    Deliver(WindowEvent),
}

pub struct FakeClient {
    root: WindowHandle,
    atoms: HashMap<String, u32>,
    properties: HashMap<(WindowHandle, u32), (u8, Vec<u8>)>,
    script: VecDeque<Step>,
    stop_when_drained: Option<StopSignal>,
    stop_after: Option<(usize, StopSignal)>,
    delivered: usize,
    /// Все вызовы `set_interest` в порядке поступления
    pub interest_calls: Vec<(WindowHandle, bool)>,
    pub subscribed: HashSet<WindowHandle>,
}

impl FakeClient {
    pub fn new() -> Self {
        let atoms = [
            (NET_ACTIVE_WINDOW, ACTIVE_WINDOW_ATOM),
            (NET_WM_NAME, TITLE_ATOM),
            (UTF8_STRING, UTF8_ATOM),
        ]
        .into_iter()
        .map(|(name, atom)| (name.to_string(), atom))
        .collect();

        Self {
            root: ROOT,
            atoms,
            properties: HashMap::new(),
            script: VecDeque::new(),
            stop_when_drained: None,
            stop_after: None,
            delivered: 0,
            interest_calls: Vec::new(),
            subscribed: HashSet::new(),
        }
    }

    pub fn with_root(mut self, root: WindowHandle) -> Self {
        self.root = root;
        self
    }

    pub fn without_atom(mut self, name: &str) -> Self {
        self.atoms.remove(name);
        self
    }

    pub fn with_active_window(mut self, window: WindowHandle) -> Self {
        self.properties
            .insert((self.root, ACTIVE_WINDOW_ATOM), (32, window.to_ne_bytes().to_vec()));
        self
    }

    pub fn with_title(mut self, window: WindowHandle, title: &str) -> Self {
        self.properties
            .insert((window, TITLE_ATOM), (8, title.as_bytes().to_vec()));
        self
    }

    pub fn with_raw_property(mut self, window: WindowHandle, atom: u32, format: u8, value: Vec<u8>) -> Self {
        self.properties.insert((window, atom), (format, value));
        self
    }

    /// Сменить активное окно и доставить уведомление на корневом окне
    pub fn focus(mut self, window: WindowHandle) -> Self {
        self.script.push_back(Step::SetProperty(
            self.root,
            ACTIVE_WINDOW_ATOM,
            32,
            window.to_ne_bytes().to_vec(),
        ));
        self.script
            .push_back(Step::Deliver(WindowEvent::property_changed(self.root, ACTIVE_WINDOW_ATOM)));
        self
    }

    /// Сменить заголовок окна и доставить уведомление
    pub fn retitle(mut self, window: WindowHandle, title: &str) -> Self {
        self.script
            .push_back(Step::SetProperty(window, TITLE_ATOM, 8, title.as_bytes().to_vec()));
        self.script
            .push_back(Step::Deliver(WindowEvent::property_changed(window, TITLE_ATOM)));
        self
    }

    pub fn deliver(mut self, event: WindowEvent) -> Self {
        self.script.push_back(Step::Deliver(event));
        self
    }

    /// Запросить остановку, когда сценарий закончится
    pub fn stop_when_drained(mut self, stop: StopSignal) -> Self {
        self.stop_when_drained = Some(stop);
        self
    }

    /// Запросить остановку в момент доставки `events`-го события
    pub fn stop_after(mut self, events: usize, stop: StopSignal) -> Self {
        self.stop_after = Some((events, stop));
        self
    }

    /// Шаги сценария, до которых опрос ещё не дошёл
    pub fn pending_steps(&self) -> usize {
        self.script.len()
    }

    pub fn subscribe_count(&self) -> usize {
        self.interest_calls.iter().filter(|(_, on)| *on).count()
    }
}

impl ProtocolClient for FakeClient {
    fn resolve_atom(&mut self, name: &str) -> Result<u32> {
        self.atoms
            .get(name)
            .copied()
            .ok_or_else(|| crate::xwindow_error!(atom, "{}", name))
    }

    fn root_window(&self) -> WindowHandle {
        self.root
    }

    fn get_property(
        &mut self,
        window: WindowHandle,
        property: u32,
        _property_type: u32,
        max_length: usize,
    ) -> Result<PropertyValue> {
        let Some((format, stored)) = self.properties.get(&(window, property)) else {
            return Ok(PropertyValue::absent());
        };

        // Как и сервер, отдаём целые 32-битные слова
        let fetched = (max_length.div_ceil(4) * 4).min(stored.len());
        let bytes_after = (stored.len() - fetched) as u32;
        Ok(PropertyValue::new(*format, stored[..fetched].to_vec(), bytes_after))
    }

    fn set_interest(&mut self, window: WindowHandle, interested: bool) {
        self.interest_calls.push((window, interested));
        if interested {
            self.subscribed.insert(window);
        } else {
            self.subscribed.remove(&window);
        }
    }

    fn poll_event(&mut self) -> Result<Option<WindowEvent>> {
        while let Some(step) = self.script.pop_front() {
            match step {
                Step::SetProperty(window, atom, format, value) => {
                    self.properties.insert((window, atom), (format, value));
                }
                Step::Deliver(event) => {
                    self.delivered += 1;
                    if let Some((events, stop)) = &self.stop_after {
                        if self.delivered == *events {
                            stop.request();
                        }
                    }
                    return Ok(Some(event));
                }
            }
        }

        if let Some(stop) = &self.stop_when_drained {
            stop.request();
        }
        Ok(None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fake_reads_whole_words() {
        let mut client = FakeClient::new().with_title(7, "HelloWorld");

        let value = client.get_property(7, TITLE_ATOM, UTF8_ATOM, 5).unwrap();
        assert_eq!(value.value, b"HelloWor");
        assert_eq!(value.bytes_after, 2);

        let value = client.get_property(7, TITLE_ATOM, UTF8_ATOM, 60).unwrap();
        assert_eq!(value.value, b"HelloWorld");
        assert_eq!(value.bytes_after, 0);
    }

    #[test]
    fn test_fake_script_applies_properties_before_event() {
        let mut client = FakeClient::new().with_active_window(1).focus(2);

        let event = client.poll_event().unwrap();
        assert_eq!(
            event,
            Some(WindowEvent::property_changed(ROOT, ACTIVE_WINDOW_ATOM))
        );
        let value = client
            .get_property(ROOT, ACTIVE_WINDOW_ATOM, 0, 4)
            .unwrap();
        assert_eq!(value.format, 32);
        assert_eq!(value.value, 2u32.to_ne_bytes());
        assert_eq!(client.poll_event().unwrap(), None);
    }

    #[test]
    fn test_fake_requests_stop_when_drained() {
        let stop = StopSignal::new();
        let mut client = FakeClient::new()
            .deliver(WindowEvent::Other)
            .stop_when_drained(stop.clone());

        assert_eq!(client.poll_event().unwrap(), Some(WindowEvent::Other));
        assert!(!stop.is_requested());
        assert_eq!(client.poll_event().unwrap(), None);
        assert!(stop.is_requested());
    }

    #[test]
    fn test_fake_requests_stop_at_nth_event() {
        let stop = StopSignal::new();
        let mut client = FakeClient::new()
            .deliver(WindowEvent::Other)
            .deliver(WindowEvent::Other)
            .deliver(WindowEvent::Other)
            .stop_after(2, stop.clone());

        client.poll_event().unwrap();
        assert!(!stop.is_requested());
        client.poll_event().unwrap();
        assert!(stop.is_requested());
        assert_eq!(client.pending_steps(), 1);
    }
}
