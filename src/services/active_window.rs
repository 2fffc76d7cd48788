use crate::error::Result;
use crate::events::{Atoms, WindowHandle, WINDOW_NONE};
use crate::services::ProtocolClient;
use tracing::debug;
use x11rb::protocol::xproto::AtomEnum;

/// Читает `_NET_ACTIVE_WINDOW` с корневого окна
pub struct ActiveWindowLocator {
    active_window_atom: u32,
}

impl ActiveWindowLocator {
    pub fn new(atoms: &Atoms) -> Self {
        Self {
            active_window_atom: atoms.net_active_window,
        }
    }

    /// Текущее активное окно или `WINDOW_NONE`, если свойства нет или оно повреждено
    pub fn locate<C: ProtocolClient>(&self, client: &mut C, root: WindowHandle) -> Result<WindowHandle> {
        let property = client.get_property(
            root,
            self.active_window_atom,
            AtomEnum::WINDOW.into(),
            std::mem::size_of::<WindowHandle>(),
        )?;

        let window = property
            .value32()
            .and_then(|mut words| words.next())
            .unwrap_or(WINDOW_NONE);

        debug!("Активное окно: 0x{:x}", window);
        Ok(window)
    }
}
