use crate::config::Config;
use crate::error::Result;
use crate::events::{Atoms, PropertyValue, WindowHandle, WINDOW_NONE};
use crate::services::ProtocolClient;
use tracing::debug;

/// Читает `_NET_WM_NAME` и применяет политику усечения.
///
/// Усечение побайтовое: заголовок длиннее `max_title_length` байт обрезается
/// ровно до `max_title_length` байт, после чего дописывается суффикс.
/// Многобайтовый символ на границе может оказаться разрезан.
pub struct TitleResolver {
    title_atom: u32,
    utf8_atom: u32,
    max_title_length: usize,
    suffix: Vec<u8>,
}

impl TitleResolver {
    pub fn new(atoms: &Atoms, config: &Config) -> Self {
        Self {
            title_atom: atoms.net_wm_name,
            utf8_atom: atoms.utf8_string,
            max_title_length: config.max_title_length,
            suffix: config.suffix.as_bytes().to_vec(),
        }
    }

    /// Записать готовый к печати заголовок окна в `buf`, затирая прежнее содержимое
    pub fn resolve_into<C: ProtocolClient>(
        &self,
        client: &mut C,
        window: WindowHandle,
        buf: &mut Vec<u8>,
    ) -> Result<()> {
        buf.clear();

        if window == WINDOW_NONE {
            return Ok(());
        }

        let property = client.get_property(
            window,
            self.title_atom,
            self.utf8_atom,
            self.max_title_length,
        )?;
        self.truncate_into(&property, buf);

        debug!(
            "Заголовок окна 0x{:x}: {:?}",
            window,
            String::from_utf8_lossy(buf)
        );
        Ok(())
    }

    #[allow(dead_code)]
    pub fn resolve<C: ProtocolClient>(&self, client: &mut C, window: WindowHandle) -> Result<Vec<u8>> {
        let mut buf = Vec::new();
        self.resolve_into(client, window, &mut buf)?;
        Ok(buf)
    }

    fn truncate_into(&self, property: &PropertyValue, buf: &mut Vec<u8>) {
        if property.is_empty() {
            return;
        }

        let raw = &property.value;
        if raw.len() > self.max_title_length || property.bytes_after > 0 {
            let cut = self.max_title_length.min(raw.len());
            buf.extend_from_slice(&raw[..cut]);
            buf.extend_from_slice(&self.suffix);
        } else {
            buf.extend_from_slice(raw);
        }
    }
}
