use std::io::{self, Write};

/// Печатает заголовки построчно и сразу сбрасывает буфер
pub struct TitlePrinter<W: Write> {
    out: W,
    ignore_empty_title: bool,
}

impl<W: Write> TitlePrinter<W> {
    pub fn new(out: W, ignore_empty_title: bool) -> Self {
        Self {
            out,
            ignore_empty_title,
        }
    }

    /// Вернёт `false`, если пустой заголовок был пропущен
    pub fn print(&mut self, title: &[u8]) -> io::Result<bool> {
        if title.is_empty() && self.ignore_empty_title {
            return Ok(false);
        }

        self.out.write_all(title)?;
        self.out.write_all(b"\n")?;
        self.out.flush()?;
        Ok(true)
    }
}
