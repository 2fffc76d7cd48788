use anyhow::Result;
use clap::Parser;
use std::io::{self, Write};
use std::path::PathBuf;
use std::process;
use tracing::{debug, info};
mod config;
mod error;
mod events;
mod services;
mod utils;

use config::{Config, Mode, DEFAULT_MAX_TITLE_LENGTH, DEFAULT_SUFFIX};
use services::{StopSignal, Tracker, X11Client};

#[derive(Parser, Debug)]
#[command(name = "xwindow")]
#[command(about = "Печатает заголовок активного окна X11")]
#[command(disable_help_flag = true, disable_version_flag = true)]
struct Args {
    /// Следить за сменой активного окна и его заголовка
    #[arg(short, long)]
    follow: bool,

    /// Максимальная длина заголовка в байтах до добавления суффикса
    #[arg(short = 'l', long, value_name = "NUM")]
    max_title_length: Option<usize>,

    /// Суффикс для усечённого заголовка
    #[arg(short, long, value_name = "SUFFIX", allow_hyphen_values = true)]
    suffix: Option<String>,

    /// Никогда не печатать пустые заголовки
    #[arg(short, long)]
    ignore_empty_title: bool,

    /// Путь к файлу конфигурации
    #[arg(short, long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Уровень логирования (пишется в stderr)
    #[arg(long)]
    log_level: Option<String>,

    #[arg(long)]
    help: bool,

    #[arg(long)]
    version: bool,
}

impl Args {
    /// Флаги командной строки перекрывают файл и окружение
    fn apply_to(&self, config: &mut Config) {
        if self.follow {
            config.mode = Mode::Follow;
        }
        if let Some(max_title_length) = self.max_title_length {
            config.max_title_length = max_title_length;
        }
        if let Some(suffix) = &self.suffix {
            config.suffix = suffix.clone();
        }
        if self.ignore_empty_title {
            config.ignore_empty_title = true;
        }
        if let Some(level) = &self.log_level {
            config.log_level = level.clone();
        }
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let args = match Args::try_parse() {
        Ok(args) => args,
        Err(err) => {
            let _ = err.print();
            try_help();
        }
    };

    if args.help {
        help();
    }
    if args.version {
        println!("xwindow {}", env!("CARGO_PKG_VERSION"));
        return Ok(());
    }

    let mut config = Config::load(args.config.as_deref())?;
    args.apply_to(&mut config);
    config.validate()?;

    init_tracing(&config.log_level)?;
    debug!("Конфигурация: {:?}", config);

    let mut client = X11Client::connect()?;
    let stop = StopSignal::new();

    let tracker = Tracker::init(&mut client, &config, std::io::stdout())?;
    if config.is_follow() {
        stop.listen_for_termination()?;
    }
    let result = tracker.run(&stop).await;

    drop(client);
    debug!("Соединение с X-сервером закрыто");
    result?;

    info!("xwindow завершил работу");
    Ok(())
}

fn init_tracing(level: &str) -> Result<()> {
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(level))?;

    // stdout занят заголовками, логи идут в stderr
    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .compact()
                .with_writer(std::io::stderr),
        )
        .init();

    Ok(())
}

fn help() -> ! {
    eprintln!(
        "xwindow:
Использование: xwindow [ОПЦИЯ]
  -f, --follow                следить за сменой активного окна; при каждой
                                смене его заголовок печатается в stdout
  -l, --max-title-length=NUM  максимальная длина заголовка; если заголовок
                                длиннее NUM, к нему добавляется суффикс;
                                длина суффикса не входит в NUM, поэтому
                                вывод может достигать NUM + длина(SUFFIX)
                                по умолчанию {max}
  -s, --suffix=SUFFIX         суффикс для заголовка, превысившего
                                максимальную длину; по умолчанию '{suffix}'
  -i, --ignore-empty-title    никогда не печатать пустые заголовки
  -c, --config=PATH           TOML-файл конфигурации (переменные XWINDOW_*
                                перекрывают файл, опции - всё остальное)
      --log-level=LEVEL       уровень логирования в stderr (trace..error)
      --help                  показать эту справку и выйти
      --version               показать версию и выйти

Пример:
  xwindow -f -l 35 --suffix=___  следить за активным окном, максимальная
                                   длина заголовка 35, суффикс ___; длина
                                   вывода не превысит 38 (35 + 3 от суффикса)

Без опций xwindow печатает заголовок текущего активного окна и завершается
(если активного окна нет, печатается пустая строка, если не задан
--ignore-empty-title).",
        max = DEFAULT_MAX_TITLE_LENGTH,
        suffix = DEFAULT_SUFFIX,
    );
    process::exit(1);
}

/// Подсказка после ошибки использования печатается в stdout
fn try_help() -> ! {
    let _ = write_try_help(&mut io::stdout());
    process::exit(1);
}

fn write_try_help<W: Write>(out: &mut W) -> io::Result<()> {
    writeln!(out, "Попробуйте 'xwindow --help' для получения справки.")?;
    out.flush()
}
