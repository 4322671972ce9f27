mod clipboard;
mod config;
mod error;
mod exchange;
mod ui;

use std::fs::{self, File, OpenOptions};
use std::io;
use std::path::PathBuf;

use anyhow::{Context, Result};
use crossterm::{
    cursor::Show,
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use log::info;
use ratatui::prelude::*;

use crate::clipboard::SystemClipboard;
use crate::config::{Config, config_path, load_config};
use crate::ui::{App, render};

/// 获取数据目录路径 (~/.local/share/cambio/)
fn get_data_dir() -> io::Result<PathBuf> {
    let data_dir = dirs::data_dir()
        .ok_or_else(|| io::Error::new(io::ErrorKind::NotFound, "cannot find user data directory"))?
        .join("cambio");

    fs::create_dir_all(&data_dir)?;

    Ok(data_dir)
}

/// 日志写入文件，终端处于备用屏幕时不能写 stderr
fn init_logging() -> Result<()> {
    let log_path = get_data_dir()?.join("cambio.log");
    let file: File = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&log_path)
        .with_context(|| format!("failed to open log file {}", log_path.display()))?;

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .target(env_logger::Target::Pipe(Box::new(file)))
        .init();

    info!("logging to {}", log_path.display());
    Ok(())
}

fn load_startup_config() -> Result<Config> {
    match config_path() {
        Some(path) => {
            let config = load_config(&path)
                .with_context(|| format!("failed to load config from {}", path.display()))?;
            info!("config source: {}", path.display());
            Ok(config)
        }
        None => {
            info!("no config directory available, using defaults");
            Ok(Config::default())
        }
    }
}

fn main() -> Result<()> {
    init_logging()?;
    let config = load_startup_config()?;
    info!(
        "starting with rate 1 {} = {} {}",
        config.target,
        config.rate.value(),
        config.source
    );

    // 创建应用状态
    let mut app = App::new(config, Box::new(SystemClipboard));

    // 设置终端，无论成功与否都恢复
    enable_raw_mode()?;
    with_restore(|| run_terminal(&mut app), restore_terminal)
}

/// 执行 `run` 后总是执行 `restore`，优先返回 `run` 的错误
fn with_restore<T>(
    run: impl FnOnce() -> io::Result<T>,
    restore: impl FnOnce() -> io::Result<()>,
) -> Result<T> {
    let result = run();
    let restored = restore();

    let value = result.context("terminal event loop failed")?;
    restored.context("failed to restore terminal")?;
    Ok(value)
}

fn run_terminal(app: &mut App) -> io::Result<()> {
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    run_app(&mut terminal, app)
}

/// 退出备用屏幕、显示光标、关闭 raw mode，任一步失败都继续执行后续步骤
fn restore_terminal() -> io::Result<()> {
    let screen = execute!(io::stdout(), LeaveAlternateScreen, Show);
    let raw = disable_raw_mode();
    screen.and(raw)
}

fn run_app(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>, app: &mut App) -> io::Result<()> {
    loop {
        terminal.draw(|f| render(f, app))?;

        if let crossterm::event::Event::Key(key) = crossterm::event::read()? {
            if key.kind == crossterm::event::KeyEventKind::Press {
                if ui::handle_key_event(app, key.code)? {
                    break;
                }
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;

    use super::*;

    #[test]
    fn test_with_restore_runs_restore_on_error() {
        let restored = Cell::new(false);
        let result: Result<()> = with_restore(
            || Err(io::Error::other("alternate screen unavailable")),
            || {
                restored.set(true);
                Ok(())
            },
        );

        assert!(restored.get());
        let message = format!("{:#}", result.unwrap_err());
        assert!(message.contains("terminal event loop failed"));
        assert!(message.contains("alternate screen unavailable"));
    }

    #[test]
    fn test_with_restore_reports_restore_failure() {
        let result = with_restore(|| Ok(7), || Err(io::Error::other("raw mode")));
        assert!(
            format!("{:#}", result.unwrap_err()).contains("failed to restore terminal")
        );

        assert_eq!(with_restore(|| Ok(7), || Ok(())).unwrap(), 7);
    }
}
