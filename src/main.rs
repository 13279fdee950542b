mod app;
mod core;
mod models;
mod system;
mod ui;
mod utils;

use anyhow::{bail, Context};
use app::{handle_key, handle_mouse, App};
use chrono::Utc;
use core::geometry::Viewport;
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use models::{HostModel, SessionModel};
use ratatui::{
    backend::CrosstermBackend,
    buffer::Buffer,
    layout::Rect,
    style::{Color, Style},
    Terminal,
};
use std::io;
use std::path::{Path, MAIN_SEPARATOR_STR};
use std::process::ExitCode;
use std::time::{Duration, Instant};
use system::{backend, filesystem, BackendWorker, Transport};
use ui::PickerDialog;
use utils::config::Config;
use utils::logging::{self, LogSink};

const USAGE: &str = "Usage: hostpick [PATH]\n       hostpick --serve\n\n\
Opens a floating file picker at PATH (default: current directory) and prints\n\
the picked path. Exits with 1 when cancelled.\n\n\
--serve   answer listing requests as line-delimited JSON on stdin/stdout";

/// 명령행 인자
#[derive(Debug, Default, PartialEq, Eq)]
struct CliArgs {
    path: Option<String>,
    serve: bool,
    help: bool,
}

impl CliArgs {
    fn parse(args: impl Iterator<Item = String>) -> anyhow::Result<Self> {
        let mut parsed = Self::default();
        for arg in args {
            match arg.as_str() {
                "--serve" => parsed.serve = true,
                "-h" | "--help" => parsed.help = true,
                flag if flag.starts_with("--") => bail!("unknown option: {}", flag),
                path => {
                    if parsed.path.is_some() {
                        bail!("unexpected argument: {}", path);
                    }
                    parsed.path = Some(path.to_string());
                }
            }
        }
        Ok(parsed)
    }
}

fn main() -> ExitCode {
    match run() {
        Ok(code) => code,
        Err(err) => {
            eprintln!("Error: {:#}", err);
            ExitCode::from(2)
        }
    }
}

fn run() -> anyhow::Result<ExitCode> {
    let args = CliArgs::parse(std::env::args().skip(1))?;
    if args.help {
        println!("{}", USAGE);
        return Ok(ExitCode::SUCCESS);
    }

    if args.serve {
        logging::init(LogSink::Stderr)?;
        let stdin = io::stdin();
        let stdout = io::stdout();
        backend::serve(stdin.lock(), stdout.lock())?;
        return Ok(ExitCode::SUCCESS);
    }

    let config = Config::load().context("failed to load configuration")?;
    if let Err(e) = logging::init(LogSink::File) {
        eprintln!("Warning: logging disabled: {}", e);
    }

    let host = initial_host(args.path.as_deref().unwrap_or("."))?;
    let (worker, transport) = BackendWorker::spawn().context("failed to start backend")?;

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let size = terminal.size()?;
    let viewport = Viewport::new(size.width as i32, size.height as i32);
    let mut app = App::new(transport, host, config, viewport);

    let res = run_app(&mut terminal, &mut app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    // 채널이 드롭되면 워커가 끝난다
    let host = app.into_host();
    worker.join();
    res?;

    match host.saved_selection() {
        Some(path) => {
            println!("{}", path);
            Ok(ExitCode::SUCCESS)
        }
        None => Ok(ExitCode::from(1)),
    }
}

/// 시작 경로로 호스트 상태 구성
fn initial_host(raw: &str) -> anyhow::Result<SessionModel> {
    let path = filesystem::absolutize(Path::new(raw))
        .with_context(|| format!("cannot resolve {}", raw))?;
    let display = if path.is_dir() {
        filesystem::format_folder_path(&path)
    } else {
        path.to_string_lossy().to_string()
    };
    Ok(SessionModel::new(
        display,
        MAIN_SEPARATOR_STR,
        Some(filesystem::segments_of(&path)),
    ))
}

fn run_app<B, T, H>(terminal: &mut Terminal<B>, app: &mut App<T, H>) -> anyhow::Result<()>
where
    B: ratatui::backend::Backend,
    T: Transport,
    H: HostModel,
{
    app.open(Instant::now(), Utc::now());
    let mut dirty = true;

    while !app.is_closed() {
        if dirty {
            terminal.draw(|f| {
                let area = f.area();
                let buf = f.buffer_mut();
                render_background(area, buf);
                render_dialog(app, buf);
            })?;
        }

        // 창을 끄는 중이면 짧게, 아니면 타이머 해상도만큼 기다린다
        let poll_timeout = if app.panel().is_active() {
            Duration::from_millis(16)
        } else {
            Duration::from_millis(50)
        };

        dirty = false;
        if event::poll(poll_timeout)? {
            let now = Instant::now();
            match event::read()? {
                Event::Key(key) => handle_key(app, key, now),
                Event::Mouse(mouse) => handle_mouse(app, mouse, now),
                Event::Resize(width, height) => {
                    app.resize(Viewport::new(width as i32, height as i32))
                }
                _ => {}
            }
            dirty = true;
        }

        dirty |= app.tick(Instant::now(), Utc::now());
    }

    Ok(())
}

/// 다이얼로그 뒤 배경
fn render_background(area: Rect, buf: &mut Buffer) {
    let style = Style::default().bg(Color::Rgb(24, 24, 24)).fg(Color::Rgb(80, 80, 80));
    buf.set_style(area, style);
    if area.height > 0 {
        buf.set_stringn(
            area.x,
            area.y + area.height - 1,
            " hostpick: drag the title to move, drag the border to resize",
            area.width as usize,
            style,
        );
    }
}

fn render_dialog<T: Transport, H: HostModel>(app: &App<T, H>, buf: &mut Buffer) {
    PickerDialog::new(app.path_view(), app.view())
        .title(&app.config().title)
        .select_button(app.select_button())
        .status(app.status())
        .path_focused(app.focus() == app::Focus::Path)
        .dragging(app.panel().is_active())
        .icon_mode(app.config().icons)
        .render_at(app.panel().rect(), buf);
}
