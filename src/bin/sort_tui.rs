//! Sorting Playback - Terminal User Interface
//!
//! A TUI player for recorded sorting runs using ratatui.
//! App logic lives in `algoviz::tui::player_app`.

#![forbid(unsafe_code)]

#[cfg(feature = "tui")]
fn main() -> std::io::Result<()> {
    use algoviz::config::VizConfig;
    use algoviz::producers::sorting::SortConfig;
    use algoviz::tui::player_app::PlayerApp;

    let app = match std::env::args().nth(1) {
        Some(path) => match VizConfig::load(&path) {
            Ok(viz) => PlayerApp::from_viz_config(&viz),
            Err(e) => {
                eprintln!("Failed to load {path}: {e}");
                std::process::exit(1);
            }
        },
        None => PlayerApp::new(SortConfig::default()),
    };
    tui::run(app)
}

#[cfg(not(feature = "tui"))]
fn main() {
    eprintln!("TUI feature not enabled. Run with --features tui");
    std::process::exit(1);
}

#[cfg(feature = "tui")]
mod tui {
    use crossterm::{
        event::{self, Event, KeyEventKind},
        execute,
        terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
    };
    use ratatui::{
        backend::CrosstermBackend,
        layout::{Constraint, Direction, Layout, Rect},
        style::{Color, Modifier, Style},
        text::{Line, Span},
        widgets::{Bar, BarChart, BarGroup, Block, Borders, Gauge, Paragraph},
        Frame, Terminal,
    };

    use algoviz::tui::player_app::PlayerApp;
    use std::io;
    use std::time::Duration;

    /// Run the TUI application.
    pub fn run(mut app: PlayerApp) -> io::Result<()> {
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen)?;
        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend)?;

        let poll_timeout = Duration::from_millis(33);

        loop {
            terminal.draw(|f| ui(f, &app))?;

            if event::poll(poll_timeout)? {
                if let Event::Key(key) = event::read()? {
                    if key.kind == KeyEventKind::Press {
                        app.handle_key(key.code);
                    }
                }
            }

            if app.should_quit() {
                break;
            }

            app.update();
        }

        disable_raw_mode()?;
        execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
        terminal.show_cursor()?;

        Ok(())
    }

    fn ui(f: &mut Frame, app: &PlayerApp) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3),
                Constraint::Min(10),
                Constraint::Length(3),
                Constraint::Length(3),
            ])
            .split(f.area());

        render_title(f, chunks[0], app);
        render_bars(f, chunks[1], app);
        render_step(f, chunks[2], app);
        render_progress(f, chunks[3], app);
    }

    fn render_title(f: &mut Frame, area: Rect, app: &PlayerApp) {
        let status = app.engine.status();
        let title = Paragraph::new(vec![Line::from(vec![
            Span::styled(
                " ALGOVIZ SORT PLAYER ",
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::raw(" | "),
            Span::styled(
                if status.is_playing {
                    "[PLAYING]"
                } else {
                    "[PAUSED]"
                },
                Style::default().fg(if status.is_playing {
                    Color::Green
                } else {
                    Color::Yellow
                }),
            ),
            Span::raw(" | "),
            Span::styled(
                format!("{} @ {:.2}x", app.algorithm_name(), status.speed_multiplier),
                Style::default().fg(Color::White),
            ),
        ])])
        .block(Block::default().borders(Borders::ALL).title(
            "Controls: [Space] Play/Pause  [←/→] Step  [+/-] Speed  [0/$] Ends  [R] Reshuffle  [M] Algorithm  [Q] Quit",
        ));
        f.render_widget(title, area);
    }

    fn render_bars(f: &mut Frame, area: Rect, app: &PlayerApp) {
        let Some(snapshot) = app.engine.current_snapshot() else {
            return;
        };
        let payload = &snapshot.payload;

        let bars: Vec<Bar> = payload
            .values
            .iter()
            .enumerate()
            .map(|(i, &v)| {
                let color = if payload.sorted {
                    Color::Green
                } else if payload.highlighted.contains(&i) {
                    Color::Red
                } else {
                    Color::Blue
                };
                Bar::default()
                    .value(u64::from(v.unsigned_abs()))
                    .style(Style::default().fg(color))
                    .text_value(String::new())
            })
            .collect();

        let chart = BarChart::default()
            .block(Block::default().borders(Borders::ALL).title("Array"))
            .bar_width(2)
            .bar_gap(1)
            .data(BarGroup::default().bars(&bars));
        f.render_widget(chart, area);
    }

    fn render_step(f: &mut Frame, area: Rect, app: &PlayerApp) {
        let text = app
            .engine
            .current_snapshot()
            .map_or_else(String::new, |s| {
                format!(
                    "[{}/{}] {}  (comparisons: {}, writes: {})",
                    app.engine.position() + 1,
                    app.engine.total_steps(),
                    s.description,
                    s.payload.comparisons,
                    s.payload.writes,
                )
            });
        let step = Paragraph::new(text)
            .block(Block::default().borders(Borders::ALL).title("Current Step"));
        f.render_widget(step, area);
    }

    fn render_progress(f: &mut Frame, area: Rect, app: &PlayerApp) {
        let percent = app.engine.progress_percent();
        let gauge = Gauge::default()
            .block(Block::default().borders(Borders::ALL).title("Progress"))
            .gauge_style(Style::default().fg(Color::Cyan))
            .percent(percent.round() as u16);
        f.render_widget(gauge, area);
    }
}
