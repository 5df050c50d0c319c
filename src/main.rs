use std::io;
use std::sync::mpsc;
use std::time::{Duration, Instant};

use chrono::NaiveDateTime;
use crossterm::event::{
    self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent, KeyEventKind,
};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::layout::{Constraint, Direction, Layout};
use ratatui::prelude::*;
use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::{Block, Borders, Clear, Paragraph};

use sportspro_terminal::provider;
use sportspro_terminal::state::{
    AppState, Delta, FetchState, MatchDetail, ProviderCommand, Screen, Tab, apply_delta,
};

struct App {
    state: AppState,
    should_quit: bool,
    cmd_tx: mpsc::Sender<ProviderCommand>,
    splash_started: Instant,
    splash_duration: Duration,
}

impl App {
    fn new(cmd_tx: mpsc::Sender<ProviderCommand>) -> Self {
        let splash_ms = std::env::var("SPLASH_MS")
            .ok()
            .and_then(|val| val.parse::<u64>().ok())
            .unwrap_or(3000)
            .max(500);
        Self {
            state: AppState::new(),
            should_quit: false,
            cmd_tx,
            splash_started: Instant::now(),
            splash_duration: Duration::from_millis(splash_ms),
        }
    }

    fn on_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('q') => {
                self.should_quit = true;
                return;
            }
            KeyCode::Char('?') => {
                self.state.help_overlay = !self.state.help_overlay;
                return;
            }
            _ => {}
        }

        match self.state.nav.current().clone() {
            Screen::Splash => {}
            Screen::List => match key.code {
                KeyCode::Char('j') | KeyCode::Down => self.state.select_next(),
                KeyCode::Char('k') | KeyCode::Up => self.state.select_prev(),
                KeyCode::Tab | KeyCode::Left | KeyCode::Right | KeyCode::Char('u') => {
                    self.state.toggle_tab()
                }
                KeyCode::Enter | KeyCode::Char('d') => self.open_details(),
                _ => {}
            },
            Screen::Details { .. } => match key.code {
                KeyCode::Char('b') | KeyCode::Esc => self.state.leave_details(),
                _ => {}
            },
        }
    }

    // Splash runs on a one-shot timer; quitting first simply never reaches
    // this transition.
    fn maybe_finish_splash(&mut self) {
        if !matches!(self.state.nav.current(), Screen::Splash) {
            return;
        }
        if self.splash_started.elapsed() >= self.splash_duration {
            self.open_list();
        }
    }

    fn open_list(&mut self) {
        let epoch = self.state.enter_list();
        self.state.push_log("[INFO] Fetching match lists");
        if self
            .cmd_tx
            .send(ProviderCommand::FetchAllMatches { epoch })
            .is_err()
        {
            self.state.push_log("[WARN] Match list request failed");
            self.state.all_matches = FetchState::Failed;
        }
        if self
            .cmd_tx
            .send(ProviderCommand::FetchCurrentMatches { epoch })
            .is_err()
        {
            self.state.push_log("[WARN] Current matches request failed");
            self.state.current_matches = FetchState::Failed;
        }
    }

    fn open_details(&mut self) {
        let Some(match_id) = self.state.selected_match_id() else {
            self.state.push_log("[INFO] No match selected for details");
            return;
        };
        let Some(epoch) = self.state.enter_details(match_id.clone()) else {
            return;
        };
        self.state.push_log("[INFO] Fetching match details");
        if self
            .cmd_tx
            .send(ProviderCommand::FetchMatchDetail { epoch, match_id })
            .is_err()
        {
            self.state.push_log("[WARN] Match details request failed");
            self.state.match_detail = FetchState::Failed;
        }
    }
}

fn main() -> io::Result<()> {
    let _ = dotenvy::from_filename(".env.local");
    let _ = dotenvy::from_filename(".env");

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = ratatui::backend::CrosstermBackend::new(stdout);
    let mut terminal = ratatui::Terminal::new(backend)?;

    let (tx, rx) = mpsc::channel();
    let (cmd_tx, cmd_rx) = mpsc::channel();
    provider::spawn_provider(tx, cmd_rx);

    let mut app = App::new(cmd_tx);
    let res = run_app(&mut terminal, &mut app, rx);

    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        eprintln!("error: {err}");
    }
    Ok(())
}

fn run_app<B: Backend>(
    terminal: &mut Terminal<B>,
    app: &mut App,
    rx: mpsc::Receiver<Delta>,
) -> io::Result<()> {
    let tick_rate = Duration::from_millis(250);
    let mut last_tick = Instant::now();

    loop {
        while let Ok(delta) = rx.try_recv() {
            apply_delta(&mut app.state, delta);
        }

        app.maybe_finish_splash();

        terminal.draw(|f| ui(f, app))?;

        let timeout = tick_rate
            .checked_sub(last_tick.elapsed())
            .unwrap_or(Duration::ZERO);
        if event::poll(timeout)? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    app.on_key(key);
                }
            }
        }

        if last_tick.elapsed() >= tick_rate {
            last_tick = Instant::now();
        }

        if app.should_quit {
            return Ok(());
        }
    }
}

fn ui(frame: &mut Frame, app: &App) {
    if matches!(app.state.nav.current(), Screen::Splash) {
        render_splash(frame, frame.size(), app);
        return;
    }

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(1),
            Constraint::Length(1),
        ])
        .split(frame.size());

    let header = Paragraph::new(header_text(&app.state))
        .block(Block::default().borders(Borders::BOTTOM));
    frame.render_widget(header, chunks[0]);

    match app.state.nav.current() {
        Screen::Splash => {}
        Screen::List => render_list(frame, chunks[1], &app.state),
        Screen::Details { .. } => render_details(frame, chunks[1], &app.state),
    }

    let footer = Paragraph::new(footer_text(&app.state))
        .block(Block::default().borders(Borders::TOP));
    frame.render_widget(footer, chunks[2]);

    if app.state.help_overlay {
        render_help_overlay(frame, frame.size());
    }
}

fn header_text(state: &AppState) -> String {
    let title = match state.nav.current() {
        Screen::Splash => "SPORTSPRO".to_string(),
        Screen::List => format!("SPORTSPRO | MATCHES | {}", tab_label(state.tab)),
        Screen::Details { .. } => "SPORTSPRO | MATCH DETAILS".to_string(),
    };
    let line1 = format!("  ()  {title}");
    let line2 = " /==\\ Live Scores & Updates".to_string();
    let line3 = "  ||".to_string();
    format!("{line1}\n{line2}\n{line3}")
}

fn footer_text(state: &AppState) -> String {
    match state.nav.current() {
        Screen::Splash => "q Quit".to_string(),
        Screen::List => {
            "Tab/u Switch tab | j/k/↑/↓ Move | Enter/d Details | ? Help | q Quit".to_string()
        }
        Screen::Details { .. } => "b/Esc Back | ? Help | q Quit".to_string(),
    }
}

fn tab_label(tab: Tab) -> &'static str {
    match tab {
        Tab::Upcoming => "Upcoming Fixtures",
        Tab::Completed => "Completed Matches",
    }
}

fn render_splash(frame: &mut Frame, area: Rect, app: &App) {
    let popup_area = centered_rect(50, 40, area);
    let ticks = app.splash_started.elapsed().as_millis() / 500;
    let dots = ".".repeat((ticks % 4) as usize);

    let text = format!("SportsPro\n\nLive Scores & Updates\n\nLoading{dots}");
    let splash = Paragraph::new(text)
        .alignment(Alignment::Center)
        .style(Style::default().add_modifier(Modifier::BOLD));
    frame.render_widget(splash, popup_area);
}

fn render_list(frame: &mut Frame, area: Rect, state: &AppState) {
    if state.list_loading() {
        let loading = Paragraph::new("Loading matches...")
            .alignment(Alignment::Center)
            .style(Style::default().fg(Color::DarkGray));
        frame.render_widget(loading, centered_rect(40, 20, area));
        return;
    }

    let sections = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Min(1),
            Constraint::Length(5),
        ])
        .split(area);

    render_tab_bar(frame, sections[0], state.tab);
    render_rows(frame, sections[1], state);

    let console = Paragraph::new(console_text(state))
        .block(Block::default().title("Console").borders(Borders::ALL));
    frame.render_widget(console, sections[2]);
}

fn render_tab_bar(frame: &mut Frame, area: Rect, active: Tab) {
    let mut spans = Vec::new();
    for tab in [Tab::Upcoming, Tab::Completed] {
        let style = if tab == active {
            Style::default()
                .add_modifier(Modifier::BOLD)
                .add_modifier(Modifier::UNDERLINED)
        } else {
            Style::default().fg(Color::DarkGray)
        };
        spans.push(Span::styled(format!(" {} ", tab_label(tab)), style));
        spans.push(Span::raw("  "));
    }
    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

fn render_rows(frame: &mut Frame, area: Rect, state: &AppState) {
    let rows = state.active_rows();
    if rows.is_empty() {
        let placeholder = match state.tab {
            Tab::Upcoming => "No upcoming matches found.",
            Tab::Completed => "No completed matches found.",
        };
        let empty = Paragraph::new(placeholder).style(Style::default().fg(Color::DarkGray));
        frame.render_widget(empty, area);
        return;
    }

    const ROW_HEIGHT: u16 = 3;
    if area.height < ROW_HEIGHT {
        return;
    }

    let visible = (area.height / ROW_HEIGHT) as usize;
    let (start, end) = visible_range(state.selected, rows.len(), visible);

    for (i, idx) in (start..end).enumerate() {
        let row_area = Rect {
            x: area.x,
            y: area.y + (i as u16) * ROW_HEIGHT,
            width: area.width,
            height: ROW_HEIGHT,
        };

        let selected = idx == state.selected;
        let row_style = if selected {
            Style::default().fg(Color::White).bg(Color::DarkGray)
        } else {
            Style::default()
        };

        let m = rows[idx];
        let text = format!(
            "{}\nDate: {} | Venue: {}\nStatus: {}",
            m.name,
            m.date,
            m.venue,
            status_text(&m.status)
        );
        frame.render_widget(Paragraph::new(text).style(row_style), row_area);
    }
}

fn render_details(frame: &mut Frame, area: Rect, state: &AppState) {
    match &state.match_detail {
        FetchState::Loading => {
            let loading = Paragraph::new("Loading match details...")
                .alignment(Alignment::Center)
                .style(Style::default().fg(Color::DarkGray));
            frame.render_widget(loading, centered_rect(40, 20, area));
        }
        FetchState::Failed => {
            let failed = Paragraph::new("Failed to load match details.")
                .alignment(Alignment::Center)
                .style(Style::default().fg(Color::Red));
            frame.render_widget(failed, centered_rect(40, 20, area));
        }
        FetchState::Loaded(detail) => render_detail_body(frame, area, state, detail),
    }
}

fn render_detail_body(frame: &mut Frame, area: Rect, state: &AppState, detail: &MatchDetail) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(7),
            Constraint::Min(1),
            Constraint::Length(5),
        ])
        .split(area);

    let info = Paragraph::new(detail_info_text(detail))
        .block(Block::default().title("Match").borders(Borders::ALL));
    frame.render_widget(info, rows[0]);

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(rows[1]);

    let teams = Paragraph::new(teams_text(detail))
        .block(Block::default().title("Teams").borders(Borders::ALL));
    frame.render_widget(teams, columns[0]);

    let scores = Paragraph::new(scores_text(detail))
        .block(Block::default().title("Scores").borders(Borders::ALL));
    frame.render_widget(scores, columns[1]);

    let console = Paragraph::new(console_text(state))
        .block(Block::default().title("Console").borders(Borders::ALL));
    frame.render_widget(console, rows[2]);
}

fn detail_info_text(detail: &MatchDetail) -> String {
    let toss_winner = detail.toss_winner.as_deref().unwrap_or("-");
    let toss_choice = detail.toss_choice.as_deref().unwrap_or("-");
    [
        detail.name.clone(),
        format!("Status: {}", status_text(&detail.status)),
        format!("Venue: {}", detail.venue),
        format!(
            "Date: {} (GMT: {})",
            detail.date,
            format_gmt(&detail.date_time_gmt)
        ),
        format!("Toss: {toss_winner} chose to {toss_choice}"),
    ]
    .join("\n")
}

fn teams_text(detail: &MatchDetail) -> String {
    if detail.team_info.is_empty() {
        return "No team information available.".to_string();
    }
    detail
        .team_info
        .iter()
        .map(|team| format!("• {}", team.name))
        .collect::<Vec<_>>()
        .join("\n")
}

fn scores_text(detail: &MatchDetail) -> String {
    if detail.score.is_empty() {
        return "No score information available.".to_string();
    }
    detail
        .score
        .iter()
        .map(|inning| {
            format!(
                "{}: {}/{} in {} overs",
                inning.inning, inning.runs, inning.wickets, inning.overs
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

fn console_text(state: &AppState) -> String {
    if state.logs.is_empty() {
        return "No alerts yet".to_string();
    }
    state
        .logs
        .iter()
        .rev()
        .take(3)
        .cloned()
        .collect::<Vec<_>>()
        .into_iter()
        .rev()
        .collect::<Vec<_>>()
        .join("\n")
}

fn status_text(status: &str) -> &str {
    if status.is_empty() {
        "No status available"
    } else {
        status
    }
}

fn format_gmt(raw: &str) -> String {
    let cleaned = raw.trim();
    if cleaned.is_empty() {
        return "TBD".to_string();
    }
    if let Some(dt) = parse_gmt(cleaned) {
        return dt.format("%Y-%m-%d %H:%M").to_string();
    }
    cleaned.replace('T', " ")
}

fn parse_gmt(raw: &str) -> Option<NaiveDateTime> {
    const FORMATS: [&str; 4] = [
        "%Y-%m-%dT%H:%M:%S",
        "%Y-%m-%d %H:%M:%S",
        "%Y-%m-%dT%H:%M",
        "%Y-%m-%d %H:%M",
    ];

    for fmt in FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(raw, fmt) {
            return Some(dt);
        }
    }
    None
}

fn visible_range(selected: usize, total: usize, visible: usize) -> (usize, usize) {
    if total == 0 {
        return (0, 0);
    }
    if total <= visible {
        return (0, total);
    }

    let mut start = selected.saturating_sub(visible / 2);
    if start + visible > total {
        start = total - visible;
    }
    (start, start + visible)
}

fn render_help_overlay(frame: &mut Frame, area: Rect) {
    let popup_area = centered_rect(60, 60, area);
    frame.render_widget(Clear, popup_area);

    let text = [
        "SportsPro Terminal - Help",
        "",
        "Global:",
        "  ?            Toggle help",
        "  q            Quit",
        "",
        "Matches:",
        "  Tab / u      Switch tab",
        "  j/k or ↑/↓   Move selection",
        "  Enter / d    Open match details",
        "",
        "Match details:",
        "  b / Esc      Back to matches",
    ]
    .join("\n");

    let help = Paragraph::new(text)
        .block(Block::default().title("Help").borders(Borders::ALL))
        .style(Style::default());
    frame.render_widget(help, popup_area);
}

fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(area);

    let horizontal = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(vertical[1]);

    horizontal[1]
}
