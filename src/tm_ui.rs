use anyhow::Result;
use crossterm::event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent, KeyEventKind, MouseButton, MouseEventKind};
use crossterm::terminal::{disable_raw_mode, enable_raw_mode};
use crossterm::{execute, terminal};
use ratatui::backend::CrosstermBackend;
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Span, Spans, Text};
use ratatui::widgets::{Block, Borders, Clear, Paragraph};
use ratatui::Terminal;
use std::io;
use std::time::{Duration, Instant};
use tracing::{debug, info, trace};
use unicode_width::UnicodeWidthStr;

use tmines::{Board, BoardEvent, BoardState, DisplayState, GameClock, GameResult};

use crate::tm_color::{number_color, WTMatch};
use crate::tm_config::{save_config, Config};
use crate::tm_lang::{fill, Lang};

/// One board plus its clock, and the engine notifications not yet handled
struct Session {
    board: Board,
    clock: GameClock,
    events: Vec<BoardEvent>,
}

/// What the host shows once the engine reports the end of a session
#[derive(Debug, Clone, PartialEq)]
struct Ending {
    won: bool,
    message: String,
    time: String,
}

impl Session {
    fn new(board: Board) -> Self {
        Session { board, clock: GameClock::new(), events: Vec::new() }
    }

    /// Deal a new board and restart the clock
    fn new_game(&mut self, cfg: &Config) -> Result<()> {
        let (w, h, n) = cfg.params();
        self.board.initialize(w, h, n, &mut self.events)?;
        self.clock.start();
        Ok(())
    }

    fn reveal(&mut self, col: usize, row: usize) -> Option<Ending> {
        self.board.reveal(col, row, &mut self.events);
        self.drain()
    }

    fn toggle_flag(&mut self, col: usize, row: usize) -> Option<Ending> {
        self.board.toggle_flag(col, row, &mut self.events);
        self.drain()
    }

    /// Handle queued notifications; the clock stops on game end
    fn drain(&mut self) -> Option<Ending> {
        let mut ending = None;
        for ev in self.events.drain(..) {
            match ev {
                BoardEvent::Reset { width, height } => debug!("Board reset to {}x{}", width, height),
                BoardEvent::CellChanged { col, row, state } => trace!("({}, {}) -> {:?}", col, row, state),
                BoardEvent::GameEnded { won, message } => {
                    self.clock.stop();
                    info!("Session over (won: {}) after {}", won, self.clock.display());
                    ending = Some(Ending { won, message, time: self.clock.display() });
                }
            }
        }
        ending
    }

    fn accepts_input(&self) -> bool {
        matches!(self.board.state(), BoardState::Ready | BoardState::Active)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Modal {
    Help,
    Options,
    Ended,
}

// Group runtime UI variables into a single structure to simplify passing them around
#[derive(Debug)]
struct UiState {
    cursor: (usize, usize),
    left_press: Option<(usize, usize)>,
    modal: Option<Modal>,
    ending: Option<Ending>,
    clicked_index: Option<usize>,
    hover_index: Option<usize>,
    exit_status_hovered: bool,
    modal_rect: Option<Rect>,
    modal_close_rect: Option<Rect>,
    modal_close_hovered: bool,
    modal_close_pressed: bool,
    // options being edited: strict flags, ascii icons, language code
    options_strict: bool,
    options_ascii: bool,
    options_lang: String,
    options_focus: usize,
    options_rects: [Option<Rect>; 3],
}

impl UiState {
    fn new() -> Self {
        UiState {
            cursor: (0, 0),
            left_press: None,
            modal: None,
            ending: None,
            clicked_index: None,
            hover_index: None,
            exit_status_hovered: false,
            modal_rect: None,
            modal_close_rect: None,
            modal_close_hovered: false,
            modal_close_pressed: false,
            options_strict: false,
            options_ascii: false,
            options_lang: String::new(),
            options_focus: 0,
            options_rects: [None; 3],
        }
    }

    fn reset_after_new_game(&mut self) {
        self.cursor = (0, 0);
        self.left_press = None;
        self.modal = None;
        self.ending = None;
        self.close_modal();
    }

    fn show_ending(&mut self, ending: Option<Ending>) {
        if let Some(e) = ending {
            self.ending = Some(e);
            self.modal = Some(Modal::Ended);
        }
    }

    fn open_options(&mut self, cfg: &Config) {
        self.options_strict = cfg.flag_policy == tmines::FlagPolicy::Strict;
        self.options_ascii = cfg.ascii_icons;
        self.options_lang = cfg.language.clone();
        self.options_focus = 0;
        self.modal = Some(Modal::Options);
    }

    fn toggle_option(&mut self, i: usize) {
        self.options_focus = i;
        match i {
            0 => self.options_strict = !self.options_strict,
            1 => self.options_ascii = !self.options_ascii,
            _ => self.options_lang = Lang::new(&self.options_lang).next_code().to_string(),
        }
    }

    fn close_modal(&mut self) {
        self.modal = None;
        self.modal_rect = None;
        self.modal_close_rect = None;
        self.modal_close_hovered = false;
        self.modal_close_pressed = false;
        self.options_rects = [None; 3];
    }

    fn step_cursor(&mut self, dx: isize, dy: isize, w: usize, h: usize) {
        let nx = (self.cursor.0 as isize + dx).clamp(0, w as isize - 1) as usize;
        let ny = (self.cursor.1 as isize + dy).clamp(0, h as isize - 1) as usize;
        self.cursor = (nx, ny);
    }
}

struct Glyphs {
    hidden: &'static str,
    mine: &'static str,
    flag: &'static str,
}

impl Glyphs {
    fn new(ascii: bool) -> Self {
        Glyphs {
            hidden: if ascii { "#" } else { "■" },
            mine: if ascii { "*" } else { "☼" },
            flag: if ascii { "F" } else { "⚑" },
        }
    }
}

/// Apply the options modal to the config, engine rules and language
fn apply_options(ui: &UiState, cfg: &mut Config, lang: &mut Lang, session: &mut Session) {
    cfg.flag_policy = if ui.options_strict { tmines::FlagPolicy::Strict } else { tmines::FlagPolicy::Cosmetic };
    cfg.ascii_icons = ui.options_ascii;
    lang.switch_to(&ui.options_lang);
    cfg.language = lang.current_lang.clone();
    session.board.set_rules(cfg.rules(lang));
    save_config(cfg);
    info!("Options applied: {:?}, ascii icons {}, language {}", cfg.flag_policy, cfg.ascii_icons, cfg.language);
}

pub fn run(cfg: &mut Config, lang: &mut Lang) -> Result<()> {
    let mut session = Session::new(Board::new(cfg.rules(lang)));
    session.new_game(cfg)?;
    session.drain();

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnableMouseCapture, terminal::EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut ui = UiState::new();
    let mut menu_rect: Option<Rect> = None;
    let mut board_rect: Option<Rect> = None;
    let mut status_rect: Option<Rect> = None;

    let board_bg = Color::DarkGray.wtmatch();
    let hidden_fg = Color::Gray.wtmatch();
    let mine_fg = Color::Black.wtmatch();
    let flag_fg = Color::Red.wtmatch();
    let detonated_bg = Color::Red.wtmatch();
    let cursor_bg = Color::LightBlue.wtmatch();
    let press_bg = Color::Gray.wtmatch();
    let menu_key_fg = Color::Yellow.wtmatch();
    let menu_key_bg_hover = Color::LightBlue.wtmatch();
    let menu_key_bg_pressed = Color::Green.wtmatch();
    let menu_key_fg_pressed = Color::Black.wtmatch();

    let tick_rate = Duration::from_millis(200);
    let mut last_tick = Instant::now();

    loop {
        let (w, h) = (session.board.width(), session.board.height());
        let glyphs = Glyphs::new(cfg.ascii_icons);
        let a = lang.assets.clone();
        // F1/F2/F7 in the menu row, Esc at the right of the status row
        let menu_items = [("F1", a.menu_help), ("F2", a.menu_new), ("F7", a.menu_options)];

        terminal.draw(|f| {
            let size = f.size();
            let min_twidth = 60u16.max((w * 2 + 3) as u16);
            let min_theight = (h + 8) as u16;
            if size.width < min_twidth || size.height < min_theight {
                let warn_lines = vec![
                    Spans::from(Span::raw(a.tsmsg_line1)),
                    Spans::from(Span::raw(fill(a.tsmsg_line2, &[min_twidth.to_string().as_str(), min_theight.to_string().as_str()]))),
                ];
                let warn = Paragraph::new(Text::from(warn_lines))
                    .block(Block::default().borders(Borders::ALL).title(a.tsmsg_title))
                    .alignment(Alignment::Center);
                f.render_widget(Clear, size);
                let area = center_rect(40u16.min(size.width), 4u16.min(size.height), size);
                f.render_widget(warn, area);
                return;
            }

            // layout: top menu row, center board, bottom status
            let chunks = Layout::default()
                .direction(Direction::Vertical)
                .constraints([Constraint::Length(3), Constraint::Min(6), Constraint::Length(3)].as_ref())
                .split(size);

            let mut spans_vec: Vec<Span> = vec![Span::raw(" ")];
            for (i, (label_key, label_rest)) in menu_items.iter().enumerate() {
                if i > 0 {
                    spans_vec.push(Span::raw("   "));
                }
                let (key_style, rest_style) = if Some(i) == ui.clicked_index {
                    (Style::default().bg(menu_key_bg_pressed).fg(menu_key_fg_pressed).add_modifier(Modifier::BOLD), Style::default().bg(menu_key_bg_pressed).fg(menu_key_fg_pressed))
                } else if Some(i) == ui.hover_index {
                    (Style::default().bg(menu_key_bg_hover).fg(menu_key_fg_pressed).add_modifier(Modifier::BOLD), Style::default().bg(menu_key_bg_hover).fg(menu_key_fg_pressed))
                } else {
                    (Style::default().fg(menu_key_fg).add_modifier(Modifier::BOLD), Style::default())
                };
                spans_vec.push(Span::styled(label_key.to_string(), key_style));
                spans_vec.push(Span::styled(format!(": {}", label_rest), rest_style));
            }
            let menu = Paragraph::new(Spans::from(spans_vec)).block(Block::default().borders(Borders::ALL));
            f.render_widget(menu, chunks[0]);
            menu_rect = Some(chunks[0]);

            // status row: mine counter and clock on the left, Esc: Exit on the right
            let left_text = fill(a.status_fmt, &[session.board.remaining_mines().to_string().as_str(), session.clock.display().as_str()]);
            let inner_w = chunks[2].width.saturating_sub(2) as usize;
            let right_w = "Esc".width() + 2 + a.menu_exit.width();
            let mid_spaces = inner_w.saturating_sub(left_text.as_str().width() + right_w + 1).max(1);
            let (key_style, rest_style) = if ui.exit_status_hovered {
                (Style::default().bg(menu_key_bg_hover).fg(menu_key_fg_pressed).add_modifier(Modifier::BOLD), Style::default().bg(menu_key_bg_hover).fg(menu_key_fg_pressed))
            } else {
                (Style::default().fg(menu_key_fg).add_modifier(Modifier::BOLD), Style::default())
            };
            let status = Paragraph::new(Spans::from(vec![
                Span::raw(left_text),
                Span::raw(" ".repeat(mid_spaces)),
                Span::styled("Esc", key_style),
                Span::styled(format!(": {}", a.menu_exit), rest_style),
            ]))
            .block(Block::default().borders(Borders::ALL));
            f.render_widget(status, chunks[2]);
            status_rect = Some(chunks[2]);

            // board
            let board_area = center_rect((w * 2 + 3) as u16, (h + 2) as u16, chunks[1]);
            board_rect = Some(board_area);
            let lost = session.board.state() == BoardState::Ended(GameResult::Lost);
            let mut lines = Vec::with_capacity(h);
            for y in 0..h {
                let mut spans = Vec::with_capacity(w + 1);
                for x in 0..w {
                    let Some(cell) = session.board.cell(x, y) else { continue };
                    let base = Style::default().bg(board_bg);
                    let (s, mut style) = match cell.display_state() {
                        DisplayState::Hidden if lost && cell.is_mine => (glyphs.mine.to_string(), base.fg(mine_fg)),
                        DisplayState::Hidden => (glyphs.hidden.to_string(), base.fg(hidden_fg)),
                        DisplayState::Flagged => (glyphs.flag.to_string(), base.fg(flag_fg)),
                        DisplayState::RevealedNumber(n) => (n.to_string(), base.fg(number_color(n)).add_modifier(Modifier::BOLD)),
                        DisplayState::RevealedBlank => (" ".to_string(), base),
                        DisplayState::RevealedMine => (glyphs.mine.to_string(), base.fg(mine_fg).bg(detonated_bg)),
                    };
                    if ui.cursor == (x, y) && session.accepts_input() {
                        style = style.bg(cursor_bg);
                    }
                    if ui.left_press == Some((x, y)) && !cell.is_revealed {
                        style = style.bg(press_bg).fg(press_bg);
                    }
                    spans.push(Span::styled(format!(" {}", s), style));
                }
                // right padding column in the board background
                spans.push(Span::styled(" ", Style::default().bg(board_bg)));
                lines.push(Spans::from(spans));
            }
            let title = format!("{}x{} / {}", w, h, session.board.mine_count());
            let paragraph = Paragraph::new(Text::from(lines))
                .block(Block::default().borders(Borders::ALL).title(title).title_alignment(Alignment::Center));
            f.render_widget(paragraph, board_area);

            // modals
            ui.modal_rect = None;
            ui.modal_close_rect = None;
            let (mrect, title, lines, btn_text) = match ui.modal {
                None => return,
                Some(Modal::Help) => (
                    centered_block(46, 10, size),
                    a.menu_help.to_string(),
                    vec![
                        Spans::from(Span::raw("")),
                        Spans::from(Span::raw(a.help_controls)),
                        Spans::from(Span::raw(a.help_move)),
                        Spans::from(Span::raw(a.help_reveal)),
                        Spans::from(Span::raw(a.help_flag)),
                        Spans::from(Span::raw(a.help_new)),
                    ],
                    a.btn_close,
                ),
                Some(Modal::Options) => {
                    let focus_style = Style::default().bg(menu_key_bg_hover).fg(menu_key_fg_pressed).add_modifier(Modifier::BOLD);
                    let check = |on: bool| if on { "[x]" } else { "[ ]" };
                    let labels = [
                        format!("{} {}", check(ui.options_strict), a.opt_strict_flags),
                        format!("{} {}", check(ui.options_ascii), a.opt_ascii_icons),
                        format!("{}: {}", a.opt_language, Lang::new(&ui.options_lang).assets.lang_name),
                    ];
                    let mrect = centered_block(34, 8, size);
                    let mut lines = vec![Spans::from(Span::raw(""))];
                    for (i, label) in labels.iter().enumerate() {
                        // clickable area covers the visible label only
                        ui.options_rects[i] = Some(Rect::new(mrect.x + 2, mrect.y + 2 + i as u16, label.as_str().width() as u16, 1));
                        let span = if ui.options_focus == i { Span::styled(label.clone(), focus_style) } else { Span::raw(label.clone()) };
                        lines.push(Spans::from(vec![Span::raw(" "), span]));
                    }
                    (mrect, a.menu_options.to_string(), lines, a.btn_ok)
                }
                Some(Modal::Ended) => {
                    let Some(ending) = ui.ending.as_ref() else { return };
                    let mut lines = vec![Spans::from(Span::raw("")), Spans::from(Span::raw(ending.message.clone()))];
                    if ending.won {
                        lines.push(Spans::from(Span::raw(fill(a.win_time_fmt, &[ending.time.as_str()]))));
                    }
                    let title = if ending.won { a.win_title } else { a.loss_title };
                    (bottom_centered_block(40, 7, size), title.to_string(), lines, a.btn_close)
                }
            };
            ui.modal_rect = Some(mrect);
            f.render_widget(Clear, mrect);
            f.render_widget(Block::default().borders(Borders::ALL).title(title), mrect);
            let inner = Rect::new(mrect.x + 1, mrect.y + 1, mrect.width.saturating_sub(2), mrect.height.saturating_sub(2));
            let alignment = if ui.modal == Some(Modal::Ended) { Alignment::Center } else { Alignment::Left };
            f.render_widget(Paragraph::new(Text::from(lines)).alignment(alignment), inner);

            let btn_w = btn_text.width() as u16;
            let bx = inner.x + (inner.width.saturating_sub(btn_w)) / 2;
            let by = inner.y + inner.height.saturating_sub(1);
            let btn_rect = Rect::new(bx, by, btn_w, 1);
            ui.modal_close_rect = Some(btn_rect);
            let mut btn_style = Style::default().bg(Color::Gray).fg(Color::Black).add_modifier(Modifier::BOLD);
            if ui.modal_close_pressed { btn_style = Style::default().bg(Color::Green).fg(Color::Black).add_modifier(Modifier::BOLD); }
            else if ui.modal_close_hovered { btn_style = Style::default().bg(Color::White).fg(Color::Black).add_modifier(Modifier::BOLD); }
            f.render_widget(Paragraph::new(Spans::from(Span::styled(btn_text, btn_style))), btn_rect);
        })?;

        let timeout = tick_rate.checked_sub(last_tick.elapsed()).unwrap_or(Duration::ZERO);
        if event::poll(timeout)? {
            match event::read()? {
                // Windows reports releases too; act on presses only
                Event::Key(KeyEvent { code, kind: KeyEventKind::Press, .. }) => match ui.modal {
                    Some(Modal::Options) => match code {
                        KeyCode::Up => ui.options_focus = ui.options_focus.saturating_sub(1),
                        KeyCode::Down => ui.options_focus = (ui.options_focus + 1).min(2),
                        KeyCode::Char(' ') => { let i = ui.options_focus; ui.toggle_option(i) }
                        KeyCode::Enter | KeyCode::Esc => {
                            apply_options(&ui, cfg, lang, &mut session);
                            ui.close_modal();
                        }
                        _ => {}
                    },
                    Some(_) => match code {
                        KeyCode::Enter | KeyCode::Esc | KeyCode::Char(' ') => ui.close_modal(),
                        _ => {}
                    },
                    None => match code {
                        KeyCode::Esc => break,
                        KeyCode::F(1) => ui.modal = Some(Modal::Help),
                        KeyCode::F(2) => {
                            session.new_game(cfg)?;
                            session.drain();
                            ui.reset_after_new_game();
                        }
                        KeyCode::F(7) => ui.open_options(cfg),
                        KeyCode::Left => ui.step_cursor(-1, 0, w, h),
                        KeyCode::Right => ui.step_cursor(1, 0, w, h),
                        KeyCode::Up => ui.step_cursor(0, -1, w, h),
                        KeyCode::Down => ui.step_cursor(0, 1, w, h),
                        KeyCode::Char(' ') => {
                            let (cx, cy) = ui.cursor;
                            let ending = session.reveal(cx, cy);
                            ui.show_ending(ending);
                        }
                        KeyCode::Char('f') | KeyCode::Char('F') => {
                            let (cx, cy) = ui.cursor;
                            let ending = session.toggle_flag(cx, cy);
                            ui.show_ending(ending);
                        }
                        _ => {}
                    },
                },
                Event::Mouse(me) => {
                    let (mx, my) = (me.column, me.row);
                    if let Some(mrect) = ui.modal_rect {
                        // only the modal responds while it is open
                        let in_btn = ui.modal_close_rect.is_some_and(|b| hit(b, mx, my));
                        match me.kind {
                            MouseEventKind::Moved => {
                                ui.modal_close_hovered = in_btn;
                                if ui.modal == Some(Modal::Options) {
                                    if let Some(i) = ui.options_rects.iter().position(|r| r.is_some_and(|r| hit(r, mx, my))) {
                                        ui.options_focus = i;
                                    }
                                }
                            }
                            MouseEventKind::Down(MouseButton::Left) if hit(mrect, mx, my) => {
                                if in_btn {
                                    ui.modal_close_pressed = true;
                                } else if ui.modal == Some(Modal::Options) {
                                    if let Some(i) = ui.options_rects.iter().position(|r| r.is_some_and(|r| hit(r, mx, my))) {
                                        ui.toggle_option(i);
                                    }
                                }
                            }
                            MouseEventKind::Up(MouseButton::Left) => {
                                if ui.modal_close_pressed && in_btn {
                                    if ui.modal == Some(Modal::Options) {
                                        apply_options(&ui, cfg, lang, &mut session);
                                    }
                                    ui.close_modal();
                                }
                                ui.modal_close_pressed = false;
                            }
                            _ => {}
                        }
                        continue;
                    }

                    let menu_hit = menu_rect.and_then(|r| menu_index_at(r, &menu_items, mx, my));
                    let exit_hit = status_rect.is_some_and(|r| exit_label_at(r, a.menu_exit, mx, my));
                    let cell_hit = board_rect.and_then(|r| cell_at(r, w, h, mx, my));
                    match me.kind {
                        MouseEventKind::Moved => {
                            ui.hover_index = menu_hit;
                            ui.exit_status_hovered = exit_hit;
                            if let Some(c) = cell_hit {
                                ui.cursor = c;
                            }
                        }
                        MouseEventKind::Down(MouseButton::Left) => {
                            if let Some(i) = menu_hit {
                                ui.clicked_index = Some(i);
                            } else if exit_hit {
                                break;
                            } else if let Some(c) = cell_hit {
                                if session.accepts_input() {
                                    ui.cursor = c;
                                    ui.left_press = Some(c);
                                }
                            }
                        }
                        MouseEventKind::Up(MouseButton::Left) => {
                            if let Some(i) = ui.clicked_index.take() {
                                if menu_hit == Some(i) {
                                    match i {
                                        0 => ui.modal = Some(Modal::Help),
                                        1 => {
                                            session.new_game(cfg)?;
                                            session.drain();
                                            ui.reset_after_new_game();
                                        }
                                        _ => ui.open_options(cfg),
                                    }
                                }
                            }
                            // reveal only if released over the pressed cell
                            if let Some(pressed) = ui.left_press.take() {
                                if cell_hit == Some(pressed) {
                                    let ending = session.reveal(pressed.0, pressed.1);
                                    ui.show_ending(ending);
                                }
                            }
                        }
                        MouseEventKind::Down(MouseButton::Right) => {
                            if let Some((cx, cy)) = cell_hit {
                                ui.cursor = (cx, cy);
                                let ending = session.toggle_flag(cx, cy);
                                ui.show_ending(ending);
                            }
                        }
                        _ => {}
                    }
                }
                _ => {}
            }
        }

        if last_tick.elapsed() >= tick_rate {
            last_tick = Instant::now();
        }
    }

    save_config(cfg);
    info!("Exiting");

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), DisableMouseCapture, terminal::LeaveAlternateScreen)?;
    terminal.show_cursor()?;
    Ok(())
}

fn hit(r: Rect, col: u16, row: u16) -> bool {
    col >= r.x && col < r.x + r.width && row >= r.y && row < r.y + r.height
}

/// Board cell under a terminal position; each cell is two columns wide
fn cell_at(board_area: Rect, w: usize, h: usize, col: u16, row: u16) -> Option<(usize, usize)> {
    let (x0, y0) = (board_area.x + 1, board_area.y + 1);
    if col < x0 || row < y0 {
        return None;
    }
    let (cx, cy) = (((col - x0) / 2) as usize, (row - y0) as usize);
    (cx < w && cy < h).then_some((cx, cy))
}

/// Menu item under a terminal position, matching the layout drawn in `run`
fn menu_index_at(menu: Rect, items: &[(&str, &str)], col: u16, row: u16) -> Option<usize> {
    if row != menu.y + 1 {
        return None;
    }
    let mut x = menu.x + 2; // border + leading space
    for (i, (key, rest)) in items.iter().enumerate() {
        let item_w = (key.width() + 2 + rest.width()) as u16;
        if col >= x && col < x + item_w {
            return Some(i);
        }
        x += item_w + 3;
    }
    None
}

/// Whether a position is over the "Esc: Exit" label at the right of the status row
fn exit_label_at(status: Rect, exit_label: &str, col: u16, row: u16) -> bool {
    let label_w = ("Esc".width() + 2 + exit_label.width()) as u16;
    let end = status.x + status.width.saturating_sub(2); // border and trailing space
    row == status.y + 1 && col < end && col + label_w >= end
}

fn center_rect(width: u16, height: u16, r: Rect) -> Rect {
    let x = r.x + (r.width.saturating_sub(width)) / 2;
    let y = r.y + (r.height.saturating_sub(height)) / 2;
    Rect::new(x, y, width.min(r.width), height.min(r.height))
}

fn centered_block(w: u16, h: u16, r: Rect) -> Rect { center_rect(w, h, r) }

fn bottom_centered_block(width: u16, height: u16, r: Rect) -> Rect {
    let x = r.x + (r.width.saturating_sub(width)) / 2;
    let y = r.y + r.height.saturating_sub(height);
    Rect::new(x, y, width.min(r.width), height.min(r.height))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tmines::Rules;

    fn session_with(mines: &[(usize, usize)]) -> Session {
        let mut board = Board::with_seed(Rules::default(), 5);
        board.initialize_with_mines(4, 4, mines, &mut ()).unwrap();
        let mut session = Session::new(board);
        session.clock.start();
        session
    }

    #[test]
    fn test_cell_at() {
        let area = Rect::new(10, 5, 4 * 2 + 3, 4 + 2);
        assert_eq!(cell_at(area, 4, 4, 11, 6), Some((0, 0)));
        assert_eq!(cell_at(area, 4, 4, 12, 6), Some((0, 0)));
        assert_eq!(cell_at(area, 4, 4, 13, 7), Some((1, 1)));
        assert_eq!(cell_at(area, 4, 4, 18, 9), Some((3, 3)));
        assert_eq!(cell_at(area, 4, 4, 19, 9), None); // padding column
        assert_eq!(cell_at(area, 4, 4, 10, 6), None); // border
        assert_eq!(cell_at(area, 4, 4, 11, 10), None);
    }

    #[test]
    fn test_menu_index_at() {
        let menu = Rect::new(0, 0, 80, 3);
        let items = [("F1", "Help"), ("F2", "New"), ("F7", "Options")];
        assert_eq!(menu_index_at(menu, &items, 2, 1), Some(0));
        assert_eq!(menu_index_at(menu, &items, 9, 1), Some(0));
        assert_eq!(menu_index_at(menu, &items, 10, 1), None);
        assert_eq!(menu_index_at(menu, &items, 13, 1), Some(1));
        assert_eq!(menu_index_at(menu, &items, 2, 0), None);
    }

    #[test]
    fn test_exit_label_at() {
        let status = Rect::new(0, 20, 80, 3);
        // " Esc: Exit " ends right before the border at column 79
        assert!(exit_label_at(status, "Exit", 77, 21));
        assert!(exit_label_at(status, "Exit", 69, 21));
        assert!(!exit_label_at(status, "Exit", 68, 21));
        assert!(!exit_label_at(status, "Exit", 78, 21));
    }

    #[test]
    fn test_session_loss_stops_clock() {
        let mut session = session_with(&[(3, 3)]);
        assert!(session.toggle_flag(0, 0).is_none());
        let ending = session.reveal(3, 3).unwrap();
        assert!(!ending.won);
        assert_eq!(ending.message, tmines::tm_board::LOSS_MESSAGE);
        assert!(!session.clock.is_running());
        assert!(!session.accepts_input());
        assert!(session.events.is_empty());
    }

    #[test]
    fn test_session_win_reports_time() {
        let mut session = session_with(&[(3, 3)]);
        let ending = session.reveal(0, 0).unwrap();
        assert!(ending.won);
        assert_eq!(ending.time, session.clock.display());
        assert!(session.reveal(0, 0).is_none());
    }

    #[test]
    fn test_new_game_uses_config() {
        let mut session = session_with(&[(3, 3)]);
        session.reveal(3, 3);
        let mut cfg = Config::default();
        (cfg.width, cfg.height, cfg.mines) = (5, 6, 7);
        session.new_game(&cfg).unwrap();
        assert_eq!(session.drain(), None);
        assert_eq!((session.board.width(), session.board.height(), session.board.mine_count()), (5, 6, 7));
        assert_eq!(session.board.state(), BoardState::Ready);
        assert!(session.clock.is_running());
    }

    #[test]
    fn test_step_cursor_clamps() {
        let mut ui = UiState::new();
        ui.step_cursor(-1, -1, 9, 9);
        assert_eq!(ui.cursor, (0, 0));
        for _ in 0..20 {
            ui.step_cursor(1, 1, 9, 9);
        }
        assert_eq!(ui.cursor, (8, 8));
    }
}
