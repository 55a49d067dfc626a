//! The calculator screen and its event loop.

use std::io::{self, Stdout};
use std::thread;

use anyhow::Result;
use crossterm::{
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{
    Frame, Terminal,
    backend::CrosstermBackend,
    layout::{Alignment, Constraint, Direction, Layout},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};
use tracing::{debug, warn};

use super::{AppEvent, clipboard, flash::FlashTimer};
use crate::config::Config;
use crate::engine::{Calculator, Outcome, Validity};
use crate::keymap;

/// Run the calculator UI until the user quits.
pub async fn run(config: Config) -> Result<()> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run_app(&mut terminal, config).await;

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}

async fn run_app(
    terminal: &mut Terminal<CrosstermBackend<Stdout>>,
    config: Config,
) -> Result<()> {
    let (tx, rx) = flume::unbounded();
    spawn_input_thread(tx.clone());

    let mut flash = FlashTimer::new(config.flash_duration(), tx);
    let mut calculator = Calculator::new();

    loop {
        terminal.draw(|frame| draw(frame, &calculator))?;

        match rx.recv_async().await? {
            AppEvent::Key(key) => {
                if is_quit(&key) {
                    return Ok(());
                }
                if key.code == KeyCode::Char('c') {
                    if let Err(error) = clipboard::copy_result(calculator.expression()) {
                        warn!(%error, "clipboard copy failed");
                    }
                    continue;
                }
                if let Some(input) = keymap::map_key(&key) {
                    if calculator.handle_input(input) == Outcome::Rejected {
                        debug!(?input, "keystroke rejected");
                        flash.trigger();
                    }
                }
            }
            AppEvent::Redraw => {}
            AppEvent::FlashEnded(generation) => {
                if flash.is_current(generation) {
                    calculator.reset_validity();
                }
            }
        }
    }
}

/// Forward terminal events into the UI loop from a dedicated thread, since
/// crossterm's `read` blocks.
fn spawn_input_thread(tx: flume::Sender<AppEvent>) {
    thread::spawn(move || {
        loop {
            let event = match event::read() {
                Ok(event) => event,
                Err(_) => break,
            };
            let forwarded = match event {
                Event::Key(key) if key.kind == KeyEventKind::Press => AppEvent::Key(key),
                Event::Resize(..) => AppEvent::Redraw,
                _ => continue,
            };
            if tx.send(forwarded).is_err() {
                break;
            }
        }
    });
}

fn is_quit(key: &KeyEvent) -> bool {
    key.code == KeyCode::Char('q')
        || (key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL))
}

fn draw(frame: &mut Frame<'_>, calculator: &Calculator) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(4), Constraint::Length(4), Constraint::Min(0)])
        .split(frame.size());

    let border_style = match calculator.validity() {
        Validity::Valid => Style::default().fg(Color::DarkGray),
        Validity::Invalid => Style::default().fg(Color::Red),
    };

    let display = vec![
        Line::from(Span::styled(
            calculator.history().to_string(),
            Style::default().fg(Color::DarkGray),
        )),
        Line::from(Span::styled(
            calculator.display(),
            Style::default().add_modifier(Modifier::BOLD),
        )),
    ];
    let panel = Paragraph::new(display)
        .alignment(Alignment::Right)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title("zcalc")
                .border_style(border_style),
        );
    frame.render_widget(panel, chunks[0]);

    let help_style = Style::default().fg(Color::DarkGray);
    let help = vec![
        Line::from(Span::styled("0-9 . + - x /  type    = or Enter  evaluate", help_style)),
        Line::from(Span::styled("Backspace  delete    Esc  clear", help_style)),
        Line::from(Span::styled("c  copy result    q  quit", help_style)),
    ];
    frame.render_widget(Paragraph::new(help), chunks[1]);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quit_keys() {
        assert!(is_quit(&KeyEvent::new(KeyCode::Char('q'), KeyModifiers::NONE)));
        assert!(is_quit(&KeyEvent::new(
            KeyCode::Char('c'),
            KeyModifiers::CONTROL
        )));
        assert!(!is_quit(&KeyEvent::new(KeyCode::Char('c'), KeyModifiers::NONE)));
        assert!(!is_quit(&KeyEvent::new(KeyCode::Esc, KeyModifiers::NONE)));
    }
}
