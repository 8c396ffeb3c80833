// TUI event loop and terminal management
use crate::{App, InputMode};
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use shopfront_core::{catalog, source::ProductSource};
use std::io;
use std::sync::Arc;
use tracing::debug;

pub async fn run_tui(
    mut app: App,
    source: Arc<dyn ProductSource>,
    mouse_enabled: bool,
) -> anyhow::Result<()> {
    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    if mouse_enabled {
        execute!(stdout, EnableMouseCapture)?;
    }
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Main loop. A queued fetch runs right after the frame that shows the
    // loading state, so the user is never staring at a stale screen while
    // the request is in flight.
    loop {
        terminal.draw(|f| crate::ui::render(f, &mut app))?;

        if app.pending_fetch {
            app.pending_fetch = false;
            debug!("running queued catalog fetch");
            catalog::refresh(&mut app.catalog, source.as_ref()).await;
            continue;
        }

        if let Event::Key(key) = event::read()? {
            if key.kind == KeyEventKind::Press {
                match app.input_mode {
                    InputMode::Searching => match key.code {
                        KeyCode::Enter | KeyCode::Esc => {
                            app.enter_normal_mode();
                        }
                        KeyCode::Char(c) => {
                            app.push_search_char(c);
                        }
                        KeyCode::Backspace => {
                            app.pop_search_char();
                        }
                        _ => {}
                    },
                    InputMode::Filtering => match key.code {
                        KeyCode::Esc => {
                            app.enter_normal_mode();
                        }
                        KeyCode::Tab | KeyCode::Down | KeyCode::Char('j') => {
                            app.next_filter();
                        }
                        KeyCode::Up | KeyCode::Char('k') => {
                            app.previous_filter();
                        }
                        KeyCode::Delete | KeyCode::Char('d') => {
                            app.clear_current_filter();
                        }
                        KeyCode::Char('R') => {
                            app.reset_filters();
                        }
                        KeyCode::Enter => match app.filter_cursor {
                            // Category and rating cycle through fixed options;
                            // the price fields take typed input
                            0 => app.cycle_category(),
                            3 => app.cycle_rating(),
                            _ => app.enter_editing_filter_mode(),
                        },
                        _ => {}
                    },
                    InputMode::EditingFilter => match key.code {
                        KeyCode::Enter => {
                            app.save_filter_edit();
                        }
                        KeyCode::Esc => {
                            app.cancel_filter_edit();
                        }
                        KeyCode::Char(c) => {
                            app.filter_edit_buffer.push(c);
                        }
                        KeyCode::Backspace => {
                            app.filter_edit_buffer.pop();
                        }
                        _ => {}
                    },
                    InputMode::Normal => match key.code {
                        KeyCode::Char('q') => {
                            app.quit();
                        }
                        KeyCode::Char('/') => {
                            app.enter_search_mode();
                        }
                        KeyCode::Char('f') => {
                            app.toggle_filters();
                            if app.show_filters {
                                app.enter_filter_mode();
                            }
                        }
                        KeyCode::Char('r') => {
                            // Retry after a failure, reload otherwise
                            app.request_fetch();
                        }
                        KeyCode::Char('R') => {
                            app.reset_filters();
                        }
                        KeyCode::Char('j') | KeyCode::Down => {
                            if app.detail_open() {
                                app.scroll_detail_down();
                            } else {
                                app.next_item();
                            }
                        }
                        KeyCode::Char('k') | KeyCode::Up => {
                            if app.detail_open() {
                                app.scroll_detail_up();
                            } else {
                                app.previous_item();
                            }
                        }
                        KeyCode::Enter => {
                            if !app.detail_open() {
                                app.open_detail();
                            }
                        }
                        KeyCode::Esc => {
                            if app.detail_open() {
                                app.close_detail();
                            }
                        }
                        _ => {}
                    },
                }
            }
        }

        if app.should_quit {
            break;
        }
    }

    // Restore terminal
    disable_raw_mode()?;
    if mouse_enabled {
        execute!(terminal.backend_mut(), DisableMouseCapture)?;
    }
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    Ok(())
}
