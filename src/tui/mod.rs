pub mod app;
pub mod event;
pub mod layout;

use std::io::{self, Stdout};
use std::rc::Rc;
use std::time::Duration;

use crossterm::{
    event::{KeyCode, KeyEvent, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};

use crate::app::{App, Result};
use crate::config::Config;
use crate::poller::PollSettings;
use crate::view::{bind_view, ViewModel};

use self::app::{ActivePane, TuiApp};
use self::event::{Action, AppEvent, EventHandler};

type Tui = Terminal<CrosstermBackend<Stdout>>;

/// Run the interactive UI until the user quits. Must be called inside a
/// `LocalSet`; polling runs alongside and is stopped on exit.
pub async fn run(
    app: Rc<App>,
    config: &Config,
    settings: PollSettings,
    initial_urls: Vec<String>,
) -> Result<()> {
    for (binding, reason) in config.keybindings.invalid_bindings() {
        tracing::warn!(binding, reason, "Ignoring keybinding");
    }

    let view = Rc::new(ViewModel::new(app.locale));
    let subscriptions = bind_view(&app.store, view.clone());
    let poller = app.start_polling(settings);

    if !initial_urls.is_empty() {
        let app = app.clone();
        tokio::task::spawn_local(async move {
            for url in initial_urls {
                app.submit(&url).await;
            }
        });
    }

    let mut terminal = setup_terminal()?;
    let result = run_app(&mut terminal, &app, &view, config).await;
    restore_terminal(&mut terminal)?;

    poller.shutdown().await;
    for id in subscriptions {
        app.store.unsubscribe(id);
    }
    result
}

fn setup_terminal() -> Result<Tui> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let terminal = Terminal::new(backend)?;
    Ok(terminal)
}

fn restore_terminal(terminal: &mut Tui) -> Result<()> {
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;
    Ok(())
}

async fn run_app(
    terminal: &mut Tui,
    app: &Rc<App>,
    view: &ViewModel,
    config: &Config,
) -> Result<()> {
    let mut tui_app = TuiApp::new();
    let event_handler = EventHandler::new(Duration::from_millis(50));

    loop {
        if view.take_clear_input() {
            tui_app.input.clear();
            tui_app.editing = false;
            tui_app.mark_redraw();
        }

        if tui_app.take_redraw(view) {
            tui_app.clamp(&view.regions());
            terminal.draw(|frame| {
                layout::render(frame, &mut tui_app, &view.regions(), app.locale, &config.colors)
            })?;
        }

        match event_handler.next().await? {
            AppEvent::Key(key) => {
                if tui_app.editing {
                    handle_input_key(key, &mut tui_app, app, view);
                } else {
                    handle_key(key, &mut tui_app, app, view, config);
                }
                tui_app.mark_redraw();
            }
            AppEvent::Resize => tui_app.mark_redraw(),
            AppEvent::Tick => {}
        }

        if tui_app.should_quit {
            break;
        }
    }

    Ok(())
}

fn handle_input_key(key: KeyEvent, tui_app: &mut TuiApp, app: &Rc<App>, view: &ViewModel) {
    let locked = view.regions().form.locked;

    match key.code {
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            tui_app.should_quit = true;
        }
        KeyCode::Esc => tui_app.editing = false,
        KeyCode::Enter if !locked => {
            let app = app.clone();
            let url = tui_app.input.clone();
            tokio::task::spawn_local(async move {
                app.submit(&url).await;
            });
        }
        KeyCode::Backspace if !locked => {
            tui_app.input.pop();
            clear_feedback(app, view);
        }
        KeyCode::Char(c) if !locked => {
            tui_app.input.push(c);
            clear_feedback(app, view);
        }
        _ => {}
    }
}

/// Editing the input dismisses the previous submission's message.
fn clear_feedback(app: &App, view: &ViewModel) {
    let has_feedback = view.regions().form.feedback.is_some();
    if has_feedback {
        app.reset_form();
    }
}

fn handle_key(
    key: KeyEvent,
    tui_app: &mut TuiApp,
    app: &Rc<App>,
    view: &ViewModel,
    config: &Config,
) {
    let action = config.keybindings.get_action(&key);
    let modal = view.regions().modal.clone();

    if let Some(modal) = modal {
        match action {
            Action::Quit => tui_app.should_quit = true,
            Action::Close | Action::Select => app.deselect_post(),
            Action::OpenInBrowser => open_link(tui_app, modal.link.as_deref()),
            _ => {}
        }
        return;
    }

    match action {
        Action::Quit => tui_app.should_quit = true,
        Action::MoveUp => tui_app.move_up(&view.regions()),
        Action::MoveDown => tui_app.move_down(&view.regions()),
        Action::NextPane => tui_app.active_pane = tui_app.active_pane.next(),
        Action::PrevPane => tui_app.active_pane = tui_app.active_pane.prev(),
        Action::FocusInput => {
            tui_app.editing = true;
            tui_app.status_message = None;
        }
        Action::Select => {
            if tui_app.active_pane == ActivePane::Posts {
                let post_id = tui_app.selected_post(&view.regions()).map(|p| p.id);
                if let Some(post_id) = post_id {
                    app.select_post(post_id);
                }
            }
        }
        Action::OpenInBrowser => {
            let link = tui_app
                .selected_post(&view.regions())
                .and_then(|p| p.link.clone());
            open_link(tui_app, link.as_deref());
        }
        Action::Close | Action::None => {}
    }
}

fn open_link(tui_app: &mut TuiApp, link: Option<&str>) {
    let Some(link) = link else {
        tui_app.set_status("Post has no link".to_string());
        return;
    };
    if let Err(e) = open::that(link) {
        tracing::warn!(link, error = %e, "Failed to open browser");
        tui_app.set_status(format!("Failed to open browser: {}", e));
    }
}
