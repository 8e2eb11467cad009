use anyhow::Result;
use crossterm::{
    event::{self, Event, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use parlance::{
    api::ChatClient,
    chat_view::draw_chat,
    chat_widget::{submit, ChatWidget},
    config::Config,
    key_handlers::{handle_chat_input, ChatAction},
    logging::init_logging,
};
use ratatui::{backend::Backend, backend::CrosstermBackend, Terminal};
use std::{io, sync::Arc, time::Duration};
use tokio::sync::Mutex;

#[tokio::main]
async fn main() -> Result<()> {
    dotenv::dotenv().ok();

    let config = Config::load()?;
    let _logger = init_logging(&config.log_level)?;
    log::info!("starting parlance, backend at {}", config.backend_url);

    let client = Arc::new(ChatClient::new(config.backend_url));
    let widget = Arc::new(Mutex::new(ChatWidget::new(client)));

    // Set up terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let res = run_app(&mut terminal, widget).await;

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    res
}

/// Main loop: redraw, poll for input, dispatch actions. The poll timeout
/// doubles as the tick that keeps the typing spinner animating.
async fn run_app<B: Backend>(
    terminal: &mut Terminal<B>,
    widget: Arc<Mutex<ChatWidget>>,
) -> Result<()> {
    let tick_rate = Duration::from_millis(100);
    loop {
        {
            let mut guard = widget.lock().await;
            terminal.draw(|f| draw_chat(f, &mut guard))?;
        }

        if !event::poll(tick_rate)? {
            continue;
        }
        if let Event::Key(key) = event::read()? {
            if key.kind != KeyEventKind::Press {
                continue;
            }
            let action = {
                let mut guard = widget.lock().await;
                handle_chat_input(key, &mut guard)
            };
            match action {
                Some(ChatAction::Quit) => {
                    log::info!("quit requested");
                    return Ok(());
                }
                Some(ChatAction::Submit(input)) => {
                    tokio::spawn(submit(widget.clone(), input));
                }
                None => {}
            }
        }
    }
}
