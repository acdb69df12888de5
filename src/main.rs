use crossterm::event::{self, Event, KeyCode};
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use crossterm::ExecutableCommand;
use ratatui::{backend::CrosstermBackend, Terminal};
use serpent::core::constants::REALTIME_FRAME_MS;
use serpent::ui::game_over::GameOverScreen;
use serpent::ui::game_scene::render_game_scene;
use serpent::{advance, build_info, process_input, GameInput, GameState, HighscoreStore, TickEvent};
use std::io;
use std::time::{Duration, Instant};

enum Screen {
    Game,
    GameOver,
}

/// How long a tick-event message stays in the status bar.
const EVENT_MESSAGE_MS: u64 = 2500;

/// Transient status line for a tick event, if it deserves one.
fn event_status(event: &TickEvent) -> Option<String> {
    match event {
        TickEvent::FoodEaten { value } if *value > 1 => Some(format!("+{} points!", value)),
        TickEvent::FoodEaten { .. } => None,
        TickEvent::BonusExpired => Some("Bonus expired".to_string()),
        TickEvent::ExtraLife { lives } => Some(format!("Extra life! {} lives", lives)),
        TickEvent::LifeLost { lives } => Some(if *lives == 1 {
            "Crashed! Last life!".to_string()
        } else {
            format!("Crashed! {} lives left", lives)
        }),
        TickEvent::SlowdownStarted => Some("Slow motion!".to_string()),
        TickEvent::SlowdownEnded => None,
        TickEvent::ObstacleAdded { .. } => Some("A wall rises".to_string()),
        TickEvent::GameOver { .. } => None,
    }
}

fn main() -> io::Result<()> {
    // Handle CLI arguments
    let args: Vec<String> = std::env::args().collect();

    if args.len() > 1 {
        match args[1].as_str() {
            "--version" | "-v" => {
                println!(
                    "serpent {} ({})",
                    build_info::BUILD_DATE,
                    build_info::BUILD_COMMIT
                );
                std::process::exit(0);
            }
            "--help" | "-h" => {
                println!("Serpent - Terminal Snake Arcade\n");
                println!("Usage: serpent [option]\n");
                println!("Options:");
                println!("  --version  Show version information");
                println!("  --help     Show this help message");
                std::process::exit(0);
            }
            other => {
                eprintln!("Unknown option: {}", other);
                eprintln!("Run 'serpent --help' for usage.");
                std::process::exit(1);
            }
        }
    }

    let store = HighscoreStore::new()?;
    let mut rng = rand::thread_rng();
    let mut state = GameState::new(&mut rng);

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    stdout.execute(EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut current_screen = Screen::Game;
    let mut game_over: Option<GameOverScreen> = None;
    let mut status_message: Option<(String, Instant)> = None;
    let mut last_frame = Instant::now();

    // Main loop
    loop {
        match current_screen {
            Screen::Game => {
                // Expire the transient event message
                if let Some((_, since)) = &status_message {
                    if since.elapsed() >= Duration::from_millis(EVENT_MESSAGE_MS) {
                        status_message = None;
                    }
                }

                terminal.draw(|frame| {
                    render_game_scene(
                        frame,
                        frame.size(),
                        &state,
                        status_message.as_ref().map(|(text, _)| text.as_str()),
                    );
                })?;

                // Poll briefly so the frame clock keeps running
                if event::poll(Duration::from_millis(REALTIME_FRAME_MS))? {
                    if let Event::Key(key_event) = event::read()? {
                        match key_event.code {
                            KeyCode::Up => process_input(&mut state, GameInput::Up),
                            KeyCode::Down => process_input(&mut state, GameInput::Down),
                            KeyCode::Left => process_input(&mut state, GameInput::Left),
                            KeyCode::Right => process_input(&mut state, GameInput::Right),
                            KeyCode::Char(' ') => process_input(&mut state, GameInput::Pause),
                            KeyCode::Char('q') | KeyCode::Char('Q') => break,
                            _ => {}
                        }
                    }
                }

                let dt_ms = last_frame.elapsed().as_millis() as u64;
                last_frame = Instant::now();

                for event in advance(&mut state, dt_ms, &mut rng) {
                    if let TickEvent::GameOver { score, time_ms } = event {
                        game_over = Some(GameOverScreen::new(score, time_ms, store.load()));
                        current_screen = Screen::GameOver;
                    } else if let Some(text) = event_status(&event) {
                        status_message = Some((text, Instant::now()));
                    }
                }
            }

            Screen::GameOver => {
                let Some(screen) = game_over.as_mut() else {
                    current_screen = Screen::Game;
                    continue;
                };

                terminal.draw(|frame| screen.draw(frame, frame.size()))?;

                let mut start_new_game = false;
                if event::poll(Duration::from_millis(50))? {
                    if let Event::Key(key_event) = event::read()? {
                        if screen.name_committed {
                            match key_event.code {
                                KeyCode::Char('n') | KeyCode::Char('N') => {
                                    start_new_game = true;
                                }
                                KeyCode::Char('q') | KeyCode::Char('Q') => break,
                                _ => {}
                            }
                        } else {
                            // Name entry: every printable key belongs to the
                            // input field, including 'q'
                            match key_event.code {
                                KeyCode::Enter => {
                                    match store.record(
                                        screen.entry_name(),
                                        screen.final_score,
                                        screen.final_time_ms,
                                    ) {
                                        Ok(()) => screen.mark_saved(store.load()),
                                        Err(e) => {
                                            screen.save_error =
                                                Some(format!("Save failed: {}", e));
                                        }
                                    }
                                }
                                KeyCode::Esc => screen.skip_save(),
                                KeyCode::Backspace => screen.handle_backspace(),
                                KeyCode::Char(c) => screen.handle_char_input(c),
                                _ => {}
                            }
                        }
                    }
                }

                if start_new_game {
                    state = GameState::new(&mut rng);
                    game_over = None;
                    status_message = None;
                    last_frame = Instant::now();
                    current_screen = Screen::Game;
                }
            }
        }
    }

    // Cleanup terminal
    disable_raw_mode()?;
    terminal.backend_mut().execute(LeaveAlternateScreen)?;

    println!("Goodbye!");

    Ok(())
}
