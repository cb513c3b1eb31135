use clickchess::config::SessionConfig;
use clickchess::core::{BoardGeometry, GameStatus};
use clickchess::display::{render_board, DisplayState};
use clickchess::engine::UciEngine;
use clickchess::game::{Game, TurnPhase};
use clickchess::ui;
use crossterm::event::{self, Event, KeyCode, MouseButton, MouseEvent, MouseEventKind};
use crossterm::{execute, terminal};
use shakmaty::Color;
use std::io;
use std::time::Duration;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    terminal::enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(
        stdout,
        terminal::EnterAlternateScreen,
        event::EnableMouseCapture
    )?;

    let res = run().await;

    execute!(
        io::stdout(),
        event::DisableMouseCapture,
        terminal::LeaveAlternateScreen
    )?;
    terminal::disable_raw_mode()?;

    res
}

async fn run() -> anyhow::Result<()> {
    let mut config = SessionConfig::load_or_default();

    print!("=== clickchess ===\r\n");
    config.skill_level = ui::select_skill_level(config.skill_level)?;

    print!("\r\nStarting engine ({})...\r\n", config.engine_path);
    std::io::Write::flush(&mut io::stdout())?;
    let mut engine = UciEngine::spawn(&config.engine_path, config.skill_level).await?;

    let outcome = play(&mut engine, &config).await;
    let shutdown = engine.quit().await;
    outcome.and(shutdown)
}

/// The session event loop: one serialized stream of clicks and engine
/// replies feeding the turn controller. The engine exchange is the
/// only await point; no input is serviced while it is outstanding.
async fn play(engine: &mut UciEngine, config: &SessionConfig) -> anyhow::Result<()> {
    let geometry = BoardGeometry::default();
    let mut game = Game::new();
    let mut state = DisplayState::default();

    loop {
        refresh(&mut state, &game);
        render_board(game.board(), &state);

        if game.wants_engine_move() {
            let reply = engine
                .bestmove(&game.board().fen(), config.move_time())
                .await;
            let fault = match reply {
                Ok(text) => game.apply_engine_reply(&text).err(),
                Err(err) => {
                    game.fault();
                    Some(err)
                }
            };
            if let Some(err) = fault {
                state.status_msg = Some(format!("Engine failure: {:#}", err));
                render_board(game.board(), &state);
                ui::wait_for_key()?;
                return Err(err);
            }
            continue;
        }

        if game.is_over() {
            ui::wait_for_key()?;
            return Ok(());
        }

        if event::poll(Duration::from_millis(100))? {
            match event::read()? {
                Event::Key(key) if key.code == KeyCode::Char('q') => return Ok(()),
                Event::Mouse(MouseEvent {
                    kind: MouseEventKind::Down(MouseButton::Left),
                    column,
                    row,
                    ..
                }) => {
                    if let Some(square) = geometry.square_at(column, row) {
                        game.on_square_clicked(square);
                    }
                }
                _ => {}
            }
        }
    }
}

fn refresh(state: &mut DisplayState, game: &Game) {
    state.selected = game.selection();
    state.highlights = game.selected_targets();
    state.last_move = game
        .last_move()
        .map(|m| (m.from().unwrap_or_else(|| m.to()), m.to()));
    state.status_msg = Some(status_line(game));
}

fn status_line(game: &Game) -> String {
    match game.phase() {
        TurnPhase::AwaitingHuman => {
            if game.selection().is_some() {
                "Your move: pick a destination".to_string()
            } else {
                "Your move: click one of your pieces".to_string()
            }
        }
        TurnPhase::AwaitingEngine => "Engine is thinking...".to_string(),
        TurnPhase::GameOver => format!("{} - press any key", result_text(game)),
        TurnPhase::Faulted => "Engine failure".to_string(),
        TurnPhase::ApplyingHumanMove | TurnPhase::ApplyingEngineMove => String::new(),
    }
}

fn result_text(game: &Game) -> String {
    match game.status() {
        GameStatus::Checkmate => {
            // The side to move is the side that got mated.
            let winner = match game.board().turn() {
                Color::White => "Black",
                Color::Black => "White",
            };
            format!("Checkmate! {} wins", winner)
        }
        GameStatus::Stalemate => "Stalemate".to_string(),
        GameStatus::DrawInsufficientMaterial => "Draw: insufficient material".to_string(),
        GameStatus::DrawClaimable => "Draw: claimable by rule".to_string(),
        GameStatus::InProgress => String::new(),
    }
}
