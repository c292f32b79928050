//! Duel runner (default binary).
//!
//! `versus` pits two search bots against each other headless and prints the
//! result. `play` puts a keyboard player against one bot in the terminal,
//! drawn as plain text.

use std::io::{self, Write};
use std::time::{Duration, Instant};

use anyhow::Result;
use crossterm::event::{self, Event, KeyEventKind};
use crossterm::{cursor, queue, style, terminal};

use tetris_duel::config::{DriverConfig, Mode};
use tetris_duel::core::{BoardSnapshot, BoardState};
use tetris_duel::engine::{Controller, HeuristicController, Match, SearchConfig};
use tetris_duel::input::{should_quit, InputHandler};
use tetris_duel::types::BoardId;
use tetris_duel::view::render_boards;

fn main() -> Result<()> {
    let args: Vec<String> = std::env::args().skip(1).collect();
    let config = DriverConfig::from_env().with_args(&args)?;

    match config.mode {
        Mode::Versus => run_versus(&config),
        Mode::Play => {
            enter_terminal()?;
            let result = run_play(&config);
            // Always try to restore terminal state.
            let _ = exit_terminal();
            result
        }
    }
}

fn bot(config: &DriverConfig) -> Controller {
    let search = SearchConfig::default().with_depth(config.depth);
    Controller::Heuristic(HeuristicController::new(search).with_cooldown_ms(config.cooldown_ms))
}

fn snapshots(m: &Match) -> Vec<BoardSnapshot> {
    m.players().iter().map(|p| p.board.snapshot()).collect()
}

fn run_versus(config: &DriverConfig) -> Result<()> {
    eprintln!(
        "[Driver] versus seed={} depth={} cooldown={}ms max_ticks={}",
        config.seed, config.depth, config.cooldown_ms, config.max_ticks
    );

    let mut m = Match::new();
    m.add_player(BoardState::with_seed(config.seed), bot(config));
    m.add_player(BoardState::with_seed(config.seed.wrapping_add(1)), bot(config));

    let mut pieces = [0u32; 2];
    let mut lines = [0u32; 2];
    let mut ticks = 0u64;
    while !m.is_finished() && ticks < config.max_ticks {
        for report in m.tick(config.tick_ms) {
            let seat = report.id.0 as usize;
            if report.results.locked {
                pieces[seat] += 1;
                lines[seat] += report.results.lines_cleared;
            }
            if report.results.lines_cleared >= 4 {
                eprintln!("[Driver] board {} cleared four rows at tick {}", seat, ticks);
            }
        }
        ticks += 1;
    }

    print!("{}", render_boards(&snapshots(&m)));
    for seat in 0..2 {
        println!(
            "board {}: {} pieces, {} lines",
            seat, pieces[seat], lines[seat]
        );
    }
    match m.winner() {
        Some(BoardId(id)) => println!("winner: board {} after {} ticks", id, ticks),
        None if m.is_finished() => println!("draw after {} ticks", ticks),
        None => {
            eprintln!("[Driver] tick limit of {} reached", config.max_ticks);
            println!("no winner after {} ticks", ticks);
        }
    }
    Ok(())
}

fn enter_terminal() -> Result<()> {
    terminal::enable_raw_mode()?;
    let mut out = io::stdout();
    queue!(out, terminal::EnterAlternateScreen, cursor::Hide)?;
    out.flush()?;
    Ok(())
}

fn exit_terminal() -> Result<()> {
    let mut out = io::stdout();
    queue!(out, cursor::Show, terminal::LeaveAlternateScreen)?;
    out.flush()?;
    terminal::disable_raw_mode()?;
    Ok(())
}

fn draw(m: &Match, bell: bool) -> Result<()> {
    let text = render_boards(&snapshots(m)).replace('\n', "\r\n");
    let mut out = io::stdout();
    queue!(
        out,
        cursor::MoveTo(0, 0),
        terminal::Clear(terminal::ClearType::All),
        style::Print(text),
        style::Print("arrows move, up/z rotate, space drop, c hold, q quit\r\n")
    )?;
    if bell {
        queue!(out, style::Print('\x07'))?;
    }
    out.flush()?;
    Ok(())
}

fn run_play(config: &DriverConfig) -> Result<()> {
    let mut m = Match::new();
    let human = m
        .add_player(BoardState::with_seed(config.seed), Controller::human())
        .ok_or_else(|| anyhow::anyhow!("no seat for the human player"))?;
    m.add_player(BoardState::with_seed(config.seed.wrapping_add(1)), bot(config));

    let mut input = InputHandler::new();
    let tick_duration = Duration::from_millis(u64::from(config.tick_ms));
    let mut last_tick = Instant::now();
    let mut bell = false;

    loop {
        draw(&m, bell)?;
        bell = false;

        // Input with timeout until next tick.
        let timeout = tick_duration
            .checked_sub(last_tick.elapsed())
            .unwrap_or_else(|| Duration::from_secs(0));
        if event::poll(timeout)? {
            if let Event::Key(key) = event::read()? {
                if key.kind != KeyEventKind::Release && should_quit(key) {
                    return Ok(());
                }
                input.handle_event(key);
            }
        }

        if last_tick.elapsed() < tick_duration {
            continue;
        }
        last_tick = Instant::now();

        input.update(config.tick_ms);
        if let Some(player) = m.player_mut(human) {
            player.controller.set_input(input.frame());
        }
        for report in m.tick(config.tick_ms) {
            bell |= report.play_lock_cue;
        }

        if m.is_finished() {
            draw(&m, false)?;
            event::read()?;
            return Ok(());
        }
    }
}
