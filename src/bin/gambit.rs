// Copyright 2017-2019 Sean Gillespie.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

#[macro_use]
extern crate clap;
#[macro_use]
extern crate log;

use std::convert::TryFrom;
use std::fs::File;
use std::io::{self, BufReader, Write};
use std::net::TcpStream;
use std::process;
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

use clap::{App, AppSettings, Arg, ArgMatches, SubCommand};
use gambit::inbox::{spawn_reader, Inbox};
use gambit::protocol;
use gambit::{perft, Board, Color, GameSession, GameState, Mode, Move, SessionConfig, Square};

const FRAME: Duration = Duration::from_millis(50);

fn main() {
    env_logger::init();
    let matches = App::new(crate_name!())
        .version(crate_version!())
        .author(crate_authors!())
        .about(crate_description!())
        .setting(AppSettings::SubcommandRequiredElseHelp)
        .arg(
            Arg::with_name("config")
                .help("Session configuration file")
                .value_name("FILE")
                .long("--config")
                .default_value("gambit.json")
                .takes_value(true),
        )
        .arg(
            Arg::with_name("time")
                .help("Initial time per side, in seconds")
                .value_name("SECONDS")
                .short("-t")
                .long("--time")
                .takes_value(true),
        )
        .subcommand(
            SubCommand::with_name("perft")
                .about("Counts the legal move tree of a board diagram")
                .arg(
                    Arg::with_name("DIAGRAM")
                        .help("Piece placement, ranks 8 to 1 separated by '/'")
                        .index(1),
                )
                .arg(
                    Arg::with_name("depth")
                        .help("Depth of move tree to count")
                        .value_name("DEPTH")
                        .short("-d")
                        .long("--depth")
                        .default_value("3")
                        .takes_value(true),
                )
                .arg(
                    Arg::with_name("black")
                        .help("Black moves first")
                        .short("-b")
                        .long("--black"),
                ),
        )
        .subcommand(SubCommand::with_name("play").about("Hot-seat game on the terminal"))
        .subcommand(
            SubCommand::with_name("connect")
                .about("Play one side of a game hosted by a server")
                .arg(
                    Arg::with_name("ADDR")
                        .help("Server address, host:port")
                        .required(true)
                        .index(1),
                ),
        )
        .get_matches();

    let config = load_config(&matches);
    if let Some(matches) = matches.subcommand_matches("perft") {
        run_perft(matches);
    }

    if matches.subcommand_matches("play").is_some() {
        run_play(config);
    }

    if let Some(matches) = matches.subcommand_matches("connect") {
        run_connect(matches, config);
    }
}

fn load_config(matches: &ArgMatches) -> SessionConfig {
    let path = matches.value_of("config").unwrap_or("gambit.json");
    let mut config = match File::open(path) {
        Ok(mut file) => match serde_json::from_reader::<_, SessionConfig>(&mut file) {
            Ok(config) => config,
            Err(err) => {
                warn!("ignoring malformed config {}: {}", path, err);
                SessionConfig::default()
            }
        },
        Err(_) => SessionConfig::default(),
    };

    if matches.is_present("time") {
        config.initial_time_secs = value_t_or_exit!(matches, "time", u64);
    }

    debug!("session config: {:?}", config);
    config
}

fn run_perft(matches: &ArgMatches) -> ! {
    let depth = value_t_or_exit!(matches, "depth", u32);
    let board = match matches.value_of("DIAGRAM") {
        Some(diagram) => match Board::from_diagram(diagram) {
            Ok(board) => board,
            Err(err) => {
                println!("invalid diagram: {:?}", err);
                process::exit(1);
            }
        },
        None => Board::starting(),
    };
    let color = if matches.is_present("black") {
        Color::Black
    } else {
        Color::White
    };

    println!("diagram: {}", board.as_diagram());
    println!("to move: {}", color);
    println!("depth:   {}", depth);
    println!();
    println!("{}", board);
    println!();
    for i in 1..depth + 1 {
        let start = Instant::now();
        let results = perft(&board, color, i);
        let duration = Instant::now() - start;
        println!("perft({}) = {} ({} ms)", i, results, duration.as_millis());
    }

    process::exit(0);
}

fn run_play(config: SessionConfig) -> ! {
    let commands = read_commands(config.inbox_capacity);
    let mut session = GameSession::new(config);
    println!("hot-seat game. commands: white, black, <square>, <move>, reset, quit");
    let mut shown = None;
    loop {
        let now = Instant::now();
        for command in commands.drain() {
            if !handle_command(&mut session, command.trim(), now) {
                process::exit(0);
            }
        }

        session.update(now);
        redraw(&session, &mut shown);
        if Arc::strong_count(&commands) == 1 && commands.is_empty() {
            process::exit(0);
        }

        thread::sleep(FRAME);
    }
}

fn run_connect(matches: &ArgMatches, config: SessionConfig) -> ! {
    let addr = matches.value_of("ADDR").unwrap();
    let mut stream = match TcpStream::connect(addr) {
        Ok(stream) => stream,
        Err(err) => {
            println!("failed to connect to {}: {}", addr, err);
            process::exit(1);
        }
    };

    info!("connected to {}", addr);
    let inbox = Arc::new(Inbox::new(config.inbox_capacity));
    let reader = stream
        .try_clone()
        .and_then(|read_half| spawn_reader(BufReader::new(read_half), inbox.clone()));
    if let Err(err) = reader {
        println!("failed to start network reader: {}", err);
        process::exit(1);
    }

    let commands = read_commands(config.inbox_capacity);
    let mut session = GameSession::with_mode(config, Mode::Networked);
    println!("networked game. commands: ready, <square>, <move>, reset, quit");
    let mut shown = None;
    loop {
        let now = Instant::now();
        session.process_inbox(&inbox, now);
        for command in commands.drain() {
            if !handle_command(&mut session, command.trim(), now) {
                process::exit(0);
            }
        }

        session.update(now);
        for msg in session.take_outgoing() {
            let sent = protocol::encode(&msg)
                .map_err(|err| io::Error::new(io::ErrorKind::InvalidData, err))
                .and_then(|line| stream.write_all(line.as_bytes()));
            if let Err(err) = sent {
                println!("lost connection: {}", err);
                process::exit(1);
            }
        }

        redraw(&session, &mut shown);
        if Arc::strong_count(&inbox) == 1 && inbox.is_empty() {
            println!("server closed the connection");
            process::exit(0);
        }

        if Arc::strong_count(&commands) == 1 && commands.is_empty() {
            process::exit(0);
        }

        thread::sleep(FRAME);
    }
}

/// Feeds lines typed on stdin into an inbox so the game loop can keep its
/// frame rate while waiting for input. The inbox is released by the reader
/// thread once stdin closes.
fn read_commands(capacity: usize) -> Arc<Inbox> {
    let commands = Arc::new(Inbox::new(capacity));
    if let Err(err) = spawn_reader(BufReader::new(io::stdin()), commands.clone()) {
        println!("failed to read stdin: {}", err);
        process::exit(1);
    }

    commands
}

/// Applies one line of terminal input. Returns false when the player quits.
fn handle_command(session: &mut GameSession, command: &str, now: Instant) -> bool {
    match command {
        "quit" | "exit" => return false,
        "reset" | "home" => session.reset(),
        "white" | "ready" => session.choose_side(Color::White, now),
        "black" => session.choose_side(Color::Black, now),
        _ => {
            if let Ok(square) = Square::try_from(command) {
                println!("{:?}", session.click(square, now));
            } else if let Ok(mov) = Move::try_from(command) {
                session.click(mov.source(), now);
                println!("{:?}", session.click(mov.destination(), now));
            } else {
                println!("unrecognized command `{}`", command);
            }
        }
    }

    true
}

// What the terminal last showed, so the board is only redrawn when it changes.
type Shown = Option<(GameState, String, Option<Square>, String)>;

fn redraw(session: &GameSession, shown: &mut Shown) {
    let current = Some((
        session.state(),
        session.message().to_owned(),
        session.selected(),
        session.board().as_diagram(),
    ));
    if *shown != current {
        show(session);
        *shown = current;
    }
}

fn show(session: &GameSession) {
    println!();
    println!("{}", session.board());
    println!(
        "White: {}  Black: {}",
        session.formatted_clock(Color::White),
        session.formatted_clock(Color::Black)
    );

    if let Some(selected) = session.selected() {
        let targets: Vec<_> = session.highlights().iter().map(|s| s.to_string()).collect();
        println!("selected {}: {}", selected, targets.join(" "));
    }

    match session.state() {
        GameState::ChoosingSide => println!("choose a side to start"),
        GameState::GameOver => println!("game over. type `reset` to play again"),
        GameState::Playing => {}
    }

    if !session.message().is_empty() {
        println!("{}", session.message());
    }
}
