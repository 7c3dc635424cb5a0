// Copyright 2017-2019 Sean Gillespie.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! The game state machine. A `GameSession` owns everything a running game needs
//! (board, clocks, side to move, selection and the status message) and is driven
//! by three kinds of input: clicks on squares, clock ticks, and messages from an
//! authoritative server.
use std::mem;
use std::time::{Duration, Instant};

use crate::board::Board;
use crate::clock::{Clocks, FrameClock};
use crate::inbox::Inbox;
use crate::movegen::MoveVec;
use crate::moves::Move;
use crate::protocol::{self, ClientMessage, RemoteState, ServerMessage};
use crate::rules::{self, CheckStatus, MoveRejection};
use crate::types::{Color, Piece, Square};

const WAITING_FOR_COLOR: &str = "Waiting for color assignment...";
const WAITING_FOR_SERVER: &str = "Ready signal sent. Waiting for server...";

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum GameState {
    ChoosingSide,
    Playing,
    GameOver,
}

/// Who is allowed to drive the board from this session.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Mode {
    /// Both sides play from the same session.
    Hotseat,

    /// One side plays from this session and a server relays the other.
    Networked,
}

/// Tunables for a session, loadable from JSON. Missing fields take their
/// defaults.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    pub initial_time_secs: u64,
    pub inbox_capacity: usize,
}

impl SessionConfig {
    pub fn initial_time(&self) -> Duration {
        Duration::from_secs(self.initial_time_secs)
    }
}

impl Default for SessionConfig {
    fn default() -> SessionConfig {
        SessionConfig {
            initial_time_secs: 600,
            inbox_capacity: 256,
        }
    }
}

/// What a click on a square did.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ClickOutcome {
    Selected(Square),
    Deselected,
    Moved(Move),
    Rejected(MoveRejection),
    Ignored,
}

pub struct GameSession {
    config: SessionConfig,
    mode: Mode,
    board: Board,
    clocks: Clocks,
    frame: FrameClock,
    state: GameState,
    turn: Option<Color>,
    player: Option<Color>,
    selected: Option<Square>,
    highlights: MoveVec,
    check: CheckStatus,
    message: String,
    outgoing: Vec<ClientMessage>,
}

impl GameSession {
    /// Creates a hot-seat session.
    pub fn new(config: SessionConfig) -> GameSession {
        GameSession::with_mode(config, Mode::Hotseat)
    }

    /// Creates a session that plays one side against a server.
    pub fn networked(config: SessionConfig) -> GameSession {
        GameSession::with_mode(config, Mode::Networked)
    }

    pub fn with_mode(config: SessionConfig, mode: Mode) -> GameSession {
        let clocks = Clocks::new(config.initial_time());
        GameSession {
            config,
            mode,
            board: Board::starting(),
            clocks,
            frame: FrameClock::new(),
            state: GameState::ChoosingSide,
            turn: None,
            player: None,
            selected: None,
            highlights: MoveVec::new(),
            check: CheckStatus::None,
            message: String::new(),
            outgoing: vec![],
        }
    }

    /// Returns the session to side selection with a fresh board and full clocks.
    pub fn reset(&mut self) {
        info!("resetting session");
        self.board = Board::starting();
        self.clocks = Clocks::new(self.config.initial_time());
        self.frame.clear();
        self.state = GameState::ChoosingSide;
        self.turn = None;
        self.player = None;
        self.check = CheckStatus::None;
        self.message.clear();
        self.outgoing.clear();
        self.clear_selection();
    }

    /// Leaves side selection. In hot-seat mode the game starts with `color` to
    /// move. In networked mode the server decides who plays what, so this only
    /// tells it we are ready and `color` is not used. The first side's clock
    /// starts running at `now`.
    pub fn choose_side(&mut self, color: Color, now: Instant) {
        if self.state != GameState::ChoosingSide {
            debug!("ignoring side choice in state {:?}", self.state);
            return;
        }

        match self.mode {
            Mode::Hotseat => {
                info!("hot-seat game starting, {} to move", color);
                self.state = GameState::Playing;
                self.turn = Some(color);
                self.frame.restart(now);
                self.refresh_status();
            }
            Mode::Networked => {
                self.outgoing.push(ClientMessage::Ready);
                self.message = WAITING_FOR_SERVER.to_owned();
            }
        }
    }

    /// Advances the game by one frame. `elapsed` is charged to the side on move;
    /// if its clock runs out the other side wins, otherwise the check status and
    /// message are refreshed.
    pub fn tick(&mut self, elapsed: Duration) {
        match self.state {
            GameState::ChoosingSide => {
                self.message.clear();
                return;
            }
            GameState::GameOver => return,
            GameState::Playing => {}
        }

        let color = match self.turn {
            Some(color) => color,
            None => return,
        };

        if self.clocks.run_down(color, elapsed) {
            self.finish(format!("{} wins on time!", color.toggle()));
            return;
        }

        self.refresh_status();
    }

    /// Ticks with the wall time since the previous update.
    pub fn update(&mut self, now: Instant) {
        let elapsed = self.frame.restart(now);
        self.tick(elapsed);
    }

    /// Handles a click on a square by the local player at `now`. Time up to the
    /// click is charged to the side on move first, so a move made after its
    /// clock ran out is ignored.
    pub fn click(&mut self, square: Square, now: Instant) -> ClickOutcome {
        if self.state != GameState::Playing {
            return ClickOutcome::Ignored;
        }

        self.update(now);
        if self.state != GameState::Playing {
            return ClickOutcome::Ignored;
        }

        let turn = match self.turn {
            Some(turn) => turn,
            None => return ClickOutcome::Ignored,
        };

        if self.mode == Mode::Networked {
            match self.player {
                None => {
                    self.message = WAITING_FOR_COLOR.to_owned();
                    return ClickOutcome::Ignored;
                }
                Some(player) if player != turn => return ClickOutcome::Ignored,
                Some(_) => {}
            }
        }

        if !square.on_board() {
            return self.deselect();
        }

        if let Some(from) = self.selected {
            if self.highlights.contains(&square) {
                return self.play(Move::new(from, square), turn);
            }
        }

        match self.board.piece_at(square) {
            Some(piece) if piece.color == turn => {
                if self.selected == Some(square) {
                    return self.deselect();
                }

                self.selected = Some(square);
                self.highlights = rules::legal_moves(&self.board, square);
                ClickOutcome::Selected(square)
            }
            _ => self.deselect(),
        }
    }

    /// Applies a server notification. The server is trusted: moves are not
    /// checked for legality, only that the named piece is where it is said to be.
    /// A finished game stays finished until `reset`.
    pub fn apply_message(&mut self, msg: ServerMessage, now: Instant) {
        match msg {
            ServerMessage::AssignColor { color } => {
                info!("assigned color {}", color);
                self.player = Some(color);
            }
            ServerMessage::Turn { current_turn } => {
                debug!("server turn: {}", current_turn);
                self.turn = Some(current_turn);
                self.frame.restart(now);
                self.clear_selection();
                if self.state == GameState::Playing {
                    self.refresh_status();
                }
            }
            ServerMessage::Move {
                from,
                to,
                piece,
                color,
            } => self.apply_remote_move(Move::new(from, to), Piece::new(piece, color)),
            ServerMessage::GameState {
                state: RemoteState::Playing,
                message,
            } => {
                if self.state == GameState::GameOver {
                    debug!("ignoring server start of a finished game");
                    return;
                }

                info!("server started the game");
                self.state = GameState::Playing;
                if self.turn.is_none() {
                    self.turn = Some(Color::White);
                }

                self.frame.restart(now);
                self.refresh_status();
                if let Some(message) = message {
                    self.message = message;
                }
            }
            ServerMessage::GameState {
                state: RemoteState::GameOver,
                message,
            } => {
                let message = message.unwrap_or_else(|| self.message.clone());
                self.finish(message);
            }
        }
    }

    /// Decodes and applies every line waiting in the inbox. Lines that fail to
    /// decode are logged and dropped. Returns the number of messages applied.
    pub fn process_inbox(&mut self, inbox: &Inbox, now: Instant) -> usize {
        let mut applied = 0;
        for line in inbox.drain() {
            match protocol::decode(&line) {
                Ok(msg) => {
                    self.apply_message(msg, now);
                    applied += 1;
                }
                Err(err) => warn!("discarding server message `{}`: {}", line, err),
            }
        }

        applied
    }

    /// Takes the messages queued for the server since the last call.
    pub fn take_outgoing(&mut self) -> Vec<ClientMessage> {
        mem::replace(&mut self.outgoing, vec![])
    }

    //
    // Accessors
    //

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn state(&self) -> GameState {
        self.state
    }

    pub fn turn(&self) -> Option<Color> {
        self.turn
    }

    /// The side this session controls in networked mode.
    pub fn player(&self) -> Option<Color> {
        self.player
    }

    pub fn selected(&self) -> Option<Square> {
        self.selected
    }

    pub fn highlights(&self) -> &[Square] {
        &self.highlights
    }

    pub fn check_status(&self) -> CheckStatus {
        self.check
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn remaining(&self, color: Color) -> Duration {
        self.clocks.remaining(color)
    }

    pub fn formatted_clock(&self, color: Color) -> String {
        self.clocks.formatted(color)
    }

    pub fn set_remaining(&mut self, color: Color, time: Duration) {
        self.clocks.set_remaining(color, time);
    }

    //
    // Internals
    //

    fn play(&mut self, mov: Move, turn: Color) -> ClickOutcome {
        match rules::try_move(&mut self.board, mov, turn) {
            Ok(captured) => {
                match captured {
                    Some(piece) => debug!("{} plays {}, capturing {}", turn, mov, piece.kind),
                    None => debug!("{} plays {}", turn, mov),
                }

                if self.mode == Mode::Networked {
                    self.outgoing.push(ClientMessage::for_move(mov));
                }

                self.turn = Some(turn.toggle());
                self.clear_selection();
                self.refresh_status();
                ClickOutcome::Moved(mov)
            }
            Err(rejection) => {
                warn!("rejected move {}: {}", mov, rejection);
                self.message = rejection.to_string();
                ClickOutcome::Rejected(rejection)
            }
        }
    }

    fn apply_remote_move(&mut self, mov: Move, piece: Piece) {
        let (from, to) = (mov.source(), mov.destination());
        if self.board.piece_at(from) == Some(piece) {
            debug!("server move {} ({} {})", mov, piece.color, piece.kind);
            self.board.relocate(mov);
            self.clear_selection();
            if self.state == GameState::Playing {
                self.refresh_status();
            }
        } else if self.board.is_empty(from) && self.board.piece_at(to) == Some(piece) {
            debug!("server echoed move {}", mov);
        } else {
            warn!("discarding server move {}: no {} {} on {}", mov, piece.color, piece.kind, from);
        }
    }

    fn refresh_status(&mut self) {
        let color = match self.turn {
            Some(color) => color,
            None => return,
        };

        let check = rules::check_status(&self.board, color);
        self.check = check;
        match check {
            CheckStatus::None => self.message = format!("{} to move", color),
            CheckStatus::Check(_) => self.message = format!("{} King is in Check!", color),
            CheckStatus::Checkmate(loser) => {
                self.finish(format!("{} wins by Checkmate!", loser.toggle()));
            }
        }
    }

    fn finish(&mut self, message: String) {
        info!("game over: {}", message);
        self.state = GameState::GameOver;
        self.message = message;
        self.clear_selection();
    }

    fn deselect(&mut self) -> ClickOutcome {
        if self.selected.is_none() {
            return ClickOutcome::Ignored;
        }

        self.clear_selection();
        ClickOutcome::Deselected
    }

    fn clear_selection(&mut self) {
        self.selected = None;
        self.highlights.clear();
    }
}

impl Default for GameSession {
    fn default() -> GameSession {
        GameSession::new(SessionConfig::default())
    }
}
