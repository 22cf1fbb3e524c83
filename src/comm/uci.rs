/* =======================================================================
Argent is a chess playing engine.
Copyright (C) 2025, The Argent Authors

Argent is written in the Rust programming language. It is an original
work, not derived from any engine that came before it. However, it does
use a lot of concepts which are well-known and are in use by most if not
all classical alpha/beta-based chess engines.

Argent is free software: you can redistribute it and/or modify it under
the terms of the GNU General Public License version 3 as published by
the Free Software Foundation.

Argent is distributed in the hope that it will be useful, but WITHOUT
ANY WARRANTY; without even the implied warranty of MERCHANTABILITY or
FITNESS FOR A PARTICULAR PURPOSE.  See the GNU General Public License
for more details.

You should have received a copy of the GNU General Public License along
with this program.  If not, see <http://www.gnu.org/licenses/>.
======================================================================= */

use super::{CommControl, CommReport, IComm};
use crate::{
    board::{
        defs::{Pieces, PIECE_CHAR_CAPS, PIECE_CHAR_SMALL},
        Board,
    },
    defs::{About, Sides, FEN_START_POSITION},
    engine::defs::{
        EngineOption, EngineOptionDefaults, EngineOptionName, ErrFatal, Information, UiElement,
    },
    search::defs::{GameTime, SearchSummary},
};
use crossbeam_channel::Sender;
use std::{
    io,
    sync::{Arc, Mutex},
    thread::{self, JoinHandle},
};

#[derive(Debug, PartialEq, Clone)]
pub enum UciReport {
    // Uci commands
    Uci,
    UciNewGame,
    IsReady,
    SetOption(EngineOptionName),
    Position(String, Vec<String>),
    GoInfinite,
    GoDepth(i8),
    GoMoveTime(u128),
    GoGameTime(GameTime),
    Stop,
    Quit,

    // Custom commands for console use
    Board,
    Eval,

    // Empty or unknown command
    Unknown,
}

// The UCI module runs two threads: one that reads stdin and turns each
// line into a report for the engine, and one that receives commands
// from the engine and prints protocol output to stdout. The engine
// itself never touches the console.
pub struct Uci {
    report_handle: Option<JoinHandle<()>>,
    control_handle: Option<JoinHandle<()>>,
    control_tx: Option<Sender<CommControl>>,
}

impl Uci {
    pub fn new() -> Self {
        Self {
            report_handle: None,
            control_handle: None,
            control_tx: None,
        }
    }
}

impl Default for Uci {
    fn default() -> Self {
        Self::new()
    }
}

impl IComm for Uci {
    fn init(&mut self, report_tx: Sender<Information>, board: Arc<Mutex<Board>>) {
        self.report_thread(report_tx);
        self.control_thread(board);
    }

    fn send(&self, msg: CommControl) {
        if let Some(tx) = &self.control_tx {
            tx.send(msg).expect(ErrFatal::CHANNEL);
        }
    }

    fn wait_for_shutdown(&mut self) {
        if let Some(h) = self.report_handle.take() {
            h.join().expect(ErrFatal::THREAD);
        }
        if let Some(h) = self.control_handle.take() {
            h.join().expect(ErrFatal::THREAD);
        }
    }

    fn info(&self) -> &str {
        "uci"
    }
}

// Thread that reads incoming commands.
impl Uci {
    fn report_thread(&mut self, report_tx: Sender<Information>) {
        let mut incoming_data = String::from("");

        let report_h = thread::spawn(move || {
            let mut quit = false;

            while !quit {
                let bytes_read = io::stdin()
                    .read_line(&mut incoming_data)
                    .expect(ErrFatal::READ_IO);

                // End of input counts as a quit: the engine must not
                // spin when its input pipe closes.
                let new_report = if bytes_read == 0 {
                    UciReport::Quit
                } else {
                    Uci::create_report(&incoming_data)
                };

                quit = new_report == UciReport::Quit;

                report_tx
                    .send(Information::Comm(CommReport::Uci(new_report)))
                    .expect(ErrFatal::CHANNEL);

                incoming_data = String::from("");
            }
        });

        self.report_handle = Some(report_h);
    }

    // Turns one line of input into a report.
    fn create_report(input: &str) -> UciReport {
        let clean = input.trim();

        match clean {
            "uci" => UciReport::Uci,
            "ucinewgame" => UciReport::UciNewGame,
            "isready" => UciReport::IsReady,
            "stop" => UciReport::Stop,
            "quit" | "exit" => UciReport::Quit,

            // Custom commands
            "board" => UciReport::Board,
            "eval" => UciReport::Eval,

            cmd if cmd.starts_with("position") => Uci::parse_position(cmd),
            cmd if cmd.starts_with("go") => Uci::parse_go(cmd),
            cmd if cmd.starts_with("setoption") => Uci::parse_setoption(cmd),

            _ => UciReport::Unknown,
        }
    }

    fn parse_position(cmd: &str) -> UciReport {
        enum Tokens {
            Nothing,
            Fen,
            Moves,
        }

        let parts: Vec<String> = cmd.split_whitespace().map(String::from).collect();
        let mut fen = String::from("");
        let mut moves: Vec<String> = Vec::new();
        let mut skip_fen = false;
        let mut token = Tokens::Nothing;

        for p in parts {
            match p.as_str() {
                "position" => (),
                "startpos" => {
                    skip_fen = true;
                    fen = String::from(FEN_START_POSITION);
                }
                "fen" => {
                    if !skip_fen {
                        token = Tokens::Fen;
                    }
                }
                "moves" => token = Tokens::Moves,
                _ => match token {
                    Tokens::Nothing => (),
                    Tokens::Fen => {
                        fen.push_str(&p);
                        fen.push(' ');
                    }
                    Tokens::Moves => moves.push(p),
                },
            }
        }

        UciReport::Position(fen.trim().to_string(), moves)
    }

    fn parse_go(cmd: &str) -> UciReport {
        enum Tokens {
            Nothing,
            Depth,
            MoveTime,
            WTime,
            BTime,
            WInc,
            BInc,
            MovesToGo,
        }

        let parts: Vec<String> = cmd.split_whitespace().map(String::from).collect();
        let mut depth: Option<i8> = None;
        let mut move_time: Option<u128> = None;
        let mut infinite = false;
        let mut game_time = GameTime::new(0, 0, 0, 0, None);
        let mut has_game_time = false;
        let mut token = Tokens::Nothing;

        for p in parts {
            match p.as_str() {
                "go" => (),
                "infinite" => infinite = true,
                "depth" => token = Tokens::Depth,
                "movetime" => token = Tokens::MoveTime,
                "wtime" => token = Tokens::WTime,
                "btime" => token = Tokens::BTime,
                "winc" => token = Tokens::WInc,
                "binc" => token = Tokens::BInc,
                "movestogo" => token = Tokens::MovesToGo,
                _ => {
                    match token {
                        Tokens::Nothing => (),
                        Tokens::Depth => depth = p.parse::<i8>().ok(),
                        Tokens::MoveTime => move_time = p.parse::<u128>().ok(),
                        Tokens::WTime => {
                            game_time.wtime = p.parse::<u128>().unwrap_or(0);
                            has_game_time = true;
                        }
                        Tokens::BTime => {
                            game_time.btime = p.parse::<u128>().unwrap_or(0);
                            has_game_time = true;
                        }
                        Tokens::WInc => game_time.winc = p.parse::<u128>().unwrap_or(0),
                        Tokens::BInc => game_time.binc = p.parse::<u128>().unwrap_or(0),
                        Tokens::MovesToGo => game_time.moves_to_go = p.parse::<usize>().ok(),
                    }
                    token = Tokens::Nothing;
                }
            }
        }

        if infinite {
            UciReport::GoInfinite
        } else if let Some(d) = depth {
            UciReport::GoDepth(d)
        } else if let Some(ms) = move_time {
            UciReport::GoMoveTime(ms)
        } else if has_game_time {
            UciReport::GoGameTime(game_time)
        } else {
            UciReport::GoInfinite
        }
    }

    fn parse_setoption(cmd: &str) -> UciReport {
        enum Tokens {
            Nothing,
            Name,
            Value,
        }

        let parts: Vec<String> = cmd.split_whitespace().map(String::from).collect();
        let mut name = String::from("");
        let mut value = String::from("");
        let mut token = Tokens::Nothing;

        for p in parts {
            match p.as_str() {
                "setoption" => (),
                "name" => token = Tokens::Name,
                "value" => token = Tokens::Value,
                _ => match token {
                    Tokens::Nothing => (),
                    Tokens::Name => {
                        name.push_str(&p);
                        name.push(' ');
                    }
                    Tokens::Value => value = p,
                },
            }
        }

        let option = match name.trim().to_lowercase().as_str() {
            "hash" => EngineOptionName::Hash(value),
            "clear hash" => EngineOptionName::ClearHash,
            _ => EngineOptionName::Nothing,
        };

        UciReport::SetOption(option)
    }
}

// Thread that transmits engine output.
impl Uci {
    fn control_thread(&mut self, board: Arc<Mutex<Board>>) {
        let (control_tx, control_rx) = crossbeam_channel::unbounded::<CommControl>();

        let control_h = thread::spawn(move || {
            let mut quit = false;

            while !quit {
                let control = control_rx.recv().expect(ErrFatal::CHANNEL);

                match control {
                    CommControl::Identify => {
                        Uci::id();
                        Uci::options();
                        Uci::uciok();
                    }
                    CommControl::Ready => println!("readyok"),
                    CommControl::Quit => quit = true,
                    CommControl::BestMove(m) => println!("bestmove {}", m.as_string()),
                    CommControl::SearchSummary(summary) => Uci::search_summary(&summary),
                    CommControl::InfoString(msg) => println!("info string {msg}"),
                    CommControl::PrintBoard => Uci::print_board(&board),
                }
            }
        });

        self.control_handle = Some(control_h);
        self.control_tx = Some(control_tx);
    }

    fn id() {
        println!("id name {} {}", About::ENGINE, About::VERSION);
        println!("id author {}", About::AUTHOR);
    }

    fn options() {
        let options = [
            EngineOption::new(
                EngineOptionName::HASH,
                UiElement::Spin,
                Some(EngineOptionDefaults::HASH_DEFAULT.to_string()),
                Some(EngineOptionDefaults::HASH_MIN.to_string()),
                Some(EngineOptionDefaults::HASH_MAX.to_string()),
            ),
            EngineOption::new(EngineOptionName::CLEAR_HASH, UiElement::Button, None, None, None),
        ];

        for option in options {
            let mut line = format!("option name {}", option.name);

            match option.ui_element {
                UiElement::Spin => line.push_str(" type spin"),
                UiElement::Button => line.push_str(" type button"),
            }
            if let Some(d) = option.default {
                line.push_str(&format!(" default {d}"));
            }
            if let Some(m) = option.min {
                line.push_str(&format!(" min {m}"));
            }
            if let Some(m) = option.max {
                line.push_str(&format!(" max {m}"));
            }

            println!("{line}");
        }
    }

    fn uciok() {
        println!("uciok");
    }

    fn search_summary(s: &SearchSummary) {
        // A mate distance is reported in moves rather than plies, with
        // the sign telling who is getting mated.
        let score = if s.mate > 0 {
            let moves = if s.cp < 0 {
                -(s.mate as i16)
            } else {
                s.mate as i16
            };
            format!("mate {moves}")
        } else {
            format!("cp {}", s.cp)
        };

        println!(
            "info depth {} seldepth {} score {} nodes {} nps {} hashfull {} time {} pv{}",
            s.depth,
            s.seldepth,
            score,
            s.nodes,
            s.nps,
            s.hash_full,
            s.time,
            s.pv_as_string()
        );
    }

    fn print_board(board: &Arc<Mutex<Board>>) {
        let board = board.lock().expect(ErrFatal::LOCK);

        for rank in (0..8).rev() {
            print!("{} ", rank + 1);
            for file in 0..8 {
                let square = rank * 8 + file;
                let piece = board.piece_on(square);
                let symbol = if piece == Pieces::NONE {
                    "."
                } else if board.bb_side[Sides::WHITE] & (1u64 << square) > 0 {
                    PIECE_CHAR_CAPS[piece]
                } else {
                    PIECE_CHAR_SMALL[piece]
                };
                print!("{symbol} ");
            }
            println!();
        }
        println!("  a b c d e f g h");
        println!("FEN: {}", board.fen_string());
        println!("Key: {:016x}", board.game_state.zobrist_key);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn simple_commands_parse() {
        assert_eq!(Uci::create_report("uci\n"), UciReport::Uci);
        assert_eq!(Uci::create_report("isready\n"), UciReport::IsReady);
        assert_eq!(Uci::create_report("ucinewgame\n"), UciReport::UciNewGame);
        assert_eq!(Uci::create_report("stop\n"), UciReport::Stop);
        assert_eq!(Uci::create_report("quit\n"), UciReport::Quit);
        assert_eq!(Uci::create_report("gibberish\n"), UciReport::Unknown);
    }

    #[test]
    fn position_startpos_with_moves() {
        let report = Uci::create_report("position startpos moves e2e4 e7e5\n");
        match report {
            UciReport::Position(fen, moves) => {
                assert_eq!(fen, FEN_START_POSITION);
                assert_eq!(moves, vec!["e2e4", "e7e5"]);
            }
            _ => panic!("expected a position report"),
        }
    }

    #[test]
    fn position_fen_preserves_case() {
        let report = Uci::create_report(
            "position fen r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1 moves e1g1\n",
        );
        match report {
            UciReport::Position(fen, moves) => {
                assert_eq!(fen, "r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1");
                assert_eq!(moves, vec!["e1g1"]);
            }
            _ => panic!("expected a position report"),
        }
    }

    #[test]
    fn go_variants_parse() {
        assert_eq!(Uci::create_report("go infinite\n"), UciReport::GoInfinite);
        assert_eq!(Uci::create_report("go depth 7\n"), UciReport::GoDepth(7));
        assert_eq!(Uci::create_report("go movetime 5000\n"), UciReport::GoMoveTime(5000));

        match Uci::create_report("go wtime 60000 btime 61000 winc 1000 binc 2000\n") {
            UciReport::GoGameTime(gt) => {
                assert_eq!(gt.wtime, 60_000);
                assert_eq!(gt.btime, 61_000);
                assert_eq!(gt.winc, 1_000);
                assert_eq!(gt.binc, 2_000);
                assert_eq!(gt.moves_to_go, None);
            }
            _ => panic!("expected a gametime report"),
        }
    }

    #[test]
    fn setoption_parses_names_and_values() {
        assert_eq!(
            Uci::create_report("setoption name Hash value 64\n"),
            UciReport::SetOption(EngineOptionName::Hash(String::from("64")))
        );
        assert_eq!(
            Uci::create_report("setoption name Clear Hash\n"),
            UciReport::SetOption(EngineOptionName::ClearHash)
        );
    }
}
