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

use crate::{
    board::Board,
    defs::{NrOf, Sides, MAX_DEPTH, MAX_PLY},
    engine::defs::{Information, SearchData, TT},
    movegen::{
        defs::{Move, ShortMove},
        MoveGenerator,
    },
};
use crossbeam_channel::{Receiver, Sender};
use std::{
    sync::{Arc, RwLock},
    time::Instant,
};

// Transit-overhead compensation lives with the time manager.
pub use super::time::OVERHEAD;

// Scores. INF bounds the alpha/beta window; mate scores live just below
// it, with the distance to the mate subtracted, so that a shorter mate
// always wins the comparison against a longer one.
pub const INF: i16 = 32_000;
pub const CHECKMATE: i16 = 30_000;
pub const CHECKMATE_THRESHOLD: i16 = 29_000;
pub const STALEMATE: i16 = 0;
pub const DRAW: i16 = 0;

// The wall clock and the control channel are polled every 2048 nodes in
// the main search and every 1024 nodes in quiescence.
pub const CHECK_TERMINATION: usize = 0x7FF;
pub const CHECK_TERMINATION_QS: usize = 0x3FF;

pub const MAX_KILLER_MOVES: usize = 2;

// Null move pruning: the reduction is 3 plies, dropping to 2 close to
// the horizon so the verification search does not collapse entirely.
pub const NULL_MOVE_REDUCTION: i8 = 3;
pub const NULL_MOVE_SMALL_REDUCTION: i8 = 2;
pub const NULL_MOVE_SMALL_DEPTH: i8 = 5;
pub const NULL_MOVE_MIN_DEPTH: i8 = 3;

// History scores are capped when ordering so that a saturated quiet
// move can never outrank a losing capture.
pub const HISTORY_SCORE_CAP: u32 = 8_000;

pub type SearchResult = (Move, SearchTerminate);
type KillerMoves = [[ShortMove; MAX_KILLER_MOVES]; MAX_PLY as usize];
type HistoryHeuristic = [[[u32; NrOf::SQUARES]; NrOf::PIECE_TYPES]; Sides::BOTH];

// Commands the engine can send into a running (or idle) search thread.
#[derive(PartialEq, Clone)]
pub enum SearchControl {
    Start(SearchParams),
    Stop,
    Quit,
    ClearTables,
    Nothing,
}

// Why a search ended, or that it has not ended at all.
#[derive(Debug, PartialEq, Copy, Clone)]
pub enum SearchTerminate {
    Stop,
    Quit,
    Nothing,
}

#[derive(PartialEq, Copy, Clone)]
pub enum SearchMode {
    Depth,    // "go depth 7"
    MoveTime, // "go movetime 5000"
    GameTime, // "go wtime ... btime ..."
    Infinite, // "go infinite" (until "stop" arrives)
    Nothing,
}

// Clock state as it arrives with "go wtime ... btime ...".
#[derive(Debug, PartialEq, Copy, Clone)]
pub struct GameTime {
    pub wtime: u128,
    pub btime: u128,
    pub winc: u128,
    pub binc: u128,
    pub moves_to_go: Option<usize>,
}

impl GameTime {
    pub fn new(wtime: u128, btime: u128, winc: u128, binc: u128, moves_to_go: Option<usize>) -> Self {
        Self {
            wtime,
            btime,
            winc,
            binc,
            moves_to_go,
        }
    }
}

#[derive(PartialEq, Copy, Clone)]
pub struct SearchParams {
    pub depth: i8,
    pub move_time: u128,
    pub game_time: GameTime,
    pub search_mode: SearchMode,
    pub quiet: bool,
}

impl SearchParams {
    pub fn new() -> Self {
        Self {
            depth: MAX_DEPTH,
            move_time: 0,
            game_time: GameTime::new(0, 0, 0, 0, None),
            search_mode: SearchMode::Nothing,
            quiet: false,
        }
    }

    pub fn is_game_time(&self) -> bool {
        self.search_mode == SearchMode::GameTime
    }
}

impl Default for SearchParams {
    fn default() -> Self {
        Self::new()
    }
}

// All the state a single search run needs: counters, the killer and
// history tables, the clock, and the termination flag. The struct
// outlives individual root searches inside the search thread, so the
// history heuristic can carry information from one move to the next.
pub struct SearchInfo {
    start_time: Option<Instant>,
    pub depth: i8,
    pub seldepth: i8,
    pub nodes: usize,
    pub ply: i8,
    pub killer_moves: KillerMoves,
    pub history_heuristic: HistoryHeuristic,
    pub allocated_time: u128,
    pub terminate: SearchTerminate,
}

impl SearchInfo {
    pub fn new() -> Self {
        Self {
            start_time: None,
            depth: 0,
            seldepth: 0,
            nodes: 0,
            ply: 0,
            killer_moves: [[ShortMove::new(0); MAX_KILLER_MOVES]; MAX_PLY as usize],
            history_heuristic: [[[0; NrOf::SQUARES]; NrOf::PIECE_TYPES]; Sides::BOTH],
            allocated_time: 0,
            terminate: SearchTerminate::Nothing,
        }
    }

    // Called before every root search. Counters and killers start
    // fresh; the history table is halved rather than cleared, so old
    // knowledge fades without saturating.
    pub fn prepare_search(&mut self) {
        self.start_time = None;
        self.depth = 0;
        self.seldepth = 0;
        self.nodes = 0;
        self.ply = 0;
        self.killer_moves = [[ShortMove::new(0); MAX_KILLER_MOVES]; MAX_PLY as usize];
        self.allocated_time = 0;
        self.terminate = SearchTerminate::Nothing;

        for side in self.history_heuristic.iter_mut() {
            for piece in side.iter_mut() {
                for square in piece.iter_mut() {
                    *square /= 2;
                }
            }
        }
    }

    pub fn timer_start(&mut self) {
        self.start_time = Some(Instant::now());
    }

    pub fn timer_elapsed(&self) -> u128 {
        match self.start_time {
            Some(x) => x.elapsed().as_millis(),
            None => 0,
        }
    }

    pub fn interrupted(&self) -> bool {
        self.terminate != SearchTerminate::Nothing
    }
}

impl Default for SearchInfo {
    fn default() -> Self {
        Self::new()
    }
}

// Per-depth progress as it goes out over the protocol.
#[derive(PartialEq, Clone)]
pub struct SearchSummary {
    pub depth: i8,
    pub seldepth: i8,
    pub time: u128,
    pub cp: i16,
    pub mate: u8,
    pub nodes: usize,
    pub nps: usize,
    pub hash_full: u16,
    pub pv: Vec<Move>,
}

impl SearchSummary {
    pub fn pv_as_string(&self) -> String {
        let mut pv = String::from("");
        for next_move in self.pv.iter() {
            let m = format!(" {}", next_move.as_string());
            pv.push_str(&m[..]);
        }
        pv
    }
}

#[derive(PartialEq, Clone)]
pub enum SearchReport {
    Finished(Move),
    SearchSummary(SearchSummary),
    InfoString(String),
}

// Everything the recursive search functions need, bundled so it can be
// passed down as a single reference.
pub struct SearchRefs<'a> {
    pub board: &'a mut Board,
    pub mg: &'a Arc<MoveGenerator>,
    pub tt: &'a Arc<RwLock<TT<SearchData>>>,
    pub tt_enabled: bool,
    pub search_params: &'a mut SearchParams,
    pub search_info: &'a mut SearchInfo,
    pub control_rx: &'a Receiver<SearchControl>,
    pub report_tx: &'a Sender<Information>,
}
