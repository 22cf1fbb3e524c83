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

pub mod uci;

use crate::{
    board::Board,
    engine::defs::Information,
    movegen::defs::Move,
    search::defs::SearchSummary,
};
use crossbeam_channel::Sender;
use std::sync::{Arc, Mutex};

// Commands the engine sends to the communication module.
#[derive(PartialEq, Clone)]
pub enum CommControl {
    Identify,                      // transmit the engine identification
    Ready,                         // transmit "readyok"
    Quit,                          // terminate the comm threads
    BestMove(Move),                // transmit the best move found
    SearchSummary(SearchSummary),  // transmit per-depth search progress
    InfoString(String),            // transmit a diagnostic line
    PrintBoard,                    // print the board to the console
}

// Reports the communication module sends into the engine.
#[derive(PartialEq, Clone)]
pub enum CommReport {
    Uci(uci::UciReport),
}

// Any communication protocol the engine can speak implements this.
pub trait IComm {
    fn init(&mut self, report_tx: Sender<Information>, board: Arc<Mutex<Board>>);
    fn send(&self, msg: CommControl);
    fn wait_for_shutdown(&mut self);
    fn info(&self) -> &str;
}
