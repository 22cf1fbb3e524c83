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

mod about;
mod comm_reports;
pub mod defs;
mod main_loop;
mod search_reports;
pub mod transposition;
mod utils;

use self::defs::{ErrFatal, Information, SearchData, Settings, TT};
use crate::{
    board::Board,
    comm::{uci::Uci, CommControl, IComm},
    defs::EngineRunResult,
    misc::cmdline::CmdLine,
    movegen::MoveGenerator,
    search::{defs::SearchControl, Search},
};
use crossbeam_channel::Receiver;
use std::sync::{Arc, Mutex, RwLock};

// This struct holds the chess engine and its functions, so they are not
// all seperate entities in the global space.
pub struct Engine {
    quit: bool,
    settings: Settings,
    cmdline: CmdLine,
    comm: Box<dyn IComm>,
    board: Arc<Mutex<Board>>,
    mg: Arc<MoveGenerator>,
    tt_search: Arc<RwLock<TT<SearchData>>>,
    search: Search,
    info_rx: Option<Receiver<Information>>,
}

impl Engine {
    // Create e new engine.
    pub fn new() -> Self {
        let cmdline = CmdLine::new();

        // At the moment UCI is the only protocol; the command line
        // option exists so a second one can slot in next to it.
        let comm: Box<dyn IComm> = match &cmdline.comm()[..] {
            "uci" => Box::new(Uci::new()),
            _ => panic!("{}", ErrFatal::CREATE_COMM),
        };

        let tt_size = cmdline.hash();
        let settings = Settings {
            quiet: cmdline.has_quiet(),
            tt_size,
        };

        Self {
            quit: false,
            settings,
            cmdline,
            comm,
            board: Arc::new(Mutex::new(Board::new())),
            mg: Arc::new(MoveGenerator::new()),
            tt_search: Arc::new(RwLock::new(TT::<SearchData>::new(tt_size))),
            search: Search::new(),
            info_rx: None,
        }
    }

    // Run the engine.
    pub fn run(&mut self) -> EngineRunResult {
        self.print_about(&self.settings);

        // Set up either the provided position or the starting position.
        self.setup_position()?;

        // Run the communication interface and the search; then enter
        // the main loop, which runs until the engine quits.
        self.main_loop();

        Ok(())
    }

    // The engine quits: this stops the search and the communication
    // threads; the main loop then falls through and joins them.
    fn quit(&mut self) {
        self.search.send(SearchControl::Quit);
        self.comm.send(CommControl::Quit);
        self.quit = true;
    }
}

impl Default for Engine {
    fn default() -> Self {
        Self::new()
    }
}
