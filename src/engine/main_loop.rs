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

use super::{
    defs::{ErrFatal, Information},
    Engine,
};
use std::sync::Arc;

impl Engine {
    // The main loop ties everything together: it starts the comm and
    // search threads, then sleeps on the information channel and
    // dispatches whatever comes in, until quit is requested.
    pub fn main_loop(&mut self) {
        let (info_tx, info_rx) = crossbeam_channel::unbounded::<Information>();

        self.info_rx = Some(info_rx);

        self.comm.init(info_tx.clone(), Arc::clone(&self.board));
        self.search.init(
            info_tx,
            Arc::clone(&self.board),
            Arc::clone(&self.mg),
            Arc::clone(&self.tt_search),
            self.settings.tt_size > 0,
        );

        while !self.quit {
            let information = self.info_rx();
            match information {
                Information::Comm(comm_report) => self.comm_reports(&comm_report),
                Information::Search(search_report) => self.search_reports(&search_report),
            }
        }

        self.search.wait_for_shutdown();
        self.comm.wait_for_shutdown();
    }

    fn info_rx(&mut self) -> Information {
        match &self.info_rx {
            Some(rx) => rx.recv().expect(ErrFatal::CHANNEL),
            None => panic!("{}", ErrFatal::NO_INFO_RX),
        }
    }
}
