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
    defs::{
        SearchMode, SearchRefs, SearchReport, SearchResult, SearchSummary, CHECKMATE,
        CHECKMATE_THRESHOLD, INF,
    },
    Search,
};
use crate::{
    defs::MAX_DEPTH,
    engine::defs::{ErrFatal, Information},
    movegen::defs::{Move, MoveList, MoveType},
};

impl Search {
    // The driver: search depth 1, then 2, and so on, each time with a
    // full window at the root. Every completed depth updates the best
    // move and emits a progress line; an interrupted depth is thrown
    // away and the previous depth's move stands. The transposition
    // table carries its results from each iteration into the next one,
    // which is what makes re-searching from scratch affordable.
    pub fn iterative_deepening(refs: &mut SearchRefs) -> SearchResult {
        let mut depth = 1;
        let mut best_move = Move::new(0);
        let mut stop = false;

        if refs.search_params.is_game_time() {
            refs.search_info.allocated_time = Search::allocate_time(refs);
        } else if refs.search_params.search_mode == SearchMode::MoveTime {
            refs.search_info.allocated_time = refs.search_params.move_time;
        }

        if refs.tt_enabled {
            refs.tt.write().expect(ErrFatal::LOCK).next_generation();
        }

        refs.search_info.timer_start();

        // Safety net: if not even depth 1 completes, any legal move is
        // better than no move at all.
        match Search::first_legal_move(refs) {
            Some(m) => best_move = m,
            None => {
                let report = SearchReport::InfoString(String::from("no legal moves"));
                refs.report_tx
                    .send(Information::Search(report))
                    .expect(ErrFatal::CHANNEL);
                return (best_move, refs.search_info.terminate);
            }
        }

        while depth <= refs.search_params.depth && depth <= MAX_DEPTH && !stop {
            refs.search_info.depth = depth;

            let mut pv: Vec<Move> = Vec::new();
            let eval = Search::alpha_beta(depth, -INF, INF, &mut pv, refs);

            if refs.search_info.interrupted() {
                break;
            }

            if !pv.is_empty() {
                best_move = pv[0];
            }

            if !refs.search_params.quiet {
                Search::report_progress(refs, depth, eval, &pv);
            }

            // A forced mate within the depth just searched cannot be
            // improved by searching deeper.
            let mate_distance = CHECKMATE - eval.abs();
            if eval.abs() >= CHECKMATE_THRESHOLD && mate_distance <= depth as i16 {
                break;
            }

            // Between depths, the budget is checked strictly, and the
            // next depth is skipped when its predicted cost would not
            // fit into what remains of the budget anyway.
            if refs.search_params.is_game_time()
                || refs.search_params.search_mode == SearchMode::MoveTime
            {
                let elapsed = refs.search_info.timer_elapsed();
                let allocated = refs.search_info.allocated_time;
                let predicted = elapsed + (elapsed * 3) / 2;
                if elapsed >= allocated || predicted >= allocated {
                    stop = true;
                }
            }

            depth += 1;
        }

        (best_move, refs.search_info.terminate)
    }

    // The first pseudo-legal move that survives make(): the emergency
    // fallback before any depth has completed.
    fn first_legal_move(refs: &mut SearchRefs) -> Option<Move> {
        let mut move_list = MoveList::new();
        refs.mg
            .generate_moves(refs.board, &mut move_list, MoveType::All);

        for i in 0..move_list.len() {
            let m = move_list.get_move(i);
            if refs.board.make(m, refs.mg) {
                refs.board.unmake();
                return Some(m);
            }
        }

        None
    }

    // One progress line per completed depth.
    fn report_progress(refs: &mut SearchRefs, depth: i8, eval: i16, pv: &[Move]) {
        let elapsed = refs.search_info.timer_elapsed();
        let nodes = refs.search_info.nodes;
        let nps = if elapsed > 0 {
            (nodes as u128 * 1000 / elapsed) as usize
        } else {
            0
        };
        let hash_full = if refs.tt_enabled {
            refs.tt.read().expect(ErrFatal::LOCK).hash_full()
        } else {
            0
        };

        // Scores close to CHECKMATE are mates; translate the distance
        // in plies into full moves for reporting.
        let mate = if eval.abs() >= CHECKMATE_THRESHOLD {
            let plies = CHECKMATE - eval.abs();
            ((plies + 1) / 2) as u8
        } else {
            0
        };

        let summary = SearchSummary {
            depth,
            seldepth: refs.search_info.seldepth,
            time: elapsed,
            cp: eval,
            mate,
            nodes,
            nps,
            hash_full,
            pv: pv.to_vec(),
        };

        let report = SearchReport::SearchSummary(summary);
        refs.report_tx
            .send(Information::Search(report))
            .expect(ErrFatal::CHANNEL);
    }
}
