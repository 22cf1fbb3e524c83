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
    defs::{SearchControl, SearchMode, SearchRefs, SearchTerminate},
    Search,
};
use crate::movegen::defs::Move;

impl Search {
    // Polled on the node-count cadence: picks up "stop"/"quit" from the
    // engine and checks the clock. Sets the termination flag that every
    // search frame tests before trusting its own return value.
    pub fn check_termination(refs: &mut SearchRefs) {
        match refs.control_rx.try_recv() {
            Ok(SearchControl::Stop) => refs.search_info.terminate = SearchTerminate::Stop,
            Ok(SearchControl::Quit) => refs.search_info.terminate = SearchTerminate::Quit,
            _ => (),
        }

        if refs.search_info.interrupted() {
            return;
        }

        match refs.search_params.search_mode {
            SearchMode::MoveTime | SearchMode::GameTime => {
                if Search::out_of_time(refs) {
                    refs.search_info.terminate = SearchTerminate::Stop;
                }
            }
            SearchMode::Depth | SearchMode::Infinite | SearchMode::Nothing => (),
        }
    }

    // Draw by rule: fifty moves, insufficient material, or the current
    // position standing on the board for the third time anywhere in the
    // game-plus-search history.
    pub fn is_draw(refs: &SearchRefs) -> bool {
        refs.board.draw_by_fifty_move_rule()
            || refs.board.draw_by_insufficient_material_rule()
            || refs.board.repetition_count() >= 2
    }

    // A quiet move refuted the node: remember it for this ply. The
    // previous first killer shifts into the second slot, unless the
    // move is already there.
    pub fn update_killers(refs: &mut SearchRefs, m: Move) {
        let ply = refs.search_info.ply as usize;
        let short = m.to_short_move();
        let first = refs.search_info.killer_moves[ply][0];

        if first != short {
            refs.search_info.killer_moves[ply][1] = first;
            refs.search_info.killer_moves[ply][0] = short;
        }
    }

    // Quiet cutoff moves also earn history: depth squared, so cutoffs
    // near the root weigh much more than cutoffs at the leaves.
    pub fn update_history(refs: &mut SearchRefs, m: Move, depth: i8) {
        let us = refs.board.us();
        let bonus = (depth as u32) * (depth as u32);
        let entry = &mut refs.search_info.history_heuristic[us][m.piece()][m.to()];
        *entry = entry.saturating_add(bonus);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::Board;
    use crate::defs::FEN_START_POSITION;
    use crate::engine::defs::{Information, SearchData, TT};
    use crate::movegen::defs::{MoveList, MoveType};
    use crate::movegen::MoveGenerator;
    use crate::search::defs::{SearchInfo, SearchParams};
    use crossbeam_channel::unbounded;
    use std::sync::{Arc, RwLock};

    #[test]
    fn killer_slots_shift_and_deduplicate() {
        let mut board = Board::new();
        board.fen_read(Some(FEN_START_POSITION)).unwrap();
        let mg = Arc::new(MoveGenerator::new());
        let tt: Arc<RwLock<TT<SearchData>>> = Arc::new(RwLock::new(TT::new(0)));
        let mut search_params = SearchParams::new();
        let mut search_info = SearchInfo::new();
        let (_control_tx, control_rx) = unbounded();
        let (report_tx, _report_rx) = unbounded::<Information>();

        let mut refs = crate::search::defs::SearchRefs {
            board: &mut board,
            mg: &mg,
            tt: &tt,
            tt_enabled: false,
            search_params: &mut search_params,
            search_info: &mut search_info,
            control_rx: &control_rx,
            report_tx: &report_tx,
        };

        let mut ml = MoveList::new();
        refs.mg.generate_moves(refs.board, &mut ml, MoveType::All);
        let first = ml.get_move(0);
        let second = ml.get_move(1);

        Search::update_killers(&mut refs, first);
        assert_eq!(refs.search_info.killer_moves[0][0], first.to_short_move());

        // The same move again must not push itself into the second slot.
        Search::update_killers(&mut refs, first);
        assert_eq!(refs.search_info.killer_moves[0][0], first.to_short_move());
        assert_ne!(refs.search_info.killer_moves[0][1], first.to_short_move());

        // A different cutoff shifts the old killer down.
        Search::update_killers(&mut refs, second);
        assert_eq!(refs.search_info.killer_moves[0][0], second.to_short_move());
        assert_eq!(refs.search_info.killer_moves[0][1], first.to_short_move());
    }
}
