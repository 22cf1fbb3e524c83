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
    defs::{SearchRefs, CHECK_TERMINATION_QS},
    Search,
};
use crate::{
    board::defs::Pieces,
    defs::MAX_PLY,
    evaluation,
    movegen::defs::{Move, MoveList, MoveType},
};

impl Search {
    // Quiescence search: at the horizon, keep resolving captures,
    // promotions, and check evasions until the position goes quiet, so
    // the evaluation never gets taken in the middle of an exchange.
    //
    // The side to move may always "stand pat" and keep the static
    // evaluation instead of capturing; that makes the static score a
    // lower bound of the node.
    pub fn quiescence(mut alpha: i16, beta: i16, pv: &mut Vec<Move>, refs: &mut SearchRefs) -> i16 {
        refs.search_info.nodes += 1;
        if refs.search_info.nodes & CHECK_TERMINATION_QS == 0 {
            Search::check_termination(refs);
        }
        if refs.search_info.ply > refs.search_info.seldepth {
            refs.search_info.seldepth = refs.search_info.ply;
        }

        let stand_pat = evaluation::evaluate_position(refs.board, refs.mg);

        // On interruption or at the recursion cap, the static score is
        // the best answer available.
        if refs.search_info.interrupted() || refs.search_info.ply >= MAX_PLY {
            return stand_pat;
        }

        if stand_pat >= beta {
            return beta;
        }
        if stand_pat > alpha {
            alpha = stand_pat;
        }

        let in_check = refs.mg.square_attacked(
            refs.board,
            refs.board.opponent(),
            refs.board.king_square(refs.board.us()),
        );

        // In check, every evasion has to be looked at; otherwise only
        // the tactical moves are of interest.
        let mut move_list = MoveList::new();
        let move_type = if in_check { MoveType::All } else { MoveType::Capture };
        refs.mg.generate_moves(refs.board, &mut move_list, move_type);
        Search::score_tactical_moves(&mut move_list);

        for i in 0..move_list.len() {
            Search::pick_move(&mut move_list, i);
            let current_move = move_list.get_move(i);

            // Captures that lose material on the spot are not going to
            // raise alpha; skip them unless an evasion is forced.
            if !in_check
                && (current_move.captured() != Pieces::NONE || current_move.en_passant())
                && Search::see(refs.board, refs.mg, current_move) < 0
            {
                continue;
            }

            if !refs.board.make(current_move, refs.mg) {
                continue;
            }

            refs.search_info.ply += 1;
            let mut node_pv: Vec<Move> = Vec::new();
            let score = -Search::quiescence(-beta, -alpha, &mut node_pv, refs);
            refs.board.unmake();
            refs.search_info.ply -= 1;

            if refs.search_info.interrupted() {
                return alpha;
            }

            if score >= beta {
                return beta;
            }
            if score > alpha {
                alpha = score;
                pv.clear();
                pv.push(current_move);
                pv.append(&mut node_pv);
            }
        }

        alpha
    }
}
