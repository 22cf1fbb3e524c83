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
        SearchRefs, CHECKMATE, CHECK_TERMINATION, DRAW, NULL_MOVE_MIN_DEPTH,
        NULL_MOVE_REDUCTION, NULL_MOVE_SMALL_DEPTH, NULL_MOVE_SMALL_REDUCTION, STALEMATE,
    },
    Search,
};
use crate::{
    defs::MAX_PLY,
    engine::defs::{ErrFatal, HashFlag, SearchData},
    evaluation,
    movegen::defs::{Move, MoveList, MoveType, ShortMove},
};

impl Search {
    // Principal-variation search under an alpha/beta window. The score
    // is fail-hard: the return value never leaves [alpha, beta]. When
    // the search is interrupted, frames unwind with a meaningless 0;
    // the driver knows to discard it.
    pub fn alpha_beta(
        mut depth: i8,
        mut alpha: i16,
        mut beta: i16,
        pv: &mut Vec<Move>,
        refs: &mut SearchRefs,
    ) -> i16 {
        let is_root = refs.search_info.ply == 0;
        let is_pv_node = (beta - alpha) > 1;

        if refs.search_info.nodes & CHECK_TERMINATION == 0 {
            Search::check_termination(refs);
        }
        if refs.search_info.interrupted() {
            return 0;
        }

        refs.search_info.nodes += 1;
        if refs.search_info.ply > refs.search_info.seldepth {
            refs.search_info.seldepth = refs.search_info.ply;
        }

        if refs.search_info.ply >= MAX_PLY {
            return evaluation::evaluate_position(refs.board, refs.mg);
        }

        if !is_root {
            // Draws by rule end the node immediately.
            if Search::is_draw(refs) {
                return DRAW;
            }

            // Mate distance pruning: a mate found earlier along the path
            // bounds what any mate found here could still be worth.
            alpha = alpha.max(-CHECKMATE + refs.search_info.ply as i16);
            beta = beta.min(CHECKMATE - refs.search_info.ply as i16 - 1);
            if alpha >= beta {
                return alpha;
            }
        }

        // Transposition table probe. A usable hit ends the node; an
        // unusable one still contributes its best move to ordering.
        let mut tt_value: Option<i16> = None;
        let mut tt_move = ShortMove::new(0);
        if refs.tt_enabled {
            if let Some(data) = refs
                .tt
                .read()
                .expect(ErrFatal::LOCK)
                .probe(refs.board.game_state.zobrist_key)
            {
                let tt_result = data.get(depth, refs.search_info.ply, alpha, beta);
                tt_value = tt_result.0;
                tt_move = tt_result.1;
            }
        }

        if let Some(v) = tt_value {
            if !is_root {
                return v;
            }
        }

        let is_check = refs.mg.square_attacked(
            refs.board,
            refs.board.opponent(),
            refs.board.king_square(refs.board.us()),
        );

        // Evading a check is rarely optional; give it one extra ply.
        // MAX_PLY bounds the total extension budget.
        if is_check {
            depth += 1;
        }

        if depth <= 0 {
            return Search::quiescence(alpha, beta, pv, refs);
        }

        // Null move pruning: hand the opponent a free move. If the
        // position still beats beta at reduced depth, the real search
        // would too. Skipped in check, in PV nodes, and without any
        // non-pawn material, where zugzwang breaks the assumption.
        if !is_root
            && !is_pv_node
            && !is_check
            && depth >= NULL_MOVE_MIN_DEPTH
            && refs.board.has_non_pawn_material(refs.board.us())
            && evaluation::evaluate_position(refs.board, refs.mg) >= beta
        {
            let reduction = if depth > NULL_MOVE_SMALL_DEPTH {
                NULL_MOVE_REDUCTION
            } else {
                NULL_MOVE_SMALL_REDUCTION
            };

            refs.board.make_null_move();
            refs.search_info.ply += 1;
            let mut tmp_pv: Vec<Move> = Vec::new();
            let score = -Search::alpha_beta(depth - 1 - reduction, -beta, -beta + 1, &mut tmp_pv, refs);
            refs.board.unmake_null_move();
            refs.search_info.ply -= 1;

            if refs.search_info.interrupted() {
                return 0;
            }
            if score >= beta {
                return beta;
            }
        }

        let mut move_list = MoveList::new();
        refs.mg
            .generate_moves(refs.board, &mut move_list, MoveType::All);
        Search::score_moves(&mut move_list, tt_move, refs);

        let original_alpha = alpha;
        let mut best_move = ShortMove::new(0);
        let mut legal_moves_found = 0;

        for i in 0..move_list.len() {
            Search::pick_move(&mut move_list, i);
            let current_move = move_list.get_move(i);

            if !refs.board.make(current_move, refs.mg) {
                continue;
            }

            refs.search_info.ply += 1;
            legal_moves_found += 1;

            let mut node_pv: Vec<Move> = Vec::new();
            let mut score;

            if legal_moves_found == 1 {
                // The first move gets the full window; it is expected to
                // be the best one thanks to move ordering.
                score = -Search::alpha_beta(depth - 1, -beta, -alpha, &mut node_pv, refs);
            } else {
                // Later moves only have to prove they are not better:
                // zero window first, re-search on a surprise.
                score = -Search::alpha_beta(depth - 1, -alpha - 1, -alpha, &mut node_pv, refs);
                if score > alpha && score < beta {
                    score = -Search::alpha_beta(depth - 1, -beta, -alpha, &mut node_pv, refs);
                }
            }

            refs.board.unmake();
            refs.search_info.ply -= 1;

            if refs.search_info.interrupted() {
                return 0;
            }

            if score >= beta {
                if refs.tt_enabled {
                    refs.tt.write().expect(ErrFatal::LOCK).insert(
                        refs.board.game_state.zobrist_key,
                        SearchData::create(
                            depth,
                            refs.search_info.ply,
                            HashFlag::Beta,
                            beta,
                            current_move.to_short_move(),
                        ),
                    );
                }

                if current_move.is_quiet() {
                    Search::update_killers(refs, current_move);
                    Search::update_history(refs, current_move, depth);
                }

                return beta;
            }

            if score > alpha {
                alpha = score;
                best_move = current_move.to_short_move();

                pv.clear();
                pv.push(current_move);
                pv.append(&mut node_pv);
            }
        }

        if legal_moves_found == 0 {
            return if is_check {
                // The shortest mate gets the highest score.
                -CHECKMATE + refs.search_info.ply as i16
            } else {
                STALEMATE
            };
        }

        if refs.tt_enabled {
            let flag = if alpha > original_alpha {
                HashFlag::Exact
            } else {
                HashFlag::Alpha
            };
            refs.tt.write().expect(ErrFatal::LOCK).insert(
                refs.board.game_state.zobrist_key,
                SearchData::create(depth, refs.search_info.ply, flag, alpha, best_move),
            );
        }

        alpha
    }
}
