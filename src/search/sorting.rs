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
    defs::{SearchRefs, HISTORY_SCORE_CAP},
    Search,
};
use crate::{
    board::defs::{square_on_rank, Pieces, Ranks},
    defs::Sides,
    evaluation::defs::{BB_CENTER, PIECE_VALUES},
    movegen::defs::{Move, MoveList, ShortMove},
};

// The ordering hierarchy. A move's class decides its band; within a
// band the details (victim value, SEE score, history) differentiate.
// Bands never overlap, so a quiet move can never outrank a capture.
const TT_MOVE_SORT: u32 = 1_000_000;
const GOOD_CAPTURE_SORT: u32 = 100_000;
const QUEEN_PROMOTION_SORT: u32 = 90_000;
const CHECK_SORT: u32 = 50_000;
const KILLER_FIRST_SORT: u32 = 40_000;
const KILLER_SECOND_SORT: u32 = 35_000;
const UNDER_PROMOTION_SORT: u32 = 20_000;
const LOSING_CAPTURE_SORT: i32 = 10_000;

const CENTER_NUDGE: u32 = 10;
const DEVELOPMENT_NUDGE: u32 = 5;

impl Search {
    // Writes a sort score into every move of the list. The list is not
    // sorted here; pick_move selects incrementally, which is cheaper
    // when a cutoff ends the node after a move or two.
    pub fn score_moves(ml: &mut MoveList, tt_move: ShortMove, refs: &SearchRefs) {
        for i in 0..ml.len() {
            let m = ml.get_move(i);
            let score = Search::score_move(m, tt_move, refs);
            ml.get_mut_move(i).set_sort_score(score);
        }
    }

    // Tactical-only variant for quiescence: no TT move, no killers, no
    // history, just MVV-LVA and promotion values.
    pub fn score_tactical_moves(ml: &mut MoveList) {
        for i in 0..ml.len() {
            let m = ml.get_move(i);
            let score = if m.captured() != Pieces::NONE || m.en_passant() {
                GOOD_CAPTURE_SORT + mvv_lva(m)
            } else if m.promoted() == Pieces::QUEEN {
                QUEEN_PROMOTION_SORT + PIECE_VALUES[Pieces::QUEEN] as u32
            } else if m.promoted() != Pieces::NONE {
                UNDER_PROMOTION_SORT + PIECE_VALUES[m.promoted()] as u32
            } else {
                // Evasions generated while in check.
                0
            };
            ml.get_mut_move(i).set_sort_score(score);
        }
    }

    fn score_move(m: Move, tt_move: ShortMove, refs: &SearchRefs) -> u32 {
        // 1: the move the transposition table liked best.
        if tt_move.get_move() != 0 && m.to_short_move() == tt_move {
            return TT_MOVE_SORT;
        }

        // 2 and 8: captures, split by the exchange outcome.
        if m.captured() != Pieces::NONE || m.en_passant() {
            let see = Search::see(refs.board, refs.mg, m);
            return if see >= 0 {
                GOOD_CAPTURE_SORT + mvv_lva(m)
            } else {
                (LOSING_CAPTURE_SORT + see as i32) as u32
            };
        }

        // 3 and 7: promotions, queen first.
        if m.promoted() == Pieces::QUEEN {
            return QUEEN_PROMOTION_SORT + PIECE_VALUES[Pieces::QUEEN] as u32;
        }
        if m.promoted() != Pieces::NONE {
            return UNDER_PROMOTION_SORT + PIECE_VALUES[m.promoted()] as u32;
        }

        // 4: quiet checking moves.
        if refs.mg.gives_check(refs.board, m) {
            return CHECK_SORT;
        }

        // 5 and 6: the killer slots of this ply.
        let ply = refs.search_info.ply as usize;
        let short = m.to_short_move();
        if refs.search_info.killer_moves[ply][0] == short {
            return KILLER_FIRST_SORT;
        }
        if refs.search_info.killer_moves[ply][1] == short {
            return KILLER_SECOND_SORT;
        }

        // 9: remaining quiet moves by history, with small positional
        // nudges toward the center and development.
        quiet_score(m, refs)
    }

    // Picks the move with the highest sort score from the unsearched
    // tail of the list and swaps it to the current index. One pass of a
    // selection sort per call.
    pub fn pick_move(ml: &mut MoveList, start_index: u8) {
        for i in (start_index + 1)..ml.len() {
            if ml.get_move(i).sort_score() > ml.get_move(start_index).sort_score() {
                ml.swap(start_index as usize, i as usize);
            }
        }
    }
}

// Most Valuable Victim - Least Valuable Attacker: taking a queen with a
// pawn searches long before taking a pawn with a queen.
fn mvv_lva(m: Move) -> u32 {
    let victim = if m.en_passant() {
        PIECE_VALUES[Pieces::PAWN]
    } else {
        PIECE_VALUES[m.captured()]
    };
    let attacker = PIECE_VALUES[m.piece()];
    (victim as u32) * 10 - (attacker as u32)
}

fn quiet_score(m: Move, refs: &SearchRefs) -> u32 {
    let us = refs.board.us();
    let history = refs.search_info.history_heuristic[us][m.piece()][m.to()];
    let mut score = history.min(HISTORY_SCORE_CAP);

    if crate::board::defs::BB_SQUARES[m.to()] & BB_CENTER > 0 {
        score += CENTER_NUDGE;
    }

    let home_rank = if us == Sides::WHITE { Ranks::R1 } else { Ranks::R8 };
    let is_minor = m.piece() == Pieces::KNIGHT || m.piece() == Pieces::BISHOP;
    if is_minor && square_on_rank(m.from(), home_rank) {
        score += DEVELOPMENT_NUDGE;
    }

    score
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::Board;
    use crate::defs::FEN_START_POSITION;
    use crate::engine::defs::{Information, SearchData, TT};
    use crate::movegen::defs::MoveType;
    use crate::movegen::MoveGenerator;
    use crate::search::defs::{SearchControl, SearchInfo, SearchParams, SearchRefs};
    use crossbeam_channel::{unbounded, Receiver, Sender};
    use std::sync::{Arc, RwLock};

    struct Harness {
        board: Board,
        mg: Arc<MoveGenerator>,
        tt: Arc<RwLock<TT<SearchData>>>,
        search_params: SearchParams,
        search_info: SearchInfo,
        control_rx: Receiver<SearchControl>,
        report_tx: Sender<Information>,
        _report_rx: Receiver<Information>,
    }

    fn harness(fen: &str) -> Harness {
        let mut board = Board::new();
        board.fen_read(Some(fen)).unwrap();
        let (_control_tx, control_rx) = unbounded::<SearchControl>();
        let (report_tx, _report_rx) = unbounded::<Information>();
        Harness {
            board,
            mg: Arc::new(MoveGenerator::new()),
            tt: Arc::new(RwLock::new(TT::new(1))),
            search_params: SearchParams::new(),
            search_info: SearchInfo::new(),
            control_rx,
            report_tx,
            _report_rx,
        }
    }

    impl Harness {
        fn refs(&mut self) -> SearchRefs<'_> {
            SearchRefs {
                board: &mut self.board,
                mg: &self.mg,
                tt: &self.tt,
                tt_enabled: true,
                search_params: &mut self.search_params,
                search_info: &mut self.search_info,
                control_rx: &self.control_rx,
                report_tx: &self.report_tx,
            }
        }
    }

    #[test]
    fn tt_move_is_searched_first() {
        let mut h = harness(FEN_START_POSITION);
        let refs = h.refs();
        let mut ml = MoveList::new();
        refs.mg.generate_moves(refs.board, &mut ml, MoveType::All);

        // Claim an arbitrary quiet move as the TT move.
        let tt_move = ml.get_move(7).to_short_move();
        Search::score_moves(&mut ml, tt_move, &refs);
        Search::pick_move(&mut ml, 0);

        assert_eq!(ml.get_move(0).to_short_move(), tt_move);
    }

    #[test]
    fn winning_capture_outranks_quiets_and_losing_captures() {
        // White can take the d5 pawn with the e4 pawn (winning) or with
        // the queen, which would be met by the c6 pawn (losing).
        let mut h = harness("rnbqkbnr/pp2pppp/2p5/3p4/3QP3/8/PPPP1PPP/RNB1KBNR w KQkq - 0 3");
        let refs = h.refs();
        let mut ml = MoveList::new();
        refs.mg.generate_moves(refs.board, &mut ml, MoveType::All);
        Search::score_moves(&mut ml, ShortMove::new(0), &refs);

        let mut pawn_takes = 0;
        let mut queen_takes = 0;
        let mut quiet_best = 0;
        for i in 0..ml.len() {
            let m = ml.get_move(i);
            match m.as_string().as_str() {
                "e4d5" => pawn_takes = m.sort_score(),
                "d4d5" => queen_takes = m.sort_score(),
                _ => {
                    if m.is_quiet() {
                        quiet_best = quiet_best.max(m.sort_score());
                    }
                }
            }
        }

        assert!(pawn_takes >= GOOD_CAPTURE_SORT);
        assert!(queen_takes < GOOD_CAPTURE_SORT);
        assert!(queen_takes >= LOSING_CAPTURE_SORT as u32 - 1000);
        assert!(quiet_best < queen_takes);
        assert!(pawn_takes > queen_takes);
    }

    #[test]
    fn killers_outrank_plain_quiets() {
        let mut h = harness(FEN_START_POSITION);
        let refs = h.refs();
        let mut ml = MoveList::new();
        refs.mg.generate_moves(refs.board, &mut ml, MoveType::All);

        let killer = ml.get_move(3);
        refs.search_info.killer_moves[0][0] = killer.to_short_move();
        Search::score_moves(&mut ml, ShortMove::new(0), &refs);
        Search::pick_move(&mut ml, 0);

        assert_eq!(ml.get_move(0).to_short_move(), killer.to_short_move());
    }
}
