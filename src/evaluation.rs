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

pub mod defs;
pub mod endgame;
pub mod kingsafety;
pub mod phase;
pub mod psqt;
pub mod rooks;

use crate::board::Board;
use crate::defs::Sides;
use crate::movegen::MoveGenerator;

// Evaluates the position in centipawns from the point of view of the
// side to move. Every term is computed from White's perspective first;
// the sum is negated when it is Black's turn, so that the negamax
// search can always maximize.
//
// The terms, all interpolated or gated by the continuous game phase:
//   - material (incrementally tracked by the board)
//   - piece-square tables for the non-king pieces
//   - king safety and castling incentives
//   - rook coordination
//   - king activity in the endgame
pub fn evaluate_position(board: &Board, mg: &MoveGenerator) -> i16 {
    let phase = phase::phase_of(board);

    let material = board.material(Sides::WHITE) as i32 - board.material(Sides::BLACK) as i32;

    let mut value = material;
    value += psqt::evaluate(board, phase) as i32;
    value += kingsafety::evaluate(board, mg, phase) as i32;
    value += rooks::evaluate(board, phase) as i32;
    value += endgame::evaluate(board, phase) as i32;

    let value = value as i16;

    if board.us() == Sides::BLACK {
        -value
    } else {
        value
    }
}
