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

use crate::board::defs::ZobristKey;
use crate::defs::Sides;
use crate::movegen::defs::Move;

// This struct holds the part of the position that cannot be derived from
// the piece bitboards: the side to move, the castling permissions, the
// counters, the Zobrist key, and the incrementally updated non-king
// material count per side. A copy of it goes into the history on every
// make, so unmake can restore everything with a single assignment.
#[derive(Clone, Copy)]
pub struct GameState {
    pub active_color: u8,
    pub castling: u8,
    pub halfmove_clock: u8,
    pub en_passant: Option<u8>,
    pub fullmove_number: u16,
    pub zobrist_key: ZobristKey,
    pub material: [u16; Sides::BOTH],
    pub next_move: Move,
}

impl GameState {
    pub fn new() -> Self {
        Self {
            active_color: 0,
            castling: 0,
            en_passant: None,
            halfmove_clock: 0,
            fullmove_number: 0,
            zobrist_key: 0,
            material: [0; Sides::BOTH],
            next_move: Move::new(0),
        }
    }

    pub fn castling_as_string(&self) -> String {
        let mut castling_as_string: String = String::from("");
        let castling = self.castling;

        castling_as_string += if castling & crate::defs::Castling::WK > 0 { "K" } else { "" };
        castling_as_string += if castling & crate::defs::Castling::WQ > 0 { "Q" } else { "" };
        castling_as_string += if castling & crate::defs::Castling::BK > 0 { "k" } else { "" };
        castling_as_string += if castling & crate::defs::Castling::BQ > 0 { "q" } else { "" };

        if castling_as_string.is_empty() {
            castling_as_string = String::from("-");
        }

        castling_as_string
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::new()
    }
}
