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

use crate::defs::{NrOf, Piece, Side, Sides, Square};
use rand_chacha::rand_core::{RngCore, SeedableRng};
use rand_chacha::ChaCha8Rng;

/* Random number for all sides for all pieces on all squares */
type PieceRandoms = [[[u64; NrOf::SQUARES]; NrOf::PIECE_TYPES]; Sides::BOTH];
type CastlingRandoms = [u64; NrOf::CASTLING_PERMISSIONS];
type SideRandoms = [u64; Sides::BOTH];
type EpRandoms = [u64; NrOf::SQUARES + 1];

pub type ZobristKey = u64;

// The Zobrist key is an (as unique as possible) identification of a board
// position, built by XOR-ing random numbers for every property of the
// position: each piece on each square, the castling permissions, the side
// to move, and the en-passant square. The random numbers come from a
// ChaCha RNG with a fixed seed, so keys are reproducible between runs.
const RNG_SEED: u64 = 256;

pub struct ZobristRandoms {
    rnd_pieces: PieceRandoms,
    rnd_castling: CastlingRandoms,
    rnd_sides: SideRandoms,
    rnd_en_passant: EpRandoms,
}

impl ZobristRandoms {
    pub fn new() -> Self {
        let mut random = ChaCha8Rng::seed_from_u64(RNG_SEED);
        let mut zobrist_randoms = Self {
            rnd_pieces: [[[EMPTY; NrOf::SQUARES]; NrOf::PIECE_TYPES]; Sides::BOTH],
            rnd_castling: [EMPTY; NrOf::CASTLING_PERMISSIONS],
            rnd_sides: [EMPTY; Sides::BOTH],
            rnd_en_passant: [EMPTY; NrOf::SQUARES + 1],
        };

        zobrist_randoms.rnd_pieces.iter_mut().for_each(|side| {
            side.iter_mut().for_each(|piece| {
                piece
                    .iter_mut()
                    .for_each(|square| *square = random.next_u64())
            })
        });

        zobrist_randoms
            .rnd_castling
            .iter_mut()
            .for_each(|permission| *permission = random.next_u64());

        zobrist_randoms
            .rnd_sides
            .iter_mut()
            .for_each(|side| *side = random.next_u64());

        zobrist_randoms
            .rnd_en_passant
            .iter_mut()
            .for_each(|ep| *ep = random.next_u64());

        zobrist_randoms
    }

    pub fn piece(&self, side: Side, piece: Piece, square: Square) -> ZobristKey {
        self.rnd_pieces[side][piece][square]
    }

    pub fn castling(&self, castling_permissions: u8) -> ZobristKey {
        self.rnd_castling[castling_permissions as usize]
    }

    pub fn side(&self, side: Side) -> u64 {
        self.rnd_sides[side]
    }

    pub fn en_passant(&self, en_passant: Option<u8>) -> ZobristKey {
        match en_passant {
            Some(ep) => self.rnd_en_passant[ep as usize],
            None => self.rnd_en_passant[NrOf::SQUARES],
        }
    }
}

const EMPTY: u64 = 0;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn randoms_are_reproducible() {
        let a = ZobristRandoms::new();
        let b = ZobristRandoms::new();
        assert_eq!(a.piece(Sides::WHITE, 0, 0), b.piece(Sides::WHITE, 0, 0));
        assert_eq!(a.castling(5), b.castling(5));
        assert_eq!(a.side(Sides::BLACK), b.side(Sides::BLACK));
        assert_eq!(a.en_passant(None), b.en_passant(None));
    }

    #[test]
    fn randoms_differ_between_properties() {
        let z = ZobristRandoms::new();
        assert_ne!(z.piece(Sides::WHITE, 0, 0), z.piece(Sides::BLACK, 0, 0));
        assert_ne!(z.side(Sides::WHITE), z.side(Sides::BLACK));
        assert_ne!(z.en_passant(Some(16)), z.en_passant(Some(17)));
    }
}
