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
mod fen;
pub mod gamestate;
pub mod history;
mod playmove;
mod zobrist;

use self::{
    defs::{Pieces, BB_SQUARES},
    gamestate::GameState,
    history::History,
    zobrist::{ZobristKey, ZobristRandoms},
};
use crate::{
    defs::{Bitboard, NrOf, Piece, Side, Sides, Square, EMPTY},
    evaluation::defs::PIECE_VALUES,
    misc::bits,
};
use std::sync::Arc;

// This file implements the engine's board representation; it is bitboard
// based, with the least significant bit being A1.
pub struct Board {
    pub bb_pieces: [[Bitboard; NrOf::PIECE_TYPES]; Sides::BOTH],
    pub bb_side: [Bitboard; Sides::BOTH],
    pub game_state: GameState,
    pub history: History,
    pub piece_list: [Piece; NrOf::SQUARES],
    zr: Arc<ZobristRandoms>,
}

// Public functions for use by other modules.
impl Board {
    // Creates a new, empty board. Use fen_read() to set up a position.
    pub fn new() -> Self {
        Self {
            bb_pieces: [[EMPTY; NrOf::PIECE_TYPES]; Sides::BOTH],
            bb_side: [EMPTY; Sides::BOTH],
            game_state: GameState::new(),
            history: History::new(),
            piece_list: [Pieces::NONE; NrOf::SQUARES],
            zr: Arc::new(ZobristRandoms::new()),
        }
    }

    // Return a bitboard with locations of a certain piece type for one of the sides.
    pub fn get_pieces(&self, piece: Piece, side: Side) -> Bitboard {
        self.bb_pieces[side][piece]
    }

    // Return a bitboard containing all the pieces on the board.
    pub fn occupancy(&self) -> Bitboard {
        self.bb_side[Sides::WHITE] | self.bb_side[Sides::BLACK]
    }

    // Returns the side to move.
    pub fn us(&self) -> usize {
        self.game_state.active_color as usize
    }

    // Returns the side that is NOT moving.
    pub fn opponent(&self) -> usize {
        (self.game_state.active_color ^ 1) as usize
    }

    // Returns the square the king is currently on.
    pub fn king_square(&self, side: Side) -> Square {
        self.bb_pieces[side][Pieces::KING].trailing_zeros() as Square
    }

    // Returns the piece type occupying the given square, or Pieces::NONE.
    pub fn piece_on(&self, square: Square) -> Piece {
        self.piece_list[square]
    }

    // Summed value of the non-king material for one side, kept up to date
    // incrementally by put_piece and remove_piece.
    pub fn material(&self, side: Side) -> u16 {
        self.game_state.material[side]
    }

    // True if the side has at least one piece that is not a pawn or the
    // king. The null-move heuristic needs this: in pawn-only endgames a
    // null move hides zugzwang.
    pub fn has_non_pawn_material(&self, side: Side) -> bool {
        let non_pawn = self.bb_pieces[side][Pieces::QUEEN]
            | self.bb_pieces[side][Pieces::ROOK]
            | self.bb_pieces[side][Pieces::BISHOP]
            | self.bb_pieces[side][Pieces::KNIGHT];
        non_pawn != EMPTY
    }

    // Remove a piece from the board, for the given side, piece, and square.
    pub fn remove_piece(&mut self, side: Side, piece: Piece, square: Square) {
        self.bb_pieces[side][piece] ^= BB_SQUARES[square];
        self.bb_side[side] ^= BB_SQUARES[square];
        self.piece_list[square] = Pieces::NONE;
        self.game_state.material[side] -= PIECE_VALUES[piece] as u16;
        self.game_state.zobrist_key ^= self.zr.piece(side, piece, square);
    }

    // Put a piece onto the board, for the given side, piece, and square.
    pub fn put_piece(&mut self, side: Side, piece: Piece, square: Square) {
        self.bb_pieces[side][piece] |= BB_SQUARES[square];
        self.bb_side[side] |= BB_SQUARES[square];
        self.piece_list[square] = piece;
        self.game_state.material[side] += PIECE_VALUES[piece] as u16;
        self.game_state.zobrist_key ^= self.zr.piece(side, piece, square);
    }

    // Remove a piece from the from-square, and put it onto the to-square.
    pub fn move_piece(&mut self, side: Side, piece: Piece, from: Square, to: Square) {
        self.remove_piece(side, piece, from);
        self.put_piece(side, piece, to);
    }

    // Set a square as being the current ep-square.
    pub fn set_ep_square(&mut self, square: Square) {
        self.game_state.zobrist_key ^= self.zr.en_passant(self.game_state.en_passant);
        self.game_state.en_passant = Some(square as u8);
        self.game_state.zobrist_key ^= self.zr.en_passant(self.game_state.en_passant);
    }

    // Clear the ep-square. (If the ep-square is None already, nothing changes.)
    pub fn clear_ep_square(&mut self) {
        self.game_state.zobrist_key ^= self.zr.en_passant(self.game_state.en_passant);
        self.game_state.en_passant = None;
        self.game_state.zobrist_key ^= self.zr.en_passant(self.game_state.en_passant);
    }

    // Swap side from WHITE <==> BLACK
    pub fn swap_side(&mut self) {
        self.game_state.zobrist_key ^= self.zr.side(self.game_state.active_color as usize);
        self.game_state.active_color ^= 1;
        self.game_state.zobrist_key ^= self.zr.side(self.game_state.active_color as usize);
    }

    // Update castling permissions and take Zobrist-key into account.
    pub fn update_castling_permissions(&mut self, new_permissions: u8) {
        self.game_state.zobrist_key ^= self.zr.castling(self.game_state.castling);
        self.game_state.castling = new_permissions;
        self.game_state.zobrist_key ^= self.zr.castling(self.game_state.castling);
    }

    // The fifty-move rule: 100 half-moves without a capture or pawn move.
    pub fn draw_by_fifty_move_rule(&self) -> bool {
        self.game_state.halfmove_clock >= 100
    }

    // Detects positions where neither side can possibly deliver mate:
    // bare kings, a single minor piece, or same-colored bishops only.
    pub fn draw_by_insufficient_material_rule(&self) -> bool {
        let w = &self.bb_pieces[Sides::WHITE];
        let b = &self.bb_pieces[Sides::BLACK];

        // Any pawn, rook or queen on the board means mate is possible.
        let heavy_or_pawn = w[Pieces::PAWN]
            | b[Pieces::PAWN]
            | w[Pieces::ROOK]
            | b[Pieces::ROOK]
            | w[Pieces::QUEEN]
            | b[Pieces::QUEEN];
        if heavy_or_pawn != EMPTY {
            return false;
        }

        let w_minors = (w[Pieces::BISHOP] | w[Pieces::KNIGHT]).count_ones();
        let b_minors = (b[Pieces::BISHOP] | b[Pieces::KNIGHT]).count_ones();

        // King vs king, or king and one minor vs bare king.
        if w_minors + b_minors <= 1 {
            return true;
        }

        // King and bishop each, with both bishops on the same square color.
        if w_minors == 1 && b_minors == 1 && w[Pieces::BISHOP] != EMPTY && b[Pieces::BISHOP] != EMPTY
        {
            let wb = w[Pieces::BISHOP].trailing_zeros() as Square;
            let bb = b[Pieces::BISHOP].trailing_zeros() as Square;
            return Board::square_color(wb) == Board::square_color(bb);
        }

        false
    }

    // Number of earlier positions in the game/search history that are
    // identical to the current one. 2 means the current occurrence is the
    // third: a draw by the threefold repetition rule.
    pub fn repetition_count(&self) -> u8 {
        let mut count = 0;
        let mut i = self.history.len();

        while i > 0 {
            i -= 1;
            let state = self.history.get_ref(i);
            if state.zobrist_key == self.game_state.zobrist_key {
                count += 1;
            }
            // A capture or pawn move makes earlier repeats unreachable.
            if state.halfmove_clock == 0 {
                break;
            }
        }

        count
    }

    fn square_color(square: Square) -> usize {
        let (file, rank) = defs::square_on_file_rank(square);
        ((file + rank) % 2) as usize
    }
}

// Private board functions (for initializing on startup)
impl Board {
    // Resets/wipes the board. Used by the FEN reader function.
    fn reset(&mut self) {
        self.bb_pieces = [[0; NrOf::PIECE_TYPES]; Sides::BOTH];
        self.bb_side = [EMPTY; Sides::BOTH];
        self.game_state = GameState::new();
        self.history.clear();
        self.piece_list = [Pieces::NONE; NrOf::SQUARES];
    }

    // Main initialization function. The FEN-reader sets up the piece
    // bitboards; this derives everything else from them.
    fn init(&mut self) {
        let pieces_per_side_bitboards = self.init_pieces_per_side_bitboards();
        self.bb_side[Sides::WHITE] = pieces_per_side_bitboards.0;
        self.bb_side[Sides::BLACK] = pieces_per_side_bitboards.1;

        self.piece_list = self.init_piece_list();
        self.game_state.zobrist_key = self.init_zobrist_key();
        self.game_state.material = self.init_material_count();
    }

    // Gather the pieces for each side into their own bitboard.
    fn init_pieces_per_side_bitboards(&self) -> (Bitboard, Bitboard) {
        let mut bb_white: Bitboard = 0;
        let mut bb_black: Bitboard = 0;

        for (bb_w, bb_b) in self.bb_pieces[Sides::WHITE]
            .iter()
            .zip(self.bb_pieces[Sides::BLACK].iter())
        {
            bb_white |= *bb_w;
            bb_black |= *bb_b;
        }

        (bb_white, bb_black)
    }

    // Initialize the piece list: which piece type is on which square,
    // so no bitboard loop is needed to answer that question.
    fn init_piece_list(&self) -> [Piece; NrOf::SQUARES] {
        let bb_w = self.bb_pieces[Sides::WHITE];
        let bb_b = self.bb_pieces[Sides::BLACK];
        let mut piece_list: [Piece; NrOf::SQUARES] = [Pieces::NONE; NrOf::SQUARES];

        for (piece_type, (w, b)) in bb_w.iter().zip(bb_b.iter()).enumerate() {
            let mut white_pieces = *w;
            let mut black_pieces = *b;

            while white_pieces > 0 {
                let square = bits::next(&mut white_pieces);
                piece_list[square] = piece_type;
            }

            while black_pieces > 0 {
                let square = bits::next(&mut black_pieces);
                piece_list[square] = piece_type;
            }
        }

        piece_list
    }

    // Initialize the zobrist hash. This hash will later be updated incrementally.
    fn init_zobrist_key(&self) -> ZobristKey {
        let mut key: u64 = 0;

        let bb_w = self.bb_pieces[Sides::WHITE];
        let bb_b = self.bb_pieces[Sides::BLACK];

        for (piece_type, (w, b)) in bb_w.iter().zip(bb_b.iter()).enumerate() {
            let mut white_pieces = *w;
            let mut black_pieces = *b;

            while white_pieces > 0 {
                let square = bits::next(&mut white_pieces);
                key ^= self.zr.piece(Sides::WHITE, piece_type, square);
            }

            while black_pieces > 0 {
                let square = bits::next(&mut black_pieces);
                key ^= self.zr.piece(Sides::BLACK, piece_type, square);
            }
        }

        key ^= self.zr.castling(self.game_state.castling);
        key ^= self.zr.side(self.game_state.active_color as usize);
        key ^= self.zr.en_passant(self.game_state.en_passant);

        key
    }

    // Initialize the material count. Updated incrementally afterwards.
    fn init_material_count(&self) -> [u16; Sides::BOTH] {
        let mut material = [0u16; Sides::BOTH];

        for side in [Sides::WHITE, Sides::BLACK] {
            for (piece_type, bb) in self.bb_pieces[side].iter().enumerate() {
                let count = bb.count_ones() as u16;
                material[side] += count * PIECE_VALUES[piece_type] as u16;
            }
        }

        material
    }
}

impl Clone for Board {
    fn clone(&self) -> Self {
        Self {
            bb_pieces: self.bb_pieces,
            bb_side: self.bb_side,
            game_state: self.game_state,
            history: self.history.clone(),
            piece_list: self.piece_list,
            zr: Arc::clone(&self.zr),
        }
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::defs::FEN_START_POSITION;

    #[test]
    fn material_count_startpos() {
        let mut board = Board::new();
        board.fen_read(Some(FEN_START_POSITION)).unwrap();
        assert_eq!(board.material(Sides::WHITE), 3900);
        assert_eq!(board.material(Sides::BLACK), 3900);
    }

    #[test]
    fn insufficient_material_detection() {
        let cases = [
            ("8/8/4k3/8/8/3K4/8/8 w - - 0 1", true),      // K vs K
            ("8/8/4k3/8/8/3KB3/8/8 w - - 0 1", true),     // KB vs K
            ("8/8/4k3/8/8/3KN3/8/8 w - - 0 1", true),     // KN vs K
            ("8/8/2b1k3/8/8/3KB3/8/8 w - - 0 1", false),  // opposite colored bishops
            ("8/8/4k3/8/8/3KP3/8/8 w - - 0 1", false),    // pawn can promote
            ("8/8/4k3/8/8/3KR3/8/8 w - - 0 1", false),    // rook mates
        ];

        for (fen, expected) in cases {
            let mut board = Board::new();
            board.fen_read(Some(fen)).unwrap();
            assert_eq!(
                board.draw_by_insufficient_material_rule(),
                expected,
                "wrong verdict for {fen}"
            );
        }
    }

    #[test]
    fn same_colored_bishops_are_a_draw() {
        // Both bishops on light squares (c6 and e2).
        let mut board = Board::new();
        board.fen_read(Some("8/8/2b1k3/8/8/3K4/4B3/8 w - - 0 1")).unwrap();
        assert!(board.draw_by_insufficient_material_rule());
    }
}
