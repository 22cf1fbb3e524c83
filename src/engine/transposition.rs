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
use crate::movegen::defs::ShortMove;
use crate::search::defs::CHECKMATE_THRESHOLD;

const MEGABYTE: usize = 1024 * 1024;
const ENTRIES_PER_MILLE: usize = 1000;

// What kind of bound a stored score is, in alpha/beta terms: Exact
// scores fell inside the window, Alpha entries failed low (the score is
// an upper bound), Beta entries failed high (a lower bound).
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum HashFlag {
    Nothing,
    Exact,
    Alpha,
    Beta,
}

pub trait IHashData {
    fn new() -> Self;
    fn depth(&self) -> i8;
}

// One search result: how deep the node was searched, what the score
// was, what kind of bound that score is, and which move was best.
#[derive(Debug, Copy, Clone)]
pub struct SearchData {
    depth: i8,
    flag: HashFlag,
    value: i16,
    best_move: ShortMove,
}

impl IHashData for SearchData {
    fn new() -> Self {
        Self {
            depth: 0,
            flag: HashFlag::Nothing,
            value: 0,
            best_move: ShortMove::new(0),
        }
    }

    fn depth(&self) -> i8 {
        self.depth
    }
}

impl SearchData {
    // Mate scores are ply-dependent: "mate in 3 from here" is worth
    // less the further the node sits from the root. They are stored
    // relative to the node and re-based on probe, so an entry written
    // at one ply stays correct when it is found again at another.
    pub fn create(depth: i8, ply: i8, flag: HashFlag, value: i16, best_move: ShortMove) -> Self {
        let mut v = value;
        if v >= CHECKMATE_THRESHOLD {
            v += ply as i16;
        } else if v <= -CHECKMATE_THRESHOLD {
            v -= ply as i16;
        }

        Self {
            depth,
            flag,
            value: v,
            best_move,
        }
    }

    // A usable score comes back only when the entry is at least as
    // deep as the requested search, and its bound actually decides the
    // node at the given window. The best move is always returned; it
    // costs nothing and improves move ordering.
    pub fn get(&self, depth: i8, ply: i8, alpha: i16, beta: i16) -> (Option<i16>, ShortMove) {
        let mut value: Option<i16> = None;

        if self.depth >= depth {
            let mut v = self.value;
            if v >= CHECKMATE_THRESHOLD {
                v -= ply as i16;
            } else if v <= -CHECKMATE_THRESHOLD {
                v += ply as i16;
            }

            match self.flag {
                HashFlag::Exact => value = Some(v),
                HashFlag::Beta => {
                    if v >= beta {
                        value = Some(beta);
                    }
                }
                HashFlag::Alpha => {
                    if v <= alpha {
                        value = Some(alpha);
                    }
                }
                HashFlag::Nothing => (),
            }
        }

        (value, self.best_move)
    }
}

#[derive(Copy, Clone)]
struct Entry<D> {
    key: ZobristKey,
    generation: u8,
    data: D,
}

impl<D: IHashData + Copy> Entry<D> {
    fn new() -> Self {
        Self {
            key: 0,
            generation: 0,
            data: D::new(),
        }
    }

    fn is_empty(&self) -> bool {
        self.key == 0
    }
}

// The transposition table: a bounded, keyed store of search results,
// sized in megabytes, one entry per bucket. The replacement policy
// prefers deeper searches but always evicts entries from a previous
// search generation, so old results cannot squat forever.
pub struct TT<D> {
    table: Vec<Entry<D>>,
    total_entries: usize,
    used_entries: usize,
    generation: u8,
}

impl<D: IHashData + Copy> TT<D> {
    pub fn new(megabytes: usize) -> Self {
        let total_entries = Self::entries_for(megabytes);
        Self {
            table: vec![Entry::new(); total_entries],
            total_entries,
            used_entries: 0,
            generation: 0,
        }
    }

    pub fn resize(&mut self, megabytes: usize) {
        self.total_entries = Self::entries_for(megabytes);
        self.table = vec![Entry::new(); self.total_entries];
        self.used_entries = 0;
        self.generation = 0;
    }

    pub fn clear(&mut self) {
        for entry in self.table.iter_mut() {
            *entry = Entry::new();
        }
        self.used_entries = 0;
        self.generation = 0;
    }

    // Bumped once per root search; stale generations lose replacement
    // fights regardless of depth.
    pub fn next_generation(&mut self) {
        self.generation = self.generation.wrapping_add(1);
    }

    pub fn probe(&self, key: ZobristKey) -> Option<&D> {
        if self.total_entries == 0 {
            return None;
        }

        let entry = &self.table[self.index_of(key)];
        if entry.key == key {
            Some(&entry.data)
        } else {
            None
        }
    }

    pub fn insert(&mut self, key: ZobristKey, data: D) {
        if self.total_entries == 0 {
            return;
        }

        let generation = self.generation;
        let index = self.index_of(key);
        let entry = &mut self.table[index];

        let replace = entry.is_empty()
            || entry.generation != generation
            || data.depth() >= entry.data.depth();

        if replace {
            if entry.is_empty() {
                self.used_entries += 1;
            }
            *entry = Entry {
                key,
                generation,
                data,
            };
        }
    }

    // Table fill state in permille, as the UCI "hashfull" field wants it.
    pub fn hash_full(&self) -> u16 {
        if self.total_entries == 0 {
            return 0;
        }
        (self.used_entries * ENTRIES_PER_MILLE / self.total_entries) as u16
    }

    fn entries_for(megabytes: usize) -> usize {
        megabytes * MEGABYTE / std::mem::size_of::<Entry<D>>()
    }

    fn index_of(&self, key: ZobristKey) -> usize {
        (key % self.total_entries as u64) as usize
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::search::defs::CHECKMATE;

    #[test]
    fn store_and_probe_round_trip() {
        let mut tt: TT<SearchData> = TT::new(1);
        let key = 0x1234_5678_9ABC_DEF0;
        let best = ShortMove::new(0x0123);

        tt.insert(key, SearchData::create(5, 0, HashFlag::Exact, 42, best));

        let data = tt.probe(key).expect("entry must be found");
        let (value, m) = data.get(5, 0, -100, 100);
        assert_eq!(value, Some(42));
        assert_eq!(m, best);

        assert!(tt.probe(key ^ 1).is_none());
    }

    #[test]
    fn shallow_entries_only_contribute_their_move() {
        let mut tt: TT<SearchData> = TT::new(1);
        let key = 99_999;
        let best = ShortMove::new(77);

        tt.insert(key, SearchData::create(3, 0, HashFlag::Exact, 10, best));

        let data = tt.probe(key).unwrap();
        let (value, m) = data.get(6, 0, -100, 100);
        assert_eq!(value, None);
        assert_eq!(m, best);
    }

    #[test]
    fn bounds_respect_the_window() {
        let beta_entry = SearchData::create(4, 0, HashFlag::Beta, 80, ShortMove::new(0));
        // A lower bound of 80 only cuts when beta is at most 80.
        assert_eq!(beta_entry.get(4, 0, -100, 50).0, Some(50));
        assert_eq!(beta_entry.get(4, 0, -100, 100).0, None);

        let alpha_entry = SearchData::create(4, 0, HashFlag::Alpha, -80, ShortMove::new(0));
        // An upper bound of -80 only cuts when alpha is at least -80.
        assert_eq!(alpha_entry.get(4, 0, -50, 100).0, Some(-50));
        assert_eq!(alpha_entry.get(4, 0, -100, 100).0, None);
    }

    #[test]
    fn mate_scores_are_rebased_by_ply() {
        // A mate found at ply 4, stored, then probed at ply 2: the
        // probing node is two plies closer to the root, so the mate is
        // two plies closer as well.
        let found_at_ply = 4;
        let score = CHECKMATE - 6; // mate in 6 plies from the ply-4 node
        let data = SearchData::create(8, found_at_ply, HashFlag::Exact, score, ShortMove::new(0));

        let (value, _) = data.get(8, 2, -CHECKMATE, CHECKMATE);
        assert_eq!(value, Some(CHECKMATE - 6 + found_at_ply as i16 - 2));
    }

    #[test]
    fn replacement_prefers_depth_within_a_generation() {
        let mut tt: TT<SearchData> = TT::new(1);
        let key = 424_242;

        tt.insert(key, SearchData::create(8, 0, HashFlag::Exact, 1, ShortMove::new(1)));
        // A shallower result for the same position must not evict.
        tt.insert(key, SearchData::create(3, 0, HashFlag::Exact, 2, ShortMove::new(2)));
        assert_eq!(tt.probe(key).unwrap().depth(), 8);

        // After a generation bump, even a shallow result replaces.
        tt.next_generation();
        tt.insert(key, SearchData::create(3, 0, HashFlag::Exact, 2, ShortMove::new(2)));
        assert_eq!(tt.probe(key).unwrap().depth(), 3);
    }

    #[test]
    fn a_zero_sized_table_stays_inert() {
        let mut tt: TT<SearchData> = TT::new(0);
        tt.insert(7, SearchData::create(1, 0, HashFlag::Exact, 1, ShortMove::new(0)));
        assert!(tt.probe(7).is_none());
        assert_eq!(tt.hash_full(), 0);
    }
}
