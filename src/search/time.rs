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
    defs::{SearchMode, SearchRefs},
    Search,
};
use crate::defs::Sides;
use crate::evaluation::phase::{self, PhaseBucket};

// Compensation for the time a move spends in transit between the
// engine and whatever is driving it.
pub const OVERHEAD: u128 = 50;

// The soft budget is a divisor of the remaining clock, chosen by game
// phase: openings need little thought, middlegames the most, endgames
// something in between (they are simpler, but precision matters).
const DIVISOR_OPENING: u128 = 50;
const DIVISOR_MIDDLEGAME: u128 = 30;
const DIVISOR_ENDGAME: u128 = 40;

// Hard ceilings per phase, in milliseconds.
const CEILING_OPENING: u128 = 30_000;
const CEILING_MIDDLEGAME: u128 = 20_000;
const CEILING_ENDGAME: u128 = 10_000;

// Increment share that may be spent on the current move.
const INCREMENT_NUMERATOR: u128 = 4;
const INCREMENT_DENOMINATOR: u128 = 5;

// Below one minute on the clock, allocations are halved and clamped.
const PRESSURE_THRESHOLD: u128 = 60_000;
const PRESSURE_CEILING: u128 = 5_000;

const MINIMUM_BUDGET: u128 = 5;

impl Search {
    // True when the search must wind down. In game-time mode the
    // in-flight search may overshoot the soft budget by a quarter, so
    // a depth that is nearly done can still finish; a fixed movetime
    // is a hard promise and gets no slack.
    pub fn out_of_time(refs: &SearchRefs) -> bool {
        let elapsed = refs.search_info.timer_elapsed();
        let allocated = refs.search_info.allocated_time;

        match refs.search_params.search_mode {
            SearchMode::MoveTime => elapsed >= allocated,
            SearchMode::GameTime => elapsed >= allocated + allocated / 4,
            _ => false,
        }
    }

    // Converts the clock state into a soft budget for this move.
    pub fn allocate_time(refs: &SearchRefs) -> u128 {
        let gt = &refs.search_params.game_time;
        let white = refs.board.us() == Sides::WHITE;
        let clock = if white { gt.wtime } else { gt.btime };
        let increment = if white { gt.winc } else { gt.binc };

        let (divisor, ceiling) = match phase::bucket_of(refs.board) {
            PhaseBucket::Opening => (DIVISOR_OPENING, CEILING_OPENING),
            PhaseBucket::Middlegame => (DIVISOR_MIDDLEGAME, CEILING_MIDDLEGAME),
            PhaseBucket::Endgame => (DIVISOR_ENDGAME, CEILING_ENDGAME),
        };

        let mut budget =
            clock / divisor + (increment * INCREMENT_NUMERATOR) / INCREMENT_DENOMINATOR;

        if clock < PRESSURE_THRESHOLD {
            budget = (budget / 2).min(PRESSURE_CEILING);
        }

        budget = budget.min(ceiling);

        // Never plan to burn more than half the remaining clock, keep
        // transit overhead out of the budget, and stay above zero.
        budget = budget.min(clock / 2);
        budget = budget.saturating_sub(OVERHEAD).max(MINIMUM_BUDGET);

        budget
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::Board;
    use crate::defs::FEN_START_POSITION;
    use crate::engine::defs::{Information, SearchData, TT};
    use crate::movegen::MoveGenerator;
    use crate::search::defs::{GameTime, SearchControl, SearchInfo, SearchParams};
    use crossbeam_channel::unbounded;
    use std::sync::{Arc, RwLock};

    fn allocation_for(fen: &str, game_time: GameTime) -> u128 {
        let mut board = Board::new();
        board.fen_read(Some(fen)).unwrap();
        let mg = Arc::new(MoveGenerator::new());
        let tt: Arc<RwLock<TT<SearchData>>> = Arc::new(RwLock::new(TT::new(0)));
        let mut search_params = SearchParams::new();
        search_params.search_mode = SearchMode::GameTime;
        search_params.game_time = game_time;
        let mut search_info = SearchInfo::new();
        let (_control_tx, control_rx) = unbounded::<SearchControl>();
        let (report_tx, _report_rx) = unbounded::<Information>();

        let refs = SearchRefs {
            board: &mut board,
            mg: &mg,
            tt: &tt,
            tt_enabled: false,
            search_params: &mut search_params,
            search_info: &mut search_info,
            control_rx: &control_rx,
            report_tx: &report_tx,
        };

        Search::allocate_time(&refs)
    }

    #[test]
    fn opening_divides_by_fifty() {
        // Ten minutes on the clock in the starting position.
        let budget = allocation_for(
            FEN_START_POSITION,
            GameTime::new(600_000, 600_000, 0, 0, None),
        );
        assert_eq!(budget, 600_000 / 50 - OVERHEAD);
    }

    #[test]
    fn endgame_divides_by_forty() {
        let budget = allocation_for(
            "4k3/4r3/8/8/8/8/4R3/4K3 w - - 0 1",
            GameTime::new(400_000, 400_000, 0, 0, None),
        );
        assert_eq!(budget, 400_000 / 40 - OVERHEAD);
    }

    #[test]
    fn increment_is_mostly_added() {
        let without = allocation_for(
            FEN_START_POSITION,
            GameTime::new(600_000, 600_000, 0, 0, None),
        );
        let with = allocation_for(
            FEN_START_POSITION,
            GameTime::new(600_000, 600_000, 5_000, 0, None),
        );
        assert_eq!(with - without, 4_000);
    }

    #[test]
    fn time_pressure_clamps_hard() {
        let budget = allocation_for(
            FEN_START_POSITION,
            GameTime::new(30_000, 30_000, 0, 0, None),
        );
        // 30s / 50 halved is 300ms, far below the pressure ceiling.
        assert!(budget <= 300);
        assert!(budget >= MINIMUM_BUDGET);

        // Nearly flagged: the budget stays positive and tiny.
        let desperate = allocation_for(
            FEN_START_POSITION,
            GameTime::new(800, 800, 0, 0, None),
        );
        assert!(desperate >= MINIMUM_BUDGET && desperate <= 400);
    }

    #[test]
    fn ceilings_cap_long_clocks() {
        // Two hours on the clock still never budgets more than 30s.
        let budget = allocation_for(
            FEN_START_POSITION,
            GameTime::new(7_200_000, 7_200_000, 0, 0, None),
        );
        assert!(budget <= 30_000);
    }

    #[test]
    fn black_uses_its_own_clock() {
        let budget = allocation_for(
            "rnbqkbnr/pppppppp/8/8/4P3/8/PPPP1PPP/RNBQKBNR b KQkq - 0 1",
            GameTime::new(10_000, 600_000, 0, 0, None),
        );
        assert_eq!(budget, 600_000 / 50 - OVERHEAD);
    }
}
