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

use argent::defs::ENGINE_RUN_ERRORS;
use argent::engine::Engine;

fn main() {
    let mut engine = Engine::new();
    let result = engine.run();

    if let Err(index) = result {
        let error = ENGINE_RUN_ERRORS[index as usize];
        println!("Engine failed to run: {error}");
    }
}
