//! Weighted A* with reopening
//!
//! With `weight == 1` and an admissible heuristic the first time the goal is
//! popped its path is optimal. Larger weights inflate the heuristic and trade
//! that guarantee for fewer expansions; the result is then expected, but not
//! guaranteed, to stay within `weight` times the optimum, since disruption and
//! road class factors make edge costs depend on the query.

mod path;
mod search;
mod state;

pub use path::HopRecord;
pub use search::{AStar, RouteQuery, SearchOutcome, SearchStats, route};
pub use state::Cost;
