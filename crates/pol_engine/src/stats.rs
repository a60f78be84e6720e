//! Statistics/budget collaborator hook.
//!
//! Income, expenses, poverty/crime/education composites and the economic
//! profile are recalculated monthly by an engine outside this crate. The
//! lifecycle only needs a place in the tick to let that happen; everything
//! it reads afterwards comes through `EntityStats` on the world entities.

use crate::state::WorldState;
use pol_core::GameDate;

pub trait StatsEngine {
    /// Called once per monthly tick, before scheduling and resolution.
    fn recalculate_monthly(&mut self, world: &mut WorldState, date: GameDate);
}

/// Default collaborator that leaves every figure untouched.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoopStats;

impl StatsEngine for NoopStats {
    fn recalculate_monthly(&mut self, _world: &mut WorldState, _date: GameDate) {}
}
