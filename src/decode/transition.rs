//! Directed transition penalties between phases

use crate::segment::types::Phase;

/// Fixed penalty matrix charged when the decoded phase changes between
/// adjacent frames.
///
/// Natural progressions (Explore→Pursue, Pursue→Execute, Execute→Outcome,
/// Outcome→Explore) are cheap; jumps that skip the flow cost more, and
/// regressions out of Outcome cost the most. Self-transitions are free, and
/// any distinct pair without an explicit entry costs 1.5.
#[derive(Debug, Clone, PartialEq)]
pub struct TransitionCostTable {
    costs: [[f64; 4]; 4],
}

impl TransitionCostTable {
    const LISTED: [(Phase, Phase, f64); 10] = [
        (Phase::Explore, Phase::Pursue, 0.2),
        (Phase::Pursue, Phase::Execute, 0.3),
        (Phase::Execute, Phase::Outcome, 0.1),
        (Phase::Outcome, Phase::Explore, 0.2),
        (Phase::Explore, Phase::Execute, 1.2),
        (Phase::Pursue, Phase::Outcome, 0.8),
        (Phase::Outcome, Phase::Pursue, 1.0),
        (Phase::Explore, Phase::Outcome, 3.0),
        (Phase::Outcome, Phase::Execute, 2.5),
        (Phase::Execute, Phase::Explore, 2.0),
    ];

    const UNLISTED_PENALTY: f64 = 1.5;

    /// Unscaled table.
    pub fn new() -> Self {
        Self::with_scale(1.0)
    }

    /// Table with every non-zero penalty multiplied by `scale`.
    pub fn with_scale(scale: f64) -> Self {
        let mut costs = [[Self::UNLISTED_PENALTY * scale; 4]; 4];
        for (prev, curr, penalty) in Self::LISTED {
            costs[prev.index()][curr.index()] = penalty * scale;
        }
        for phase in Phase::ALL {
            costs[phase.index()][phase.index()] = 0.0;
        }
        Self { costs }
    }

    /// Penalty charged for moving from `prev` to `curr`.
    pub fn penalty(&self, prev: Phase, curr: Phase) -> f64 {
        self.costs[prev.index()][curr.index()]
    }
}

impl Default for TransitionCostTable {
    fn default() -> Self {
        Self::new()
    }
}
