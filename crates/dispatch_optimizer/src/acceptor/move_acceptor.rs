use crate::solver::solver_params::AcceptanceStrategy;

use super::{
    accept_move::AcceptMove, plateau_acceptor::PlateauAcceptor,
    simulated_annealing_acceptor::SimulatedAnnealingAcceptor,
    strict_improvement_acceptor::StrictImprovementAcceptor,
};

#[derive(Debug)]
pub enum MoveAcceptor {
    StrictImprovement(StrictImprovementAcceptor),
    Plateau(PlateauAcceptor),
    SimulatedAnnealing(SimulatedAnnealingAcceptor),
}

impl From<&AcceptanceStrategy> for MoveAcceptor {
    fn from(strategy: &AcceptanceStrategy) -> Self {
        match *strategy {
            AcceptanceStrategy::StrictImprovement => {
                MoveAcceptor::StrictImprovement(StrictImprovementAcceptor)
            }
            AcceptanceStrategy::AcceptEqual { max_plateau_moves } => {
                MoveAcceptor::Plateau(PlateauAcceptor::new(max_plateau_moves))
            }
            AcceptanceStrategy::SimulatedAnnealing {
                initial_temperature,
                cooling_rate,
                min_temperature,
                seed,
            } => MoveAcceptor::SimulatedAnnealing(SimulatedAnnealingAcceptor::new(
                initial_temperature,
                cooling_rate,
                min_temperature,
                seed,
            )),
        }
    }
}

impl AcceptMove for MoveAcceptor {
    fn delta_limit(&mut self) -> i64 {
        match self {
            MoveAcceptor::StrictImprovement(acceptor) => acceptor.delta_limit(),
            MoveAcceptor::Plateau(acceptor) => acceptor.delta_limit(),
            MoveAcceptor::SimulatedAnnealing(acceptor) => acceptor.delta_limit(),
        }
    }

    fn on_accepted(&mut self, delta: i64) {
        match self {
            MoveAcceptor::StrictImprovement(acceptor) => acceptor.on_accepted(delta),
            MoveAcceptor::Plateau(acceptor) => acceptor.on_accepted(delta),
            MoveAcceptor::SimulatedAnnealing(acceptor) => acceptor.on_accepted(delta),
        }
    }

    fn is_strictly_improving(&self) -> bool {
        match self {
            MoveAcceptor::StrictImprovement(acceptor) => acceptor.is_strictly_improving(),
            MoveAcceptor::Plateau(acceptor) => acceptor.is_strictly_improving(),
            MoveAcceptor::SimulatedAnnealing(acceptor) => acceptor.is_strictly_improving(),
        }
    }
}
