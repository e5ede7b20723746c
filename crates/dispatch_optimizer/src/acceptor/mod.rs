pub mod accept_move;
pub mod move_acceptor;
pub mod plateau_acceptor;
pub mod simulated_annealing_acceptor;
pub mod strict_improvement_acceptor;
