use super::accept_move::AcceptMove;

/// Accepts equal cost moves to walk across plateaus, at most
/// `max_plateau_moves` of them in a row. The streak resets on every strict
/// improvement.
#[derive(Debug)]
pub struct PlateauAcceptor {
    max_plateau_moves: usize,
    streak: usize,
}

impl PlateauAcceptor {
    pub fn new(max_plateau_moves: usize) -> Self {
        PlateauAcceptor {
            max_plateau_moves,
            streak: 0,
        }
    }
}

impl AcceptMove for PlateauAcceptor {
    fn delta_limit(&mut self) -> i64 {
        if self.streak < self.max_plateau_moves {
            1
        } else {
            0
        }
    }

    fn on_accepted(&mut self, delta: i64) {
        if delta < 0 {
            self.streak = 0;
        } else {
            self.streak += 1;
        }
    }
}
