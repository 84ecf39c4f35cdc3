//! Simulated time. `dt` is fixed and never derived from wall-clock time.

#[derive(Debug, Clone)]
pub struct SimulationClock {
    pub dt: f64,
    pub elapsed: f64,
    pub ticks: u64,
}

impl SimulationClock {
    pub fn new(dt: f64) -> Self {
        Self {
            dt,
            elapsed: 0.0,
            ticks: 0,
        }
    }

    /// Advance by one fixed step; happens whether or not the world is running
    pub fn advance(&mut self) {
        self.elapsed += self.dt;
        self.ticks += 1;
    }
}
