use crate::player::Money;

/// Largest table a 52-card deal can serve: `2 × 23 + 5 = 51`.
pub const MAX_CAPACITY: usize = 23;

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ConfigError {
    #[error("small blind must be positive")]
    ZeroBlind,
    #[error("big blind {big} is smaller than small blind {small}")]
    BlindOrder { small: Money, big: Money },
    #[error("buy-in must be positive")]
    ZeroBuyIn,
    #[error("capacity must be between 2 and 23, got {0}")]
    Capacity(usize),
}

/// Table stakes and limits.
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub struct GameConfig {
    pub small_blind: Money,
    pub big_blind: Money,
    pub buy_in: Money,
    pub capacity: usize,
    /// Shuffle seed; `None` draws one from the OS.
    pub seed: Option<u64>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self { small_blind: 25, big_blind: 50, buy_in: 500, capacity: 10, seed: None }
    }
}

impl GameConfig {
    /// Set the small blind; the big blind follows at twice the size.
    pub fn with_blinds(mut self, small_blind: Money) -> Self {
        self.small_blind = small_blind;
        self.big_blind = small_blind.saturating_mul(2);
        self
    }

    pub fn with_big_blind(mut self, big_blind: Money) -> Self {
        self.big_blind = big_blind;
        self
    }

    pub fn with_buy_in(mut self, buy_in: Money) -> Self {
        self.buy_in = buy_in;
        self
    }

    pub fn with_capacity(mut self, capacity: usize) -> Self {
        self.capacity = capacity;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.small_blind == 0 {
            return Err(ConfigError::ZeroBlind);
        }
        if self.big_blind < self.small_blind {
            return Err(ConfigError::BlindOrder { small: self.small_blind, big: self.big_blind });
        }
        if self.buy_in == 0 {
            return Err(ConfigError::ZeroBuyIn);
        }
        if !(2..=MAX_CAPACITY).contains(&self.capacity) {
            return Err(ConfigError::Capacity(self.capacity));
        }
        Ok(())
    }
}
