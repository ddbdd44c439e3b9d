use thiserror::Error;

#[derive(Debug, Error)]
pub enum StatisticError {
    #[error("statistic '{name}' is already closed")]
    Closed { name: String },

    #[error("statistic '{name}' could not start listening: {reason}")]
    Listen { name: String, reason: String },
}

impl StatisticError {
    pub fn closed(name: impl Into<String>) -> Self {
        Self::Closed { name: name.into() }
    }

    pub fn listen(name: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Listen {
            name: name.into(),
            reason: reason.into(),
        }
    }

    pub fn is_closed(&self) -> bool {
        matches!(self, Self::Closed { .. })
    }
}
