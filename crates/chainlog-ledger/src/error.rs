/// Errors produced by ledger operations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LedgerError {
    #[error("invalid block range: from={from}, to={to}, len={len}")]
    InvalidRange { from: usize, to: usize, len: usize },
}
