/// Errors from parsing a hex encoded digest.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ParseDigestError {
    #[error("invalid hex digest: {}", _0)]
    InvalidHex(#[from] hex::FromHexError),
    #[error("invalid digest length {} != {}", _0, _1)]
    InvalidLength(usize, usize),
}
