use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum NegotiateError {
    #[error("none of the supported content codings is acceptable")]
    NotAcceptable,

    #[error("unknown content coding: {name}")]
    UnknownCoding { name: String },
}

impl NegotiateError {
    pub fn unknown_coding<S: ToString>(name: S) -> Self {
        Self::UnknownCoding { name: name.to_string() }
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum NegotiatorBuildError {
    #[error("max codings must be greater than zero")]
    InvalidMaxCodings,
}
