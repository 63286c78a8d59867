use std::result;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CuesplitError {
    #[error("{0} of {1} tracks could not be tagged")]
    TaggingFailed(usize, usize),
}

pub type CuesplitResult<T> = result::Result<T, CuesplitError>;
