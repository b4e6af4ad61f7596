use thiserror::Error;

use crate::node::Side;
use crate::order::Order;

#[derive(Error, Debug)]
pub enum TreeError {
    #[error("Cannot attach {side} child: target value not found in tree")]
    ValueNotFound { side: Side },

    #[error("Cursor advanced past the end of the {order} sequence")]
    PastEnd { order: Order },

    #[error("Invalid build script, line {line}: {reason}")]
    Script { line: usize, reason: String },

    #[error("Failed to read build script: {0}")]
    ScriptRead(#[from] std::io::Error),
}

pub type TreeResult<T> = Result<T, TreeError>;
