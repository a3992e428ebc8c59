#[macro_use]
mod logging;
mod array;

pub use array::{EvictFn, FixedArray};

#[cfg(test)]
pub mod dropflag;
