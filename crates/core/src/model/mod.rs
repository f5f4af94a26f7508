#![forbid(unsafe_code)]

mod patch;
mod title;
mod todo;

pub use patch::*;
pub use title::*;
pub use todo::*;

#[cfg(test)]
mod tests;
