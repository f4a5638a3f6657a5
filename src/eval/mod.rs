//! Hand strength evaluation.
//!
//! [`evaluate`] maps 5-7 cards to a totally ordered [`HandScore`];
//! comparing two scores with `Ord` decides a showdown.

pub mod hand_eval;

pub use hand_eval::{evaluate, EvalError, HandCategory, HandScore};
