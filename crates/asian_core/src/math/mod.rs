//! Mathematical building blocks shared by both pricing engines.
//!
//! - [`probability`]: risk-neutral up/down probabilities of the binomial tree
//! - [`payoff`]: running path average and the average-price call payoff

pub mod payoff;
pub mod probability;
