//! Shop clock, step cycle, and orchestration for the Floret shop
//! simulation.
//!
//! Each simulation step covers one simulated hour: demand generation,
//! pricing, sales against the stock ledger, a periodic recommendation
//! cycle, and the collection of append-only archive rows.
//!
//! # Modules
//!
//! - [`clock`] -- Shop clock with hourly advancement, open-hours gating,
//!   and weekend detection.
//! - [`config`] -- Configuration loading from `floret-config.yaml` into
//!   strongly-typed structs.
//! - [`demand`] -- Stochastic hourly customer demand model.
//! - [`ledger`] -- Stock ledger: on-hand quantities, budget, daily totals.
//! - [`operator`] -- Shared operator control state (pause, stop, speed).
//! - [`pricing`] -- Price quoting (recommendation override, evening surge).
//! - [`recommend`] -- Pricing heuristic and reorder advice.
//! - [`runner`] -- Cancellable async simulation loop.
//! - [`shop`] -- The owned shop state object and its step cycle.

pub mod clock;
pub mod config;
pub mod demand;
pub mod ledger;
pub mod operator;
pub mod pricing;
pub mod recommend;
pub mod runner;
pub mod shop;
