//! # helios-model
//!
//! Adapter contract, adapter registry and run orchestration for coupling
//! simple climate models through [`helios_params`] parameter sets.
//!
//! A [`Model`] owns an input and an output [`helios_params::ParameterSet`]
//! plus one [`Adapter`]. Callers write inputs (including the generic
//! `Start Time` and `Stop Time` run period), call [`Model::run`] or step the
//! model, then read outputs:
//!
//! ```ignore
//! use helios_model::Model;
//!
//! let mut model = Model::new("one-box")?;
//! model.parameters().writable_generic("Start Time")?.set(0i64)?;
//! model.parameters().writable_generic("Stop Time")?.set(10 * 365 * 24 * 3600i64)?;
//! // ... write Emissions|CO2 ...
//! model.run()?;
//! let info = model.output().info("Pool|CO2|Atmosphere");
//! ```

mod adapter;
mod error;
mod onebox;
mod runner;

pub use adapter::{adapter_names, load_adapter, Adapter};
pub use error::ModelError;
pub use onebox::OneBox;
pub use runner::Model;
