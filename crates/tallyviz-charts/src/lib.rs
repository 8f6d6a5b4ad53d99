//! # tallyviz Charts
//!
//! Keyed bar charts whose marks stay in one-to-one correspondence with the
//! latest data.
//!
//! This crate aggregates raw inputs into series (letter frequencies from free
//! text, passenger counts from a CSV table), fits value and band scales,
//! reconciles the bound marks against each new series with an explicit
//! enter/update/exit diff, and hands the result to a drawing surface.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::module_name_repetitions)]

pub mod aggregate;
pub mod category;
pub mod chart;
pub mod context;
pub mod frame;
pub mod layout;
pub mod mark;
pub mod period;
pub mod pipeline;
pub mod reconcile;
pub mod renderer;
pub mod scale;
pub mod series;
pub mod source;
pub mod svg;
pub mod traits;
pub mod transition;

pub use aggregate::*;
pub use category::*;
pub use chart::*;
pub use context::*;
pub use frame::*;
pub use layout::*;
pub use mark::*;
pub use period::*;
pub use pipeline::*;
pub use reconcile::*;
pub use renderer::*;
pub use scale::*;
pub use series::*;
pub use source::*;
pub use svg::*;
pub use traits::*;
pub use transition::*;
