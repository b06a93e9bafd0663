//! Feature preprocessing stages

mod scaler;

pub use scaler::{Scaler, ScalerKind};
