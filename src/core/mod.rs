pub mod error;
pub mod field;
pub mod state;
pub mod stencil;

pub use error::FieldError;
pub use field::{Cell, Field};
pub use state::FluidState;
pub use stencil::{Executor, PARALLEL_THRESHOLD, Plane};
