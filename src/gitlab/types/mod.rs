//! Wire entities (`Wire*`, exactly as the REST API sends them) and the
//! domain entities the mappers turn them into.

mod common;
mod job;
mod pipeline;

pub use common::*;
pub use job::*;
pub use pipeline::*;
