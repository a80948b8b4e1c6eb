//! Project-file encoders for the compositing tool.
//!
//! Both grammars are closed contracts owned by a third party; the writers
//! here are pinned by golden-file tests and do no business logic beyond
//! serialization.

mod exo;
mod ped;

pub use exo::{format_credits, write_exo_files};
pub use ped::{PED_FORMAT_VERSION, write_ped_file};
