pub mod common;
pub mod run;

pub use run::Run;
