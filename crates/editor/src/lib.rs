// Library crate: the scene collection state machine, its collaborator
// interfaces, and the headless harness/command protocol built on top.

pub mod bridge;
pub mod command;
pub mod error;
pub mod fixtures;
pub mod harness;
pub mod i18n;
pub mod state;
