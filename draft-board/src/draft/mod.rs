// Draft domain: session state, availability, the round plan and commands.

pub mod availability;
pub mod command;
pub mod plan;
pub mod session;
