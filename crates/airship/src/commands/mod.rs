pub mod deploy;
pub mod deployment;
