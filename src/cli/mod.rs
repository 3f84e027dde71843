mod page;
mod root;

pub use root::Cli;
