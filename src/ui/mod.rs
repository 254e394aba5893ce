//! Console output for o3de-setup.

mod console;

pub use console::Console;
