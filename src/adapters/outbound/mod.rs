pub mod console;
pub mod memory;
pub mod network;
