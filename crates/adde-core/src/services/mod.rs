//! Services that compose paths, the entry store, and ports.

mod adde_manager;

pub use adde_manager::AddeManager;
