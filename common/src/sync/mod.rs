pub mod spsc;
pub use spsc::SpscQueue;
