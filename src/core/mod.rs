pub mod worker;

pub use worker::Runnable;
