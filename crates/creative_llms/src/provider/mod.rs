//! Provider trait

mod trait_def;

pub use trait_def::Provider;
