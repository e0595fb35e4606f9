pub mod controller;
pub mod debounce;
