pub mod check;
pub mod prefetch;
