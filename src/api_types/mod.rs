//! Request and response objects for the callable operations. All numeric
//! fields serialize as canonical decimal strings; tick indices as signed
//! integers.

pub mod pool;
pub mod position;
pub mod swap;
