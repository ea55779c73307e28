//! Grammar tables bundled with the runtime.

pub mod pyret;
