// handlers/mod.rs - Two-tier handler layout
//
// Public (no auth) → Protected (admin session)

pub mod protected;
pub mod public;
