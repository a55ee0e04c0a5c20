/* demo/backend/rust/src/pages/mod.rs */

pub mod topic;
