//! Per-table query modules. One module per table, plain functions over
//! `&Connection`.

pub mod default_qprofiles;
pub mod org_qprofiles;
pub mod rules_profiles;
