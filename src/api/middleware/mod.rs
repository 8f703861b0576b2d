//! Request guards

mod access_key;

pub use access_key::RequireOrgAccess;
