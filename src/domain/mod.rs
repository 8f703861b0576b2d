//! Domain layer - Core business logic and entities

pub mod account;
pub mod cache;
pub mod error;
pub mod grafana;

pub use account::{AccessKey, AccountEnvelope, KeyCheckOutcome};
pub use cache::{Cache, CacheExt};
pub use error::DomainError;
pub use grafana::{
    CreateOrgResponse, CreateUserResponse, Dashboard, MessageResponse, NewOrg, Org, OrgAddress,
    OrgPreferences, OrgRole, OrgUserRole, ProvisionStep, ProvisioningResult, User,
};
