// ABOUTME: Type-safe identifiers and validated domain types.
// ABOUTME: Phantom-typed resource IDs, provisioning status, and image naming.

mod id;
mod name_component;
mod runner_image;
mod status;

pub use id::{Id, ListenerId, LoadBalancerId};
pub use name_component::{NameComponent, NameComponentError};
pub use runner_image::{ImageTagError, RunnerImage, validate_tag};
pub use status::ProvisioningStatus;
