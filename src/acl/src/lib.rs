//! # CretoAI Access Control
//!
//! Endpoint access decisions built from pluggable role assessors.
//!
//! ## Features
//!
//! - **Pluggable role assessors** registered by role name
//! - **Priority-tiered context population**: tiers run highest first, the
//!   assessors inside a tier run concurrently
//! - **Ordered rule resolution**: global rules, then endpoint rules, folded
//!   into a single decision
//! - **Conditional grants**: a decision can carry a conditions object
//!   (e.g. `{"ownerId": 42}`) that later grants merge into
//! - **Default deny**: nothing is permitted unless some rule's role holds
//!
//! ## Example
//!
//! ```rust
//! use cretoai_acl::{AccessControl, AclConfig, AclContext, AclRequest, Decision};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = AclConfig::from_json_str(
//!         r#"{"rules": [{"allow": true, "role": "all"}]}"#,
//!     )?;
//!     let acl = AccessControl::new(config);
//!
//!     let request = AclRequest::new().with_endpoint("get-item");
//!     let context = AclContext::new();
//!     acl.populate_context(&request, &context, None).await?;
//!
//!     let decision = acl.is_permitted("get-item", &context).await?;
//!     assert_eq!(decision, Decision::Permitted);
//!
//!     Ok(())
//! }
//! ```

pub mod assessor;
pub mod config;
pub mod context;
pub mod decision;
pub mod engine;
pub mod error;
pub mod population;
pub mod registry;
pub mod repository;
pub mod resolution;
pub mod rules;
pub mod types;

// Re-export commonly used types
pub use assessor::{AllAssessor, RoleAssessor};
pub use config::{AclConfig, EndpointAcl, EndpointConfig};
pub use context::{AclContext, AclRequest};
pub use decision::{Credential, Decision};
pub use engine::{AccessControl, AclMetrics, EngineConfig};
pub use error::{AclError, Result};
pub use registry::{RoleRegistry, SharedAssessor};
pub use repository::{Repositories, RepositorySlot};
pub use rules::RuleSource;
pub use types::{Conditions, EndpointName, RoleName, Rule};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
