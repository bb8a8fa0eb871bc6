// fanbase/fanbase-core
//
// Copyright: 2024, Fanbase Contributors
// License: Mozilla Public License v2.0 (MPL v2.0)

pub use engagement_domain_service::EngagementDomainService;

pub mod impls;
mod engagement_domain_service;

#[cfg(feature = "test")]
pub mod mocks {
    pub use super::engagement_domain_service::MockEngagementDomainService;
}
