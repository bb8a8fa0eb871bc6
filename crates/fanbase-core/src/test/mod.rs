// fanbase/fanbase-core
//
// Copyright: 2024, Fanbase Contributors
// License: Mozilla Public License v2.0 (MPL v2.0)

pub use constant_time_provider::ConstantTimeProvider;
pub use incrementing_id_provider::IncrementingIDProvider;
pub use mock_app_dependencies::{
    MockAppDependencies, MockEngagementDomainServiceDependencies,
    MockNotificationServiceDependencies,
};

mod incrementing_id_provider;
mod mock_app_dependencies;

pub mod mock_data {
    pub use super::mock_app_dependencies::{
        mock_admin_session as admin_session, mock_fan_session as fan_session,
        mock_reference_date as reference_date,
    };
}
