// fanbase/fanbase-core
//
// Copyright: 2024, Fanbase Contributors
// License: Mozilla Public License v2.0 (MPL v2.0)

pub use comments_repository::CommentsRepository;

mod comments_repository;

#[cfg(feature = "test")]
pub mod mocks {
    pub use super::comments_repository::MockCommentsRepository;
}
