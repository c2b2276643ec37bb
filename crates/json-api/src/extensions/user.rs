//! Authenticated user stored in the depot.

use salvo::prelude::{Depot, StatusError};
use trolley_app::domain::users::records::UserUuid;

const USER_UUID_DEPOT_KEY: &str = "trolley.user_uuid";

/// Access to the user resolved by the auth middleware.
pub(crate) trait UserDepotExt {
    fn insert_user_uuid(&mut self, user: UserUuid);

    /// The authenticated user, if the request got past the auth middleware.
    fn user_uuid(&self) -> Option<UserUuid>;

    fn user_uuid_or_401(&self) -> Result<UserUuid, StatusError>;
}

impl UserDepotExt for Depot {
    fn insert_user_uuid(&mut self, user: UserUuid) {
        self.insert(USER_UUID_DEPOT_KEY, user);
    }

    fn user_uuid(&self) -> Option<UserUuid> {
        self.get::<UserUuid>(USER_UUID_DEPOT_KEY).ok().copied()
    }

    fn user_uuid_or_401(&self) -> Result<UserUuid, StatusError> {
        self.user_uuid()
            .ok_or_else(|| StatusError::unauthorized().brief("Authentication required"))
    }
}
