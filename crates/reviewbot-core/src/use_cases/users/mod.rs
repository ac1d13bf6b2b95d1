pub(crate) mod list_user_reviews;
pub(crate) mod set_user_active;

pub use list_user_reviews::ListUserReviewsInterface;
pub use set_user_active::SetUserActiveInterface;

#[cfg(any(test, feature = "testkit"))]
pub use self::{
    list_user_reviews::MockListUserReviewsInterface, set_user_active::MockSetUserActiveInterface,
};
