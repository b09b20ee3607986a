use crate::{newtypes::UserId, utils::DbPool};
use coolbills_utils::error::CoolbillsResult;

#[allow(async_fn_in_trait)]
pub trait Crud: Sized {
  type InsertForm;
  type UpdateForm;
  type IdType;

  async fn create(pool: &mut DbPool<'_>, form: &Self::InsertForm) -> CoolbillsResult<Self>;
  async fn read(pool: &mut DbPool<'_>, id: Self::IdType) -> CoolbillsResult<Self>;
  async fn update(
    pool: &mut DbPool<'_>,
    id: Self::IdType,
    form: &Self::UpdateForm,
  ) -> CoolbillsResult<Self>;
}

/// Directional voting on a target row. `vote` is a single conditional upsert
/// keyed on (user, target) with the direction as the only mutable column, so
/// switching sides can never leave both directions set.
#[allow(async_fn_in_trait)]
pub trait Voteable: Sized {
  type Form;
  type IdType;

  async fn vote(pool: &mut DbPool<'_>, form: &Self::Form) -> CoolbillsResult<Self>;
  /// Removes the vote only if it currently points in the given direction.
  /// Returns the number of deleted rows.
  async fn remove_vote(
    pool: &mut DbPool<'_>,
    user_id: UserId,
    target_id: Self::IdType,
    upvote: bool,
  ) -> CoolbillsResult<usize>;
}
