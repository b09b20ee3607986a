use crate::{
  newtypes::{BillId, RollCallId, UserId},
  schema::{bill, congress_member, favorite_member, roll_call},
  source::legislation::{
    Bill,
    CongressMember,
    FavoriteMember,
    FavoriteMemberForm,
    RollCall,
  },
  utils::{get_conn, DbPool},
};
use coolbills_utils::error::CoolbillsResult;
use diesel::{ExpressionMethods, QueryDsl};
use diesel_async::RunQueryDsl;

impl Bill {
  pub async fn read(pool: &mut DbPool<'_>, bill_id: BillId) -> CoolbillsResult<Self> {
    let mut conn = get_conn(pool).await?;
    Ok(bill::table.find(bill_id).first(&mut *conn).await?)
  }
}

impl RollCall {
  pub async fn read(pool: &mut DbPool<'_>, roll_call_id: RollCallId) -> CoolbillsResult<Self> {
    let mut conn = get_conn(pool).await?;
    Ok(roll_call::table.find(roll_call_id).first(&mut *conn).await?)
  }

  pub async fn for_bill(pool: &mut DbPool<'_>, bill_id: BillId) -> CoolbillsResult<Vec<Self>> {
    let mut conn = get_conn(pool).await?;
    Ok(
      roll_call::table
        .filter(roll_call::bill_id.eq(bill_id))
        .order_by(roll_call::voted_at.desc())
        .load::<Self>(&mut *conn)
        .await?,
    )
  }
}

impl CongressMember {
  pub async fn read(pool: &mut DbPool<'_>, bioguide_id: &str) -> CoolbillsResult<Self> {
    let mut conn = get_conn(pool).await?;
    Ok(
      congress_member::table
        .find(bioguide_id)
        .first(&mut *conn)
        .await?,
    )
  }

  pub async fn favorites_for_user(
    pool: &mut DbPool<'_>,
    user_id: UserId,
  ) -> CoolbillsResult<Vec<Self>> {
    let mut conn = get_conn(pool).await?;
    Ok(
      favorite_member::table
        .inner_join(congress_member::table)
        .filter(favorite_member::user_id.eq(user_id))
        .order_by(favorite_member::published_at.desc())
        .select(congress_member::all_columns)
        .load::<Self>(&mut *conn)
        .await?,
    )
  }
}

impl FavoriteMember {
  pub async fn create(pool: &mut DbPool<'_>, form: &FavoriteMemberForm) -> CoolbillsResult<usize> {
    let mut conn = get_conn(pool).await?;
    Ok(
      diesel::insert_into(favorite_member::table)
        .values(form)
        .on_conflict_do_nothing()
        .execute(&mut *conn)
        .await?,
    )
  }

  pub async fn delete(pool: &mut DbPool<'_>, form: &FavoriteMemberForm) -> CoolbillsResult<usize> {
    let mut conn = get_conn(pool).await?;
    Ok(
      diesel::delete(
        favorite_member::table
          .filter(favorite_member::user_id.eq(form.user_id))
          .filter(favorite_member::bioguide_id.eq(&form.bioguide_id)),
      )
      .execute(&mut *conn)
      .await?,
    )
  }

  pub async fn bioguide_ids_for_user(
    pool: &mut DbPool<'_>,
    user_id: UserId,
  ) -> CoolbillsResult<Vec<String>> {
    let mut conn = get_conn(pool).await?;
    Ok(
      favorite_member::table
        .filter(favorite_member::user_id.eq(user_id))
        .select(favorite_member::bioguide_id)
        .load::<String>(&mut *conn)
        .await?,
    )
  }
}
