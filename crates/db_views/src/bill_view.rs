use crate::structs::{BillSearchResults, BillView};
use coolbills_db_schema::{
  newtypes::BillId,
  schema::{bill, bill_tag},
  source::legislation::Bill,
  utils::{fuzzy_search, get_conn, limit_and_offset, DbPool},
};
use coolbills_utils::{error::CoolbillsResult, total_pages};
use diesel::{
  dsl::{count, exists},
  BoolExpressionMethods,
  ExpressionMethods,
  PgTextExpressionMethods,
  QueryDsl,
};
use diesel_async::RunQueryDsl;
use std::collections::HashMap;

#[derive(Default, Clone)]
pub struct BillQuery {
  pub search: Option<String>,
  /// Every listed tag must be present on a bill for it to match.
  pub tags: Vec<String>,
  pub policy_area: Option<String>,
  pub congress: Option<i32>,
  pub page: Option<i64>,
  pub limit: Option<i64>,
}

impl BillQuery {
  pub async fn search(self, pool: &mut DbPool<'_>) -> CoolbillsResult<BillSearchResults> {
    let (limit, offset) = limit_and_offset(self.page, self.limit)?;
    let mut conn = get_conn(pool).await?;

    let mut query = bill::table.into_boxed();
    let mut count_query = bill::table.select(count(bill::id)).into_boxed();

    if let Some(search) = &self.search {
      let pattern = fuzzy_search(search);
      query = query.filter(
        bill::title
          .ilike(pattern.clone())
          .or(bill::bill_number.ilike(pattern.clone()))
          .or(bill::policy_area.ilike(pattern.clone())),
      );
      count_query = count_query.filter(
        bill::title
          .ilike(pattern.clone())
          .or(bill::bill_number.ilike(pattern.clone()))
          .or(bill::policy_area.ilike(pattern)),
      );
    }
    for tag in &self.tags {
      let matches_tag = || {
        exists(
          bill_tag::table
            .filter(bill_tag::bill_id.eq(bill::id))
            .filter(bill_tag::tag.eq(tag.clone())),
        )
      };
      query = query.filter(matches_tag());
      count_query = count_query.filter(matches_tag());
    }
    if let Some(policy_area) = &self.policy_area {
      query = query.filter(bill::policy_area.eq(policy_area.clone()));
      count_query = count_query.filter(bill::policy_area.eq(policy_area.clone()));
    }
    if let Some(congress) = self.congress {
      query = query.filter(bill::congress.eq(congress));
      count_query = count_query.filter(bill::congress.eq(congress));
    }

    let total = count_query.first::<i64>(&mut *conn).await?;
    let bills = query
      .order_by(bill::introduced_at.desc())
      .then_order_by(bill::id.desc())
      .limit(limit)
      .offset(offset)
      .load::<Bill>(&mut *conn)
      .await?;

    let ids: Vec<BillId> = bills.iter().map(|b| b.id).collect();
    let mut tags_by_bill: HashMap<BillId, Vec<String>> = HashMap::new();
    let tag_rows = bill_tag::table
      .filter(bill_tag::bill_id.eq_any(&ids))
      .order_by(bill_tag::tag.asc())
      .select((bill_tag::bill_id, bill_tag::tag))
      .load::<(BillId, String)>(&mut *conn)
      .await?;
    for (bill_id, tag) in tag_rows {
      tags_by_bill.entry(bill_id).or_default().push(tag);
    }

    let results = bills
      .into_iter()
      .map(|bill| BillView {
        tags: tags_by_bill.remove(&bill.id).unwrap_or_default(),
        bill,
      })
      .collect();

    Ok(BillSearchResults {
      results,
      total,
      total_pages: total_pages(total, limit)?,
    })
  }
}
