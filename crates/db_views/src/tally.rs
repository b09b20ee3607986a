use coolbills_db_schema::source::legislation::RollCall;
use serde::{Deserialize, Serialize};

/// Per-position totals and percentage breakdown for one roll call.
/// Percentages are rounded to one decimal place and sum to roughly 100; a
/// roll call with no recorded votes reports 0.0 across the board.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Tally {
  pub yea: i32,
  pub nay: i32,
  pub present: i32,
  pub not_voting: i32,
  pub total: i32,
  pub yea_percent: f64,
  pub nay_percent: f64,
  pub present_percent: f64,
  pub not_voting_percent: f64,
}

impl Tally {
  pub fn from_roll_call(roll_call: &RollCall) -> Self {
    let total = roll_call.yea + roll_call.nay + roll_call.present + roll_call.not_voting;
    let percent = |count: i32| {
      if total == 0 {
        0.0
      } else {
        (f64::from(count) * 1000.0 / f64::from(total)).round() / 10.0
      }
    };
    Tally {
      yea: roll_call.yea,
      nay: roll_call.nay,
      present: roll_call.present,
      not_voting: roll_call.not_voting,
      total,
      yea_percent: percent(roll_call.yea),
      nay_percent: percent(roll_call.nay),
      present_percent: percent(roll_call.present),
      not_voting_percent: percent(roll_call.not_voting),
    }
  }
}

#[cfg(test)]
mod tests {
  use super::Tally;
  use chrono::Utc;
  use coolbills_db_schema::{
    newtypes::{BillId, RollCallId},
    source::legislation::RollCall,
  };
  use pretty_assertions::assert_eq;

  fn roll_call(yea: i32, nay: i32, present: i32, not_voting: i32) -> RollCall {
    RollCall {
      id: RollCallId(1),
      bill_id: BillId(1),
      question: "On Passage".to_string(),
      yea,
      nay,
      present,
      not_voting,
      voted_at: Utc::now(),
    }
  }

  #[test]
  fn rounds_to_one_decimal() {
    let tally = Tally::from_roll_call(&roll_call(120, 80, 5, 0));
    assert_eq!(205, tally.total);
    assert_eq!(58.5, tally.yea_percent);
    assert_eq!(39.0, tally.nay_percent);
    assert_eq!(2.4, tally.present_percent);
    assert_eq!(0.0, tally.not_voting_percent);
  }

  #[test]
  fn zero_votes_reports_zero_percentages() {
    let tally = Tally::from_roll_call(&roll_call(0, 0, 0, 0));
    assert_eq!(0, tally.total);
    assert_eq!(0.0, tally.yea_percent);
    assert_eq!(0.0, tally.nay_percent);
    assert_eq!(0.0, tally.present_percent);
    assert_eq!(0.0, tally.not_voting_percent);
  }

  #[test]
  fn unanimous_is_one_hundred() {
    let tally = Tally::from_roll_call(&roll_call(430, 0, 0, 0));
    assert_eq!(100.0, tally.yea_percent);
  }
}
