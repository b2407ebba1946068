use chrono::{Duration, NaiveDate};
use serde::{Deserialize, Serialize};

/// Step 4: the requested delivery date. The summary step never gates
/// navigation; the date only has a floor.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RequestedDate {
    pub date: Option<NaiveDate>,
}

/// Earliest date a customer may request: fifteen calendar days out, to
/// cover the Letter Of Authorization lead time.
pub fn minimum_requested_date(today: NaiveDate) -> NaiveDate {
    today + Duration::days(15)
}

impl RequestedDate {
    /// Called when the summary step initializes: fills an empty date with
    /// the floor and lifts an existing date that sits below it.
    pub fn clamp_to_minimum(&mut self, today: NaiveDate) {
        let floor = minimum_requested_date(today);
        match self.date {
            Some(date) if date >= floor => {}
            _ => self.date = Some(floor),
        }
    }
}
