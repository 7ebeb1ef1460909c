use chrono::NaiveDate;

use kurierd::{Route, RoutePoint};

pub fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap()
}

pub fn route(id: u64, date: NaiveDate) -> Route {
    Route::new(
        id,
        date,
        vec![RoutePoint::new(49.8225, 19.0444).with_address("Bielsko-Biała, ul. Cyniarska 11")],
    )
}
