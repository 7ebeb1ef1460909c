use chrono::{Local, NaiveDate};
use tokio::sync::mpsc::Receiver;

use crate::common::{error, info, Result};
use crate::core::routes::{Route, MAX_ROUTES_PER_LIST};
use crate::core::UnitOfWork;

// Owns the delivery routes and serves route units of work sent by the
// dispatcher. Running as a dedicated task keeps the route list single-owner.
pub(crate) struct RouteStore {
    routes: Vec<Route>,
    receiver: Receiver<UnitOfWork>,
}

impl RouteStore {
    pub(crate) fn new(receiver: Receiver<UnitOfWork>, routes: Vec<Route>) -> Self {
        Self { routes, receiver }
    }

    pub(crate) async fn run(mut self) {
        while let Some(uow) = self.receiver.recv().await {
            if let Err(err) = self.handle_uow(uow) {
                error!("handle uow {}", err);
            }
        }
    }

    fn handle_uow(&mut self, uow: UnitOfWork) -> Result<()> {
        match uow {
            UnitOfWork::ListRoutes(mut list) => {
                info!("{}", list.request);

                let date = list.request.date.unwrap_or_else(today);
                let routes = self.list(date);

                list.send_response(Ok(routes))
            }
            UnitOfWork::RemoveRoute(mut remove) => {
                info!("{}", remove.request);

                let removed = self.remove(remove.request.id);

                remove.send_response(Ok(removed))
            }
            _ => unreachable!(),
        }
    }

    fn list(&self, date: NaiveDate) -> Vec<Route> {
        self.routes
            .iter()
            .filter(|route| route.date == Some(date))
            .take(MAX_ROUTES_PER_LIST)
            .cloned()
            .collect()
    }

    fn remove(&mut self, id: u64) -> Option<Route> {
        self.routes
            .iter()
            .position(|route| route.id == id)
            .map(|index| self.routes.remove(index))
    }
}

fn today() -> NaiveDate {
    Local::now().date_naive()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::routes::RoutePoint;

    fn store(routes: Vec<Route>) -> RouteStore {
        let (_tx, rx) = tokio::sync::mpsc::channel(1);
        RouteStore::new(rx, routes)
    }

    fn route(id: u64, date: NaiveDate) -> Route {
        Route::new(id, date, vec![RoutePoint::new(49.82, 19.04)])
    }

    fn date(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 12, d).unwrap()
    }

    #[test]
    fn list_filters_by_date_and_caps_results() {
        let store = store(vec![
            route(1, date(1)),
            route(2, date(1)),
            route(3, date(2)),
            route(4, date(1)),
            route(5, date(1)),
        ]);

        let listed = store.list(date(1));

        assert_eq!(
            listed.iter().map(|r| r.id).collect::<Vec<_>>(),
            vec![1, 2, 4]
        );

        assert_eq!(store.list(date(2)).len(), 1);
        assert!(store.list(date(3)).is_empty());
    }

    #[test]
    fn remove_deletes_and_returns_the_route() {
        let mut store = store(vec![route(1, date(1)), route(2, date(1))]);

        let removed = store.remove(1).unwrap();
        assert_eq!(removed.id, 1);

        // The next listing no longer includes it.
        assert_eq!(
            store.list(date(1)).iter().map(|r| r.id).collect::<Vec<_>>(),
            vec![2]
        );

        assert!(store.remove(1).is_none());
        assert!(store.remove(99).is_none());
    }
}
