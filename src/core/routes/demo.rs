use chrono::NaiveDate;

use crate::core::routes::{Route, RoutePoint};

// Built-in demo dataset used when no routes are provisioned in the config.
pub(crate) fn demo_routes() -> Vec<Route> {
    let date = |y, m, d| NaiveDate::from_ymd_opt(y, m, d).expect("valid demo date");

    vec![
        Route::new(
            11,
            date(2025, 11, 29),
            vec![
                RoutePoint::new(49.857525, 19.102666)
                    .with_address("Bielsko-Biała, ul. Główna 5")
                    .with_additional_info("Paczka przy kasie"),
                RoutePoint::new(49.803514, 19.063549)
                    .with_address("Bielsko-Biała, ul. Nowa 12")
                    .with_additional_info("Mieszkanie 3"),
                RoutePoint::new(49.792619, 19.047254)
                    .with_address("Bielsko-Biała, ul. Stara 8")
                    .with_additional_info("Paczka za drzwiami"),
            ],
        ),
        Route::new(
            12,
            date(2025, 11, 29),
            vec![
                RoutePoint::new(49.8260, 19.1560)
                    .with_address("Bielsko-Biała, ul. Ceglana 18")
                    .with_additional_info("Dom z żółtym dachem"),
                RoutePoint::new(49.8175, 19.1420)
                    .with_address("Bielsko-Biała, ul. Piękna 7")
                    .with_additional_info("Paczka na balkonie"),
                RoutePoint::new(49.8145, 19.1390)
                    .with_address("Bielsko-Biała, ul. Kwiatowa 24")
                    .with_additional_info("Obok paczkomatu"),
            ],
        ),
        Route::new(
            13,
            date(2025, 11, 30),
            vec![
                RoutePoint::new(49.8190, 19.1440)
                    .with_address("Bielsko-Biała, ul. Różowa 11")
                    .with_additional_info("Przesyłka do poniedziałku"),
                RoutePoint::new(49.8205, 19.1410)
                    .with_address("Bielsko-Biała, ul. Fioletowa 6")
                    .with_additional_info("Mieszkanie 2"),
                RoutePoint::new(49.8220, 19.1380)
                    .with_address("Bielsko-Biała, ul. Turkusowa 19")
                    .with_additional_info("Paczka w paczkomacie"),
            ],
        ),
        Route::new(
            1,
            date(2025, 12, 1),
            vec![
                RoutePoint::new(49.7941, 19.0528)
                    .with_address("Bielsko-Biała, ul. Olszówka 9")
                    .with_additional_info("Paczka na parterze"),
                RoutePoint::new(49.8148, 19.0438)
                    .with_address("Bielsko-Biała, ul. Partyzantów 44")
                    .with_additional_info("Dzwonek obok drewni"),
                RoutePoint::new(49.8027, 19.0504)
                    .with_address("Bielsko-Biała, ul. Leszczyńska 20")
                    .with_additional_info("Paczka do Drive-through"),
            ],
        ),
        Route::new(
            2,
            date(2025, 12, 1),
            vec![
                RoutePoint::new(49.8218, 19.0447)
                    .with_address("Bielsko-Biała, ul. Armii Krajowej 20")
                    .with_additional_info("Dom jednorodzinny"),
                RoutePoint::new(49.8199, 19.0491)
                    .with_address("Bielsko-Biała, ul. Warszawska 45")
                    .with_additional_info("Paczka na 3 piętrze"),
                RoutePoint::new(49.8162, 19.0538)
                    .with_address("Bielsko-Biała, ul. Żywiecka 12")
                    .with_additional_info("Oddać do sąsiada"),
            ],
        ),
        Route::new(
            3,
            date(2025, 12, 1),
            vec![
                RoutePoint::new(49.8256, 19.0569)
                    .with_address("Bielsko-Biała, ul. Józefa Piłsudskiego 47")
                    .with_additional_info("Uwaga na dzieci!"),
                RoutePoint::new(49.8231, 19.0604)
                    .with_address("Bielsko-Biała, ul. Prusa 7")
                    .with_additional_info("Załóż na paczce"),
                RoutePoint::new(49.8208, 19.0628)
                    .with_address("Bielsko-Biała, ul. Tetmajera 22")
                    .with_additional_info("Brama z lewej strony"),
            ],
        ),
        Route::new(
            4,
            date(2025, 12, 1),
            vec![
                RoutePoint::new(49.8183, 19.0412)
                    .with_address("Bielsko-Biała, ul. Chrobrego 5")
                    .with_additional_info("Paczka do salonu"),
                RoutePoint::new(49.8172, 19.0455)
                    .with_address("Bielsko-Biała, ul. Adama Asnyka 18")
                    .with_additional_info("Nie dzwonić, wrzucić do skrzynki"),
                RoutePoint::new(49.8157, 19.0483)
                    .with_address("Bielsko-Biała, ul. Kopernika 9")
                    .with_additional_info("Paczka za bramą"),
            ],
        ),
        Route::new(
            5,
            date(2025, 12, 2),
            vec![
                RoutePoint::new(49.8272, 19.0651)
                    .with_address("Bielsko-Biała, ul. Stefana Żeromskiego 14")
                    .with_additional_info("Mieszkanie 5"),
                RoutePoint::new(49.8243, 19.0687)
                    .with_address("Bielsko-Biała, ul. Bohaterów Westerplatte 11")
                    .with_additional_info("Paczka pod drzwiami"),
                RoutePoint::new(49.8219, 19.0715)
                    .with_address("Bielsko-Biała, ul. Wyspiańskiego 25")
                    .with_additional_info("Dzwonek elektryczny"),
            ],
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn demo_route_ids_are_unique() {
        let routes = demo_routes();
        let mut ids: Vec<u64> = routes.iter().map(|route| route.id).collect();

        ids.sort_unstable();
        ids.dedup();

        assert_eq!(ids.len(), routes.len());
    }
}
