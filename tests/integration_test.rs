use std::sync::Arc;

use tokio::net::TcpListener;

use kurierd::client::Api;
use kurierd::KurierdError;

mod common;

#[test]
fn login_and_route_crud() {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .init();

    tokio_test::block_on(async move {
        let monday = common::date(2025, 12, 1);
        let tuesday = common::date(2025, 12, 2);

        let mut config = kurierd::config::Config::default();

        // Setup user credential.
        config.backend.users = vec![kurierd::core::UserEntry {
            username: "test".into(),
            password: "test".into(),
        }];
        // Four routes on monday to exercise the listing cap of three.
        config.backend.routes = Some(vec![
            common::route(1, monday),
            common::route(2, monday),
            common::route(3, monday),
            common::route(4, monday),
            common::route(5, tuesday),
        ]);
        config.server.set_disable_tls(&mut Some(true));

        let listener = TcpListener::bind(("localhost", 0)).await.unwrap();
        let addr = listener.local_addr().unwrap();

        let mut initializer = kurierd::config::Initializer::from_config(config);
        initializer.set_listener(listener);

        // ctrl-c mock
        let shutdown = Arc::new(tokio::sync::Notify::new());
        let shutdown2 = shutdown.clone();

        let server_handler =
            tokio::spawn(async move { initializer.run_kurierd(shutdown2.notified()).await });

        let mut client = kurierd::client::tcp::UnauthenticatedClient::insecure_from_addr(
            "localhost",
            addr.port(),
        )
        .await
        .unwrap()
        .login("test", "test")
        .await
        .unwrap();

        // 32 random bytes, url-safe base64 without padding.
        assert_eq!(client.token().len(), 43);

        // Ping
        let ping_duration = client.ping().await.unwrap();
        assert!(ping_duration.num_nanoseconds().unwrap() > 0);

        // Listing is filtered by date and capped.
        let routes = client.routes(Some(monday)).await.unwrap();
        assert_eq!(routes.iter().map(|r| r.id).collect::<Vec<_>>(), vec![1, 2, 3]);

        let routes = client.routes(Some(tuesday)).await.unwrap();
        assert_eq!(routes.iter().map(|r| r.id).collect::<Vec<_>>(), vec![5]);

        // Removing frees a slot for the fourth route.
        let removed = client.remove_route(2).await.unwrap().unwrap();
        assert_eq!(removed.id, 2);

        let routes = client.routes(Some(monday)).await.unwrap();
        assert_eq!(routes.iter().map(|r| r.id).collect::<Vec<_>>(), vec![1, 3, 4]);

        assert!(client.remove_route(2).await.unwrap().is_none());
        assert!(client.remove_route(99).await.unwrap().is_none());

        // Wrong credentials are rejected without detail.
        let rejected = kurierd::client::tcp::UnauthenticatedClient::insecure_from_addr(
            "localhost",
            addr.port(),
        )
        .await
        .unwrap()
        .login("test", "wrong")
        .await;
        assert!(matches!(rejected, Err(KurierdError::Unauthenticated)));

        // Notify shutdown
        shutdown.notify_one();

        // Wait graceful shutdown
        server_handler.await.unwrap().unwrap();
    });
}
