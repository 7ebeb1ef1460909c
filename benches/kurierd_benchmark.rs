// Benchmarks expect a locally running server:
//   kurierd --disable-tls server --config ./files/config.yaml
use criterion::{criterion_group, criterion_main, Criterion};

use kurierd::client::Api;

pub fn ping(c: &mut Criterion) {
    const NUM_PING: usize = 100;

    let addr = ("localhost", 7539);
    let rt = rt();

    c.bench_function("ping", |b| {
        b.iter(|| {
            rt.block_on(async {
                let mut client =
                    kurierd::client::tcp::UnauthenticatedClient::insecure_from_addr(addr.0, addr.1)
                        .await
                        .unwrap()
                        .login("kurier", "kurier")
                        .await
                        .unwrap();

                for _ in 0..NUM_PING {
                    client.ping().await.unwrap();
                }
            });
        });
    });
}

pub fn routes(c: &mut Criterion) {
    const NUM_LIST: usize = 10;

    let addr = ("localhost", 7539);
    let rt = rt();

    c.bench_function("routes", |b| {
        b.iter(|| {
            rt.block_on(async {
                let mut client =
                    kurierd::client::tcp::UnauthenticatedClient::insecure_from_addr(addr.0, addr.1)
                        .await
                        .unwrap()
                        .login("kurier", "kurier")
                        .await
                        .unwrap();

                let date = chrono::NaiveDate::from_ymd_opt(2025, 12, 1).unwrap();

                for _ in 0..NUM_LIST {
                    client.routes(Some(date)).await.unwrap();
                }
            });
        });
    });
}

fn rt() -> tokio::runtime::Runtime {
    tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .unwrap()
}

criterion_group!(benches, ping, routes);
criterion_main!(benches);
