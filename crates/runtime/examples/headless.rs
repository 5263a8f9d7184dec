//! Headless demo: run the standard game for a few seconds of dev-speed
//! time, prestige once, and print the resulting snapshot.
//!
//! ```sh
//! cargo run -p crumbs-runtime --example headless
//! ```

use crumbs_content::{DIVINITY, layers::divinity, standard_game};
use crumbs_core::num;
use crumbs_runtime::{Command, GameSession, RuntimeConfig, TickDriver};
use rust_decimal::Decimal;

#[tokio::main(flavor = "current_thread")]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let session = GameSession::new(standard_game());
    let config = RuntimeConfig::default();
    let driver = TickDriver::new(session, &config);
    let handle = driver.handle();
    let task = tokio::spawn(driver.run());

    // Prestige the opening crumbs into divinity, buy the first upgrade,
    // then let the game run hot for a moment.
    handle
        .send(Command::PressResetButton { layer: DIVINITY })
        .await;
    handle
        .send(Command::PurchaseUpgrade {
            layer: DIVINITY,
            index: divinity::ABSORBING_POINTS,
        })
        .await;
    handle
        .send(Command::SetDevSpeed(Decimal::from(100u32)))
        .await;

    tokio::time::sleep(std::time::Duration::from_secs(2)).await;

    if let Some(view) = handle.snapshot().await {
        for layer in &view.layers {
            println!(
                "{:<12} {:>10} {} (best {}, total {}, {}/s)",
                layer.name,
                num::format(layer.value),
                layer.resource_name,
                num::format(layer.best),
                num::format(layer.total),
                num::format(layer.rate),
            );
        }
        println!("time played: {}", num::format_time(view.time_played));
    }

    handle.shutdown().await;
    task.await.expect("driver task panicked");
}
