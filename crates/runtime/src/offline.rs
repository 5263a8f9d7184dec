//! Offline catch-up.
//!
//! When a save comes back after real time away, the elapsed wall time is
//! credited as one large tick — capped, and scaled by the configured
//! efficiency, so leaving a tab closed for a week is not the dominant
//! strategy.

use chrono::{DateTime, Utc};
use crumbs_core::{Decimal, ExecuteError, num};

use crate::config::RuntimeConfig;
use crate::session::GameSession;

/// What the catch-up credited, for display ("Offline Time: 2h 13m").
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct OfflineReport {
    /// Wall time since the save was written.
    pub elapsed_seconds: Decimal,
    /// Scaled time actually credited to the game.
    pub applied_seconds: Decimal,
}

impl OfflineReport {
    pub fn display_elapsed(&self) -> String {
        num::format_time(self.elapsed_seconds)
    }
}

/// Credits time elapsed since `saved_at` to the session.
///
/// Bypasses pause and dev speed: offline time is unscaled by debug
/// controls. A save from the future credits nothing.
pub fn catch_up(
    session: &mut GameSession,
    saved_at: DateTime<Utc>,
    now: DateTime<Utc>,
    config: &RuntimeConfig,
) -> Result<OfflineReport, ExecuteError> {
    let elapsed_seconds = Decimal::from((now - saved_at).num_seconds().max(0));
    let capped = elapsed_seconds.min(Decimal::from(config.max_offline_seconds));
    let applied_seconds = capped * config.offline_efficiency;

    if applied_seconds > Decimal::ZERO {
        session.apply_raw_tick(applied_seconds)?;
        tracing::info!(
            elapsed = %num::format_time(elapsed_seconds),
            credited = %num::format_time(applied_seconds),
            "offline catch-up applied"
        );
    }

    Ok(OfflineReport {
        elapsed_seconds,
        applied_seconds,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeDelta;
    use crumbs_core::{Content, GameConfig, LayerDef, LayerId, TreeDef};
    use rust_decimal_macros::dec;

    const MAIN: LayerId = LayerId(0);

    fn session() -> GameSession {
        let mut main = LayerDef::new(MAIN, "main", "Main");
        main.base_rate = dec!(1);
        let content =
            Content::new(vec![main], TreeDef::default(), GameConfig::default()).unwrap();
        GameSession::new(content)
    }

    fn config(max: u64, efficiency: Decimal) -> RuntimeConfig {
        RuntimeConfig {
            max_offline_seconds: max,
            offline_efficiency: efficiency,
            ..RuntimeConfig::default()
        }
    }

    #[test]
    fn credits_elapsed_time() {
        let mut session = session();
        let now = Utc::now();
        let report = catch_up(
            &mut session,
            now - TimeDelta::seconds(100),
            now,
            &config(1000, dec!(1)),
        )
        .unwrap();

        assert_eq!(report.applied_seconds, dec!(100));
        assert_eq!(
            session.state().layer(MAIN).unwrap().resource.value(),
            dec!(100)
        );
    }

    #[test]
    fn cap_and_efficiency_limit_the_credit() {
        let mut session = session();
        let now = Utc::now();
        let report = catch_up(
            &mut session,
            now - TimeDelta::seconds(10_000),
            now,
            &config(1000, dec!(0.5)),
        )
        .unwrap();

        assert_eq!(report.elapsed_seconds, dec!(10000));
        assert_eq!(report.applied_seconds, dec!(500));
    }

    #[test]
    fn future_saves_credit_nothing() {
        let mut session = session();
        let now = Utc::now();
        let report = catch_up(
            &mut session,
            now + TimeDelta::seconds(60),
            now,
            &config(1000, dec!(1)),
        )
        .unwrap();

        assert_eq!(report.applied_seconds, dec!(0));
        assert_eq!(
            session.state().layer(MAIN).unwrap().resource.value(),
            dec!(0)
        );
    }
}
