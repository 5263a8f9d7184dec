//! The shipped layer set.
//!
//! Three tiers: crumbs accumulate passively, divinity prestiges out of
//! crumbs, and cultivation sits above divinity as a mastery currency.
//! Layer ids are fixed constants; the tree and branch list live here so
//! the whole set is assembled and validated in one place.

pub mod crumbs;
pub mod cultivation;
pub mod divinity;

pub use crumbs::CRUMBS;
pub use cultivation::CULTIVATION;
pub use divinity::DIVINITY;

use crumbs_core::{Content, GameConfig, TreeDef};

/// Builds the standard game.
///
/// The tree shows cultivation above divinity with no branch between them:
/// a divinity prestige must never touch cultivation progress. Crumbs is
/// not a tree node at all — it participates in every reset through its
/// reset policy instead.
pub fn standard_game() -> Content {
    let layers = vec![crumbs::layer(), cultivation::layer(), divinity::layer()];
    let tree = TreeDef::new(vec![vec![CULTIVATION], vec![DIVINITY]], vec![]);

    Content::new(layers, tree, GameConfig::default())
        .expect("standard layer set must validate")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crumbs_core::{GameState, LayerOracle, ResetParticipation};
    use rust_decimal_macros::dec;

    #[test]
    fn standard_game_validates() {
        let content = standard_game();
        assert_eq!(content.layers().len(), 3);
        assert!(content.by_slug("crumbs").is_some());
        assert!(content.by_slug("divinity").is_some());
        assert!(content.by_slug("cultivation").is_some());
    }

    #[test]
    fn fresh_game_starts_with_ten_crumbs() {
        let content = standard_game();
        let state = GameState::new(&content);
        let crumbs = state.layer(CRUMBS).unwrap();
        assert_eq!(crumbs.resource.value(), dec!(10));
    }

    #[test]
    fn crumbs_is_swept_by_every_reset() {
        let content = standard_game();
        let def = content.layer(CRUMBS).unwrap();
        assert_eq!(def.reset.participation, ResetParticipation::Always);
        assert_eq!(def.reset.on_cascade, dec!(10));
        assert_eq!(def.reset.on_drain, dec!(0));
    }

    #[test]
    fn divinity_prestiges_out_of_crumbs() {
        let content = standard_game();
        let conversion = content.layer(DIVINITY).unwrap().conversion.as_ref().unwrap();
        assert_eq!(conversion.base, CRUMBS);
    }
}
