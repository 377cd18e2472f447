use std::cmp::Reverse;

use crate::dto::leaderboard::LeaderboardEntry;
use crate::models::Player;

/// Sorts descending by `key`, keeping the input order of equal keys.
///
/// Every standings table goes through here so medal tables and the player
/// leaderboard share the same tie-break behaviour.
pub fn rank<T, K, F>(mut items: Vec<T>, key: F) -> Vec<T>
where
    K: Ord,
    F: Fn(&T) -> K,
{
    items.sort_by_cached_key(|item| Reverse(key(item)));
    items
}

/// Pairs ranked items with their 1-based row position.
pub fn positioned<T>(items: Vec<T>) -> impl Iterator<Item = (i64, T)> {
    (1..).zip(items)
}

/// Player standings by store-computed total score.
pub fn rank_players(players: Vec<Player>, limit: Option<usize>) -> Vec<LeaderboardEntry> {
    let ranked = rank(players, |player| player.total_score);

    positioned(ranked)
        .take(limit.unwrap_or(usize::MAX))
        .map(|(rank, player)| LeaderboardEntry {
            rank,
            player_id: player.player_id,
            name: player.name,
            total_score: player.total_score,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;
    use uuid::Uuid;

    fn player(name: &str, score: i64) -> Player {
        Player {
            player_id: Uuid::new_v4(),
            name: name.to_string(),
            registration_status: "registered".to_string(),
            total_score: Decimal::from(score),
        }
    }

    #[test]
    fn test_rank_is_descending_and_stable() {
        let items = vec![("a", 1, 0), ("b", 3, 0), ("c", 1, 0), ("d", 3, 1)];
        let ranked = rank(items, |&(_, first, second)| (first, second));
        let names: Vec<&str> = ranked.iter().map(|(name, _, _)| *name).collect();
        assert_eq!(names, vec!["d", "b", "a", "c"]);
    }

    #[test]
    fn test_rank_keeps_input_order_for_identical_keys() {
        let items: Vec<(usize, u32)> = (0..20).map(|i| (i, 7)).collect();
        let ranked = rank(items.clone(), |&(_, key)| key);
        assert_eq!(ranked, items);
    }

    #[test]
    fn test_rank_players_assigns_positions() {
        let players = vec![player("Ada", 10), player("Bo", 25), player("Cy", 10)];
        let entries = rank_players(players, None);

        let rows: Vec<(i64, &str)> = entries.iter().map(|e| (e.rank, e.name.as_str())).collect();
        assert_eq!(rows, vec![(1, "Bo"), (2, "Ada"), (3, "Cy")]);
    }

    #[test]
    fn test_rank_players_limit() {
        let players = (0..15).map(|i| player(&format!("p{i}"), i)).collect();
        let entries = rank_players(players, Some(10));
        assert_eq!(entries.len(), 10);
        assert_eq!(entries[0].name, "p14");
        assert_eq!(entries[9].rank, 10);
    }
}
