pub mod events;
pub mod leaderboard;
pub mod medals;
pub mod picks;
