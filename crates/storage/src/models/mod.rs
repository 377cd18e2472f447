pub mod athlete;
pub mod country;
pub mod outcome;
pub mod pick;
pub mod player;

pub use athlete::Athlete;
pub use country::Country;
pub use outcome::{OutcomeRecord, Podium, PodiumSlot};
pub use pick::Pick;
pub use player::Player;
