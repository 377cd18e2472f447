pub mod athlete;
pub mod country;
pub mod event;
pub mod pick;
pub mod player;
