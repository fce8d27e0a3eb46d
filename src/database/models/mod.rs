pub mod calf;
pub mod diarrhea;
pub mod establishment;
pub mod event;
pub mod herd;
pub mod mother;
pub mod treatment;
pub mod user;

pub use calf::Calf;
pub use diarrhea::DiarrheaEpisode;
pub use establishment::Establishment;
pub use event::Event;
pub use herd::Herd;
pub use mother::Mother;
pub use treatment::Treatment;
pub use user::User;
