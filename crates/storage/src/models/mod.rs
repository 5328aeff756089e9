mod account;
mod announcement;
mod application;
mod category;
mod contact;
mod event;
mod game;
mod judge;
mod news;
mod player;

pub use account::{Account, AccountRole};
pub use announcement::Announcement;
pub use application::{Application, ApplicationStatus, ParseStatusError};
pub use category::Category;
pub use contact::ContactMessage;
pub use event::Event;
pub use game::Game;
pub use judge::{Judge, JudgeAssignment, JudgeAssignmentDetail};
pub use news::News;
pub use player::{Player, PlayerWithRefs};
