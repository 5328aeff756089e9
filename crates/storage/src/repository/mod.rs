pub mod account;
pub mod announcement;
pub mod application;
pub mod category;
pub mod contact;
pub mod event;
pub mod game;
pub mod judge;
pub mod news;
pub mod player;
pub mod revoked_token;

pub use account::AccountRepository;
pub use announcement::AnnouncementRepository;
pub use application::ApplicationRepository;
pub use category::CategoryRepository;
pub use contact::ContactRepository;
pub use event::EventRepository;
pub use game::GameRepository;
pub use judge::JudgeRepository;
pub use news::NewsRepository;
pub use player::PlayerRepository;
pub use revoked_token::RevokedTokenRepository;
