pub mod announcements;
pub mod applications;
pub mod auth;
pub mod categories;
pub mod contact;
pub mod events;
pub mod games;
pub mod health;
pub mod judge_panel;
pub mod judges;
pub mod news;
pub mod players;
