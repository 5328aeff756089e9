pub mod account;
pub mod announcement;
pub mod application;
pub mod category;
pub mod common;
pub mod contact;
pub mod event;
pub mod game;
pub mod judge;
pub mod news;
pub mod player;
